//! Decision package model and structural validation.
//!
//! The package is produced by the model as free-text JSON and gated by
//! [`validate_decision_package`] before anything downstream touches it. The
//! gate checks structure only: numeric fields are passed through unclamped
//! (a `success_probability` of -5 or 150 survives intact), and leaf fields
//! the gate is silent about are not range- or value-checked.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The structured artifact produced from a problem statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionPackage {
    pub title: String,
    pub headline: String,
    pub summary: String,
    pub options: Vec<DecisionOption>,
    pub recommended_plan: Vec<PlanStep>,
    pub scenarios: Scenarios,
    pub stakeholder_messages: Vec<StakeholderMessage>,
    pub metrics: Vec<Metric>,
    #[serde(default)]
    pub processing_notes: Option<String>,
}

/// One candidate course of action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionOption {
    /// Unique within the package.
    pub id: String,
    pub title: String,
    pub description: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub estimated_cost: String,
    pub estimated_time_weeks: f64,
    /// Model-supplied, nominally 0-100; not clamped or range-checked.
    pub success_probability: f64,
}

/// One step of the recommended plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanStep {
    /// Conventionally 1..N in order; ordering is not cross-checked.
    pub step_number: u32,
    pub action: String,
    pub owner: String,
    pub estimated_time_days: f64,
}

/// Best/expected/worst outcome narratives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenarios {
    pub best: String,
    pub expected: String,
    pub worst: String,
}

/// A drafted communication for one stakeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakeholderMessage {
    pub stakeholder: String,
    pub channel: String,
    /// Expected values: formal, neutral, persuasive. Carried as free text;
    /// the structural gate does not check it.
    pub tone: String,
    pub message: String,
}

/// A success metric with target and cadence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub metric_name: String,
    pub target: String,
    pub measure_frequency: String,
}

/// Structural check of a candidate decision package.
///
/// Returns `false` rather than erroring; callers treat a `false` result the
/// same as a parse failure and must reject the payload instead of rendering
/// partial data.
pub fn validate_decision_package(value: &Value) -> bool {
    let Some(pkg) = value.as_object() else {
        return false;
    };

    if !pkg.get("title").is_some_and(Value::is_string) {
        return false;
    }
    if !pkg.get("headline").is_some_and(Value::is_string) {
        return false;
    }
    if !pkg.get("summary").is_some_and(Value::is_string) {
        return false;
    }

    let Some(options) = pkg.get("options").and_then(Value::as_array) else {
        return false;
    };
    if !pkg.get("recommended_plan").is_some_and(Value::is_array) {
        return false;
    }
    if !pkg.get("stakeholder_messages").is_some_and(Value::is_array) {
        return false;
    }
    if !pkg.get("metrics").is_some_and(Value::is_array) {
        return false;
    }

    for option in options {
        if !is_present(option.get("id")) {
            return false;
        }
        if !is_present(option.get("title")) {
            return false;
        }
        if !is_present(option.get("description")) {
            return false;
        }
        if !option.get("pros").is_some_and(Value::is_array) {
            return false;
        }
        if !option.get("cons").is_some_and(Value::is_array) {
            return false;
        }
        if !option.get("success_probability").is_some_and(Value::is_number) {
            return false;
        }
    }

    let Some(scenarios) = pkg.get("scenarios").and_then(Value::as_object) else {
        return false;
    };
    scenarios.get("best").is_some_and(Value::is_string)
        && scenarios.get("expected").is_some_and(Value::is_string)
        && scenarios.get("worst").is_some_and(Value::is_string)
}

/// Non-empty check for required option fields: null, absent, empty strings,
/// zero and false all count as missing.
fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(_) => true,
    }
}
