//! Constraints value object.
//!
//! User-supplied soft limits included in every prompt. No field is required;
//! absence renders as the literal `Not specified`.

use serde::{Deserialize, Serialize};

/// Rendered in prompts for every absent or empty constraint field.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Soft limits attached to a problem statement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<String>,

    /// Ordered list of stakeholder names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stakeholders: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

impl Constraints {
    /// Renders the constraints block embedded in both prompts.
    ///
    /// Empty strings and empty stakeholder lists render as `Not specified`,
    /// matching absent fields.
    pub fn render(&self) -> String {
        format!(
            "- Budget: {}\n- Timeframe: {}\n- Stakeholders: {}\n- Legal constraints: {}\n- Priority: {}",
            text_or_not_specified(self.budget.as_deref()),
            text_or_not_specified(self.timeframe.as_deref()),
            stakeholders_or_not_specified(self.stakeholders.as_deref()),
            text_or_not_specified(self.legal.as_deref()),
            text_or_not_specified(self.priority.as_deref()),
        )
    }
}

fn text_or_not_specified(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => NOT_SPECIFIED,
    }
}

fn stakeholders_or_not_specified(value: Option<&[String]>) -> String {
    match value {
        Some(names) if !names.is_empty() => names.join(", "),
        _ => NOT_SPECIFIED.to_string(),
    }
}
