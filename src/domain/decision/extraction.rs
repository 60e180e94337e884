//! JSON recovery from free-text model output.
//!
//! Models asked for "only JSON" still wrap their answer in markdown fences
//! or prose often enough that the raw text needs defensive scanning before
//! parsing.

use serde_json::Value;
use thiserror::Error;

/// No recoverable JSON object or array in the raw text.
#[derive(Debug, Error)]
#[error("failed to parse model output as JSON: {reason}")]
pub struct ExtractError {
    reason: String,
}

/// Recovers an embedded JSON payload from raw model output.
///
/// Tried in order: the interior of the first fenced code block (optionally
/// tagged `json`), then the greedy span from the first `{` to the last `}`
/// (or `[` to `]`), then the whole text. One parse attempt is made at
/// whichever stage matched; its failure is final.
///
/// The bracket fallback is a best-effort heuristic: a response containing
/// several JSON-like fragments, or prose with literal braces, yields a span
/// that is not valid JSON and the parse fails.
pub fn extract_json(raw: &str) -> Result<Value, ExtractError> {
    let candidate = fenced_block(raw)
        .or_else(|| bracket_span(raw))
        .unwrap_or(raw);

    serde_json::from_str(candidate).map_err(|e| ExtractError {
        reason: e.to_string(),
    })
}

/// Interior of the first ``` ... ``` block, tag stripped.
fn fenced_block(raw: &str) -> Option<&str> {
    let start = raw.find("```")?;
    let mut interior = &raw[start + 3..];
    if let Some(stripped) = interior.strip_prefix("json") {
        interior = stripped;
    }
    let end = interior.find("```")?;
    Some(interior[..end].trim())
}

/// Greedy first-open-to-last-close span, objects before arrays.
fn bracket_span(raw: &str) -> Option<&str> {
    for (open, close) in [('{', '}'), ('[', ']')] {
        if let (Some(start), Some(end)) = (raw.find(open), raw.rfind(close)) {
            if start < end {
                return Some(&raw[start..=end]);
            }
        }
    }
    None
}
