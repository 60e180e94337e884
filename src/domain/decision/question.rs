//! Clarifying question model.

use serde::{Deserialize, Serialize};

/// A model-generated question intended to narrow ambiguity before package
/// production. Ids are opaque and unique within one response; the UI keys
/// collected answers by them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClarifyingQuestion {
    pub id: String,
    pub question: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_from_model_output() {
        let json = r#"[{"id": "q1", "question": "What is the expected ROI?"}]"#;
        let questions: Vec<ClarifyingQuestion> = serde_json::from_str(json).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].id, "q1");
        assert_eq!(questions[0].question, "What is the expected ROI?");
    }

    #[test]
    fn rejects_missing_question_field() {
        let json = r#"[{"id": "q1"}]"#;
        let result: Result<Vec<ClarifyingQuestion>, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
