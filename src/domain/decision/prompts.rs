//! Prompt templates for the two generation call sites.

use std::collections::BTreeMap;

use super::Constraints;

/// System instruction for package production: strict JSON, no commentary,
/// no invented facts.
pub const PRODUCE_SYSTEM_INSTRUCTION: &str = "You are Consensus, a conservative and factual planning agent. ONLY return valid JSON matching the schema exactly. Do not include commentary, analysis text, or extra fields. If information is missing, use null or empty arrays but do not hallucinate facts.";

/// Fixed probe sentence for the diagnostic ping.
pub const DIAGNOSTIC_PROMPT: &str =
    "Say \"Consensus API test successful\" in exactly those words.";

/// Prompt asking for 2-4 clarifying questions as a JSON array.
pub fn clarify_prompt(problem: &str, constraints: &Constraints) -> String {
    format!(
        r#"You are Consensus, a conservative and factual planning agent. Based on the following problem and constraints, generate 2-4 clarifying questions that would help create a better decision package.

Problem: {problem}

Constraints:
{constraints}

Return ONLY a valid JSON array of questions, each with an "id" and "question" field. Example:
[{{"id": "q1", "question": "What is the expected ROI?"}}, {{"id": "q2", "question": "Who are the key decision makers?"}}]

Do not include any other text or explanation."#,
        problem = problem,
        constraints = constraints.render(),
    )
}

/// Prompt asking for a full decision package, embedding the schema, the
/// problem, the rendered constraints, and any collected answers.
pub fn produce_prompt(
    problem: &str,
    constraints: &Constraints,
    answers: Option<&BTreeMap<String, String>>,
) -> String {
    let mut answers_section = String::new();
    if let Some(answers) = answers.filter(|a| !a.is_empty()) {
        answers_section.push_str("\n\nClarifying Question Answers:");
        for (question, answer) in answers {
            answers_section.push_str(&format!("\n- {}: {}", question, answer));
        }
    }

    format!(
        r#"Generate a decision package for the following problem and constraints. Return ONLY valid JSON matching this exact structure:

{{
  "title": "<string - descriptive title for the decision>",
  "headline": "<string - one-line summary>",
  "summary": "<string - 2-3 sentence executive summary>",
  "options": [
    {{
      "id": "<string - unique id like opt1>",
      "title": "<string>",
      "description": "<string>",
      "pros": ["<string>", ...],
      "cons": ["<string>", ...],
      "estimated_cost": "<string like '$10,000-$50,000'>",
      "estimated_time_weeks": <number>,
      "success_probability": <number 0-100>
    }}
  ],
  "recommended_plan": [
    {{
      "step_number": <number starting at 1>,
      "action": "<string - specific action to take>",
      "owner": "<string - role responsible>",
      "estimated_time_days": <number>
    }}
  ],
  "scenarios": {{
    "best": "<string - best case outcome>",
    "expected": "<string - most likely outcome>",
    "worst": "<string - worst case outcome>"
  }},
  "stakeholder_messages": [
    {{
      "stakeholder": "<string - who to communicate to>",
      "channel": "<string - email/press/social/etc>",
      "tone": "<'formal'|'neutral'|'persuasive'>",
      "message": "<string - the actual message>"
    }}
  ],
  "metrics": [
    {{
      "metric_name": "<string>",
      "target": "<string>",
      "measure_frequency": "<string - daily/weekly/monthly>"
    }}
  ],
  "processing_notes": "<string or null>"
}}

Problem Description:
{problem}

Constraints:
{constraints}{answers}

Provide 3-5 realistic options with honest assessments. Be conservative with success probabilities. Create a practical step-by-step plan for the recommended approach."#,
        problem = problem,
        constraints = constraints.render(),
        answers = answers_section,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clarify_prompt_embeds_problem_and_constraints() {
        let constraints = Constraints {
            budget: Some("$500,000".to_string()),
            ..Default::default()
        };
        let prompt = clarify_prompt("Should we expand into Europe?", &constraints);

        assert!(prompt.contains("Problem: Should we expand into Europe?"));
        assert!(prompt.contains("- Budget: $500,000"));
        assert!(prompt.contains("- Timeframe: Not specified"));
        assert!(prompt.contains("JSON array"));
    }

    #[test]
    fn produce_prompt_embeds_schema_description() {
        let prompt = produce_prompt("A problem statement", &Constraints::default(), None);

        assert!(prompt.contains("\"success_probability\": <number 0-100>"));
        assert!(prompt.contains("\"recommended_plan\""));
        assert!(prompt.contains("Problem Description:\nA problem statement"));
        assert!(!prompt.contains("Clarifying Question Answers:"));
    }

    #[test]
    fn produce_prompt_appends_answers_after_constraints() {
        let mut answers = BTreeMap::new();
        answers.insert("q1".to_string(), "Around 40% margin".to_string());
        answers.insert("q2".to_string(), "The board decides".to_string());

        let prompt = produce_prompt("A problem statement", &Constraints::default(), Some(&answers));

        let constraints_pos = prompt.find("Constraints:").unwrap();
        let answers_pos = prompt.find("Clarifying Question Answers:").unwrap();
        assert!(answers_pos > constraints_pos);
        assert!(prompt.contains("- q1: Around 40% margin"));
        assert!(prompt.contains("- q2: The board decides"));
    }

    #[test]
    fn produce_prompt_skips_empty_answers_map() {
        let answers = BTreeMap::new();
        let prompt = produce_prompt("A problem statement", &Constraints::default(), Some(&answers));
        assert!(!prompt.contains("Clarifying Question Answers:"));
    }
}
