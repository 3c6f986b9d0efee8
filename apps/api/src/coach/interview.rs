//! Mock interview — a rotating question bank plus LLM answer feedback with a
//! canned fallback, so practice sessions never dead-end on an API failure.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::coach::prompts::{FEEDBACK_PROMPT_TEMPLATE, FEEDBACK_SYSTEM};
use crate::llm_client::LlmClient;

const TECHNICAL_QUESTIONS: &[&str] = &[
    "Explain how you would implement a binary search tree.",
    "How would you design a rate limiter?",
    "Explain the difference between REST and GraphQL.",
    "How would you optimize a slow database query?",
    "Explain how garbage collection works in JavaScript.",
];

const BEHAVIORAL_QUESTIONS: &[&str] = &[
    "Tell me about a challenging project you worked on.",
    "How do you handle tight deadlines?",
    "Describe a time when you had to work with a difficult team member.",
    "How do you stay updated with new technologies?",
    "Tell me about a time when you had to learn something quickly.",
];

const SYSTEM_DESIGN_QUESTIONS: &[&str] = &[
    "How would you design a scalable chat application?",
    "Design a distributed cache system.",
    "How would you build a real-time analytics system?",
    "Design a content delivery network (CDN).",
    "How would you design a recommendation system?",
];

/// Unknown question types fall back to the technical bank rather than
/// erroring.
fn question_bank(question_type: &str) -> &'static [&'static str] {
    match question_type {
        "behavioral" => BEHAVIORAL_QUESTIONS,
        "system-design" => SYSTEM_DESIGN_QUESTIONS,
        _ => TECHNICAL_QUESTIONS,
    }
}

/// Indexes wrap modulo the bank length, so the client can increment forever.
pub fn question_for(question_type: &str, index: usize) -> &'static str {
    let bank = question_bank(question_type);
    bank[index % bank.len()]
}

/// Structured feedback on one practice answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerFeedback {
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub analysis: String,
}

/// Generic feedback served when the LLM is unavailable. Deliberately bland —
/// it applies to any answer.
pub fn simulated_feedback() -> AnswerFeedback {
    AnswerFeedback {
        strengths: vec![
            "Clear and structured explanation".to_string(),
            "Good technical understanding".to_string(),
            "Provided practical examples".to_string(),
        ],
        improvements: vec![
            "Could elaborate more on edge cases".to_string(),
            "Consider adding time/space complexity analysis".to_string(),
            "Include more real-world applications".to_string(),
        ],
        analysis: "Your answer demonstrates good understanding of the core concepts. \
            You explained the main points clearly and provided some good examples. \
            To make your answer even stronger, consider discussing edge cases and \
            performance implications. Overall, this is a solid response that shows \
            your technical knowledge."
            .to_string(),
    }
}

/// LLM-generated feedback with the simulated fallback: any completion or
/// parse failure degrades to canned feedback instead of an error, keeping
/// the endpoint always available.
pub async fn feedback_for_answer(
    llm: &LlmClient,
    answer: &str,
    question_type: &str,
) -> AnswerFeedback {
    let prompt = FEEDBACK_PROMPT_TEMPLATE
        .replace("{question_type}", question_type)
        .replace("{answer}", answer);

    match llm
        .complete_json::<AnswerFeedback>(&prompt, FEEDBACK_SYSTEM)
        .await
    {
        Ok(feedback) => feedback,
        Err(e) => {
            warn!("LLM feedback failed, serving simulated feedback: {e}");
            simulated_feedback()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_bank_serves_its_own_questions() {
        assert_eq!(
            question_for("technical", 0),
            "Explain how you would implement a binary search tree."
        );
        assert_eq!(
            question_for("behavioral", 0),
            "Tell me about a challenging project you worked on."
        );
        assert_eq!(
            question_for("system-design", 1),
            "Design a distributed cache system."
        );
    }

    #[test]
    fn test_index_wraps_modulo_bank_length() {
        assert_eq!(question_for("technical", 5), question_for("technical", 0));
        assert_eq!(question_for("behavioral", 12), question_for("behavioral", 2));
    }

    #[test]
    fn test_unknown_type_falls_back_to_technical() {
        assert_eq!(question_for("underwater", 0), question_for("technical", 0));
        assert_eq!(question_for("", 3), question_for("technical", 3));
    }

    #[test]
    fn test_banks_are_nonempty_and_distinct() {
        for bank in [
            TECHNICAL_QUESTIONS,
            BEHAVIORAL_QUESTIONS,
            SYSTEM_DESIGN_QUESTIONS,
        ] {
            assert!(!bank.is_empty());
        }
        assert_ne!(TECHNICAL_QUESTIONS[0], BEHAVIORAL_QUESTIONS[0]);
        assert_ne!(BEHAVIORAL_QUESTIONS[0], SYSTEM_DESIGN_QUESTIONS[0]);
    }

    #[test]
    fn test_feedback_deserializes_llm_shape() {
        let json = r#"{
            "strengths": ["Concrete example", "Covered trade-offs"],
            "improvements": ["Mention complexity"],
            "analysis": "Well structured answer."
        }"#;
        let feedback: AnswerFeedback = serde_json::from_str(json).unwrap();
        assert_eq!(feedback.strengths.len(), 2);
        assert_eq!(feedback.improvements.len(), 1);
        assert_eq!(feedback.analysis, "Well structured answer.");
    }

    #[test]
    fn test_simulated_feedback_is_complete() {
        let feedback = simulated_feedback();
        assert!(!feedback.strengths.is_empty());
        assert!(!feedback.improvements.is_empty());
        assert!(!feedback.analysis.is_empty());
    }
}
