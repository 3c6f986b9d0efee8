//! Axum route handlers for the Coach API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::coach::interview::{self, AnswerFeedback};
use crate::coach::prompts::{
    COACH_SYSTEM, INSIGHTS_PROMPT_TEMPLATE, INTERVIEW_PREP_PROMPT_TEMPLATE,
    RECOMMENDATIONS_PROMPT_TEMPLATE,
};
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct InsightsRequest {
    pub company: String,
    pub position: String,
    #[serde(default)]
    pub requirements: String,
}

#[derive(Debug, Serialize)]
pub struct InsightsResponse {
    pub insights: String,
}

#[derive(Debug, Deserialize)]
pub struct InterviewPrepRequest {
    pub position: String,
    pub company: String,
    #[serde(default)]
    pub requirements: String,
}

#[derive(Debug, Serialize)]
pub struct InterviewPrepResponse {
    pub questions: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationsRequest {
    pub position: String,
    pub company: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub requirements: String,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuestionParams {
    #[serde(rename = "type", default = "default_question_type")]
    pub question_type: String,
    #[serde(default)]
    pub index: usize,
}

fn default_question_type() -> String {
    "technical".to_string()
}

#[derive(Debug, Serialize)]
pub struct QuestionResponse {
    pub question: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub question_type: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/coach/insights
///
/// Free-text analysis of one job application.
pub async fn handle_insights(
    State(state): State<AppState>,
    Json(request): Json<InsightsRequest>,
) -> Result<Json<InsightsResponse>, AppError> {
    require_field(&request.position, "position")?;

    let prompt = INSIGHTS_PROMPT_TEMPLATE
        .replace("{company}", &request.company)
        .replace("{position}", &request.position)
        .replace("{requirements}", &request.requirements);

    let insights = state
        .llm
        .complete(&prompt, COACH_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("insight generation failed: {e}")))?;

    Ok(Json(InsightsResponse { insights }))
}

/// POST /api/v1/coach/interview-prep
///
/// Tailored interview questions; the LLM's numbered list is split into
/// discrete questions.
pub async fn handle_interview_prep(
    State(state): State<AppState>,
    Json(request): Json<InterviewPrepRequest>,
) -> Result<Json<InterviewPrepResponse>, AppError> {
    require_field(&request.position, "position")?;

    let prompt = INTERVIEW_PREP_PROMPT_TEMPLATE
        .replace("{position}", &request.position)
        .replace("{company}", &request.company)
        .replace("{requirements}", &request.requirements);

    let text = state
        .llm
        .complete(&prompt, COACH_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("interview prep failed: {e}")))?;

    Ok(Json(InterviewPrepResponse {
        questions: numbered_items(&text),
    }))
}

/// POST /api/v1/coach/recommendations
///
/// Strategic next-step recommendations as a flat list.
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Json(request): Json<RecommendationsRequest>,
) -> Result<Json<RecommendationsResponse>, AppError> {
    require_field(&request.position, "position")?;

    let prompt = RECOMMENDATIONS_PROMPT_TEMPLATE
        .replace("{position}", &request.position)
        .replace("{company}", &request.company)
        .replace("{status}", &request.status)
        .replace("{requirements}", &request.requirements);

    let text = state
        .llm
        .complete(&prompt, COACH_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("recommendation generation failed: {e}")))?;

    Ok(Json(RecommendationsResponse {
        recommendations: listed_items(&text),
    }))
}

/// GET /api/v1/coach/mock-interview
///
/// Serves the next practice question for a type; the index wraps around the
/// bank so callers can increment without bounds checking.
pub async fn handle_interview_question(
    Query(params): Query<QuestionParams>,
) -> Json<QuestionResponse> {
    Json(QuestionResponse {
        question: interview::question_for(&params.question_type, params.index),
    })
}

/// POST /api/v1/coach/mock-interview
///
/// Feedback on a practice answer. Always responds 200 with feedback: LLM
/// failures degrade to the simulated fallback rather than an error.
pub async fn handle_interview_feedback(
    State(state): State<AppState>,
    Json(request): Json<FeedbackRequest>,
) -> Result<Json<AnswerFeedback>, AppError> {
    require_field(&request.answer, "answer")?;
    require_field(&request.question_type, "question_type")?;

    let feedback =
        interview::feedback_for_answer(&state.llm, &request.answer, &request.question_type).await;

    Ok(Json(feedback))
}

fn require_field(value: &str, name: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} cannot be empty")));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// LLM list-output parsing
// ────────────────────────────────────────────────────────────────────────────

/// Keeps only numbered lines ("1. ...", "12. ...") and strips the numbering.
/// Preamble and commentary lines the model adds are dropped.
fn numbered_items(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| {
            let digits = line.chars().take_while(char::is_ascii_digit).count();
            digits > 0 && line[digits..].starts_with('.')
        })
        .map(|line| strip_numbering(line).to_string())
        .collect()
}

/// Keeps every non-empty line, numbering stripped where present.
fn listed_items(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| strip_numbering(line).to_string())
        .collect()
}

fn strip_numbering(line: &str) -> &str {
    let trimmed = line.trim();
    let digits = trimmed.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return trimmed;
    }
    match trimmed[digits..].strip_prefix('.') {
        Some(rest) => rest.trim_start(),
        None => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_items_keeps_numbered_lines_only() {
        let text = "Here are your questions:\n\
                    1. Why this company?\n\
                    2. Describe a hard bug you fixed.\n\
                    \n\
                    Good luck with the interview!";
        let items = numbered_items(text);
        assert_eq!(
            items,
            vec![
                "Why this company?".to_string(),
                "Describe a hard bug you fixed.".to_string(),
            ]
        );
    }

    #[test]
    fn test_numbered_items_handles_double_digit_numbering() {
        let text = "10. Tenth question\n11. Eleventh question";
        let items = numbered_items(text);
        assert_eq!(items, vec!["Tenth question", "Eleventh question"]);
    }

    #[test]
    fn test_numbered_items_empty_when_no_list() {
        assert!(numbered_items("I cannot generate questions.").is_empty());
    }

    #[test]
    fn test_listed_items_keeps_unnumbered_lines() {
        let text = "1. Follow up in a week\nPolish the portfolio\n\n2. Ask about team size";
        let items = listed_items(text);
        assert_eq!(
            items,
            vec![
                "Follow up in a week",
                "Polish the portfolio",
                "Ask about team size"
            ]
        );
    }

    #[test]
    fn test_strip_numbering_edge_cases() {
        assert_eq!(strip_numbering("3. Do the thing"), "Do the thing");
        assert_eq!(strip_numbering("  7.   Indented"), "Indented");
        // A year is not list numbering.
        assert_eq!(strip_numbering("2024 roadmap"), "2024 roadmap");
        assert_eq!(strip_numbering("no numbering"), "no numbering");
    }

    #[test]
    fn test_require_field_rejects_blank() {
        assert!(require_field("   ", "position").is_err());
        assert!(require_field("Engineer", "position").is_ok());
    }

    #[tokio::test]
    async fn test_interview_question_handler_wraps_bank_index() {
        let response = handle_interview_question(Query(QuestionParams {
            question_type: "behavioral".to_string(),
            index: 6,
        }))
        .await;
        // Index 6 in a bank of 5 wraps to the second question.
        assert_eq!(response.0.question, "How do you handle tight deadlines?");
    }

    #[test]
    fn test_question_params_default_to_first_technical() {
        let params: QuestionParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.question_type, "technical");
        assert_eq!(params.index, 0);

        let params: QuestionParams =
            serde_json::from_str(r#"{"type": "system-design", "index": 2}"#).unwrap();
        assert_eq!(params.question_type, "system-design");
        assert_eq!(params.index, 2);
    }
}
