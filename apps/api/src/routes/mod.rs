pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::coach;
use crate::search;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Job search API
        .route("/api/v1/jobs/search", post(search::handlers::handle_search))
        .route(
            "/api/v1/jobs/compare",
            post(search::handlers::handle_compare),
        )
        // Coach API
        .route(
            "/api/v1/coach/insights",
            post(coach::handlers::handle_insights),
        )
        .route(
            "/api/v1/coach/interview-prep",
            post(coach::handlers::handle_interview_prep),
        )
        .route(
            "/api/v1/coach/recommendations",
            post(coach::handlers::handle_recommendations),
        )
        .route(
            "/api/v1/coach/mock-interview",
            get(coach::handlers::handle_interview_question)
                .post(coach::handlers::handle_interview_feedback),
        )
        .with_state(state)
}
