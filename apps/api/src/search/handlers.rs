//! Axum route handlers for the Job Search API.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::search::analytics::{self, FilterAnalytics};
use crate::search::filters::SearchRequest;
use crate::search::normalize::{self, JobRecord, PaginationInfo};
use crate::search::provider::{JobProvider, SearchError};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub jobs: Vec<JobRecord>,
    pub pagination: PaginationInfo,
    pub analytics: FilterAnalytics,
}

/// The uniform failure envelope. Same field layout as success plus the error
/// pair, so the UI renders a "no results" state without special-casing
/// failures.
#[derive(Debug, Serialize)]
pub struct SearchErrorEnvelope {
    pub error: &'static str,
    pub message: String,
    pub jobs: Vec<JobRecord>,
    pub pagination: PaginationInfo,
    pub analytics: FilterAnalytics,
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        error!("Job search failed: {self}");
        let status = match self {
            SearchError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(SearchErrorEnvelope {
            error: "Failed to search jobs",
            message: self.to_string(),
            jobs: Vec::new(),
            pagination: PaginationInfo::empty(),
            analytics: FilterAnalytics::default(),
        });
        (status, body).into_response()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs one full search: provider call, normalization, analytics. One
/// upstream request per invocation, no retries.
pub async fn run_search(
    provider: &dyn JobProvider,
    request: &SearchRequest,
) -> Result<SearchResponse, SearchError> {
    let raw = provider.search(request).await?;
    let jobs = normalize::normalize_results(&raw, request);
    let analytics = analytics::aggregate(&jobs);
    let pagination = PaginationInfo::for_page(request.page.max(1), raw.count);
    Ok(SearchResponse {
        jobs,
        pagination,
        analytics,
    })
}

/// POST /api/v1/jobs/search
///
/// Translates the filter set into the provider's dialect, issues one GET,
/// and returns normalized jobs with page-scoped analytics.
pub async fn handle_search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, SearchError> {
    let response = run_search(state.jobs.as_ref(), &request).await?;
    Ok(Json(response))
}

// ────────────────────────────────────────────────────────────────────────────
// Filter comparison
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct CompareBranch {
    pub name: String,
    pub filters: SearchRequest,
}

#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub branches: Vec<CompareBranch>,
}

#[derive(Debug, Serialize)]
pub struct BranchCount {
    pub name: String,
    pub total_results: u64,
    pub filters: SearchRequest,
}

#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub results: Vec<BranchCount>,
}

/// POST /api/v1/jobs/compare
///
/// Runs one pipeline invocation per branch concurrently and reports each
/// branch's total match count, in input order.
pub async fn handle_compare(
    State(state): State<AppState>,
    Json(request): Json<CompareRequest>,
) -> Result<Json<CompareResponse>, SearchError> {
    compare_branches(state.jobs.clone(), request.branches)
        .await
        .map(Json)
}

/// Fail-whole policy: a failure in any branch fails the entire comparison.
/// Presenting a partial table would read as "this filter combination has
/// zero matches", which is misleading.
pub async fn compare_branches(
    provider: Arc<dyn JobProvider>,
    branches: Vec<CompareBranch>,
) -> Result<CompareResponse, SearchError> {
    let tasks: Vec<_> = branches
        .into_iter()
        .map(|branch| {
            let provider = provider.clone();
            tokio::spawn(async move {
                let response = run_search(provider.as_ref(), &branch.filters).await?;
                Ok::<_, SearchError>(BranchCount {
                    name: branch.name,
                    total_results: response.pagination.total_results,
                    filters: branch.filters,
                })
            })
        })
        .collect();

    let mut results = Vec::with_capacity(tasks.len());
    for task in tasks {
        let count = task
            .await
            .map_err(|e| SearchError::Internal(format!("comparison branch panicked: {e}")))??;
        results.push(count);
    }

    Ok(CompareResponse { results })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::to_bytes;
    use serde_json::json;

    use crate::search::provider::{RawJob, RawSearchResponse, MALFORMED_BODY};

    /// Scripted provider: behavior keyed off the request's query string so
    /// concurrent branches stay deterministic.
    struct StubProvider;

    #[async_trait]
    impl JobProvider for StubProvider {
        async fn search(&self, request: &SearchRequest) -> Result<RawSearchResponse, SearchError> {
            match request.query.as_str() {
                "boom" => Err(SearchError::MalformedResponse(MALFORMED_BODY)),
                "limit" => Err(SearchError::RateLimited),
                _ => Ok(RawSearchResponse {
                    count: 47,
                    results: vec![
                        serde_json::from_value(json!({
                            "id": "a-1",
                            "title": "Rust Engineer",
                            "company": {"display_name": "Acme Corp"},
                            "location": {"area": ["US", "CA", "San Francisco"]},
                            "contract_time": "full_time",
                            "contract_type": "permanent",
                            "description": "Build the pipeline",
                            "created": "2024-01-15T12:34:56Z",
                            "redirect_url": "https://example.com/job/1",
                            "salary_min": 90000,
                            "salary_max": 110000
                        }))
                        .unwrap(),
                        RawJob::default(),
                    ],
                }),
            }
        }
    }

    fn branch(name: &str, query: &str) -> CompareBranch {
        CompareBranch {
            name: name.to_string(),
            filters: SearchRequest {
                query: query.to_string(),
                ..Default::default()
            },
        }
    }

    #[tokio::test]
    async fn test_run_search_normalizes_and_paginates() {
        let request = SearchRequest {
            query: "rust".to_string(),
            work_type: Some("remote".to_string()),
            ..Default::default()
        };
        let response = run_search(&StubProvider, &request).await.unwrap();

        assert_eq!(response.jobs.len(), 2);
        assert_eq!(response.jobs[0].company, "Acme Corp");
        assert_eq!(
            response.jobs[0].salary.as_deref(),
            Some("$90,000 - $110,000/year")
        );
        // Sparse second record survives with placeholders.
        assert_eq!(response.jobs[1].company, "Company Not Listed");
        assert_eq!(response.jobs[1].location, "Location Not Specified");

        // count=47 at 20 per page → 3 pages.
        assert_eq!(response.pagination.total_pages, 3);
        assert_eq!(response.pagination.total_results, 47);
        assert_eq!(response.pagination.current_page, 1);
    }

    #[tokio::test]
    async fn test_run_search_analytics_are_page_scoped() {
        let request = SearchRequest {
            query: "rust".to_string(),
            work_type: Some("remote".to_string()),
            ..Default::default()
        };
        let response = run_search(&StubProvider, &request).await.unwrap();

        // Both records resolve work_type (record value or filter fallback).
        assert_eq!(response.analytics.work_types["remote"], 2);
        assert_eq!(response.analytics.contract_types["permanent"], 1);
        // No category on either record and none requested.
        assert!(response.analytics.categories.is_empty());
    }

    #[tokio::test]
    async fn test_provider_failure_surfaces_as_search_error() {
        let request = SearchRequest {
            query: "boom".to_string(),
            ..Default::default()
        };
        let err = run_search(&StubProvider, &request).await.unwrap_err();
        assert!(matches!(err, SearchError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_error_envelope_shape_and_status() {
        let response =
            SearchError::MalformedResponse(MALFORMED_BODY).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Failed to search jobs");
        assert_eq!(body["message"], MALFORMED_BODY);
        assert_eq!(body["jobs"], json!([]));
        assert_eq!(body["pagination"]["total_results"], 0);
        assert_eq!(body["pagination"]["results_per_page"], 20);
        assert_eq!(body["analytics"]["categories"], json!({}));
    }

    #[tokio::test]
    async fn test_rate_limit_surfaces_429() {
        let response = SearchError::RateLimited.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body["message"],
            "Rate limit exceeded. Please try again in a few minutes."
        );
    }

    #[tokio::test]
    async fn test_compare_reports_counts_in_input_order() {
        let provider: Arc<dyn JobProvider> = Arc::new(StubProvider);
        let response = compare_branches(
            provider,
            vec![
                branch("Current Filters", "rust"),
                branch("Remote Only", "rust remote"),
                branch("Last 7 Days", "rust recent"),
            ],
        )
        .await
        .unwrap();

        let names: Vec<&str> = response.results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Current Filters", "Remote Only", "Last 7 Days"]);
        assert!(response.results.iter().all(|r| r.total_results == 47));
    }

    #[tokio::test]
    async fn test_compare_fails_whole_when_any_branch_fails() {
        let provider: Arc<dyn JobProvider> = Arc::new(StubProvider);
        let err = compare_branches(
            provider,
            vec![branch("ok", "rust"), branch("broken", "boom")],
        )
        .await
        .unwrap_err();

        // The failing branch must not be silently reported as zero results.
        assert!(matches!(err, SearchError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_compare_rate_limited_branch_keeps_429_classification() {
        let provider: Arc<dyn JobProvider> = Arc::new(StubProvider);
        let err = compare_branches(
            provider,
            vec![branch("ok", "rust"), branch("limited", "limit")],
        )
        .await
        .unwrap_err();
        assert!(matches!(err, SearchError::RateLimited));
        assert_eq!(
            err.into_response().status(),
            StatusCode::TOO_MANY_REQUESTS
        );
    }
}
