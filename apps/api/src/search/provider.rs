//! Provider client — the single point of entry for outbound job search calls.
//!
//! ARCHITECTURAL RULE: handlers and the pipeline depend on the `JobProvider`
//! trait, never on reqwest. Production wires in `AdzunaProvider`; tests
//! script their own provider.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::search::filters::SearchRequest;
use crate::search::query::build_query;

const ADZUNA_API_BASE: &str = "https://api.adzuna.com/v1/api/jobs";

pub const MALFORMED_BODY: &str = "Invalid response from job search service";
pub const MALFORMED_SHAPE: &str = "Invalid response format from job search service";

/// Failure taxonomy for one search attempt. Every variant is caught at the
/// handler boundary and rendered as the uniform error envelope; only
/// `RateLimited` changes the surfaced HTTP status. No retries anywhere in
/// this pipeline — one attempt per caller-initiated request.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Failed to reach job search service: {0}")]
    Http(#[from] reqwest::Error),

    /// Body was not JSON, or its `results` field was not an array.
    #[error("{0}")]
    MalformedResponse(&'static str),

    #[error("Rate limit exceeded. Please try again in a few minutes.")]
    RateLimited,

    /// The provider's error body carried its own message; surface it as-is.
    #[error("{0}")]
    UpstreamReported(String),

    #[error("Job search API responded with status {0}")]
    UpstreamStatus(u16),

    #[error("Internal error: {0}")]
    Internal(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Raw provider payload
// ────────────────────────────────────────────────────────────────────────────

/// Raw provider search payload. Fields are deliberately loose — the provider
/// omits most of them freely and records must survive partial data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSearchResponse {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub results: Vec<RawJob>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawJob {
    /// Seen as both a string and a number in the wild.
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company: Option<RawCompany>,
    #[serde(default)]
    pub location: Option<RawLocation>,
    #[serde(default)]
    pub contract_time: Option<String>,
    #[serde(default)]
    pub contract_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub redirect_url: Option<String>,
    #[serde(default)]
    pub salary_min: Option<f64>,
    #[serde(default)]
    pub salary_max: Option<f64>,
    /// The provider emits 1/0, "1"/"0", or a bool depending on the record.
    #[serde(default, deserialize_with = "de_predicted_flag")]
    pub salary_is_predicted: bool,
    #[serde(default)]
    pub category: Option<RawCategory>,
    #[serde(default)]
    pub experience_level: Option<String>,
    #[serde(default)]
    pub work_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCompany {
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLocation {
    #[serde(default)]
    pub area: Option<Vec<String>>,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCategory {
    #[serde(default)]
    pub label: Option<String>,
}

fn de_predicted_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Bool(b)) => b,
        Some(serde_json::Value::Number(n)) => n.as_f64() == Some(1.0),
        Some(serde_json::Value::String(s)) => s == "1",
        _ => false,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Provider trait + Adzuna implementation
// ────────────────────────────────────────────────────────────────────────────

/// The outbound search seam, carried in `AppState` as `Arc<dyn JobProvider>`
/// so the pipeline and the comparison fan-out are testable without a live
/// provider.
#[async_trait]
pub trait JobProvider: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<RawSearchResponse, SearchError>;
}

pub struct AdzunaProvider {
    client: Client,
    app_id: String,
    app_key: String,
    country: String,
}

impl AdzunaProvider {
    pub fn new(app_id: String, app_key: String, country: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            app_id,
            app_key,
            country,
        }
    }

    /// Page number is a path segment in the provider's dialect, not a query
    /// parameter. Pages are 1-based.
    fn search_url(&self, page: u32) -> String {
        format!("{ADZUNA_API_BASE}/{}/search/{}", self.country, page.max(1))
    }
}

#[async_trait]
impl JobProvider for AdzunaProvider {
    async fn search(&self, request: &SearchRequest) -> Result<RawSearchResponse, SearchError> {
        let url = self.search_url(request.page);
        let params = build_query(request);

        debug!("Fetching jobs from {url}");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("app_id", self.app_id.as_str()),
                ("app_key", self.app_key.as_str()),
            ])
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        // The provider serves error bodies as JSON too; parse before
        // classifying so reported messages survive.
        let data: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
            warn!("Failed to parse provider response: {e}");
            SearchError::MalformedResponse(MALFORMED_BODY)
        })?;

        if !status.is_success() {
            return Err(classify_failure(status.as_u16(), &data));
        }

        if !data.get("results").is_some_and(|v| v.is_array()) {
            warn!("Provider response missing results array");
            return Err(SearchError::MalformedResponse(MALFORMED_SHAPE));
        }

        serde_json::from_value(data).map_err(|e| {
            warn!("Provider response failed to deserialize: {e}");
            SearchError::MalformedResponse(MALFORMED_SHAPE)
        })
    }
}

/// Classification order for non-2xx responses: rate limit first, then a
/// provider-reported message, then the bare status.
fn classify_failure(status: u16, body: &serde_json::Value) -> SearchError {
    if status == 429 {
        return SearchError::RateLimited;
    }
    if let Some(message) = body.get("error").and_then(serde_json::Value::as_str) {
        return SearchError::UpstreamReported(message.to_string());
    }
    SearchError::UpstreamStatus(status)
}
