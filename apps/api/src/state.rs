use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::search::provider::JobProvider;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable job search provider. Production wires in `AdzunaProvider`;
    /// tests script their own.
    pub jobs: Arc<dyn JobProvider>,
    pub llm: LlmClient,
    #[allow(dead_code)]
    pub config: Config,
}
