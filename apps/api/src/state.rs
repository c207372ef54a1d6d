use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::oracle::SuggestionOracle;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Pluggable suggestion oracle. Production: `AnthropicOracle`; tests
    /// inject stubs through the same seam.
    pub oracle: Arc<dyn SuggestionOracle>,
    /// Kept for handlers that need runtime settings; only startup reads it today.
    #[allow(dead_code)]
    pub config: Config,
}
