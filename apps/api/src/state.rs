use std::sync::Arc;

use sqlx::PgPool;

use crate::fetcher::ContentFetcher;
use crate::llm_client::TextModel;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Production: `LlmClient`. Tests swap in a scripted model.
    pub model: Arc<dyn TextModel>,
    /// Production: `HttpContentFetcher` behind the content cache.
    pub fetcher: Arc<dyn ContentFetcher>,
}
