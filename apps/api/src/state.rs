use std::sync::{Arc, Mutex};

use sqlx::PgPool;

use crate::apply::CancelToken;
use crate::config::Config;
use crate::jobs::JobSource;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
    pub config: Config,
    /// Pluggable posting source. Default: FixtureJobSource. A live board
    /// integration swaps this without touching the matcher.
    pub job_source: Arc<dyn JobSource>,
    /// Cancellation handle for the auto-apply batch currently in flight, if any.
    pub batch_cancel: Arc<Mutex<Option<CancelToken>>>,
}
