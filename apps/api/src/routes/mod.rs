pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::apply::handlers as apply_handlers;
use crate::jobs::handlers as jobs_handlers;
use crate::profile::handlers as profile_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/profiles",
            post(profile_handlers::handle_upload_profile),
        )
        .route("/api/v1/jobs/search", post(jobs_handlers::handle_search_jobs))
        .route("/api/v1/jobs", get(jobs_handlers::handle_list_jobs))
        .route(
            "/api/v1/jobs/:job_id/apply",
            post(apply_handlers::handle_apply_job),
        )
        .route(
            "/api/v1/applications",
            get(apply_handlers::handle_list_applications),
        )
        .route("/api/v1/auto-apply", post(apply_handlers::handle_auto_apply))
        .route(
            "/api/v1/auto-apply/cancel",
            post(apply_handlers::handle_cancel_auto_apply),
        )
        .with_state(state)
}
