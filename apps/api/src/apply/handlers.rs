//! Axum route handlers for applying and for the auto-apply batch.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::ApplicationWithJobRow;
use crate::state::AppState;

use super::{
    apply_to_job, list_applications, run_auto_apply, BatchOutcome, BatchParams, CancelToken,
};

#[derive(Debug, Serialize)]
pub struct ApplyJobResponse {
    pub application_id: Uuid,
    pub job_id: Uuid,
    pub cover_letter: String,
}

/// POST /api/v1/jobs/:job_id/apply
pub async fn handle_apply_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<ApplyJobResponse>, AppError> {
    let application = apply_to_job(&state.db, &state.llm, job_id).await?;

    Ok(Json(ApplyJobResponse {
        application_id: application.id,
        job_id,
        cover_letter: application.cover_letter,
    }))
}

#[derive(Debug, Serialize)]
pub struct ApplicationsResponse {
    pub count: usize,
    pub applications: Vec<ApplicationWithJobRow>,
}

/// GET /api/v1/applications
pub async fn handle_list_applications(
    State(state): State<AppState>,
) -> Result<Json<ApplicationsResponse>, AppError> {
    let applications = list_applications(&state.db).await?;
    Ok(Json(ApplicationsResponse {
        count: applications.len(),
        applications,
    }))
}

/// POST /api/v1/auto-apply
///
/// Runs the batch inline within this request. The pacing delays are
/// cooperative suspensions, so other requests keep being served; a second
/// batch request while one is running is rejected rather than raced.
pub async fn handle_auto_apply(
    State(state): State<AppState>,
    params: Option<Json<BatchParams>>,
) -> Result<Json<BatchOutcome>, AppError> {
    let Json(params) = params.unwrap_or(Json(BatchParams::default()));

    let cancel = CancelToken::new();
    {
        let mut slot = state.batch_cancel.lock().expect("batch cancel lock");
        if slot.is_some() {
            return Err(AppError::Conflict(
                "An auto-apply batch is already running".to_string(),
            ));
        }
        *slot = Some(cancel.clone());
    }

    let result = run_auto_apply(&state.db, &state.llm, &state.config, params, cancel).await;

    *state.batch_cancel.lock().expect("batch cancel lock") = None;

    result.map(Json)
}

#[derive(Debug, Serialize)]
pub struct CancelBatchResponse {
    pub cancelled: bool,
}

/// POST /api/v1/auto-apply/cancel
///
/// Signals the running batch, if any, to stop before its next job or
/// mid-delay. Responds with whether a batch was there to cancel.
pub async fn handle_cancel_auto_apply(State(state): State<AppState>) -> Json<CancelBatchResponse> {
    let cancelled = {
        let slot = state.batch_cancel.lock().expect("batch cancel lock");
        match slot.as_ref() {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    };

    Json(CancelBatchResponse { cancelled })
}
