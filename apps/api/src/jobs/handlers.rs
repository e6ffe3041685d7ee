//! Axum route handlers for posting search and listing.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::matching::{match_score, rank_postings};
use crate::models::posting::JobPostingRow;
use crate::profile::latest_profile;
use crate::state::AppState;

use super::{insert_posting, list_postings};

const LIST_LIMIT: i64 = 50;

#[derive(Debug, Deserialize)]
pub struct SearchJobsRequest {
    pub keywords: String,
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_location() -> String {
    "Remote".to_string()
}

fn default_max_results() -> usize {
    20
}

#[derive(Debug, Serialize)]
pub struct JobsResponse {
    pub count: usize,
    pub jobs: Vec<JobPostingRow>,
}

/// POST /api/v1/jobs/search
///
/// Fetches raw postings from the configured source and scores each one
/// against the latest profile. Scores are fixed at creation: re-running a
/// search after uploading a new résumé creates new rows with new scores but
/// never rescores old ones.
pub async fn handle_search_jobs(
    State(state): State<AppState>,
    Json(request): Json<SearchJobsRequest>,
) -> Result<Json<JobsResponse>, AppError> {
    if request.keywords.trim().is_empty() {
        return Err(AppError::Validation("keywords cannot be empty".to_string()));
    }

    let profile = latest_profile(&state.db).await?.ok_or_else(|| {
        AppError::Validation("Upload a résumé before searching for jobs".to_string())
    })?;

    let raw_postings = state
        .job_source
        .search(&request.keywords, &request.location, request.max_results)
        .await?;

    let mut jobs = Vec::with_capacity(raw_postings.len());
    for raw in &raw_postings {
        let score = match_score(
            &profile.skills,
            &profile.source_text,
            &raw.description,
            &raw.requirements,
        );
        jobs.push(insert_posting(&state.db, raw, score).await?);
    }

    rank_postings(&mut jobs);

    info!(
        "Captured {} postings for '{}' against profile {}",
        jobs.len(),
        request.keywords,
        profile.id
    );

    Ok(Json(JobsResponse {
        count: jobs.len(),
        jobs,
    }))
}

/// GET /api/v1/jobs
///
/// Stored postings ranked by match score, limited to the top 50.
pub async fn handle_list_jobs(
    State(state): State<AppState>,
) -> Result<Json<JobsResponse>, AppError> {
    let jobs = list_postings(&state.db, LIST_LIMIT).await?;
    Ok(Json(JobsResponse {
        count: jobs.len(),
        jobs,
    }))
}
