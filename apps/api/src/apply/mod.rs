//! Application orchestration — the single-job apply operation and the
//! auto-apply batch that sequences it with rate-limit pacing, failure
//! isolation, and cooperative cancellation.

pub mod handlers;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tokio::sync::Notify;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::errors::AppError;
use crate::jobs::find_posting;
use crate::letter::generate_cover_letter;
use crate::llm_client::LlmClient;
use crate::models::application::{ApplicationRow, ApplicationWithJobRow};
use crate::models::posting::JobPostingRow;
use crate::profile::latest_profile;

// ────────────────────────────────────────────────────────────────────────────
// Cancellation
// ────────────────────────────────────────────────────────────────────────────

/// Cooperative cancellation for a running batch: checked before each job and
/// raced against each pacing delay, so a long batch stops within one
/// iteration of the request.
#[derive(Clone, Default)]
pub struct CancelToken {
    inner: Arc<CancelInner>,
}

#[derive(Default)]
struct CancelInner {
    cancelled: AtomicBool,
    notify: Notify,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation and wakes any pacing delay in progress.
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once cancellation has been requested.
    pub async fn cancelled(&self) {
        loop {
            // Register interest before re-checking the flag, otherwise a
            // cancel between the check and the await would be lost.
            let notified = self.inner.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

/// Sleeps for `delay` unless cancellation arrives first.
/// Returns false when the sleep was cut short.
async fn pacing_delay(delay: Duration, cancel: &CancelToken) -> bool {
    tokio::select! {
        _ = tokio::time::sleep(delay) => true,
        _ = cancel.cancelled() => false,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Single-job apply
// ────────────────────────────────────────────────────────────────────────────

/// Applies to one posting: fetch posting and current profile, synthesize a
/// cover letter, then atomically claim the posting and record the
/// application.
///
/// The conditional `applied = FALSE` update inside the transaction is the
/// guard against concurrent applies racing on the same posting: the loser
/// sees zero rows updated and no application row is written.
pub async fn apply_to_job(
    pool: &PgPool,
    llm: &LlmClient,
    job_id: Uuid,
) -> Result<ApplicationRow, AppError> {
    let posting = find_posting(pool, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    if posting.applied {
        return Err(AppError::Conflict(format!(
            "Job {job_id} has already been applied to"
        )));
    }

    let profile = latest_profile(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("No candidate profile on file".to_string()))?;

    // Never fails; worst case this is the fixed template.
    let cover_letter = generate_cover_letter(llm, &profile, &posting).await;

    let mut tx = pool.begin().await?;

    let claimed = sqlx::query(
        "UPDATE job_postings SET applied = TRUE WHERE id = $1 AND applied = FALSE",
    )
    .bind(job_id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    if claimed == 0 {
        // Lost a race since the fetch above; the transaction rolls back on drop.
        return Err(AppError::Conflict(format!(
            "Job {job_id} has already been applied to"
        )));
    }

    let application = sqlx::query_as::<_, ApplicationRow>(
        r#"
        INSERT INTO applications (id, job_id, profile_id, cover_letter)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(job_id)
    .bind(profile.id)
    .bind(&cover_letter)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    info!(
        "Applied to '{}' at {} (job {}, score {:.1})",
        posting.title, posting.company, job_id, posting.match_score
    );

    Ok(application)
}

// ────────────────────────────────────────────────────────────────────────────
// Auto-apply batch
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct BatchParams {
    #[serde(default = "default_min_match_score")]
    pub min_match_score: f64,
    #[serde(default = "default_max_applications")]
    pub max_applications: i64,
}

impl Default for BatchParams {
    fn default() -> Self {
        Self {
            min_match_score: default_min_match_score(),
            max_applications: default_max_applications(),
        }
    }
}

fn default_min_match_score() -> f64 {
    70.0
}

fn default_max_applications() -> i64 {
    10
}

/// One successful application within a batch.
#[derive(Debug, Serialize)]
pub struct BatchApplication {
    pub application_id: Uuid,
    pub job_id: Uuid,
    pub job_title: String,
    pub company: String,
    pub match_score: f64,
}

/// One posting the batch attempted and gave up on.
#[derive(Debug, Serialize)]
pub struct BatchSkip {
    pub job_id: Uuid,
    pub job_title: String,
    pub reason: String,
}

#[derive(Debug, Default, Serialize)]
pub struct BatchOutcome {
    pub applications: Vec<BatchApplication>,
    pub skipped: Vec<BatchSkip>,
    pub cancelled: bool,
}

/// Runs the auto-apply batch.
///
/// The working set is selected once up front: unapplied postings at or above
/// the score floor, highest score first, capped at `max_applications`.
/// Postings are attempted strictly in that order. A failed attempt is logged
/// and recorded as a skip, never aborting the batch. The pacing delay runs
/// between consecutive successful applications (and, when configured, after
/// failures too), as a cancellable timed suspension — other requests on the
/// same process keep being served throughout.
pub async fn run_auto_apply(
    pool: &PgPool,
    llm: &LlmClient,
    config: &Config,
    params: BatchParams,
    cancel: CancelToken,
) -> Result<BatchOutcome, AppError> {
    let working_set = eligible_postings(pool, params.min_match_score, params.max_applications).await?;

    if working_set.is_empty() {
        info!(
            "Auto-apply: no unapplied postings at or above {:.1}",
            params.min_match_score
        );
        return Ok(BatchOutcome::default());
    }

    info!(
        "Auto-apply: {} postings selected (min score {:.1}, cap {})",
        working_set.len(),
        params.min_match_score,
        params.max_applications
    );

    let delay = Duration::from_secs(config.auto_apply_delay_secs);
    let total = working_set.len();
    let mut outcome = BatchOutcome::default();

    for (index, posting) in working_set.into_iter().enumerate() {
        if cancel.is_cancelled() {
            outcome.cancelled = true;
            break;
        }

        let JobPostingRow {
            id: job_id,
            title,
            company,
            match_score,
            ..
        } = posting;
        let is_last = index + 1 == total;

        match apply_to_job(pool, llm, job_id).await {
            Ok(application) => {
                outcome.applications.push(BatchApplication {
                    application_id: application.id,
                    job_id,
                    job_title: title,
                    company,
                    match_score,
                });
                if !is_last && !pacing_delay(delay, &cancel).await {
                    outcome.cancelled = true;
                    break;
                }
            }
            Err(e) => {
                warn!("Auto-apply skipped '{title}' (job {job_id}): {e}");
                outcome.skipped.push(BatchSkip {
                    job_id,
                    job_title: title,
                    reason: e.to_string(),
                });
                if config.auto_apply_delay_after_failure
                    && !is_last
                    && !pacing_delay(delay, &cancel).await
                {
                    outcome.cancelled = true;
                    break;
                }
            }
        }
    }

    info!(
        "Auto-apply finished: {} applications, {} skipped{}",
        outcome.applications.len(),
        outcome.skipped.len(),
        if outcome.cancelled { ", cancelled" } else { "" }
    );

    Ok(outcome)
}

// ────────────────────────────────────────────────────────────────────────────
// Store
// ────────────────────────────────────────────────────────────────────────────

/// The batch working set: unapplied postings at or above the score floor,
/// highest score first. The secondary creation-time key makes equal scores
/// keep insertion order.
pub async fn eligible_postings(
    pool: &PgPool,
    min_match_score: f64,
    limit: i64,
) -> Result<Vec<JobPostingRow>, sqlx::Error> {
    sqlx::query_as::<_, JobPostingRow>(
        r#"
        SELECT * FROM job_postings
        WHERE applied = FALSE AND match_score >= $1
        ORDER BY match_score DESC, created_at ASC
        LIMIT $2
        "#,
    )
    .bind(min_match_score)
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Applications joined with posting title and company, newest first.
pub async fn list_applications(
    pool: &PgPool,
) -> Result<Vec<ApplicationWithJobRow>, sqlx::Error> {
    sqlx::query_as::<_, ApplicationWithJobRow>(
        r#"
        SELECT a.id, a.job_id, a.profile_id, a.cover_letter,
               a.application_date, a.status,
               j.title AS job_title, j.company
        FROM applications a
        JOIN job_postings j ON j.id = a.job_id
        ORDER BY a.application_date DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_params_defaults() {
        let params: BatchParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.min_match_score, 70.0);
        assert_eq!(params.max_applications, 10);
    }

    #[test]
    fn test_batch_params_overrides() {
        let params: BatchParams =
            serde_json::from_str(r#"{"min_match_score": 85.5, "max_applications": 3}"#).unwrap();
        assert_eq!(params.min_match_score, 85.5);
        assert_eq!(params.max_applications, 3);
    }

    #[tokio::test]
    async fn test_cancel_token_starts_live() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
    }

    #[tokio::test]
    async fn test_cancel_token_reports_cancellation() {
        let token = CancelToken::new();
        token.cancel();
        assert!(token.is_cancelled());
        // Must also resolve for waiters that subscribe after the fact.
        token.cancelled().await;
    }

    #[tokio::test]
    async fn test_cancel_token_wakes_waiter() {
        let token = CancelToken::new();
        let waiter = token.clone();
        let handle = tokio::spawn(async move { waiter.cancelled().await });
        token.cancel();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_pacing_delay_completes_without_cancellation() {
        let token = CancelToken::new();
        assert!(pacing_delay(Duration::from_secs(60), &token).await);
    }

    #[tokio::test]
    async fn test_pacing_delay_cut_short_by_cancellation() {
        let token = CancelToken::new();
        token.cancel();
        assert!(!pacing_delay(Duration::from_secs(60), &token).await);
    }
}
