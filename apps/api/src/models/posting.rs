use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A job posting captured from a posting source.
///
/// `match_score` is computed once against the latest profile when the row is
/// created and is never recomputed, even if a newer profile is uploaded
/// later. `posted_date` is an opaque label from the source ("2 days ago"),
/// never parsed as a date. `applied` flips to true at most once, through the
/// conditional update in the apply path.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobPostingRow {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub requirements: String,
    pub url: String,
    pub posted_date: String,
    pub match_score: f64,
    pub applied: bool,
    pub created_at: DateTime<Utc>,
}
