use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A candidate profile extracted from one uploaded résumé.
///
/// `source_text` is retained verbatim for auditing and as the input to the
/// seniority-bonus check at match time. Rows are immutable after insert.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateProfileRow {
    pub id: Uuid,
    pub filename: String,
    pub source_text: String,
    pub skills: Vec<String>,
    pub experience: Vec<String>,
    pub education: Vec<String>,
    pub summary: String,
    pub created_at: DateTime<Utc>,
}
