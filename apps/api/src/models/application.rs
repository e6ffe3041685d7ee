use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A submitted application. Created exactly once per successful apply
/// operation, immutable thereafter. Status tracking beyond "applied" is
/// out of scope.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub profile_id: Uuid,
    pub cover_letter: String,
    pub application_date: DateTime<Utc>,
    pub status: String,
}

/// An application joined with its posting's title and company, for listings.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ApplicationWithJobRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub profile_id: Uuid,
    pub cover_letter: String,
    pub application_date: DateTime<Utc>,
    pub status: String,
    pub job_title: String,
    pub company: String,
}
