//! Posting sources and the posting store.
//!
//! `JobSource` is the seam between the pipeline and whatever board supplies
//! postings. The default `FixtureJobSource` synthesizes deterministic
//! results; a live search integration implements the same trait and swaps in
//! at startup without touching the matcher or the orchestrator.

pub mod handlers;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::posting::JobPostingRow;

/// A posting as returned by a source, before scoring and persistence.
#[derive(Debug, Clone)]
pub struct RawPosting {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub requirements: String,
    pub url: String,
    pub posted_date: String,
}

/// A source of job postings.
///
/// Carried in `AppState` as `Arc<dyn JobSource>`.
#[async_trait]
pub trait JobSource: Send + Sync {
    async fn search(
        &self,
        keywords: &str,
        location: &str,
        max_results: usize,
    ) -> Result<Vec<RawPosting>, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// FixtureJobSource — deterministic default
// ────────────────────────────────────────────────────────────────────────────

const FIXTURE_MAX: usize = 10;

const FIXTURE_TITLES: [&str; 5] = [
    "Software Engineer",
    "Full Stack Developer",
    "Backend Developer",
    "Frontend Developer",
    "DevOps Engineer",
];

const FIXTURE_COMPANIES: [&str; 8] = [
    "Google", "Microsoft", "Amazon", "Meta", "Netflix", "Uber", "Airbnb", "Spotify",
];

/// Synthesizes up to ten postings per search, rotating through fixed titles
/// and companies so output is fully deterministic for a given request.
pub struct FixtureJobSource;

#[async_trait]
impl JobSource for FixtureJobSource {
    async fn search(
        &self,
        keywords: &str,
        location: &str,
        max_results: usize,
    ) -> Result<Vec<RawPosting>, AppError> {
        let postings = (0..max_results.min(FIXTURE_MAX))
            .map(|i| {
                let title = match FIXTURE_TITLES.get(i) {
                    Some(t) => format!("{t} - {keywords}"),
                    None => format!("Senior {keywords} Developer"),
                };
                let company = FIXTURE_COMPANIES
                    .get(i)
                    .copied()
                    .unwrap_or("Tech Innovators Inc")
                    .to_string();
                RawPosting {
                    title,
                    company,
                    location: location.to_string(),
                    description: format!(
                        "We are looking for an experienced {keywords} developer to join our \
                        dynamic team. You will work on cutting-edge projects and collaborate \
                        with cross-functional teams."
                    ),
                    requirements: format!(
                        "5+ years experience with {keywords}, strong problem-solving skills, \
                        team player"
                    ),
                    url: format!("https://jobs.example.com/view/12345{i}"),
                    posted_date: "2 days ago".to_string(),
                }
            })
            .collect();

        Ok(postings)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Store
// ────────────────────────────────────────────────────────────────────────────

/// Persists one scored posting. The score is final: nothing ever updates it,
/// even if a newer profile arrives later.
pub async fn insert_posting(
    pool: &PgPool,
    raw: &RawPosting,
    match_score: f64,
) -> Result<JobPostingRow, sqlx::Error> {
    sqlx::query_as::<_, JobPostingRow>(
        r#"
        INSERT INTO job_postings
            (id, title, company, location, description, requirements,
             url, posted_date, match_score)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&raw.title)
    .bind(&raw.company)
    .bind(&raw.location)
    .bind(&raw.description)
    .bind(&raw.requirements)
    .bind(&raw.url)
    .bind(&raw.posted_date)
    .bind(match_score)
    .fetch_one(pool)
    .await
}

/// Finds a posting by identity.
pub async fn find_posting(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<JobPostingRow>, sqlx::Error> {
    sqlx::query_as::<_, JobPostingRow>("SELECT * FROM job_postings WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Stored postings, highest score first. Equal scores keep creation order.
pub async fn list_postings(pool: &PgPool, limit: i64) -> Result<Vec<JobPostingRow>, sqlx::Error> {
    sqlx::query_as::<_, JobPostingRow>(
        r#"
        SELECT * FROM job_postings
        ORDER BY match_score DESC, created_at ASC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixture_source_respects_max_results() {
        let postings = FixtureJobSource
            .search("rust", "Remote", 3)
            .await
            .unwrap();
        assert_eq!(postings.len(), 3);
    }

    #[tokio::test]
    async fn test_fixture_source_caps_at_ten() {
        let postings = FixtureJobSource
            .search("rust", "Remote", 50)
            .await
            .unwrap();
        assert_eq!(postings.len(), 10);
    }

    #[tokio::test]
    async fn test_fixture_titles_rotate_then_fall_back() {
        let postings = FixtureJobSource
            .search("rust", "Remote", 10)
            .await
            .unwrap();
        assert_eq!(postings[0].title, "Software Engineer - rust");
        assert_eq!(postings[4].title, "DevOps Engineer - rust");
        assert_eq!(postings[5].title, "Senior rust Developer");
    }

    #[tokio::test]
    async fn test_fixture_urls_are_distinct() {
        let postings = FixtureJobSource
            .search("rust", "Remote", 10)
            .await
            .unwrap();
        let mut urls: Vec<_> = postings.iter().map(|p| p.url.as_str()).collect();
        urls.sort_unstable();
        urls.dedup();
        assert_eq!(urls.len(), 10);
    }

    #[tokio::test]
    async fn test_fixture_descriptions_embed_keywords() {
        let postings = FixtureJobSource
            .search("embedded C", "Berlin", 1)
            .await
            .unwrap();
        assert!(postings[0].description.contains("embedded C"));
        assert!(postings[0].requirements.contains("embedded C"));
        assert_eq!(postings[0].location, "Berlin");
    }
}
