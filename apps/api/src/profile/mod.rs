//! Profile analysis — turns raw résumé text into a structured candidate profile.
//!
//! Primary path is one generative call with a fixed JSON contract; any
//! service failure falls through to the deterministic extractor in
//! [`fallback`]. The operation never fails outward: the caller always
//! receives a profile, worst case one built from pure text processing.

pub mod fallback;
pub mod handlers;
pub mod prompts;

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::llm_client::LlmClient;
use crate::models::profile::CandidateProfileRow;
use self::prompts::{ANALYSIS_PROMPT_TEMPLATE, ANALYSIS_SYSTEM};

/// Structured analysis of one résumé.
///
/// Field names are fixed by the analysis prompt contract. All fields default
/// so a partial model response still deserializes; the summary invariant is
/// restored afterwards if the model leaves it blank.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedProfile {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<String>,
    #[serde(default)]
    pub education: Vec<String>,
    #[serde(default)]
    pub summary: String,
}

/// Analyzes résumé text into a structured profile.
///
/// Never fails: any `LlmError` (unavailable, timeout, malformed output) is
/// absorbed by the deterministic fallback extractor. A blank summary from
/// the model is replaced with the truncation-based one so `summary` is
/// populated on every path.
pub async fn analyze_resume(llm: &LlmClient, text: &str) -> ExtractedProfile {
    let prompt = ANALYSIS_PROMPT_TEMPLATE.replace("{resume_text}", text);

    match llm.call_json::<ExtractedProfile>(&prompt, ANALYSIS_SYSTEM).await {
        Ok(mut profile) => {
            if profile.summary.trim().is_empty() {
                profile.summary = fallback::summarize(text);
            }
            profile
        }
        Err(e) => {
            warn!("Résumé analysis fell back to keyword extraction: {e}");
            fallback::extract_profile(text)
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Store
// ────────────────────────────────────────────────────────────────────────────

/// Persists an analyzed résumé as a new immutable profile row.
pub async fn insert_profile(
    pool: &PgPool,
    filename: &str,
    source_text: &str,
    analysis: &ExtractedProfile,
) -> Result<CandidateProfileRow, sqlx::Error> {
    sqlx::query_as::<_, CandidateProfileRow>(
        r#"
        INSERT INTO candidate_profiles
            (id, filename, source_text, skills, experience, education, summary)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(filename)
    .bind(source_text)
    .bind(&analysis.skills)
    .bind(&analysis.experience)
    .bind(&analysis.education)
    .bind(&analysis.summary)
    .fetch_one(pool)
    .await
}

/// Returns the most recently uploaded profile, if any. Matching and applying
/// always run against this row.
pub async fn latest_profile(pool: &PgPool) -> Result<Option<CandidateProfileRow>, sqlx::Error> {
    sqlx::query_as::<_, CandidateProfileRow>(
        "SELECT * FROM candidate_profiles ORDER BY created_at DESC LIMIT 1",
    )
    .fetch_optional(pool)
    .await
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracted_profile_deserializes_full_object() {
        let json = r#"{
            "skills": ["Rust", "PostgreSQL"],
            "experience": ["Backend Engineer, Acme, 2019-2023"],
            "education": ["B.S. Computer Science, 2015"],
            "summary": "Backend engineer with a storage focus."
        }"#;
        let profile: ExtractedProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.skills.len(), 2);
        assert_eq!(profile.experience.len(), 1);
        assert_eq!(profile.summary, "Backend engineer with a storage focus.");
    }

    #[test]
    fn test_extracted_profile_tolerates_missing_fields() {
        // The model occasionally drops fields; those default to empty and the
        // analyze path backfills the summary.
        let profile: ExtractedProfile = serde_json::from_str(r#"{"skills": ["Go"]}"#).unwrap();
        assert_eq!(profile.skills, vec!["Go".to_string()]);
        assert!(profile.experience.is_empty());
        assert!(profile.education.is_empty());
        assert!(profile.summary.is_empty());
    }

    #[test]
    fn test_extracted_profile_rejects_non_string_entries() {
        // Structured entries (objects instead of strings) must fail parsing
        // so the caller drops to the deterministic fallback.
        let json = r#"{"skills": ["ok"], "experience": [{"role": "Engineer"}]}"#;
        let result: Result<ExtractedProfile, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
