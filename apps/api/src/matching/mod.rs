//! Job matching — pure, deterministic scoring of a candidate profile against
//! posting text. No I/O, no service calls: the score is a function of the
//! profile's skills, the profile's source text, and the posting's
//! description + requirements.

use crate::models::posting::JobPostingRow;

/// Score assigned when the profile carries no skills at all — a neutral
/// default, not a penalty.
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Keywords worth a +5 bonus each when present in BOTH the profile source
/// text and the posting text. Additive, not normalized.
pub const SENIORITY_KEYWORDS: [&str; 4] = ["senior", "lead", "manager", "architect"];

const SKILL_WEIGHT: f64 = 70.0;
const SENIORITY_BONUS: f64 = 5.0;
const MAX_SCORE: f64 = 100.0;

/// Computes the 0–100 match score for one (profile, posting) pair.
///
/// `base = matched_skills / total_skills * 70`, where a skill matches if it
/// occurs case-insensitively as a substring of description + requirements.
/// Each seniority keyword found in both the profile source text and the
/// posting adds 5. The result is clamped to 100.
pub fn match_score(
    skills: &[String],
    profile_text: &str,
    description: &str,
    requirements: &str,
) -> f64 {
    if skills.is_empty() {
        return NEUTRAL_SCORE;
    }

    let posting = format!("{description} {requirements}").to_lowercase();

    let matched = skills
        .iter()
        .filter(|skill| posting.contains(&skill.to_lowercase()))
        .count();
    let base = matched as f64 / skills.len() as f64 * SKILL_WEIGHT;

    let profile = profile_text.to_lowercase();
    let bonus = SENIORITY_KEYWORDS
        .iter()
        .copied()
        .filter(|kw| profile.contains(kw) && posting.contains(kw))
        .count() as f64
        * SENIORITY_BONUS;

    (base + bonus).min(MAX_SCORE)
}

/// Sorts postings by match score, highest first. The sort is stable, so
/// postings with equal scores keep their insertion order.
pub fn rank_postings(postings: &mut [JobPostingRow]) {
    postings.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
}
