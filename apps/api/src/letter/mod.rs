//! Cover letter synthesis — application-specific text from a profile and a
//! posting. Never fails outward: any generative failure lands on a fixed
//! interpolation-only template.

pub mod prompts;

use tracing::warn;

use crate::llm_client::LlmClient;
use crate::models::posting::JobPostingRow;
use crate::models::profile::CandidateProfileRow;
use self::prompts::{LETTER_PROMPT_TEMPLATE, LETTER_SYSTEM};

/// Substituted when the profile has no experience entries.
const GENERIC_EXPERIENCE: &str = "relevant professional experience";

/// How many leading skills the fallback template mentions.
const FALLBACK_SKILL_COUNT: usize = 3;

/// Generates a cover letter for one (profile, posting) pair.
///
/// Primary path is the generative service; any `LlmError` or blank response
/// falls through to [`fallback_letter`], so the caller always receives text.
pub async fn generate_cover_letter(
    llm: &LlmClient,
    profile: &CandidateProfileRow,
    posting: &JobPostingRow,
) -> String {
    let prompt = build_letter_prompt(profile, posting);

    match llm.call(&prompt, LETTER_SYSTEM).await {
        Ok(response) => match response.text() {
            Some(text) if !text.trim().is_empty() => text.trim().to_string(),
            _ => {
                warn!(
                    "Letter synthesis returned empty content for job {}; using template",
                    posting.id
                );
                fallback_letter(profile, posting)
            }
        },
        Err(e) => {
            warn!(
                "Letter synthesis fell back to template for job {}: {e}",
                posting.id
            );
            fallback_letter(profile, posting)
        }
    }
}

fn build_letter_prompt(profile: &CandidateProfileRow, posting: &JobPostingRow) -> String {
    LETTER_PROMPT_TEMPLATE
        .replace("{title}", &posting.title)
        .replace("{company}", &posting.company)
        .replace("{location}", &posting.location)
        .replace("{description}", &posting.description)
        .replace("{requirements}", &posting.requirements)
        .replace("{skills}", &profile.skills.join(", "))
        .replace("{experience}", &profile.experience.join("; "))
        .replace("{education}", &profile.education.join("; "))
        .replace("{summary}", &profile.summary)
}

/// Fixed template used whenever the generative service fails. Interpolation
/// only: posting title and company in the opening, up to the first three
/// skills, the first experience entry (or a generic phrase), a closing that
/// names the company again.
pub fn fallback_letter(profile: &CandidateProfileRow, posting: &JobPostingRow) -> String {
    let skills = profile
        .skills
        .iter()
        .take(FALLBACK_SKILL_COUNT)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    let experience = profile
        .experience
        .first()
        .map(String::as_str)
        .unwrap_or(GENERIC_EXPERIENCE);

    format!(
        "Dear Hiring Manager,\n\n\
        I am writing to express my strong interest in the {title} position at {company}. \
        With my background in {skills}, I am excited about the opportunity to contribute to your team.\n\n\
        My experience includes {experience}, which aligns well with your requirements. \
        I am particularly drawn to this role because of the opportunity to work with \
        cutting-edge technologies and contribute to meaningful projects.\n\n\
        I would welcome the opportunity to discuss how my skills and enthusiasm can benefit {company}. \
        Thank you for considering my application.\n\n\
        Best regards",
        title = posting.title,
        company = posting.company,
        skills = skills,
        experience = experience,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn make_profile(skills: &[&str], experience: &[&str]) -> CandidateProfileRow {
        CandidateProfileRow {
            id: Uuid::new_v4(),
            filename: "resume.pdf".to_string(),
            source_text: "source".to_string(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            experience: experience.iter().map(|s| s.to_string()).collect(),
            education: vec![],
            summary: "summary".to_string(),
            created_at: Utc::now(),
        }
    }

    fn make_posting(title: &str, company: &str) -> JobPostingRow {
        JobPostingRow {
            id: Uuid::new_v4(),
            title: title.to_string(),
            company: company.to_string(),
            location: "Remote".to_string(),
            description: "desc".to_string(),
            requirements: "reqs".to_string(),
            url: "https://jobs.example.com/view/1".to_string(),
            posted_date: "2 days ago".to_string(),
            match_score: 80.0,
            applied: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_fallback_names_title_and_company() {
        let letter = fallback_letter(
            &make_profile(&["Python"], &["Engineer 2019-2023"]),
            &make_posting("Backend Developer", "Initech"),
        );
        assert!(letter.contains("Backend Developer"));
        // The company appears in the opening and again in the closing.
        assert_eq!(letter.matches("Initech").count(), 2);
    }

    #[test]
    fn test_fallback_mentions_at_most_three_skills() {
        let letter = fallback_letter(
            &make_profile(&["Python", "React", "SQL", "Docker"], &[]),
            &make_posting("Dev", "Acme"),
        );
        assert!(letter.contains("Python, React, SQL"));
        assert!(!letter.contains("Docker"));
    }

    #[test]
    fn test_fallback_uses_first_experience_entry() {
        let letter = fallback_letter(
            &make_profile(&["Python"], &["Lead Analyst 2020-2024", "Intern 2018-2019"]),
            &make_posting("Dev", "Acme"),
        );
        assert!(letter.contains("Lead Analyst 2020-2024"));
        assert!(!letter.contains("Intern"));
    }

    #[test]
    fn test_fallback_substitutes_generic_phrase_without_experience() {
        let letter = fallback_letter(&make_profile(&["Python"], &[]), &make_posting("Dev", "Acme"));
        assert!(letter.contains("relevant professional experience"));
    }

    #[test]
    fn test_prompt_carries_posting_and_profile_fields_verbatim() {
        let profile = make_profile(&["Python", "SQL"], &["Engineer 2019-2023"]);
        let posting = make_posting("Platform Engineer", "Globex");
        let prompt = build_letter_prompt(&profile, &posting);
        assert!(prompt.contains("Title: Platform Engineer"));
        assert!(prompt.contains("Company: Globex"));
        assert!(prompt.contains("Skills: Python, SQL"));
        assert!(prompt.contains("Experience: Engineer 2019-2023"));
    }
}
