//! Deterministic résumé extraction — the recovery path when the generative
//! service is unavailable or returns something unparseable.
//!
//! Pure text processing, no external calls. The exact vocabulary, patterns,
//! and caps are load-bearing: tests and re-analysis both depend on this
//! producing identical output for identical input.

use regex::Regex;

use super::ExtractedProfile;

/// Fixed skill vocabulary for presence testing. Matching is a
/// case-insensitive substring test, so order here is output order.
pub const SKILL_VOCABULARY: [&str; 18] = [
    "Python",
    "JavaScript",
    "React",
    "Node.js",
    "FastAPI",
    "MongoDB",
    "SQL",
    "Docker",
    "Kubernetes",
    "AWS",
    "Git",
    "Machine Learning",
    "AI",
    "Data Science",
    "Project Management",
    "Leadership",
    "Communication",
    "Problem Solving",
];

/// Emitted when no experience pattern matches, so the list is never empty.
pub const EXPERIENCE_PLACEHOLDER: &str = "Software Developer 2020-2023";

const EXPERIENCE_CAP: usize = 5;
const EDUCATION_CAP: usize = 3;
const SUMMARY_MAX_CHARS: usize = 200;

/// Builds a complete profile from text alone.
pub fn extract_profile(text: &str) -> ExtractedProfile {
    ExtractedProfile {
        skills: extract_skills(text),
        experience: extract_experience(text),
        education: extract_education(text),
        summary: summarize(text),
    }
}

/// Returns the vocabulary members present in the text as case-insensitive
/// substrings, in vocabulary order. The vocabulary has no duplicates, so the
/// result has none either.
pub fn extract_skills(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    SKILL_VOCABULARY
        .iter()
        .filter(|skill| lower.contains(&skill.to_lowercase()))
        .map(|skill| skill.to_string())
        .collect()
}

/// Finds experience entries: a 4-digit year range (or "present") adjacent to
/// a capitalized phrase ending in a role word, in either order. Capped at 5;
/// a single placeholder entry when nothing matches.
pub fn extract_experience(text: &str) -> Vec<String> {
    let patterns = [
        r"(?i)(\d{4}[\s\-]+\d{4}|present).*?([A-Z][a-z]+.*?(?:engineer|developer|manager|analyst|specialist|consultant))",
        r"(?i)([A-Z][a-z]+.*?(?:engineer|developer|manager|analyst|specialist|consultant)).*?(\d{4}[\s\-]+\d{4}|present)",
    ];

    let mut entries = Vec::new();
    for pattern in patterns {
        let re = Regex::new(pattern).expect("valid regex");
        for caps in re.captures_iter(text) {
            entries.push(format!("{} {}", &caps[1], &caps[2]));
        }
    }
    entries.truncate(EXPERIENCE_CAP);

    if entries.is_empty() {
        entries.push(EXPERIENCE_PLACEHOLDER.to_string());
    }
    entries
}

/// Finds education entries: a degree or institution marker followed by a 2-
/// or 4-digit year. Capped at 3; an empty list is permitted.
pub fn extract_education(text: &str) -> Vec<String> {
    let patterns = [
        r"(?i)(Bachelor|Master|PhD|B\.S\.|M\.S\.|B\.A\.|M\.A\.).*?(\d{4}|\d{2})",
        r"(?i)(University|College|Institute).*?(\d{4}|\d{2})",
    ];

    let mut entries = Vec::new();
    for pattern in patterns {
        let re = Regex::new(pattern).expect("valid regex");
        for caps in re.captures_iter(text) {
            entries.push(format!("{} {}", &caps[1], &caps[2]));
        }
    }
    entries.truncate(EDUCATION_CAP);
    entries
}

/// First 200 characters of the source, with an ellipsis when truncated.
pub fn summarize(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(SUMMARY_MAX_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skills_preserve_vocabulary_order() {
        let text = "Shipped services with Docker, wrote Python tooling, managed Git history.";
        assert_eq!(extract_skills(text), vec!["Python", "Docker", "Git"]);
    }

    #[test]
    fn test_skills_match_case_insensitively() {
        let text = "PYTHON and kubernetes in production";
        let skills = extract_skills(text);
        assert!(skills.contains(&"Python".to_string()));
        assert!(skills.contains(&"Kubernetes".to_string()));
    }

    #[test]
    fn test_skills_only_from_vocabulary() {
        let text = "Rust, Haskell, Erlang"; // none of these are in the vocabulary
        assert!(extract_skills(text).is_empty());
    }

    #[test]
    fn test_skills_are_substring_matches() {
        // "maintained" contains "ai" — substring semantics, not word matching.
        let skills = extract_skills("maintained a build farm");
        assert_eq!(skills, vec!["AI"]);
    }

    #[test]
    fn test_experience_year_range_before_role() {
        let entries = extract_experience("2019-2023 Senior Software Engineer at a fintech");
        assert_eq!(entries.len(), 1);
        assert!(entries[0].contains("2019-2023"));
        assert!(entries[0].to_lowercase().contains("engineer"));
    }

    #[test]
    fn test_experience_role_before_year_range() {
        let entries = extract_experience("Data Analyst 2016 2018, then elsewhere");
        assert_eq!(entries.len(), 1);
        assert!(entries[0].contains("2016 2018"));
    }

    #[test]
    fn test_experience_placeholder_when_no_match() {
        let entries = extract_experience("no roles or dates in this text");
        assert_eq!(entries, vec![EXPERIENCE_PLACEHOLDER.to_string()]);
    }

    #[test]
    fn test_experience_capped_at_five() {
        let text = "2010-2011 Alpha Engineer. 2011-2012 Beta Engineer. \
                    2012-2013 Gamma Engineer. 2013-2014 Delta Engineer. \
                    2014-2015 Epsilon Engineer. 2015-2016 Zeta Engineer.";
        assert_eq!(extract_experience(text).len(), 5);
    }

    #[test]
    fn test_education_degree_marker() {
        let entries = extract_education("Bachelor of Science in CS, graduated 2014");
        assert_eq!(entries.len(), 1);
        assert!(entries[0].starts_with("Bachelor"));
        assert!(entries[0].ends_with("2014"));
    }

    #[test]
    fn test_education_institution_marker() {
        let entries = extract_education("Attended Northern University until 2012");
        assert_eq!(entries.len(), 1);
        assert!(entries[0].starts_with("University"));
    }

    #[test]
    fn test_education_empty_is_permitted() {
        assert!(extract_education("self-taught, no formal schooling listed").is_empty());
    }

    #[test]
    fn test_education_capped_at_three() {
        let text = "Bachelor 2001, Master 2003, PhD 2008, University 2010";
        assert_eq!(extract_education(text).len(), 3);
    }

    #[test]
    fn test_summary_short_text_untouched() {
        assert_eq!(summarize("short résumé"), "short résumé");
    }

    #[test]
    fn test_summary_exactly_200_chars_untouched() {
        let text = "a".repeat(200);
        assert_eq!(summarize(&text), text);
    }

    #[test]
    fn test_summary_truncates_with_ellipsis() {
        let text = "b".repeat(201);
        let summary = summarize(&text);
        assert_eq!(summary.chars().count(), 203);
        assert!(summary.ends_with("..."));
    }

    #[test]
    fn test_extract_profile_populates_every_field() {
        let text = "Senior Python Developer 2018-2022. Master of Engineering, 2016.";
        let profile = extract_profile(text);
        assert!(!profile.skills.is_empty());
        assert!(!profile.experience.is_empty());
        assert!(!profile.education.is_empty());
        assert!(!profile.summary.is_empty());
    }
}
