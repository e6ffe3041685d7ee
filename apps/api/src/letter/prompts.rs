// LLM prompt constants for cover letter synthesis.

/// System prompt for cover letter synthesis. Plain prose out, no JSON.
pub const LETTER_SYSTEM: &str =
    "You are an expert cover letter writer. Create a personalized, professional cover letter that:
1. Is concise (3-4 paragraphs)
2. Highlights relevant skills and experience
3. Shows enthusiasm for the role and company
4. Has a professional tone
5. Includes a strong opening and closing

Do not include placeholder text like [Your Name] or addresses. Write a complete, ready-to-use cover letter.";

/// Letter prompt template. Replace every `{field}` before sending.
pub const LETTER_PROMPT_TEMPLATE: &str = r#"Write a cover letter for this job application:

JOB DETAILS:
Title: {title}
Company: {company}
Location: {location}
Description: {description}
Requirements: {requirements}

APPLICANT PROFILE:
Skills: {skills}
Experience: {experience}
Education: {education}
Summary: {summary}

Write a compelling cover letter that matches the applicant's background to this specific job."#;
