// LLM prompt constants for résumé analysis.

/// System prompt for résumé analysis — enforces JSON-only output.
pub const ANALYSIS_SYSTEM: &str =
    "You are an expert résumé analyst. Extract structured information from \
    résumé text. You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Analysis prompt template. Replace `{resume_text}` before sending.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the following résumé and extract structured data.

Return a JSON object with this EXACT schema (no extra fields):
{
  "skills": ["Python", "Docker"],
  "experience": ["Senior Software Engineer, Acme Corp, 2019-2023"],
  "education": ["B.S. Computer Science, State University, 2015"],
  "summary": "Two to three sentence professional summary."
}

Rules:
- "skills": technical and soft skills, one label per element.
- "experience": one entry per role with company, role, and duration inline.
- "education": one entry per qualification.
- "summary": 2-3 sentences in a professional register.
- Every array element must be a plain string, never a nested object.

RÉSUMÉ TEXT:
{resume_text}"#;
