// Prompt constants and builders for the two LLM tasks rezzy performs.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT include explanations or apologies.";

pub const COVER_LETTER_SYSTEM: &str = "You are an experienced cover letter writer. \
    You MUST respond with a single JSON object with exactly these string fields: \
    greeting, companyStreetAddress, companyCity, companyState, companyZipCode, letterBody. \
    Use an empty string for any field the inputs do not support. \
    Do NOT include any text outside the JSON object.";

const COVER_LETTER_TASK: &str = "\
Write a clear, tailored cover letter from two inputs: a JSON resume with the \
candidate's experience, education, skills and achievements, and a job description \
with the role's responsibilities and qualifications.

- Identify the key responsibilities and qualifications in the job description.
- Pick the resume experience and accomplishments that best match them.
- Keep the letter to one page. It should read as natural, confident and professional, \
show genuine interest in the role, and connect past work to the new opportunity with \
specific examples instead of repeating the resume.
- Avoid stock phrases such as \"esteemed company\" or \"I am writing to express\".

Tone: honest, human, articulate.";

/// Common instruction appended to every generation prompt.
pub const GROUNDING_INSTRUCTION: &str = "\
CRITICAL: If information is missing, DO NOT MAKE IT UP. If the company address or a \
contact name is not in the inputs, leave that field empty. Use only the data in the \
resume and the job description.";

pub const RESUME_PARSE_SYSTEM: &str = "You extract structured resume data. \
    You MUST respond with a single JSON object of the form {\"resume\": {...}} where the \
    inner object follows the JSON Resume schema (basics, work, education, certificates, \
    skills, interests). Omit fields that the document does not contain. \
    Do NOT include any text outside the JSON object.";

/// Builds the user prompt for cover letter generation.
pub fn build_cover_letter_prompt(
    job_description: &str,
    resume_json: &str,
    extra_instructions: Option<&str>,
) -> String {
    let mut sections = vec![COVER_LETTER_TASK.to_string(), GROUNDING_INSTRUCTION.to_string()];
    if let Some(extra) = extra_instructions.map(str::trim).filter(|s| !s.is_empty()) {
        sections.push(format!("Also: {extra}"));
    }
    sections.push(format!("My resume in JSON format:\n{resume_json}"));
    sections.push(format!("The job description:\n{job_description}"));
    sections.join("\n\n")
}

/// Builds the user prompt that turns extracted PDF text into a JSON Resume.
pub fn build_resume_parse_prompt(document_text: &str) -> String {
    format!(
        "{JSON_ONLY_SYSTEM}\n\n\
         Extract the resume information from this document text:\n\n{document_text}"
    )
}
