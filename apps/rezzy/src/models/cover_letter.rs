use serde::{Deserialize, Serialize};

/// Structured cover letter produced by an LLM provider.
/// Missing fields deserialize as empty strings and are omitted when rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoverLetterPayload {
    pub greeting: String,
    pub company_street_address: String,
    pub company_city: String,
    pub company_state: String,
    pub company_zip_code: String,
    pub letter_body: String,
}
