//! LLM Client: every language-model call in rezzy goes through this module.
//!
//! `LlmProvider` is the capability seam: a provider only has to implement
//! `chat`; cover-letter synthesis and PDF resume ingestion are built on top of
//! it. `Provider` is the concrete tagged variant selected by configuration.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::ProviderConfig;
use crate::errors::AppError;
use crate::models::cover_letter::CoverLetterPayload;
use crate::models::resume::ResumeDocument;
use crate::sources::document::extract_pdf_text;

pub mod ollama;
pub mod openai;
pub mod prompts;

pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;

use prompts::{
    build_cover_letter_prompt, build_resume_parse_prompt, COVER_LETTER_SYSTEM, RESUME_PARSE_SYSTEM,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error(
        "{provider} API returned 403 Forbidden. This usually means:\n\
         1. Your API key is invalid or expired\n\
         2. Your API key doesn't have permission to use the specified model\n\
         3. The model set in OPENAI_MODEL is not available\n\
         Original error: {message}"
    )]
    Forbidden {
        provider: &'static str,
        message: String,
    },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// A single chat message in the OpenAI-compatible shape both backends accept.
#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

impl<'a> ChatMessage<'a> {
    pub fn system(content: &'a str) -> Self {
        Self {
            role: "system",
            content,
        }
    }

    pub fn user(content: &'a str) -> Self {
        Self {
            role: "user",
            content,
        }
    }
}

#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Sends one system + user exchange and returns the raw reply text.
    async fn chat(&self, system: &str, prompt: &str) -> Result<String, LlmError>;

    /// Asks the model for a cover letter tailored to `job_description`.
    async fn generate_cover_letter(
        &self,
        job_description: &str,
        resume: &ResumeDocument,
        prompt: Option<&str>,
    ) -> Result<CoverLetterPayload, AppError> {
        let resume_json = serde_json::to_string_pretty(resume)?;
        let request = build_cover_letter_prompt(job_description, &resume_json, prompt);

        info!("Requesting cover letter from {}", self.name());
        let reply = self.chat(COVER_LETTER_SYSTEM, &request).await?;
        Ok(parse_json_reply(&reply)?)
    }

    /// Extracts the text of a PDF resume and asks the model to restructure it
    /// as a JSON Resume document.
    async fn process_document(&self, path: &Path) -> Result<ResumeDocument, AppError> {
        let text = extract_pdf_text(path).await?;
        let request = build_resume_parse_prompt(&text);

        info!("Converting {} with {}", path.display(), self.name());
        let reply = self.chat(RESUME_PARSE_SYSTEM, &request).await?;
        let value: Value = parse_json_reply(&reply)?;
        Ok(serde_json::from_value(unwrap_resume(value))?)
    }
}

/// The configured backend.
#[derive(Clone)]
pub enum Provider {
    OpenAi(OpenAiProvider),
    Ollama(OllamaProvider),
}

impl Provider {
    pub fn from_config(config: &ProviderConfig) -> Result<Self, LlmError> {
        let client = build_http_client()?;
        let provider = match config {
            ProviderConfig::OpenAi {
                api_key,
                api_base_url,
                model,
            } => Provider::OpenAi(OpenAiProvider::new(
                client,
                api_key.clone(),
                api_base_url.clone(),
                model.clone(),
            )),
            ProviderConfig::Ollama {
                api_base_url,
                model,
            } => Provider::Ollama(OllamaProvider::new(client, api_base_url, model.clone())),
        };
        debug!("LLM provider initialized: {}", provider.name());
        Ok(provider)
    }
}

#[async_trait]
impl LlmProvider for Provider {
    fn name(&self) -> &'static str {
        match self {
            Provider::OpenAi(p) => p.name(),
            Provider::Ollama(p) => p.name(),
        }
    }

    async fn chat(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        match self {
            Provider::OpenAi(p) => p.chat(system, prompt).await,
            Provider::Ollama(p) => p.chat(system, prompt).await,
        }
    }
}

pub(crate) fn build_http_client() -> Result<Client, LlmError> {
    Ok(Client::builder().timeout(REQUEST_TIMEOUT).build()?)
}

/// Deserializes a model reply, tolerating markdown code fences around the JSON.
pub fn parse_json_reply<T: DeserializeOwned>(reply: &str) -> Result<T, LlmError> {
    let json = extract_json(reply);
    if json.is_empty() {
        return Err(LlmError::EmptyContent);
    }
    serde_json::from_str(json).map_err(LlmError::Parse)
}

/// Returns the body of the first ``` fenced block, or the trimmed text when
/// there is none. An unterminated fence yields everything after it.
pub fn extract_json(text: &str) -> &str {
    let text = text.trim();
    let Some(open) = text.find("```") else {
        return text;
    };
    let after = skip_fence_tag(&text[open + 3..]);
    match after.find("```") {
        Some(close) => after[..close].trim(),
        None => after.trim(),
    }
}

/// Drops the info string after an opening fence (`json`, `JSON`, `jsonc`, ...).
fn skip_fence_tag(after: &str) -> &str {
    let tag_len = after
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(after.len());
    &after[tag_len..]
}

/// Models are told to wrap the document in `{"resume": {...}}`; unwrap it.
fn unwrap_resume(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.get("resume").is_some_and(Value::is_object) => {
            map.remove("resume").unwrap_or_default()
        }
        other => other,
    }
}
