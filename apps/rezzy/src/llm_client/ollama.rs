use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::{ChatMessage, LlmError, LlmProvider};

pub const DEFAULT_MODEL: &str = "llama3";

#[derive(Debug, Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

/// Local Ollama backend. No retries: the server is expected on the same host.
#[derive(Clone)]
pub struct OllamaProvider {
    client: Client,
    endpoint: String,
    model: String,
}

impl OllamaProvider {
    pub fn new(client: Client, api_base_url: &str, model: String) -> Self {
        let base = normalize_base_url(api_base_url);
        Self {
            client,
            endpoint: format!("{}/api/chat", base.trim_end_matches('/')),
            model,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    fn name(&self) -> &'static str {
        "Ollama"
    }

    async fn chat(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        let request_body = OllamaChatRequest {
            model: &self.model,
            messages: vec![ChatMessage::system(system), ChatMessage::user(prompt)],
            stream: false,
        };

        debug!("POST {} (model {})", self.endpoint, self.model);
        let response = self
            .client
            .post(&self.endpoint)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response.json().await?;
        reply_content(&body)
            .filter(|c| !c.trim().is_empty())
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

/// `0.0.0.0` is a bind address, not a reachable host.
fn normalize_base_url(url: &str) -> String {
    url.replace("://0.0.0.0", "://localhost")
}

/// Native replies carry `message.content`; the OpenAI-compatible shape carries
/// `choices[0].message.content`.
fn reply_content(body: &Value) -> Option<&str> {
    body.pointer("/message/content")
        .or_else(|| body.pointer("/choices/0/message/content"))
        .and_then(Value::as_str)
}
