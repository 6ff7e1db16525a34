use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing::warn;

use crate::llm_client::{ollama, openai};

/// OpenAI chat models rezzy is known to work with. Others are accepted with a warning.
pub const KNOWN_OPENAI_MODELS: &[&str] = &[
    "gpt-3.5-turbo",
    "gpt-3.5-turbo-16k",
    "gpt-4",
    "gpt-4-32k",
    "gpt-4-turbo",
    "gpt-4o",
    "gpt-4.1",
    "gpt-4.1-mini",
    "gpt-4.1-nano",
    "gpt-4.5",
];

/// Application configuration loaded from environment variables.
/// Provider settings are validated lazily, only when an LLM is needed.
#[derive(Debug, Clone)]
pub struct Config {
    pub rust_log: String,
    pub dump_dir: PathBuf,
    pub llm_provider: String,
    pub openai_api_key: Option<String>,
    pub openai_api_base_url: Option<String>,
    pub openai_model: Option<String>,
    pub ollama_api_base_url: Option<String>,
    pub ollama_model: Option<String>,
}

/// Validated settings for one LLM backend.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderConfig {
    OpenAi {
        api_key: String,
        api_base_url: String,
        model: String,
    },
    Ollama {
        api_base_url: String,
        model: String,
    },
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Self::from_lookup(|key| std::env::var(key).ok()))
    }

    /// Builds the config from any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Config {
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            dump_dir: var("REZZY_DUMP_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(std::env::temp_dir),
            llm_provider: var("LLM_PROVIDER")
                .map(|p| p.to_lowercase())
                .unwrap_or_else(|| "openai".to_string()),
            openai_api_key: var("OPENAI_API_KEY"),
            openai_api_base_url: var("OPENAI_API_BASE_URL"),
            openai_model: var("OPENAI_MODEL"),
            ollama_api_base_url: var("OLLAMA_API_BASE_URL"),
            ollama_model: var("OLLAMA_MODEL"),
        }
    }

    pub fn provider_config(&self) -> Result<ProviderConfig> {
        match self.llm_provider.as_str() {
            "openai" => {
                let model = self
                    .openai_model
                    .clone()
                    .unwrap_or_else(|| openai::DEFAULT_MODEL.to_string());
                if !KNOWN_OPENAI_MODELS.contains(&model.as_str()) {
                    warn!(
                        "OPENAI_MODEL '{}' is not a known model ({}); using it anyway",
                        model,
                        KNOWN_OPENAI_MODELS.join(", ")
                    );
                }
                Ok(ProviderConfig::OpenAi {
                    api_key: require(&self.openai_api_key, "OPENAI_API_KEY")?,
                    api_base_url: self
                        .openai_api_base_url
                        .clone()
                        .unwrap_or_else(|| openai::DEFAULT_BASE_URL.to_string()),
                    model,
                })
            }
            "ollama" => Ok(ProviderConfig::Ollama {
                api_base_url: require(&self.ollama_api_base_url, "OLLAMA_API_BASE_URL")?,
                model: self
                    .ollama_model
                    .clone()
                    .unwrap_or_else(|| ollama::DEFAULT_MODEL.to_string()),
            }),
            other => bail!("Unsupported LLM_PROVIDER '{other}' (expected 'openai' or 'ollama')"),
        }
    }
}

fn require(value: &Option<String>, key: &str) -> Result<String> {
    value
        .clone()
        .with_context(|| format!("Required environment variable '{key}' is not set"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.llm_provider, "openai");
        assert_eq!(config.dump_dir, std::env::temp_dir());
        assert!(config.openai_api_key.is_none());
    }

    #[test]
    fn test_empty_values_count_as_unset() {
        let config = config(&[("OPENAI_API_KEY", "  "), ("RUST_LOG", "")]);
        assert!(config.openai_api_key.is_none());
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_openai_requires_api_key() {
        let err = config(&[]).provider_config().unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_openai_defaults_base_and_model() {
        let provider = config(&[("OPENAI_API_KEY", "sk-test")])
            .provider_config()
            .unwrap();
        assert_eq!(
            provider,
            ProviderConfig::OpenAi {
                api_key: "sk-test".into(),
                api_base_url: "https://api.openai.com/v1".into(),
                model: "gpt-4o".into(),
            }
        );
    }

    #[test]
    fn test_unknown_openai_model_is_accepted() {
        let provider = config(&[("OPENAI_API_KEY", "sk"), ("OPENAI_MODEL", "gpt-9")])
            .provider_config()
            .unwrap();
        assert!(matches!(provider, ProviderConfig::OpenAi { model, .. } if model == "gpt-9"));
    }

    #[test]
    fn test_ollama_requires_base_url() {
        let err = config(&[("LLM_PROVIDER", "ollama")])
            .provider_config()
            .unwrap_err();
        assert!(err.to_string().contains("OLLAMA_API_BASE_URL"));
    }

    #[test]
    fn test_ollama_provider_is_case_insensitive() {
        let provider = config(&[
            ("LLM_PROVIDER", "Ollama"),
            ("OLLAMA_API_BASE_URL", "http://0.0.0.0:11434"),
        ])
        .provider_config()
        .unwrap();
        assert_eq!(
            provider,
            ProviderConfig::Ollama {
                api_base_url: "http://0.0.0.0:11434".into(),
                model: "llama3".into(),
            }
        );
    }

    #[test]
    fn test_unsupported_provider() {
        let err = config(&[("LLM_PROVIDER", "bard")])
            .provider_config()
            .unwrap_err();
        assert!(err.to_string().contains("Unsupported LLM_PROVIDER 'bard'"));
    }
}
