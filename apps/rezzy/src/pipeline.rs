//! Run orchestration.
//!
//! Flow: load resume (JSON source, or PDF → LLM) → optional cover letter from
//! the job description → escape once → compose resume and letter.

use tracing::info;

use crate::cli::Cli;
use crate::config::Config;
use crate::errors::AppError;
use crate::llm_client::{LlmProvider, Provider};
use crate::models::cover_letter::CoverLetterPayload;
use crate::models::resume::{EscapedResume, ResumeDocument};
use crate::render::{compose_cover_letter, compose_resume};
use crate::sources::document::save_resume_json;
use crate::sources::fetch_resume;

/// Rendered output of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocuments {
    pub resume: Vec<String>,
    pub cover_letter: Option<Vec<String>>,
}

impl RenderedDocuments {
    /// The cover letter when one was generated, else the resume.
    pub fn primary(&self) -> &[String] {
        self.cover_letter.as_deref().unwrap_or(&self.resume)
    }
}

pub async fn run(cli: &Cli, config: &Config) -> Result<RenderedDocuments, AppError> {
    let provider = if cli.needs_llm() {
        let provider = Provider::from_config(&config.provider_config()?)?;
        info!("Using LLM provider {}", provider.name());
        Some(provider)
    } else {
        None
    };

    let resume = load_resume(cli, provider.as_ref()).await?;

    let letter = match &cli.jd {
        Some(jd_path) => {
            let job_description = tokio::fs::read_to_string(jd_path).await?;
            let provider = require_provider(provider.as_ref())?;
            Some(
                provider
                    .generate_cover_letter(&job_description, &resume, cli.prompt.as_deref())
                    .await?,
            )
        }
        None => None,
    };

    Ok(render_documents(&resume, letter.as_ref()))
}

/// Escapes the resume once and composes both documents from it.
pub fn render_documents(
    resume: &ResumeDocument,
    letter: Option<&CoverLetterPayload>,
) -> RenderedDocuments {
    let escaped = EscapedResume::new(resume);
    RenderedDocuments {
        resume: compose_resume(&escaped),
        cover_letter: letter.map(|letter| compose_cover_letter(&escaped, letter)),
    }
}

async fn load_resume(cli: &Cli, provider: Option<&Provider>) -> Result<ResumeDocument, AppError> {
    if let Some(source) = &cli.resume {
        return fetch_resume(source).await;
    }
    let Some(document) = &cli.document else {
        return Err(AppError::Internal(anyhow::anyhow!(
            "either --resume or --document is required"
        )));
    };

    let resume = require_provider(provider)?.process_document(document).await?;
    save_resume_json(document, &resume).await?;
    Ok(resume)
}

fn require_provider(provider: Option<&Provider>) -> Result<&Provider, AppError> {
    provider.ok_or_else(|| AppError::Internal(anyhow::anyhow!("no LLM provider configured")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve_once;
    use clap::Parser;
    use serde_json::json;
    use std::collections::HashMap;

    const RESUME_JSON: &str = r#"{
        "basics": {
            "name": "Jane Doe",
            "email": "jane@doe.dev",
            "phone": "555-0100",
            "location": { "city": "Austin", "region": "TX" }
        },
        "skills": [{ "name": "Languages", "keywords": ["Rust", "C#"] }]
    }"#;

    fn config(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    fn write_temp(dir: &tempfile::TempDir, name: &str, contents: &str) -> String {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn test_primary_prefers_cover_letter() {
        let resume_only = RenderedDocuments {
            resume: vec!["r".into()],
            cover_letter: None,
        };
        assert_eq!(resume_only.primary(), ["r".to_string()]);

        let both = RenderedDocuments {
            resume: vec!["r".into()],
            cover_letter: Some(vec!["l".into()]),
        };
        assert_eq!(both.primary(), ["l".to_string()]);
    }

    #[test]
    fn test_render_documents_escapes_once() {
        let resume: ResumeDocument = serde_json::from_str(RESUME_JSON).unwrap();
        let letter = CoverLetterPayload {
            greeting: "Hi,".into(),
            letter_body: "Body".into(),
            ..Default::default()
        };
        let docs = render_documents(&resume, Some(&letter));

        assert!(docs.resume.iter().any(|l| l.contains("C\\#")));
        assert!(!docs.resume.iter().any(|l| l.contains("C\\\\#")));
        let letter_lines = docs.cover_letter.unwrap();
        assert!(letter_lines.iter().any(|l| l.contains("JANE DOE")));
    }

    #[tokio::test]
    async fn test_run_resume_without_llm() {
        let dir = tempfile::tempdir().unwrap();
        let resume = write_temp(&dir, "resume.json", RESUME_JSON);
        let cli = Cli::try_parse_from(["rezzy", "--resume", resume.as_str()]).unwrap();

        // No provider settings at all: rendering a resume must not need them.
        let docs = run(&cli, &config(&[])).await.unwrap();
        assert!(docs.cover_letter.is_none());
        assert_eq!(docs.resume.first().map(String::as_str), Some("\\documentclass{resume}"));
        assert_eq!(docs.resume.last().map(String::as_str), Some("\\end{document}"));
    }

    #[tokio::test]
    async fn test_run_with_jd_requires_provider_settings() {
        let dir = tempfile::tempdir().unwrap();
        let resume = write_temp(&dir, "resume.json", RESUME_JSON);
        let jd = write_temp(&dir, "jd.txt", "Rust engineer");
        let cli = Cli::try_parse_from(["rezzy", "--resume", resume.as_str(), "--jd", jd.as_str()])
            .unwrap();

        let err = run(&cli, &config(&[])).await.unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[tokio::test]
    async fn test_run_generates_cover_letter_with_ollama() {
        let reply = json!({
            "message": {
                "content": json!({
                    "greeting": "Dear Hiring Team,",
                    "companyCity": "Austin",
                    "companyState": "TX",
                    "letterBody": "I build fast, reliable systems."
                })
                .to_string()
            }
        })
        .to_string();
        let base = serve_once(200, &reply).await;

        let dir = tempfile::tempdir().unwrap();
        let resume = write_temp(&dir, "resume.json", RESUME_JSON);
        let jd = write_temp(&dir, "jd.txt", "Rust engineer");
        let cli = Cli::try_parse_from(["rezzy", "--resume", resume.as_str(), "--jd", jd.as_str()])
            .unwrap();
        let config = config(&[("LLM_PROVIDER", "ollama"), ("OLLAMA_API_BASE_URL", base.as_str())]);

        let docs = run(&cli, &config).await.unwrap();
        let letter = docs.cover_letter.clone().unwrap();
        assert_eq!(docs.primary(), letter.as_slice());
        assert!(letter.iter().any(|l| l.contains("selectfont Austin, TX}")));
        assert!(letter.iter().any(|l| l.contains("I build fast, reliable systems.")));
    }
}
