//! Command-line surface for `rezzy`.

use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use serde::Serialize;

#[derive(Parser, Debug, Serialize)]
#[command(
    name = "rezzy",
    version,
    about = "Render a JSON Resume as LaTeX, with an optional AI-written cover letter",
    long_about = None
)]
#[command(group(ArgGroup::new("input").required(true).args(["resume", "document"])))]
pub struct Cli {
    /// JSON Resume file path or http(s) URL
    #[arg(long)]
    pub resume: Option<String>,

    /// PDF resume to convert into JSON Resume with the configured LLM provider
    #[arg(long)]
    pub document: Option<PathBuf>,

    /// Job description file; enables cover letter generation
    #[arg(long)]
    pub jd: Option<PathBuf>,

    /// Extra instructions for the cover letter
    #[arg(long, requires = "jd")]
    pub prompt: Option<String>,

    /// Write the document to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

impl Cli {
    /// Document ingestion and cover letters both need a provider.
    pub fn needs_llm(&self) -> bool {
        self.document.is_some() || self.jd.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("rezzy").chain(args.iter().copied()))
    }

    #[test]
    fn test_resume_only() {
        let cli = parse(&["--resume", "resume.json"]).unwrap();
        assert_eq!(cli.resume.as_deref(), Some("resume.json"));
        assert!(cli.document.is_none());
        assert!(!cli.needs_llm());
    }

    #[test]
    fn test_document_needs_llm() {
        let cli = parse(&["--document", "cv.pdf"]).unwrap();
        assert_eq!(cli.document, Some(PathBuf::from("cv.pdf")));
        assert!(cli.needs_llm());
    }

    #[test]
    fn test_input_is_required() {
        let err = parse(&["--jd", "jd.txt"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_resume_and_document_conflict() {
        let err = parse(&["--resume", "r.json", "--document", "cv.pdf"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_prompt_requires_jd() {
        let err = parse(&["--resume", "r.json", "--prompt", "be brief"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

        let cli = parse(&["--resume", "r.json", "--jd", "jd.txt", "--prompt", "be brief"]).unwrap();
        assert_eq!(cli.prompt.as_deref(), Some("be brief"));
        assert!(cli.needs_llm());
    }

    #[test]
    fn test_output_short_flag() {
        let cli = parse(&["--resume", "r.json", "-o", "out.tex"]).unwrap();
        assert_eq!(cli.output, Some(PathBuf::from("out.tex")));
    }
}
