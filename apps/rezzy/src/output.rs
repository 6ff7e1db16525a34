//! Output side of a run: the rendered document and the JSON data dump.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::cli::Cli;
use crate::errors::AppError;

/// Everything a run produced, written to the dump directory for inspection.
#[derive(Debug, Serialize)]
pub struct RunDump<'a> {
    pub created_at: DateTime<Utc>,
    pub input: &'a Cli,
    pub resume: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter: Option<String>,
}

/// Writes `lines` to `path`, or to stdout when no path is given.
pub async fn emit(lines: &[String], path: Option<&Path>) -> Result<(), AppError> {
    let mut document = lines.join("\n");
    document.push('\n');

    match path {
        Some(path) => {
            tokio::fs::write(path, document).await?;
            info!("Wrote {} lines to {}", lines.len(), path.display());
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(document.as_bytes()).await?;
            stdout.flush().await?;
        }
    }
    Ok(())
}

/// Serializes `dump` to `<dir>/<prefix>_<timestamp>.json` and returns the path.
pub async fn write_dump(dir: &Path, prefix: &str, dump: &RunDump<'_>) -> Result<PathBuf, AppError> {
    let path = dir.join(dump_file_name(prefix, dump.created_at));
    let json = serde_json::to_string_pretty(dump)?;
    tokio::fs::write(&path, json).await?;
    Ok(path)
}

fn dump_file_name(prefix: &str, at: DateTime<Utc>) -> String {
    format!("{prefix}_{}.json", at.format("%Y-%m-%dT%H-%M-%S-%3fZ"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use clap::Parser;

    #[test]
    fn test_dump_file_name_is_filesystem_safe() {
        let at = Utc.with_ymd_and_hms(2026, 3, 7, 9, 5, 1).unwrap();
        assert_eq!(
            dump_file_name("rezzy", at),
            "rezzy_2026-03-07T09-05-01-000Z.json"
        );
    }

    #[tokio::test]
    async fn test_emit_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.tex");
        let lines = vec!["\\begin{document}".to_string(), "\\end{document}".to_string()];

        emit(&lines, Some(&path)).await.unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "\\begin{document}\n\\end{document}\n"
        );
    }

    #[tokio::test]
    async fn test_write_dump_records_run() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::try_parse_from(["rezzy", "--resume", "r.json"]).unwrap();
        let dump = RunDump {
            created_at: Utc::now(),
            input: &cli,
            resume: "line one\nline two".into(),
            letter: None,
        };

        let path = write_dump(dir.path(), "rezzy", &dump).await.unwrap();
        assert!(path.starts_with(dir.path()));
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("rezzy_") && name.ends_with(".json"));

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["input"]["resume"], "r.json");
        assert_eq!(value["resume"], "line one\nline two");
        assert!(value.get("letter").is_none());
    }
}
