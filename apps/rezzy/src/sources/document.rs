use std::path::{Path, PathBuf};

use tracing::info;

use crate::errors::AppError;
use crate::models::resume::ResumeDocument;

/// Extracts the plain text of a PDF. Parsing is CPU-bound, so it runs on the
/// blocking pool.
pub async fn extract_pdf_text(path: &Path) -> Result<String, AppError> {
    let owned = path.to_path_buf();
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text(&owned))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in PDF extraction: {e}")))?
        .map_err(|e| AppError::Pdf {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    info!("Extracted {} characters from {}", text.len(), path.display());
    Ok(text)
}

/// Writes `resume` as pretty JSON next to `document`, swapping its extension
/// for `.json`. Returns the written path.
pub async fn save_resume_json(document: &Path, resume: &ResumeDocument) -> Result<PathBuf, AppError> {
    let target = document.with_extension("json");
    let json = serde_json::to_string_pretty(resume)?;
    tokio::fs::write(&target, json).await?;
    info!("Saved converted resume to {}", target.display());
    Ok(target)
}
