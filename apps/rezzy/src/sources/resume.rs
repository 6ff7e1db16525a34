use std::path::Path;

use reqwest::Client;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::models::resume::ResumeDocument;

/// Loads a resume document from an `http(s)://` URL or a local file path.
pub async fn fetch_resume(source: &str) -> Result<ResumeDocument, AppError> {
    let body = if is_remote(source) {
        fetch_remote(source).await?
    } else {
        info!("Reading resume from {}", source);
        tokio::fs::read_to_string(Path::new(source)).await?
    };
    Ok(serde_json::from_str(&body)?)
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

async fn fetch_remote(url: &str) -> Result<String, AppError> {
    info!("Fetching resume from {}", url);
    let response = Client::new().get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(AppError::Fetch {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    let body = response.text().await?;
    debug!("Fetched {} bytes", body.len());
    Ok(body)
}
