mod cli;
mod config;
mod errors;
mod llm_client;
mod models;
mod output;
mod pipeline;
mod render;
mod sources;
#[cfg(test)]
mod test_support;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;
use crate::config::Config;
use crate::output::{emit, write_dump, RunDump};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Logs go to stderr; stdout carries only the document.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting rezzy v{}", env!("CARGO_PKG_VERSION"));

    let documents = pipeline::run(&cli, &config)
        .await
        .context("Failed to render documents")?;

    emit(documents.primary(), cli.output.as_deref())
        .await
        .context("Failed to write document")?;

    let dump = RunDump {
        created_at: chrono::Utc::now(),
        input: &cli,
        resume: documents.resume.join("\n"),
        letter: documents.cover_letter.as_ref().map(|lines| lines.join("\n")),
    };
    match write_dump(&config.dump_dir, env!("CARGO_PKG_NAME"), &dump).await {
        Ok(path) => info!("Data dump: {}", path.display()),
        Err(e) => warn!("Failed to write data dump: {e}"),
    }

    Ok(())
}
