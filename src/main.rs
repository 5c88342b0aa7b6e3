//! Pdfbrief CLI - batch PDF summarisation
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments and handling top-level errors.

use anyhow::Context;
use clap::Parser;
use pdfbrief::{batch, logging, Config, PromptTemplate, Summarizer, XaiClient};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "pdfbrief")]
#[command(author, version, about = "Batch PDF summarisation using LLMs", long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "pdfbrief.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Configuration failures are fatal before any processing starts.
    let config = Config::load_from(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;

    logging::init(&config.logging).context("failed to initialise logging")?;
    info!("starting pdfbrief");
    info!(
        input = %config.directories.input.display(),
        output = %config.directories.output.display(),
        model = %config.xai.model,
        "configuration loaded"
    );

    let backend = XaiClient::new(&config.xai).context("failed to build LLM client")?;
    let template = PromptTemplate::summary_default(config.summary.max_length);
    let summarizer = Summarizer::new(backend, template, config.summary.max_length);

    match batch::run(
        &config.directories.input,
        &config.directories.output,
        &summarizer,
    )
    .await
    {
        Ok(report) => {
            info!(
                processed = report.processed,
                skipped = report.skipped,
                failed = report.failed,
                "application processing completed"
            );
            Ok(())
        }
        Err(err) => {
            error!(error = %err, "a critical error occurred during the batch run");
            Err(err.into())
        }
    }
}
