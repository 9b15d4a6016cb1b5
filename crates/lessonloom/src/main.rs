//! Lessonloom CLI binary.
//!
//! Runs one generation stage per invocation:
//! - Analyze page images and plan chapters
//! - Write scripts and prompts from verified page records
//! - Render narration, storyboards and video to the output directory

use clap::Parser;
use lessonloom::observability::{ObservabilityConfig, init_observability_with_config};
use lessonloom::{GeminiRestClient, LessonloomConfig, Pipeline, Session};
use std::sync::Arc;
use tracing::{debug, warn};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = cli::Cli::parse();

    // Initialize tracing
    let mut observability = ObservabilityConfig::new("lessonloom").with_json_logs(cli.json_logs);
    if cli.verbose {
        observability = observability.with_log_level("debug");
    }
    init_observability_with_config(observability)?;

    let config = match &cli.config {
        Some(path) => LessonloomConfig::from_file(path)?,
        None => LessonloomConfig::load()?,
    };
    debug!(base_url = %config.api.base_url, "Configuration loaded");

    let session = match cli.api_key.as_deref() {
        Some(key) => Session::signed_in(key),
        None => {
            warn!("No API key provided; generation commands will be refused");
            Session::signed_out()
        }
    };

    let client = GeminiRestClient::with_base_url(config.api.base_url.clone());
    let pipeline = Pipeline::new(Arc::new(client), config);

    cli::run_command(cli, &pipeline, &session).await?;
    Ok(())
}
