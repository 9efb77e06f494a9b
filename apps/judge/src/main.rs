mod config;
mod errors;
mod evaluation;
mod github;
mod llm_client;
mod models;
mod pipeline;
mod store;

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::evaluation::evaluator::Evaluator;
use crate::github::GithubClient;
use crate::llm_client::LlmClient;
use crate::pipeline::Pipeline;
use crate::store::AirtableStore;

#[derive(Parser, Debug)]
#[command(
    name = "judge",
    about = "Score hackathon applicants and teams with an LLM and write the results back to Airtable",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score every applicant individually
    Individual,
    /// Score every team of two or more applicants
    Team,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting judge v{}", env!("CARGO_PKG_VERSION"));

    let store = AirtableStore::new(
        config.airtable_api_key.clone(),
        config.airtable_base_id.clone(),
        config.airtable_table_name.clone(),
    )?;
    info!(
        "Airtable store initialized (base: {}, table: {})",
        config.airtable_base_id, config.airtable_table_name
    );

    let llm = LlmClient::new(config.anthropic_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let github = GithubClient::new()?;

    let pipeline = Pipeline::new(
        Arc::new(store),
        Arc::new(github),
        Evaluator::new(Arc::new(llm)),
    );

    let summary = match cli.command {
        Command::Individual => pipeline.run_individual().await?,
        Command::Team => pipeline.run_team().await?,
    };

    if summary.failures > 0 {
        tracing::warn!("{} item(s) failed; re-run to retry them", summary.failures);
    }

    Ok(())
}
