use clap::Parser;
use courtside::embedding::FastEmbedEncoder;
use courtside::llm::OpenAiEngine;
use courtside::utils::config::Config;
use courtside::{CapabilitySet, Dispatcher, RouteRegistry, Router, WorkerRegistry};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Research a free-text NBA question with the built-in worker taxonomy.
#[derive(Debug, Parser)]
#[command(name = "courtside", version, about)]
struct Cli {
    /// The research request, e.g. "Who is leading in NBA player stats this season?"
    request: String,

    /// Minimum routing confidence; below it the request is rejected as off-domain.
    #[arg(long)]
    threshold: Option<f32>,

    /// Override the completion model name.
    #[arg(long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> courtside::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("courtside=info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(threshold) = cli.threshold {
        config.router.confidence_threshold = threshold;
    }
    if let Some(model) = cli.model {
        config.engine.model = model;
    }

    let encoder = Arc::new(FastEmbedEncoder::new(&config.encoder.model)?);
    let router = Router::new(
        encoder,
        &RouteRegistry::nba_default(),
        config.router.confidence_threshold,
    )
    .await?;
    let engine = Arc::new(
        OpenAiEngine::new(
            config.engine.api_key.clone(),
            config.engine.api_base.clone(),
            config.engine.model.clone(),
        )
        .with_max_tool_iterations(config.engine.max_tool_iterations),
    );
    let dispatcher = Dispatcher::new(
        router,
        WorkerRegistry::nba_default(),
        engine,
        CapabilitySet::new()?,
    )?;

    let answer = dispatcher.research(&cli.request).await?;
    println!("{}", answer);
    Ok(())
}
