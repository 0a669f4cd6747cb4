mod cli;
mod commands;
mod service;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use corpfinder_core::config::{apply_env_overrides, AppConfig};
use corpfinder_index::ElasticsearchIndex;
use corpfinder_matcher::Matcher;

use crate::cli::{Cli, Commands};

fn main() -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
    runtime.block_on(async_main())
}

async fn async_main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config_str = std::fs::read_to_string(&cli.config).unwrap_or_else(|_| {
        warn!(path = %cli.config, "config file not found, using embedded defaults");
        include_str!("../config/default.toml").to_string()
    });
    let mut config: AppConfig = toml::from_str(&config_str)?;
    apply_env_overrides(&mut config);

    let result = match cli.command {
        Commands::Scrape { input, output } => commands::scrape(&config, &input, &output).await,
        Commands::BuildIndex { scraped, names, output } => {
            commands::index_status_report(&config).await;
            commands::build_index(&config, &scraped, &names, &output).await
        }
        Commands::Match { input, output } => commands::match_csv(&config, &input, &output).await,
        Commands::Serve => serve(&config).await,
    };

    if let Err(e) = &result {
        eprintln!("error: {e:#}");
    }
    result
}

async fn serve(config: &AppConfig) -> Result<()> {
    commands::index_status_report(config).await;

    let index = Arc::new(ElasticsearchIndex::new(&config.elasticsearch)?);
    let matcher = Arc::new(Matcher::new(index, config.elasticsearch.index_name.clone()));
    let state = service::AppState { matcher };

    let port: u16 = std::env::var("PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(5000);
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr, "corpfinder service listening");

    axum::serve(listener, service::router(state, config.general.max_body_size_mb)).await?;
    Ok(())
}
