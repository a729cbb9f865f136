//! search-config-sync
//!
//! Keeps a search provider configuration in sync with a remote JSON document.
//!
//! # Architecture Overview
//!
//! ```text
//! remote JSON → fetcher → canonical → compare ──unchanged──▶ sleep success interval
//!                                        │
//!                                        │ changed
//!                                        ▼
//!                  sink → state swap → broadcaster ──▶ sleep success interval
//!                                        │
//!                                        └──▶ subscribers
//!
//! any error ──▶ sleep backoff delay (grows per consecutive failure, capped)
//!
//! admin: GET /status  /config  /providers
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use search_config_sync::config::{load_config, validation::validate_config, ConfigError, SyncConfig};
use search_config_sync::lifecycle::{self, signals::shutdown_signal, Shutdown};
use search_config_sync::observability::logging::init_logging;
use search_config_sync::refresh::CycleOutcome;

#[derive(Parser)]
#[command(name = "search-config-sync")]
#[command(about = "Keep search providers in sync with a remote JSON document", long_about = None)]
struct Cli {
    /// TOML configuration file; built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `source.url`.
    #[arg(short, long)]
    url: Option<String>,

    /// Run a single refresh cycle, print the outcome and exit.
    #[arg(long)]
    once: bool,
}

fn load(cli: &Cli) -> Result<SyncConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => SyncConfig::default(),
    };
    if let Some(url) = &cli.url {
        config.source.url = url.clone();
    }
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load(&cli)?;

    init_logging(&config.observability.log_filter);
    tracing::info!("search-config-sync v{} starting", env!("CARGO_PKG_VERSION"));

    if cli.once {
        let mut components = lifecycle::startup::build(&config)?;
        let cycle = components.refresh_loop.run_cycle().await;
        return Ok(match cycle.outcome {
            CycleOutcome::Failed(e) => {
                eprintln!("refresh failed: {}", e);
                ExitCode::FAILURE
            }
            outcome => {
                println!(
                    "{} (fetch count {}, {} providers)",
                    outcome.label(),
                    components.state.fetch_count(),
                    components.providers.len()
                );
                ExitCode::SUCCESS
            }
        });
    }

    let shutdown = Shutdown::new();
    let service = lifecycle::start(&config, &shutdown).await?;

    shutdown_signal().await;
    shutdown.trigger();
    service.join().await;

    tracing::info!("Shutdown complete");
    Ok(ExitCode::SUCCESS)
}
