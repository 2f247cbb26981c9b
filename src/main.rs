// src/main.rs

mod cli;
mod config;
mod errors;
mod tui;

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use cli::Cli;
use config::{Config, LoggingConfig};
use errors::PopmenuError;
use tui::{run_tui, tracing_layer::LogPanelLayer, UILogEntry};

/// RUST_LOG wins over the configured level.
fn build_filter(logging: &LoggingConfig) -> Result<EnvFilter, PopmenuError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&logging.level)
            .map_err(|_| PopmenuError::LogFilterError(logging.level.clone())),
    }
}

fn init_tracing(
    logging: &LoggingConfig,
    ui_sender: mpsc::UnboundedSender<UILogEntry>,
) -> Result<WorkerGuard, PopmenuError> {
    let log_dir = logging.expanded_log_dir()?;
    std::fs::create_dir_all(&log_dir)?;
    let appender = if logging.rotate_daily {
        rolling::daily(&log_dir, &logging.file_name)
    } else {
        rolling::never(&log_dir, &logging.file_name)
    };
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(build_filter(logging)?)
        .with(fmt::layer().with_writer(file_writer).with_ansi(false))
        .with(LogPanelLayer::new(ui_sender))
        .init();
    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = Cli::parse();

    // Logging is not up yet, so a load failure is reported after init.
    let (mut config, load_error) = match Config::load(cli_args.config.as_deref()) {
        Ok(cfg) => (cfg, None),
        Err(e) => {
            if cli_args.config.is_some() {
                return Err(e.into());
            }
            (Config::default(), Some(e))
        }
    };
    cli_args.apply_overrides(&mut config);

    let (log_sender, log_receiver) = mpsc::unbounded_channel();
    let _log_guard = init_tracing(&config.logging, log_sender)?;

    info!("Starting popmenu...");
    if let Some(e) = load_error {
        error!("Failed to load configuration: {}", e);
        warn!("Proceeding with default configuration");
    }
    debug!("Loaded app config: {:?}", config);

    let config = Arc::new(config);
    if let Some(command) = cli_args.command {
        info!("Handling CLI command...");
        cli::handle_command(command, &config)?;
    } else {
        info!("No subcommand provided, launching TUI...");
        run_tui(Arc::clone(&config), log_receiver).await?;
    }

    info!("popmenu shutting down.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_level_is_a_filter_error() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let logging = LoggingConfig {
            level: "popmenu=loud".to_string(),
            ..LoggingConfig::default()
        };
        assert!(matches!(build_filter(&logging), Err(PopmenuError::LogFilterError(_))));
    }

    #[test]
    fn configured_level_builds_a_filter() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        assert!(build_filter(&LoggingConfig::default()).is_ok());
    }
}
