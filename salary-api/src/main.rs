use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{debug, info};

use salary_api::{ApiConfig, AppState, build_router, logging};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Gross-to-net salary service.
///
/// Serves single and bulk (CSV upload) salary calculations over HTTP.
/// Command-line flags override the matching config file entries.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// TOML config file. Built-in defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to bind, e.g. `127.0.0.1`.
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on.
    #[arg(long)]
    port: Option<u16>,

    /// Log level or `EnvFilter` directive. Ignored when `RUST_LOG` is set.
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn load_config(&self) -> anyhow::Result<ApiConfig> {
        let mut config = match &self.config {
            Some(path) => ApiConfig::from_file(path)?,
            None => ApiConfig::default(),
        };

        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let cli = Cli::parse();
    let config = cli.load_config().context("invalid configuration")?;

    logging::apply_configured_level(&config.logging.level)?;
    if let Some(path) = &config.logging.file {
        logging::enable_file_logging(path)?;
    }
    debug!(?config, "configuration loaded");

    let state = AppState::from_config(&config).context("failed to build application state")?;
    let router = build_router(state, &config);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "salary service listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("salary service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
