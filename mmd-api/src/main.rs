//! mmd-api (Maturity Dashboard) - Assessment data service
//!
//! Serves precomputed data mesh maturity assessments and lets users
//! override individual question scores. Overrides are persisted to a JSON
//! document and folded into every view.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use mmd_common::config::Config;
use mmd_common::{Dataset, OverrideStore};
use mmd_api::{build_router, AppState, SERVICE_NAME, SERVICE_VERSION};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for mmd-api
///
/// Each argument takes precedence over the matching config file entry.
#[derive(Parser, Debug)]
#[command(name = "mmd-api")]
#[command(about = "Maturity dashboard assessment service")]
#[command(version)]
struct Args {
    /// TOML config file (default: <config dir>/mmd/config.toml)
    #[arg(short, long, env = "MMD_CONFIG")]
    config: Option<PathBuf>,

    /// Directory containing domains.json, overview.json and details.json
    #[arg(short, long, env = "MMD_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Override document path (default: <data dir>/overrides.json)
    #[arg(short, long, env = "MMD_OVERRIDES_PATH")]
    overrides: Option<PathBuf>,

    /// Address to bind to
    #[arg(short, long, env = "MMD_BIND")]
    bind: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "MMD_PORT")]
    port: Option<u16>,

    /// Directory with the dashboard front end (index.html, static/)
    #[arg(long, env = "MMD_STATIC_DIR")]
    static_dir: Option<PathBuf>,
}

impl Args {
    fn apply(self, mut config: Config) -> Config {
        if let Some(dir) = self.data_dir {
            config.data_dir = dir;
        }
        if let Some(path) = self.overrides {
            config.overrides_path = Some(path);
        }
        if let Some(bind) = self.bind {
            config.bind = bind;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(dir) = self.static_dir {
            config.static_dir = Some(dir);
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;
    let config = args.apply(config);

    // RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("mmd_api={0},mmd_common={0},tower_http=info", config.logging.level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Maturity Dashboard ({}) v{}",
        SERVICE_NAME, SERVICE_VERSION
    );
    info!("Data directory: {}", config.data_dir.display());

    let dataset = Dataset::load(&config.data_dir).context("Failed to load base datasets")?;
    dataset
        .check_integrity(config.strict_integrity)
        .context("Base datasets are inconsistent")?;

    let overrides_path = config.overrides_path();
    let store = OverrideStore::open(&overrides_path)
        .await
        .with_context(|| format!("Failed to open overrides at {}", overrides_path.display()))?;

    if let Some(dir) = &config.static_dir {
        info!("Serving dashboard front end from {}", dir.display());
    }

    let state = AppState::new(dataset, store, config.scoring);
    let app = build_router(state, config.static_dir.clone());

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("{} listening on http://{}", SERVICE_NAME, addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
