// ============================
// crates/backend-bin/src/main.rs
// ============================
//! `tenantry-server` entry point.
use anyhow::Context;
use clap::Parser;
use std::{path::PathBuf, sync::Arc};
use tenantry_backend::{
    config::{LogSettings, Settings},
    routes,
    storage::FlatFileStore,
    AppState,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tenantry-server", version, about = "Identity and organization service")]
struct Args {
    /// TOML config file (defaults to ./config.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override server.host
    #[arg(long)]
    host: Option<String>,

    /// Override server.port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut settings: Settings = Settings::figment(args.config.as_deref())
        .extract()
        .context("failed to read configuration")?;
    if let Some(host) = args.host {
        settings.server.host = host;
    }
    if let Some(port) = args.port {
        settings.server.port = port;
    }
    settings.validate().context("invalid configuration")?;

    init_tracing(&settings.log);

    let storage = FlatFileStore::open(&settings.storage.path)
        .await
        .with_context(|| format!("failed to open store at {}", settings.storage.path.display()))?;

    let addr = settings.server.bind_addr();
    let state = Arc::new(AppState::new(storage, settings)?);
    let app = routes::create_router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// `RUST_LOG` wins over the configured level when set.
fn init_tracing(log: &LogSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if log.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
