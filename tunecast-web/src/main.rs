//! tunecast-web - genre form backend
//!
//! Serves the welcome page, accepts genre submissions on `POST /users`,
//! and answers with the genre's top tracks plus the visitors sharing it.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tunecast_common::config::{AppConfig, ConfigOverrides};
use tunecast_web::db::SqliteSubmissionStore;
use tunecast_web::services::{
    build_http_client, CatalogClient, ClientCredentialsExchanger, SubmissionOrchestrator,
};
use tunecast_web::{build_router, AppState};

#[derive(Parser, Debug)]
#[command(name = "tunecast-web")]
#[command(about = "Genre submission backend for tunecast")]
#[command(version)]
struct Args {
    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory served as static assets
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Store connection string (sqlite URL)
    #[arg(long)]
    store: Option<String>,

    /// TOML config file
    #[arg(short, long, env = "TUNECAST_CONFIG")]
    config: Option<PathBuf>,

    /// Credentials file in .env format
    #[arg(long, env = "TUNECAST_CREDENTIALS_FILE")]
    credentials_file: Option<PathBuf>,
}

impl From<Args> for ConfigOverrides {
    fn from(args: Args) -> Self {
        ConfigOverrides {
            host: args.host,
            port: args.port,
            static_dir: args.static_dir,
            store_connection_string: args.store,
            config_file: args.config,
            credentials_file: args.credentials_file,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tunecast_web=info,tunecast_common=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting tunecast-web v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let overrides = ConfigOverrides::from(Args::parse());
    let config = match AppConfig::load(&overrides) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };
    info!(
        related_users = ?config.related_users,
        search_limit = config.catalog.search_limit,
        "Configuration loaded"
    );

    let pool = tunecast_common::db::init_database(
        &config.store.connection_string,
        config.store.max_connections,
    )
    .await
    .context("Failed to initialize submission store")?;
    info!("Submission store ready");

    let http_client =
        build_http_client(&config.catalog).context("Failed to build HTTP client")?;

    let orchestrator = SubmissionOrchestrator::new(
        Arc::new(SqliteSubmissionStore::new(pool.clone())),
        Arc::new(ClientCredentialsExchanger::new(http_client.clone(), &config.catalog)),
        Arc::new(CatalogClient::new(http_client, &config.catalog)),
        config.related_users,
    );

    let state = AppState::new(Arc::new(orchestrator), config.server.static_dir.clone());
    let app = build_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Server running at http://{}", addr);
    info!("Static assets from {}", config.server.static_dir.display());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
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
