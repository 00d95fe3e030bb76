//! dash-settings - account settings page service
//!
//! Serves `GET /settings` for the dashboard. Sessions are read from the
//! shared dashboard database; they are issued by the sign-in service.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use dash_common::config::{RootFolderInitializer, RootFolderResolver};
use dash_common::db::init_database;
use dash_common::session::SqliteSessionStore;
use dash_settings::{build_router, AppState, MODULE_NAME};
use tracing::{error, info};

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "dash-settings", version, about = "Dashboard account settings page")]
struct Args {
    /// Root folder holding dashboard.db (overrides env and config file)
    #[arg(long)]
    root_folder: Option<PathBuf>,

    /// Port to listen on (overrides config file)
    #[arg(long, env = "DASH_SETTINGS_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let resolver = RootFolderResolver::new(MODULE_NAME);
    let config = resolver.load_config();

    // RUST_LOG wins over the configured level
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));
    let log_file = config
        .logging
        .open_log_file()
        .context("Failed to open log file")?;

    match log_file {
        Some(file) => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init(),
        None => tracing_subscriber::fmt().with_env_filter(env_filter).init(),
    }

    // Log build identification immediately after tracing init
    info!(
        "Starting Dashboard Settings ({}) v{} [{}] built {} ({})",
        MODULE_NAME,
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let root_folder = resolver.resolve_with_cli(args.root_folder.as_deref());
    let initializer = RootFolderInitializer::new(root_folder);
    initializer
        .ensure_directory_exists()
        .context("Failed to create root folder")?;

    let db_path = initializer.database_path();
    info!("Database path: {}", db_path.display());

    let pool = match init_database(&db_path).await {
        Ok(pool) => {
            info!("✓ Connected to database");
            pool
        }
        Err(e) => {
            error!("Failed to open database: {}", e);
            return Err(e.into());
        }
    };

    if let Some(path) = &config.logging.file {
        info!("Logging to {}", path.display());
    }
    info!("Session cookie: {}", config.session.cookie_name);
    let sessions = SqliteSessionStore::new(pool, config.session.cookie_name.clone());

    let state = AppState::new(Arc::new(sessions));
    let app = build_router(state);

    let port = args.port.unwrap_or(config.server.port);
    let addr = format!("{}:{}", config.server.host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("{} listening on http://{}", MODULE_NAME, addr);
    info!("Settings page: http://{}/settings", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
