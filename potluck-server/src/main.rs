//! Potluck Server
//!
//! RSVP, dish sign-up and Secret Santa backend for a single hosted dinner.

mod api;
mod config;
mod server;
mod shutdown;
mod state;

use clap::Parser;
use config::{ConfigLoader, get_database_url};
use potluck_core::backend::Backend;
use potluck_core::framework::DatabaseProcessor;
use potluck_core::memory::MemoryProcessor;
use server::{build_router, run_server};
use shutdown::spawn_config_reload_handler;
use sqlx::postgres::PgPoolOptions;
use state::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Potluck - RSVPs, dish sign-ups and a Secret Santa draw
#[derive(Parser, Debug)]
#[command(name = "potluck-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, env = "POTLUCK_CONFIG", default_value = "./potluck-config.toml")]
    config: PathBuf,

    /// Override the listen address (e.g., 0.0.0.0:3000)
    #[arg(short, long)]
    listen: Option<SocketAddr>,

    /// Run database migrations on startup
    #[arg(long, default_value = "false")]
    migrate: bool,

    /// Keep all data in memory instead of PostgreSQL (lost on exit)
    #[arg(long, default_value = "false", conflicts_with = "migrate")]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse();

    tracing::info!("Starting potluck-server v{}", env!("CARGO_PKG_VERSION"));

    let config_loader = Arc::new(ConfigLoader::new(&args.config, args.listen));
    let loaded_config = config_loader.load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;

    let listen_addr = loaded_config.server.listen;
    tracing::info!("Configuration loaded from {:?}", args.config);

    let shared_config = loaded_config.into_shared();

    let (store, db_pool) = if args.in_memory {
        tracing::warn!("Using the in-memory store, data will not survive a restart");
        (Backend::Memory(MemoryProcessor::new()), None)
    } else {
        let database_url = get_database_url().map_err(|e| {
            tracing::error!("DATABASE_URL environment variable not set");
            e
        })?;

        tracing::info!("Connecting to database...");
        let db_pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(&database_url)
            .await
            .map_err(|e| {
                tracing::error!("Failed to connect to database: {}", e);
                e
            })?;
        tracing::info!("Database connection established");

        if args.migrate {
            tracing::info!("Running database migrations...");
            sqlx::migrate!("../migrations")
                .run(&db_pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to run migrations: {}", e);
                    e
                })?;
            tracing::info!("Migrations completed successfully");
        }

        let store = Backend::Postgres(DatabaseProcessor {
            pool: db_pool.clone(),
        });
        (store, Some(db_pool))
    };

    let state = AppState::new(store, shared_config);

    let shutdown_notify = spawn_config_reload_handler(state.clone(), config_loader);

    let router = build_router(state);

    tracing::info!("Starting HTTP server on {}", listen_addr);
    let result = run_server(router, listen_addr).await;

    shutdown_notify.notify_one();

    if let Some(db_pool) = db_pool {
        tracing::info!("Closing database connections...");
        db_pool.close().await;
    }
    tracing::info!("Server shutdown complete");

    result.map_err(Into::into)
}

/// Initialize the tracing subscriber with environment-based filtering.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
