//! Portfolio API server binary.
//!
//! Serves the project/source API. Secrets (`ADMIN_USERNAME`, `ADMIN_PASSWORD`,
//! `API_SECRET`, `APPLICATION_URL`) are read from the environment on every use,
//! so a `.env` file or a process-level export both work.

use std::sync::Arc;

use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

use folio_core::config::EnvConfigSource;
use folio_core::store::{MemoryStore, PgStore, PortfolioStore};

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "folio_server", about = "Portfolio API server")]
struct Args {
    /// Port to listen on (0 = ephemeral).
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// Address to bind.
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    host: String,

    /// PostgreSQL connection URL. Without one, data lives in memory.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("info,folio_api=debug,folio_core=debug")
            }),
        )
        .init();

    let args = Args::parse();

    info!(host = %args.host, port = args.port, "starting folio_server");

    let store: Arc<dyn PortfolioStore> = match &args.database_url {
        Some(url) => {
            info!(max_connections = args.max_connections, "configuring connection pool");
            let pool = PgPoolOptions::new()
                .max_connections(args.max_connections)
                .acquire_timeout(std::time::Duration::from_secs(30))
                .connect(url)
                .await?;

            info!("running database migrations");
            folio_core::migrate::migrate(&pool).await?;
            Arc::new(PgStore::new(pool))
        }
        None => {
            warn!("DATABASE_URL not set, using in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    let state = folio_api::AppState::new(store, Arc::new(EnvConfigSource::new()));
    let app = folio_api::router(state);

    let listener = tokio::net::TcpListener::bind((args.host.as_str(), args.port)).await?;
    info!(addr = %listener.local_addr()?, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await?;

    Ok(())
}
