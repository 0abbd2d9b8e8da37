//! # TaskTitan API Server
//!
//! Backend for the TaskTitan mobile app: CRUD endpoints for users, tasks and
//! notes over a single SQLite file, plus the feedback websocket.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p tasktitan-api -- --port 5000
//! ```

use clap::Parser;
use tasktitan_api::{
    app::{build_router, AppState},
    config::Config,
};
use tasktitan_shared::db::{pool::Database, schema};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// TaskTitan API server
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Port to listen on (overrides API_PORT; default 5000)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "tasktitan_api=debug,tasktitan_shared=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "TaskTitan API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?.with_port(cli.port);

    let db = Database::connect(config.database_config()).await?;
    db.transaction(|conn| Box::pin(async move { schema::initialize_schema(conn).await }))
        .await?;

    let bind_address = config.bind_address();
    let app = build_router(AppState::new(db.clone(), config));

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received, exiting...");
}
