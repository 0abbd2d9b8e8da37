//! # TaskTitan seed tool
//!
//! Drops and recreates the tables in the configured database file, then
//! inserts the sample users, tasks and note. Takes no arguments; the database
//! path comes from `DATABASE_PATH` like the server's.
//!
//! ```bash
//! cargo run -p tasktitan-api --bin tasktitan-seed
//! ```

use tasktitan_api::config::Config;
use tasktitan_shared::db::{pool::Database, schema, seed};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tasktitan_shared=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let db = Database::connect(config.database_config()).await?;

    let summary = db
        .transaction(|conn| {
            Box::pin(async move {
                schema::reset_schema(conn).await?;
                seed::seed_sample_data(conn).await
            })
        })
        .await?;

    tracing::info!(
        path = %config.database.path.display(),
        users = ?summary.user_ids,
        tasks = ?summary.task_ids,
        notes = ?summary.note_ids,
        "Database initialized"
    );

    db.close().await;
    Ok(())
}
