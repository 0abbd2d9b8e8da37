/// SQLite database gateway
///
/// Every logical operation runs inside [`Database::transaction`]: a connection
/// is taken exclusively, the unit of work runs, and the transaction commits on
/// success or rolls back on failure. The connection is released either way.
/// Nothing is shared between concurrent operations; write contention is left to
/// SQLite's own file locking.
///
/// # Example
///
/// ```no_run
/// use tasktitan_shared::db::pool::{Database, DatabaseConfig};
///
/// # async fn example() -> Result<(), sqlx::Error> {
/// let db = Database::connect(DatabaseConfig::default()).await?;
///
/// let answer: i64 = db
///     .transaction(|conn| {
///         Box::pin(async move {
///             let row: (i64,) = sqlx::query_as("SELECT 42").fetch_one(&mut *conn).await?;
///             Ok::<_, sqlx::Error>(row.0)
///         })
///     })
///     .await?;
/// assert_eq!(answer, 42);
/// # Ok(())
/// # }
/// ```

use futures::future::BoxFuture;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteConnection, SqlitePool, SqlitePoolOptions},
    Error,
};
use std::{path::PathBuf, time::Duration};
use tracing::{debug, info, warn};

/// Configuration for the database gateway
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path of the SQLite database file
    pub path: PathBuf,

    /// Upper bound on simultaneously open connections
    ///
    /// Default: 5
    pub max_connections: u32,

    /// How long to wait for a free connection (seconds)
    ///
    /// Default: 30 seconds
    pub connect_timeout_seconds: u64,

    /// Create the database file if it does not exist yet
    ///
    /// Default: true
    pub create_if_missing: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("TaskTitan.sqlite"),
            max_connections: 5,
            connect_timeout_seconds: 30,
            create_if_missing: true,
        }
    }
}

/// Handle to the application database
///
/// Cheap to clone; clones share the same underlying connections.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the database file and verifies it answers queries
    ///
    /// Foreign keys are declared in the schema but not enforced.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or the health check fails
    pub async fn connect(config: DatabaseConfig) -> Result<Self, Error> {
        info!(
            path = %config.path.display(),
            max_connections = config.max_connections,
            "Opening database"
        );

        let options = SqliteConnectOptions::new()
            .filename(&config.path)
            .create_if_missing(config.create_if_missing)
            .foreign_keys(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.health_check().await?;

        info!("Database opened successfully");
        Ok(db)
    }

    /// Runs `work` inside a transaction
    ///
    /// Commits when `work` returns `Ok`, rolls back when it returns `Err`.
    /// The connection goes back to the pool in both cases. A rollback failure
    /// is logged and the original error is returned.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `work`, or a database error raised while
    /// beginning or committing the transaction.
    pub async fn transaction<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: for<'c> FnOnce(&'c mut SqliteConnection) -> BoxFuture<'c, Result<T, E>> + Send,
        T: Send,
        E: From<Error> + Send,
    {
        let mut tx = self.pool.begin().await?;

        match work(&mut *tx).await {
            Ok(value) => {
                tx.commit().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "Rollback failed");
                }
                debug!("Transaction rolled back");
                Err(err)
            }
        }
    }

    /// Executes a trivial query to verify the database responds
    pub async fn health_check(&self) -> Result<(), Error> {
        debug!("Performing database health check");

        let result: (i32,) = sqlx::query_as("SELECT 1").fetch_one(&self.pool).await?;

        if result.0 == 1 {
            debug!("Database health check passed");
            Ok(())
        } else {
            warn!("Database health check returned unexpected value: {}", result.0);
            Err(Error::Protocol(
                "Health check returned unexpected value".into(),
            ))
        }
    }

    /// Closes all connections
    ///
    /// Call during shutdown so SQLite can checkpoint and release its locks.
    pub async fn close(&self) {
        info!("Closing database");
        self.pool.close().await;
        info!("Database closed");
    }
}
