/// Database layer for TaskTitan
///
/// This module provides the SQLite gateway, the generic repository shared by
/// all entities, and the schema/seed bootstrap.
///
/// # Modules
///
/// - `pool`: Database handle with health check and scoped transactions
/// - `repository`: Table-driven CRUD operations used by every model
/// - `schema`: Table definitions
/// - `seed`: Sample rows for local development
///
/// # Example
///
/// ```no_run
/// use tasktitan_shared::db::pool::{Database, DatabaseConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig {
///         path: "TaskTitan.sqlite".into(),
///         ..Default::default()
///     };
///
///     let db = Database::connect(config).await?;
///     Ok(())
/// }
/// ```

pub mod pool;
pub mod repository;
pub mod schema;
pub mod seed;
