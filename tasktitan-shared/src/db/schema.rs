/// Table definitions
///
/// Three tables with auto-increment surrogate keys. Foreign keys are declared
/// for documentation only; the gateway opens connections with enforcement off.
/// No indexes exist beyond the primary keys.

use sqlx::{sqlite::SqliteConnection, Error};
use tracing::info;

/// `CREATE TABLE` statements, in dependency order
pub const CREATE_TABLES: [&str; 3] = [
    r#"
    CREATE TABLE IF NOT EXISTS users (
        user_id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL,
        email TEXT,
        password_hash TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS tasks (
        task_id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER,
        title TEXT NOT NULL,
        description TEXT,
        due_date DATE,
        status TEXT,
        FOREIGN KEY (user_id) REFERENCES users(user_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS notes (
        note_id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER,
        task_id INTEGER,
        title TEXT NOT NULL,
        content TEXT,
        FOREIGN KEY (user_id) REFERENCES users(user_id),
        FOREIGN KEY (task_id) REFERENCES tasks(task_id)
    )
    "#,
];

/// `DROP TABLE` statements, in reverse dependency order
const DROP_TABLES: [&str; 3] = [
    "DROP TABLE IF EXISTS notes",
    "DROP TABLE IF EXISTS tasks",
    "DROP TABLE IF EXISTS users",
];

/// Creates any missing tables; existing tables and rows are left alone
pub async fn initialize_schema(conn: &mut SqliteConnection) -> Result<(), Error> {
    for statement in CREATE_TABLES {
        sqlx::query(statement).execute(&mut *conn).await?;
    }

    info!("Database schema ready");
    Ok(())
}

/// Drops all tables and recreates them empty
pub async fn reset_schema(conn: &mut SqliteConnection) -> Result<(), Error> {
    for statement in DROP_TABLES {
        sqlx::query(statement).execute(&mut *conn).await?;
    }

    info!("Dropped existing tables");
    initialize_schema(conn).await
}
