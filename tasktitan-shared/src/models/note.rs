/// Note model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE notes (
///     note_id INTEGER PRIMARY KEY AUTOINCREMENT,
///     user_id INTEGER,
///     task_id INTEGER,
///     title TEXT NOT NULL,
///     content TEXT,
///     FOREIGN KEY (user_id) REFERENCES users(user_id),
///     FOREIGN KEY (task_id) REFERENCES tasks(task_id)
/// );
/// ```

use crate::db::repository::{Entity, Repository, SqlValue};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteConnection;

/// A note attached to a user and a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Note {
    pub note_id: i64,
    pub user_id: Option<i64>,
    pub task_id: Option<i64>,
    pub title: String,
    pub content: Option<String>,
}

impl Entity for Note {
    const TABLE: &'static str = "notes";
    const PRIMARY_KEY: &'static str = "note_id";
    const COLUMNS: &'static [&'static str] = &["user_id", "task_id", "title", "content"];
}

/// Input for creating a note; every field is required
#[derive(Debug, Clone, Deserialize)]
pub struct NewNote {
    pub user_id: i64,
    pub task_id: i64,
    pub title: String,
    pub content: String,
}

/// Partial update; `None` keeps the stored value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoteChanges {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl NoteChanges {
    /// True when neither field carries a value
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

impl Note {
    /// Creates a note and returns the generated id
    pub async fn create(conn: &mut SqliteConnection, data: NewNote) -> Result<i64, sqlx::Error> {
        Repository::<Note>::insert(
            conn,
            vec![
                data.user_id.into(),
                data.task_id.into(),
                data.title.into(),
                data.content.into(),
            ],
        )
        .await
    }

    /// Finds a note by id
    pub async fn find_by_id(
        conn: &mut SqliteConnection,
        note_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        Repository::<Note>::find_by_id(conn, note_id).await
    }

    /// Lists the notes attached to a task
    pub async fn list_by_task(
        conn: &mut SqliteConnection,
        task_id: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        Repository::<Note>::find_where(conn, "task_id", SqlValue::Integer(task_id)).await
    }

    /// Lists every note a user has written
    pub async fn list_by_user(
        conn: &mut SqliteConnection,
        user_id: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        Repository::<Note>::find_where(conn, "user_id", SqlValue::Integer(user_id)).await
    }

    /// Applies a partial update, returning whether a row matched
    pub async fn update(
        conn: &mut SqliteConnection,
        note_id: i64,
        changes: NoteChanges,
    ) -> Result<bool, sqlx::Error> {
        let matched = Repository::<Note>::update_partial(
            conn,
            note_id,
            vec![
                ("title", changes.title.into()),
                ("content", changes.content.into()),
            ],
        )
        .await?;

        Ok(matched > 0)
    }

    /// Deletes a note, returning whether a row was removed
    pub async fn delete(conn: &mut SqliteConnection, note_id: i64) -> Result<bool, sqlx::Error> {
        Ok(Repository::<Note>::delete_by_id(conn, note_id).await? > 0)
    }

    /// Deletes every note attached to a task, returning how many were removed
    pub async fn delete_all_for_task(
        conn: &mut SqliteConnection,
        task_id: i64,
    ) -> Result<u64, sqlx::Error> {
        Repository::<Note>::delete_where(conn, "task_id", SqlValue::Integer(task_id)).await
    }
}
