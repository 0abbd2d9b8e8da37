/// Task model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     task_id INTEGER PRIMARY KEY AUTOINCREMENT,
///     user_id INTEGER,
///     title TEXT NOT NULL,
///     description TEXT,
///     due_date DATE,
///     status TEXT,
///     FOREIGN KEY (user_id) REFERENCES users(user_id)
/// );
/// ```
///
/// `status` is free text ("Pending", "Completed", ...), not a closed set.

use crate::db::repository::{Entity, Repository, SqlValue};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteConnection;

/// A task owned by one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub task_id: i64,
    pub user_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<String>,
}

impl Entity for Task {
    const TABLE: &'static str = "tasks";
    const PRIMARY_KEY: &'static str = "task_id";
    const COLUMNS: &'static [&'static str] =
        &["user_id", "title", "description", "due_date", "status"];
}

/// Input for creating a task; every field is required
#[derive(Debug, Clone, Deserialize)]
pub struct NewTask {
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub status: String,
}

/// Partial update; `None` keeps the stored value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<String>,
}

impl TaskChanges {
    /// True when no field carries a value
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.status.is_none()
    }
}

impl Task {
    /// Creates a task and returns the generated id
    pub async fn create(conn: &mut SqliteConnection, data: NewTask) -> Result<i64, sqlx::Error> {
        Repository::<Task>::insert(
            conn,
            vec![
                data.user_id.into(),
                data.title.into(),
                data.description.into(),
                data.due_date.into(),
                data.status.into(),
            ],
        )
        .await
    }

    /// Finds a task by id
    pub async fn find_by_id(
        conn: &mut SqliteConnection,
        task_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        Repository::<Task>::find_by_id(conn, task_id).await
    }

    /// Lists a user's tasks in creation order
    pub async fn list_by_user(
        conn: &mut SqliteConnection,
        user_id: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        Repository::<Task>::find_where(conn, "user_id", SqlValue::Integer(user_id)).await
    }

    /// Applies a partial update, returning whether a row matched
    pub async fn update(
        conn: &mut SqliteConnection,
        task_id: i64,
        changes: TaskChanges,
    ) -> Result<bool, sqlx::Error> {
        let matched = Repository::<Task>::update_partial(
            conn,
            task_id,
            vec![
                ("title", changes.title.into()),
                ("description", changes.description.into()),
                ("due_date", changes.due_date.into()),
                ("status", changes.status.into()),
            ],
        )
        .await?;

        Ok(matched > 0)
    }

    /// Deletes a task, returning whether a row was removed
    ///
    /// Notes attached to the task are left in place.
    pub async fn delete(conn: &mut SqliteConnection, task_id: i64) -> Result<bool, sqlx::Error> {
        Ok(Repository::<Task>::delete_by_id(conn, task_id).await? > 0)
    }
}
