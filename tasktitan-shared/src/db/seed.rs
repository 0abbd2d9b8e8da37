/// Sample rows for local development
///
/// Two users, one task each, and a note on john_doe's task. Passwords go
/// through the same hashing as a normal sign-up.

use crate::models::{
    note::{NewNote, Note},
    task::{NewTask, Task},
    user::{NewUser, User, UserError},
};
use chrono::NaiveDate;
use sqlx::sqlite::SqliteConnection;
use tracing::info;

/// Ids of the rows created by [`seed_sample_data`]
#[derive(Debug, Clone)]
pub struct SeedSummary {
    pub user_ids: Vec<i64>,
    pub task_ids: Vec<i64>,
    pub note_ids: Vec<i64>,
}

fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate, UserError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| sqlx::Error::Protocol(format!("invalid seed date {year}-{month}-{day}")).into())
}

/// Inserts the sample users, tasks and note
pub async fn seed_sample_data(conn: &mut SqliteConnection) -> Result<SeedSummary, UserError> {
    let john = User::create(
        conn,
        NewUser {
            username: "john_doe".to_string(),
            email: "john.doe@example.com".to_string(),
            password: "securepassword123".to_string(),
        },
    )
    .await?;

    let jane = User::create(
        conn,
        NewUser {
            username: "jane_doe".to_string(),
            email: "jane.doe@example.com".to_string(),
            password: "anothersecure123".to_string(),
        },
    )
    .await?;

    let task_one = Task::create(
        conn,
        NewTask {
            user_id: john,
            title: "Task 1".to_string(),
            description: "Description for Task 1".to_string(),
            due_date: date(2024, 5, 1)?,
            status: "Pending".to_string(),
        },
    )
    .await?;

    let task_two = Task::create(
        conn,
        NewTask {
            user_id: jane,
            title: "Task 2".to_string(),
            description: "Description for Task 2".to_string(),
            due_date: date(2024, 5, 2)?,
            status: "Completed".to_string(),
        },
    )
    .await?;

    let note = Note::create(
        conn,
        NewNote {
            user_id: john,
            task_id: task_one,
            title: "Note 1".to_string(),
            content: "Content for Note 1".to_string(),
        },
    )
    .await?;

    info!(users = 2, tasks = 2, notes = 1, "Seeded sample data");

    Ok(SeedSummary {
        user_ids: vec![john, jane],
        task_ids: vec![task_one, task_two],
        note_ids: vec![note],
    })
}
