/// Integration tests for the database gateway and generic repository
///
/// Each test runs against its own SQLite file in a temporary directory.

use chrono::NaiveDate;
use tasktitan_shared::db::pool::{Database, DatabaseConfig};
use tasktitan_shared::db::repository::{Repository, SqlValue};
use tasktitan_shared::db::schema::{initialize_schema, reset_schema};
use tasktitan_shared::db::seed::seed_sample_data;
use tasktitan_shared::models::note::{NewNote, Note, NoteChanges};
use tasktitan_shared::models::task::{NewTask, Task, TaskChanges};
use tempfile::TempDir;

async fn test_db() -> (Database, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = DatabaseConfig {
        path: dir.path().join("test.sqlite"),
        ..Default::default()
    };

    let db = Database::connect(config).await.expect("Failed to open database");
    db.transaction(|conn| Box::pin(async move { initialize_schema(conn).await }))
        .await
        .expect("Failed to create schema");

    (db, dir)
}

fn sample_task(user_id: i64) -> NewTask {
    NewTask {
        user_id,
        title: "T".to_string(),
        description: "D".to_string(),
        due_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        status: "Pending".to_string(),
    }
}

async fn create_task(db: &Database, user_id: i64) -> i64 {
    db.transaction(|conn| Box::pin(async move { Task::create(conn, sample_task(user_id)).await }))
        .await
        .expect("Failed to create task")
}

async fn get_task(db: &Database, task_id: i64) -> Option<Task> {
    db.transaction(|conn| Box::pin(async move { Task::find_by_id(conn, task_id).await }))
        .await
        .expect("Failed to fetch task")
}

async fn count_tasks(db: &Database) -> i64 {
    db.transaction(|conn| {
        Box::pin(async move {
            let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks")
                .fetch_one(&mut *conn)
                .await?;
            Ok::<_, sqlx::Error>(count)
        })
    })
    .await
    .expect("Failed to count tasks")
}

#[tokio::test]
async fn test_transaction_commits_on_success() {
    let (db, _dir) = test_db().await;

    let task_id = create_task(&db, 1).await;

    let task = get_task(&db, task_id).await.expect("Task should exist");
    assert_eq!(task.title, "T");
    assert_eq!(task.user_id, Some(1));
    assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2024, 1, 1));
    assert_eq!(task.status.as_deref(), Some("Pending"));
}

#[tokio::test]
async fn test_transaction_rolls_back_on_error() {
    let (db, _dir) = test_db().await;

    let result: Result<(), sqlx::Error> = db
        .transaction(|conn| {
            Box::pin(async move {
                Task::create(conn, sample_task(1)).await?;
                Err::<(), _>(sqlx::Error::RowNotFound)
            })
        })
        .await;

    assert!(matches!(result, Err(sqlx::Error::RowNotFound)));
    assert_eq!(count_tasks(&db).await, 0, "Insert should have been rolled back");
}

#[tokio::test]
async fn test_generated_ids_increase() {
    let (db, _dir) = test_db().await;

    let first = create_task(&db, 1).await;
    let second = create_task(&db, 1).await;

    assert_eq!(first, 1);
    assert_eq!(second, 2);
}

#[tokio::test]
async fn test_partial_update_keeps_omitted_fields() {
    let (db, _dir) = test_db().await;
    let task_id = create_task(&db, 1).await;

    let changes = TaskChanges {
        status: Some("Done".to_string()),
        ..Default::default()
    };

    for _ in 0..2 {
        let changes = changes.clone();
        let matched = db
            .transaction(|conn| Box::pin(async move { Task::update(conn, task_id, changes).await }))
            .await
            .unwrap();
        assert!(matched);
    }

    let task = get_task(&db, task_id).await.unwrap();
    assert_eq!(task.title, "T");
    assert_eq!(task.description.as_deref(), Some("D"));
    assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2024, 1, 1));
    assert_eq!(task.status.as_deref(), Some("Done"));
}

#[tokio::test]
async fn test_update_missing_task_matches_nothing() {
    let (db, _dir) = test_db().await;

    let matched = db
        .transaction(|conn| {
            Box::pin(async move {
                Task::update(
                    conn,
                    99,
                    TaskChanges {
                        title: Some("X".to_string()),
                        ..Default::default()
                    },
                )
                .await
            })
        })
        .await
        .unwrap();

    assert!(!matched);
}

async fn delete_task(db: &Database, task_id: i64) -> bool {
    db.transaction(|conn| Box::pin(async move { Task::delete(conn, task_id).await }))
        .await
        .expect("Failed to delete task")
}

#[tokio::test]
async fn test_delete_twice() {
    let (db, _dir) = test_db().await;
    let task_id = create_task(&db, 1).await;

    assert!(delete_task(&db, task_id).await);
    assert!(!delete_task(&db, task_id).await);
    assert!(get_task(&db, task_id).await.is_none());
}

#[tokio::test]
async fn test_list_by_user_in_insertion_order() {
    let (db, _dir) = test_db().await;
    let first = create_task(&db, 7).await;
    create_task(&db, 8).await;
    let third = create_task(&db, 7).await;

    let tasks = db
        .transaction(|conn| Box::pin(async move { Task::list_by_user(conn, 7).await }))
        .await
        .unwrap();
    let ids: Vec<i64> = tasks.iter().map(|t| t.task_id).collect();
    assert_eq!(ids, vec![first, third]);

    let none = db
        .transaction(|conn| Box::pin(async move { Task::list_by_user(conn, 42).await }))
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_notes_lifecycle() {
    let (db, _dir) = test_db().await;
    let task_id = create_task(&db, 1).await;

    let note_id = db
        .transaction(|conn| {
            Box::pin(async move {
                Note::create(
                    conn,
                    NewNote {
                        user_id: 1,
                        task_id,
                        title: "N".to_string(),
                        content: "C".to_string(),
                    },
                )
                .await
            })
        })
        .await
        .unwrap();

    db.transaction(|conn| {
        Box::pin(async move {
            Note::update(
                conn,
                note_id,
                NoteChanges {
                    content: Some("C2".to_string()),
                    ..Default::default()
                },
            )
            .await
        })
    })
    .await
    .unwrap();

    let by_task = db
        .transaction(|conn| Box::pin(async move { Note::list_by_task(conn, task_id).await }))
        .await
        .unwrap();
    assert_eq!(by_task.len(), 1);
    assert_eq!(by_task[0].title, "N");
    assert_eq!(by_task[0].content.as_deref(), Some("C2"));

    let by_user = db
        .transaction(|conn| Box::pin(async move { Note::list_by_user(conn, 1).await }))
        .await
        .unwrap();
    assert_eq!(by_user, by_task);

    // Deleting the task leaves its notes behind
    assert!(delete_task(&db, task_id).await);
    let still_there = db
        .transaction(|conn| Box::pin(async move { Note::find_by_id(conn, note_id).await }))
        .await
        .unwrap();
    assert!(still_there.is_some());

    let removed = db
        .transaction(|conn| Box::pin(async move { Note::delete_all_for_task(conn, task_id).await }))
        .await
        .unwrap();
    assert_eq!(removed, 1);

    let removed_again = db
        .transaction(|conn| Box::pin(async move { Note::delete_all_for_task(conn, task_id).await }))
        .await
        .unwrap();
    assert_eq!(removed_again, 0);
}

#[tokio::test]
async fn test_repository_rejects_unknown_column() {
    let (db, _dir) = test_db().await;

    let result = db
        .transaction(|conn| {
            Box::pin(async move {
                Repository::<Task>::find_where(conn, "password_hash", SqlValue::Null).await
            })
        })
        .await;

    assert!(matches!(result, Err(sqlx::Error::ColumnNotFound(_))));
}

#[tokio::test]
async fn test_repository_rejects_wrong_value_count() {
    let (db, _dir) = test_db().await;

    let result = db
        .transaction(|conn| {
            Box::pin(async move { Repository::<Note>::insert(conn, vec![SqlValue::Integer(1)]).await })
        })
        .await;

    assert!(matches!(result, Err(sqlx::Error::Protocol(_))));
}

#[tokio::test]
async fn test_seed_and_reset() {
    let (db, _dir) = test_db().await;

    let summary = db
        .transaction(|conn| Box::pin(async move { seed_sample_data(conn).await }))
        .await
        .unwrap();
    assert_eq!(summary.user_ids.len(), 2);
    assert_eq!(summary.task_ids.len(), 2);
    assert_eq!(summary.note_ids.len(), 1);

    let john = summary.user_ids[0];
    let johns_tasks = db
        .transaction(|conn| Box::pin(async move { Task::list_by_user(conn, john).await }))
        .await
        .unwrap();
    assert_eq!(johns_tasks.len(), 1);
    assert_eq!(johns_tasks[0].title, "Task 1");
    assert_eq!(johns_tasks[0].due_date, NaiveDate::from_ymd_opt(2024, 5, 1));

    db.transaction(|conn| Box::pin(async move { reset_schema(conn).await }))
        .await
        .unwrap();
    assert_eq!(count_tasks(&db).await, 0);
}

#[tokio::test]
async fn test_health_check_and_close() {
    let (db, _dir) = test_db().await;

    assert!(db.health_check().await.is_ok());
    db.close().await;
    assert!(db.health_check().await.is_err());
}
