/// Task endpoints
///
/// Updates and deletes report success whether or not the task exists.

use super::{record_id, require_body, CreatedResponse, MessageResponse};
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tasktitan_shared::models::task::{NewTask, Task, TaskChanges};

/// Query string of `GET /api/tasks`
#[derive(Debug, Deserialize)]
pub struct TaskListQuery {
    pub user_id: i64,
}

async fn tasks_for_user(state: &AppState, user_id: i64) -> ApiResult<Json<Vec<Task>>> {
    let tasks = state
        .db
        .transaction(|conn| Box::pin(async move { Task::list_by_user(conn, user_id).await }))
        .await?;

    Ok(Json(tasks))
}

/// `GET /api/tasks?user_id=` - a user's tasks, possibly none
///
/// 400 if `user_id` is missing or not a number.
pub async fn list_tasks(
    State(state): State<AppState>,
    query: Result<Query<TaskListQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Task>>> {
    let Query(query) = query.map_err(|rejection| {
        tracing::debug!(%rejection, "Rejected task list query");
        ApiError::BadRequest("User ID is required".to_string())
    })?;

    tasks_for_user(&state, query.user_id).await
}

/// `GET /api/users/:user_id/tasks` - a user's tasks, possibly none
pub async fn list_tasks_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<Vec<Task>>> {
    let user_id = record_id(user_id)?;
    tasks_for_user(&state, user_id).await
}

/// `GET /api/tasks/:task_id` - one task, 404 if absent
pub async fn get_task(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
) -> ApiResult<Json<Task>> {
    let task_id = record_id(task_id)?;
    let task = state
        .db
        .transaction(|conn| Box::pin(async move { Task::find_by_id(conn, task_id).await }))
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(task))
}

/// `POST /api/tasks` - all of user_id, title, description, due_date, status
pub async fn create_task(
    State(state): State<AppState>,
    body: Result<Json<NewTask>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let data = require_body(body, "Missing task details")?;

    let id = state
        .db
        .transaction(|conn| Box::pin(async move { Task::create(conn, data).await }))
        .await?;

    tracing::info!(task_id = id, "Task created");
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// `PUT /api/tasks/:task_id` - any subset of title, description, due_date, status
///
/// 400 when the body sets none of them.
pub async fn update_task(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
    body: Result<Json<TaskChanges>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let task_id = record_id(task_id)?;
    let changes = require_body(body, "Missing update data")?;
    if changes.is_empty() {
        return Err(ApiError::BadRequest("Missing update data".to_string()));
    }

    let matched = state
        .db
        .transaction(|conn| Box::pin(async move { Task::update(conn, task_id, changes).await }))
        .await?;

    tracing::debug!(task_id, matched, "Task update applied");
    Ok(MessageResponse::new("Task updated successfully"))
}

/// `DELETE /api/tasks/:task_id`
pub async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    let task_id = record_id(task_id)?;
    let deleted = state
        .db
        .transaction(|conn| Box::pin(async move { Task::delete(conn, task_id).await }))
        .await?;

    tracing::debug!(task_id, deleted, "Task delete applied");
    Ok(MessageResponse::new("Task deleted successfully"))
}
