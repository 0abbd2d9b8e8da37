/// Note endpoints
///
/// Like tasks, updates and deletes do not check that the note exists.

use super::{record_id, require_body, CreatedResponse, MessageResponse};
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use tasktitan_shared::models::note::{NewNote, Note, NoteChanges};

/// `POST /api/notes` - all of user_id, task_id, title, content
pub async fn create_note(
    State(state): State<AppState>,
    body: Result<Json<NewNote>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let data = require_body(body, "Missing note details")?;

    let id = state
        .db
        .transaction(|conn| Box::pin(async move { Note::create(conn, data).await }))
        .await?;

    tracing::info!(note_id = id, "Note created");
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// `GET /api/notes/task/:task_id` - notes on a task
///
/// Task id 0 is treated as absent (404).
pub async fn list_notes_for_task(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
) -> ApiResult<Json<Vec<Note>>> {
    let task_id = record_id(task_id)?;
    if task_id == 0 {
        return Err(ApiError::NotFound("Task ID is required".to_string()));
    }

    let notes = state
        .db
        .transaction(|conn| Box::pin(async move { Note::list_by_task(conn, task_id).await }))
        .await?;

    Ok(Json(notes))
}

/// `GET /api/notes/:user_id` and `GET /api/users/:user_id/notes`
pub async fn list_notes_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<Vec<Note>>> {
    let user_id = record_id(user_id)?;
    let notes = state
        .db
        .transaction(|conn| Box::pin(async move { Note::list_by_user(conn, user_id).await }))
        .await?;

    Ok(Json(notes))
}

/// `PUT /api/notes/:note_id` - any subset of title, content
pub async fn update_note(
    State(state): State<AppState>,
    Path(note_id): Path<i64>,
    body: Result<Json<NoteChanges>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let note_id = record_id(note_id)?;
    let changes = require_body(body, "Missing update data for note")?;
    if changes.is_empty() {
        return Err(ApiError::BadRequest("Missing update data for note".to_string()));
    }

    let matched = state
        .db
        .transaction(|conn| Box::pin(async move { Note::update(conn, note_id, changes).await }))
        .await?;

    tracing::debug!(note_id, matched, "Note update applied");
    Ok(MessageResponse::new("Note updated successfully"))
}

/// `DELETE /api/notes/:note_id`
pub async fn delete_note(
    State(state): State<AppState>,
    Path(note_id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    let note_id = record_id(note_id)?;
    let deleted = state
        .db
        .transaction(|conn| Box::pin(async move { Note::delete(conn, note_id).await }))
        .await?;

    tracing::debug!(note_id, deleted, "Note delete applied");
    Ok(MessageResponse::new("Note deleted successfully"))
}

/// `DELETE /api/notes/delete-all/:task_id` - every note on a task, possibly none
pub async fn delete_all_notes_for_task(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    let task_id = record_id(task_id)?;
    let removed = state
        .db
        .transaction(|conn| {
            Box::pin(async move { Note::delete_all_for_task(conn, task_id).await })
        })
        .await?;

    tracing::debug!(task_id, removed, "Notes deleted for task");
    Ok(MessageResponse::new("All notes deleted successfully"))
}
