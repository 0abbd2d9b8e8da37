/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `users`: Sign-in, sign-up and profile updates
/// - `tasks`: Task CRUD
/// - `notes`: Note CRUD
///
/// Handlers check that the request body is present and carries every
/// required field before the database is touched; anything else about the
/// body is rejected the same way, with a 400 and the route's message.

pub mod health;
pub mod notes;
pub mod tasks;
pub mod users;

use crate::error::{ApiError, ApiResult};
use axum::{extract::rejection::JsonRejection, Json};
use serde::{Deserialize, Serialize};

/// Body of a successful creation (201)
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    /// Generated id
    pub id: i64,
}

/// Body of a successful update or delete
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
        })
    }
}

/// Unwraps a JSON body, turning any rejection into a 400 with `message`
pub(crate) fn require_body<T>(body: Result<Json<T>, JsonRejection>, message: &str) -> ApiResult<T> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            tracing::debug!(%rejection, "Rejected request body");
            Err(ApiError::BadRequest(message.to_string()))
        }
    }
}

/// Rejects negative path ids with a 404, as if no route had matched
pub(crate) fn record_id(id: i64) -> ApiResult<i64> {
    if id < 0 {
        return Err(ApiError::NotFound("Resource not found".to_string()));
    }
    Ok(id)
}
