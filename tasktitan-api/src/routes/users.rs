/// User endpoints
///
/// - `POST /api/signin` - Check credentials, return the user record
/// - `POST /api/users` - Create an account
/// - `PUT /api/updateProfile` - Replace username and password

use super::{require_body, CreatedResponse, MessageResponse};
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use serde::Deserialize;
use tasktitan_shared::models::user::{NewUser, User};

/// Sign-in request
#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

/// Profile update request; both fields are overwritten
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub user_id: i64,
    pub username: String,
    pub password: String,
}

/// Sign in
///
/// ```text
/// POST /api/signin
/// { "email": "a@x.com", "password": "p" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing email or password
/// - `401 Unauthorized`: No account matches
pub async fn signin(
    State(state): State<AppState>,
    body: Result<Json<SigninRequest>, JsonRejection>,
) -> ApiResult<Json<User>> {
    let req = require_body(body, "Missing email or password")?;

    let user = state
        .db
        .transaction(|conn| {
            Box::pin(async move { User::authenticate(conn, &req.email, &req.password).await })
        })
        .await?;

    match user {
        Some(user) => Ok(Json(user)),
        None => Err(ApiError::Unauthorized("Unauthorized".to_string())),
    }
}

/// Create an account
///
/// ```text
/// POST /api/users
/// { "username": "a", "email": "a@x.com", "password": "p" }
/// ```
///
/// Responds `201 {"id": n}`.
pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<NewUser>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let data = require_body(body, "Missing user details")?;

    let id = state
        .db
        .transaction(|conn| Box::pin(async move { User::create(conn, data).await }))
        .await?;

    tracing::info!(user_id = id, "User created");
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// Replace username and password
///
/// ```text
/// PUT /api/updateProfile
/// { "user_id": 1, "username": "b", "password": "q" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing user_id, username or password
/// - `404 Not Found`: No such user
pub async fn update_profile(
    State(state): State<AppState>,
    body: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let req = require_body(body, "Missing user_id, username, or password")?;
    let user_id = req.user_id;

    let updated = state
        .db
        .transaction(|conn| {
            Box::pin(async move {
                User::update_profile(conn, req.user_id, req.username, &req.password).await
            })
        })
        .await?;

    if !updated {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    tracing::info!(user_id, "Profile updated");
    Ok(MessageResponse::new("Profile updated successfully"))
}
