/// User model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     user_id INTEGER PRIMARY KEY AUTOINCREMENT,
///     username TEXT NOT NULL,
///     email TEXT,
///     password_hash TEXT
/// );
/// ```
///
/// Email is not unique. Sign-in therefore checks every account registered
/// under the address and accepts the first whose hash verifies.

use crate::{
    auth::password::{self, PasswordError},
    db::repository::{Entity, Repository, SqlValue},
};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteConnection;
use tracing::{debug, warn};

/// User account
///
/// The password hash is never serialized.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    /// Surrogate key
    pub user_id: i64,

    /// Display name
    pub username: String,

    /// Email address used for sign-in
    pub email: Option<String>,

    /// Argon2id hash in PHC format
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
}

impl Entity for User {
    const TABLE: &'static str = "users";
    const PRIMARY_KEY: &'static str = "user_id";
    const COLUMNS: &'static [&'static str] = &["username", "email", "password_hash"];
}

/// Input for creating a user
///
/// `password` is plaintext here; it is hashed before it reaches the database.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Errors from user operations
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Password(#[from] PasswordError),
}

impl User {
    /// Creates a user and returns the generated id
    pub async fn create(conn: &mut SqliteConnection, data: NewUser) -> Result<i64, UserError> {
        let password_hash = password::hash_password(&data.password)?;

        let id = Repository::<User>::insert(
            conn,
            vec![
                data.username.into(),
                data.email.into(),
                password_hash.into(),
            ],
        )
        .await?;

        debug!(user_id = id, "Created user");
        Ok(id)
    }

    /// Finds a user by id
    pub async fn find_by_id(
        conn: &mut SqliteConnection,
        user_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        Repository::<User>::find_by_id(conn, user_id).await
    }

    /// Returns the user matching both `email` and `password`, if any
    ///
    /// Rows whose stored hash cannot be parsed are skipped with a warning.
    pub async fn authenticate(
        conn: &mut SqliteConnection,
        email: &str,
        password: &str,
    ) -> Result<Option<Self>, UserError> {
        let candidates = Repository::<User>::find_where(conn, "email", email.into()).await?;

        for user in candidates {
            let Some(hash) = user.password_hash.as_deref() else {
                continue;
            };

            match password::verify_password(password, hash) {
                Ok(true) => return Ok(Some(user)),
                Ok(false) => {}
                Err(PasswordError::InvalidHash(reason)) => {
                    warn!(user_id = user.user_id, %reason, "Skipping account with unreadable password hash");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(None)
    }

    /// Replaces username and password
    ///
    /// Both values are overwritten unconditionally. Returns `false` if no user
    /// has the given id.
    pub async fn update_profile(
        conn: &mut SqliteConnection,
        user_id: i64,
        username: String,
        password: &str,
    ) -> Result<bool, UserError> {
        let password_hash = password::hash_password(password)?;

        let matched = Repository::<User>::overwrite(
            conn,
            user_id,
            vec![
                ("username", SqlValue::from(username)),
                ("password_hash", SqlValue::from(password_hash)),
            ],
        )
        .await?;

        Ok(matched > 0)
    }
}
