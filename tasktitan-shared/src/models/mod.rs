/// Database models for TaskTitan
///
/// Each model declares its table through [`crate::db::repository::Entity`]
/// and exposes typed operations on top of the generic repository.
///
/// # Models
///
/// - `user`: Accounts and credential checks
/// - `task`: Tasks owned by a user
/// - `note`: Notes attached to a user and a task
///
/// # Example
///
/// ```no_run
/// use tasktitan_shared::db::pool::{Database, DatabaseConfig};
/// use tasktitan_shared::models::user::{NewUser, User};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let db = Database::connect(DatabaseConfig::default()).await?;
///
/// let user_id = db
///     .transaction(|conn| {
///         Box::pin(async move {
///             User::create(
///                 conn,
///                 NewUser {
///                     username: "a".to_string(),
///                     email: "a@x.com".to_string(),
///                     password: "p".to_string(),
///                 },
///             )
///             .await
///         })
///     })
///     .await?;
/// println!("Created user {}", user_id);
/// # Ok(())
/// # }
/// ```

pub mod note;
pub mod task;
pub mod user;
