/// Integration tests for user accounts and credential checks

use tasktitan_shared::db::pool::{Database, DatabaseConfig};
use tasktitan_shared::db::schema::initialize_schema;
use tasktitan_shared::models::user::{NewUser, User};
use tempfile::TempDir;

async fn test_db() -> (Database, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db = Database::connect(DatabaseConfig {
        path: dir.path().join("users.sqlite"),
        ..Default::default()
    })
    .await
    .expect("Failed to open database");

    db.transaction(|conn| Box::pin(async move { initialize_schema(conn).await }))
        .await
        .expect("Failed to create schema");

    (db, dir)
}

async fn create_user(db: &Database, username: &str, email: &str, password: &str) -> i64 {
    let data = NewUser {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    };

    db.transaction(|conn| Box::pin(async move { User::create(conn, data).await }))
        .await
        .expect("Failed to create user")
}

async fn authenticate(db: &Database, email: &str, password: &str) -> Option<User> {
    let email = email.to_string();
    let password = password.to_string();

    db.transaction(|conn| {
        Box::pin(async move { User::authenticate(conn, &email, &password).await })
    })
    .await
    .expect("Authentication query failed")
}

#[tokio::test]
async fn test_create_then_authenticate() {
    let (db, _dir) = test_db().await;

    let id = create_user(&db, "a", "a@x.com", "p").await;
    assert_eq!(id, 1);

    let user = authenticate(&db, "a@x.com", "p").await.expect("Should authenticate");
    assert_eq!(user.user_id, id);
    assert_eq!(user.username, "a");
    assert_eq!(user.email.as_deref(), Some("a@x.com"));
}

#[tokio::test]
async fn test_password_stored_hashed() {
    let (db, _dir) = test_db().await;
    let id = create_user(&db, "a", "a@x.com", "p").await;

    let user = db
        .transaction(|conn| Box::pin(async move { User::find_by_id(conn, id).await }))
        .await
        .unwrap()
        .unwrap();

    let hash = user.password_hash.expect("Hash should be stored");
    assert_ne!(hash, "p");
    assert!(hash.starts_with("$argon2id$"));
}

#[tokio::test]
async fn test_wrong_password_or_email() {
    let (db, _dir) = test_db().await;
    create_user(&db, "a", "a@x.com", "p").await;

    assert!(authenticate(&db, "a@x.com", "wrong").await.is_none());
    assert!(authenticate(&db, "b@x.com", "p").await.is_none());
}

#[tokio::test]
async fn test_shared_email_matches_right_account() {
    let (db, _dir) = test_db().await;
    create_user(&db, "first", "same@x.com", "one").await;
    let second = create_user(&db, "second", "same@x.com", "two").await;

    let user = authenticate(&db, "same@x.com", "two").await.unwrap();
    assert_eq!(user.user_id, second);
    assert_eq!(user.username, "second");
}

#[tokio::test]
async fn test_legacy_plaintext_row_is_skipped() {
    let (db, _dir) = test_db().await;

    db.transaction(|conn| {
        Box::pin(async move {
            sqlx::query("INSERT INTO users (username, email, password_hash) VALUES ('old', 'old@x.com', 'p')")
                .execute(&mut *conn)
                .await
        })
    })
    .await
    .unwrap();

    assert!(authenticate(&db, "old@x.com", "p").await.is_none());
}

#[tokio::test]
async fn test_update_profile() {
    let (db, _dir) = test_db().await;
    let id = create_user(&db, "a", "a@x.com", "p").await;

    let updated = db
        .transaction(|conn| {
            Box::pin(async move { User::update_profile(conn, id, "renamed".to_string(), "new").await })
        })
        .await
        .unwrap();
    assert!(updated);

    assert!(authenticate(&db, "a@x.com", "p").await.is_none());
    let user = authenticate(&db, "a@x.com", "new").await.unwrap();
    assert_eq!(user.username, "renamed");
}

#[tokio::test]
async fn test_update_profile_unknown_user() {
    let (db, _dir) = test_db().await;

    let updated = db
        .transaction(|conn| {
            Box::pin(async move { User::update_profile(conn, 404, "x".to_string(), "y").await })
        })
        .await
        .unwrap();

    assert!(!updated);
}
