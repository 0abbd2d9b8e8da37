/// Application state and router builder
///
/// The server is assembled explicitly: the caller opens the database, builds
/// an [`AppState`] from it and the configuration, and hands that to
/// [`build_router`]. Nothing lives in process-wide globals.
///
/// # Example
///
/// ```no_run
/// use tasktitan_api::{app::{build_router, AppState}, config::Config};
/// use tasktitan_shared::db::pool::Database;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let db = Database::connect(config.database_config()).await?;
/// let app = build_router(AppState::new(db, config));
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, realtime::FeedbackNotifier};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tasktitan_shared::db::pool::Database;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Database gateway
    pub db: Database,

    /// Application configuration
    pub config: Arc<Config>,

    /// Feedback websocket bookkeeping
    pub feedback: FeedbackNotifier,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: Database, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
            feedback: FeedbackNotifier::new(),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Routes
///
/// ```text
/// /
/// ├── GET /health
/// ├── GET /feedback                       # websocket
/// └── /api/
///     ├── POST   /signin
///     ├── POST   /users
///     ├── PUT    /updateProfile
///     ├── GET    /users/:user_id/tasks
///     ├── GET    /users/:user_id/notes
///     ├── GET    /tasks?user_id=
///     ├── POST   /tasks
///     ├── GET    /tasks/:task_id
///     ├── PUT    /tasks/:task_id
///     ├── DELETE /tasks/:task_id
///     ├── POST   /notes
///     ├── GET    /notes/task/:task_id
///     ├── DELETE /notes/delete-all/:task_id
///     ├── GET    /notes/:user_id
///     ├── PUT    /notes/:note_id
///     └── DELETE /notes/:note_id
/// ```
///
/// `/tasks/:task_id` always names a task. A user's tasks are listed through
/// the query string or `/users/:user_id/tasks`.
///
/// # Middleware Stack
///
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
pub fn build_router(state: AppState) -> Router {
    use crate::{realtime, routes};

    let root_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/feedback", get(realtime::feedback_socket));

    let user_routes = Router::new()
        .route("/signin", post(routes::users::signin))
        .route("/users", post(routes::users::create_user))
        .route("/updateProfile", put(routes::users::update_profile))
        .route("/users/:user_id/tasks", get(routes::tasks::list_tasks_for_user))
        .route("/users/:user_id/notes", get(routes::notes::list_notes_for_user));

    let task_routes = Router::new()
        .route(
            "/tasks",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route(
            "/tasks/:task_id",
            get(routes::tasks::get_task)
                .put(routes::tasks::update_task)
                .delete(routes::tasks::delete_task),
        );

    let note_routes = Router::new()
        .route("/notes", post(routes::notes::create_note))
        .route("/notes/task/:task_id", get(routes::notes::list_notes_for_task))
        .route(
            "/notes/delete-all/:task_id",
            delete(routes::notes::delete_all_notes_for_task),
        )
        // GET takes a user id here, PUT and DELETE a note id
        .route(
            "/notes/:id",
            get(routes::notes::list_notes_for_user)
                .put(routes::notes::update_note)
                .delete(routes::notes::delete_note),
        );

    let api_routes = Router::new()
        .merge(user_routes)
        .merge(task_routes)
        .merge(note_routes);

    let cors = if state.config.allows_any_origin() {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE])
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(root_routes)
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}
