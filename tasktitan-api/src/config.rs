/// Configuration management for the API server
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct. The listening port can also be set on the
/// command line (`--port`/`-p`), which takes precedence.
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 5000)
/// - `DATABASE_PATH`: SQLite database file (default: TaskTitan.sqlite)
/// - `DATABASE_MAX_CONNECTIONS`: Connection limit (default: 5)
/// - `CORS_ORIGINS`: Comma-separated allowed origins, `*` for any (default: *)
/// - `RUST_LOG`: Log filter
///
/// # Example
///
/// ```no_run
/// use tasktitan_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::{env, path::PathBuf};
use tasktitan_shared::db::pool;

/// Port used when neither `API_PORT` nor `--port` is given
pub const DEFAULT_PORT: u16 = 5000;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins; `*` allows any
    pub cors_origins: Vec<String>,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite database file
    pub path: PathBuf,

    /// Maximum number of simultaneously open connections
    pub max_connections: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                host: "0.0.0.0".to_string(),
                port: DEFAULT_PORT,
                cors_origins: vec!["*".to_string()],
            },
            database: DatabaseConfig {
                path: PathBuf::from("TaskTitan.sqlite"),
                max_connections: 5,
            },
        }
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// A `.env` file in the working directory is read first if present.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable cannot be parsed.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let host = env::var("API_HOST").unwrap_or(defaults.api.host);
        let port = match env::var("API_PORT") {
            Ok(value) => value
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("API_PORT must be a port number: {}", e))?,
            Err(_) => defaults.api.port,
        };

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|value| parse_origins(&value))
            .unwrap_or(defaults.api.cors_origins);

        let path = env::var("DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.database.path);

        let max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(value) => value
                .parse::<u32>()
                .map_err(|e| anyhow::anyhow!("DATABASE_MAX_CONNECTIONS must be a number: {}", e))?,
            Err(_) => defaults.database.max_connections,
        };

        if max_connections == 0 {
            anyhow::bail!("DATABASE_MAX_CONNECTIONS must be at least 1");
        }

        Ok(Self {
            api: ApiConfig {
                host,
                port,
                cors_origins,
            },
            database: DatabaseConfig {
                path,
                max_connections,
            },
        })
    }

    /// Replaces the port when one was given on the command line
    pub fn with_port(mut self, port: Option<u16>) -> Self {
        if let Some(port) = port {
            self.api.port = port;
        }
        self
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// Settings for the database gateway
    pub fn database_config(&self) -> pool::DatabaseConfig {
        pool::DatabaseConfig {
            path: self.database.path.clone(),
            max_connections: self.database.max_connections,
            ..Default::default()
        }
    }

    /// Whether any origin may call the API
    pub fn allows_any_origin(&self) -> bool {
        self.api.cors_origins.iter().any(|origin| origin == "*")
    }
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}
