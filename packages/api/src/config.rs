//! Backend configuration from environment variables, optionally layered over
//! a TOML file (see [`store::config`] for its format).
//!
//! | Variable | Required | Meaning |
//! |----------|----------|---------|
//! | `BACKEND_CONFIG` | no | Path of a TOML file with a `[backend]` section |
//! | `BACKEND_BASE_URL` | unless in the file | Base URL of the backend API |
//! | `OAUTH_ROUTES` | no | `generic` (default) or `per-tool` |
//! | `DATABASE_URL` | yes | PostgreSQL connection string, read by [`crate::db`] |
//!
//! A variable that is set wins over the same key in the file.

use store::{AppConfig, BackendConfig, OAuthRoutes};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),

    #[error("Invalid {name}: {message}")]
    Invalid { name: &'static str, message: String },

    #[error("Cannot read config file {path}: {message}")]
    File { path: String, message: String },
}

pub const BACKEND_CONFIG: &str = "BACKEND_CONFIG";
pub const BACKEND_BASE_URL: &str = "BACKEND_BASE_URL";
pub const OAUTH_ROUTES: &str = "OAUTH_ROUTES";
pub const DATABASE_URL: &str = "DATABASE_URL";

/// Read the backend configuration from the process environment (and `.env`),
/// over the file named by `BACKEND_CONFIG` when set.
pub fn backend_from_env() -> Result<BackendConfig, ConfigError> {
    dotenvy::dotenv().ok();
    let file = match std::env::var(BACKEND_CONFIG) {
        Ok(path) if !path.trim().is_empty() => Some(read_config_file(&path)?),
        _ => None,
    };
    backend_from_lookup(file, |name| std::env::var(name).ok())
}

/// Load the `[backend]` section of a TOML config file.
pub fn read_config_file(path: &str) -> Result<BackendConfig, ConfigError> {
    let file_error = |message: String| ConfigError::File {
        path: path.to_string(),
        message,
    };
    let text = std::fs::read_to_string(path).map_err(|e| file_error(e.to_string()))?;
    let config = AppConfig::from_toml(&text).map_err(|e| file_error(e.to_string()))?;
    tracing::info!(path, "Loaded backend config file");
    Ok(config.backend)
}

/// Build the backend configuration from any variable source, falling back to
/// `file` for variables that are not set.
pub fn backend_from_lookup(
    file: Option<BackendConfig>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<BackendConfig, ConfigError> {
    let base_url = lookup(BACKEND_BASE_URL)
        .filter(|v| !v.trim().is_empty())
        .or_else(|| file.as_ref().map(|f| f.base_url.clone()))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(BACKEND_BASE_URL))?;

    url::Url::parse(&base_url).map_err(|e| ConfigError::Invalid {
        name: BACKEND_BASE_URL,
        message: e.to_string(),
    })?;

    let oauth_routes = match lookup(OAUTH_ROUTES).filter(|v| !v.trim().is_empty()) {
        Some(raw) => raw.parse::<OAuthRoutes>().map_err(|e| ConfigError::Invalid {
            name: OAUTH_ROUTES,
            message: e.to_string(),
        })?,
        None => file.map(|f| f.oauth_routes).unwrap_or_default(),
    };

    Ok(BackendConfig::new(base_url).with_oauth_routes(oauth_routes))
}

/// Connection string for the `users` database.
pub fn database_url() -> Result<String, ConfigError> {
    dotenvy::dotenv().ok();
    std::env::var(DATABASE_URL).map_err(|_| ConfigError::Missing(DATABASE_URL))
}
