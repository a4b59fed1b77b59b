//! # API crate — server functions behind the settings page
//!
//! Every read and write the page performs goes through the server functions in
//! this file. The browser never talks to the datastore or to the backend API
//! directly; the server holds the database pool and the backend base URL.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`backend`] | `server` | `HttpBackend`, the reqwest client for the backend API |
//! | [`config`] | `server` | Backend configuration from the environment |
//! | [`db`] | — | PostgreSQL pool (lazy `OnceCell` singleton) and the `users` table store |
//! | [`models`] | — | Row type of the `users` table |
//!
//! ## Server functions exposed here
//!
//! - **Users**: `login`, `save_settings`
//! - **Backend proxy**: `list_channels`, `start_oauth`, `run_ai_action`

use dioxus::prelude::*;

#[cfg(feature = "server")]
pub mod backend;
#[cfg(feature = "server")]
pub mod config;
pub mod db;
pub mod models;

pub use store::{AiResponse, Channel, LoginOutcome, OAuthStart, Settings, Tool};

/// Log in by name, registering the user on first use.
#[cfg(feature = "server")]
#[post("/api/session/login")]
pub async fn login(name: String) -> Result<LoginOutcome, ServerFnError> {
    let users = db::PgUserStore::connect()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    store::login(&users, &name)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[cfg(not(feature = "server"))]
#[post("/api/session/login")]
pub async fn login(name: String) -> Result<LoginOutcome, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Persist the channel and message template of `user_id`.
#[cfg(feature = "server")]
#[post("/api/settings")]
pub async fn save_settings(user_id: String, settings: Settings) -> Result<(), ServerFnError> {
    let user = store::UserId::parse(&user_id).map_err(|e| ServerFnError::new(e.to_string()))?;

    let users = db::PgUserStore::connect()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    store::save_settings(&users, &user, &settings)
        .await
        .map_err(|e| {
            if !store::users::is_user_error(&e) {
                tracing::error!(user = %user, "Datastore rejected settings: {}", e);
            }
            ServerFnError::new(e.to_string())
        })
}

#[cfg(not(feature = "server"))]
#[post("/api/settings")]
pub async fn save_settings(user_id: String, settings: Settings) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Channels the backend offers to `user_id`.
#[cfg(feature = "server")]
#[post("/api/channels")]
pub async fn list_channels(user_id: String) -> Result<Vec<Channel>, ServerFnError> {
    use store::Backend;

    let user = store::UserId::parse(&user_id).map_err(|e| ServerFnError::new(e.to_string()))?;
    let backend = backend::get_backend().map_err(|e| ServerFnError::new(e.to_string()))?;

    backend
        .list_channels(&user)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[cfg(not(feature = "server"))]
#[post("/api/channels")]
pub async fn list_channels(user_id: String) -> Result<Vec<Channel>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Begin the OAuth flow linking `tool` to `user_id`.
#[cfg(feature = "server")]
#[post("/api/connect")]
pub async fn start_oauth(user_id: String, tool: Tool) -> Result<OAuthStart, ServerFnError> {
    use store::Backend;

    let user = store::UserId::parse(&user_id).map_err(|e| ServerFnError::new(e.to_string()))?;
    let backend = backend::get_backend().map_err(|e| ServerFnError::new(e.to_string()))?;

    backend
        .start_oauth(&user, tool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[cfg(not(feature = "server"))]
#[post("/api/connect")]
pub async fn start_oauth(user_id: String, tool: Tool) -> Result<OAuthStart, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Run an AI action. Error statuses from the backend come back as data.
#[cfg(feature = "server")]
#[post("/api/ai")]
pub async fn run_ai_action(user_id: String, prompt: String) -> Result<AiResponse, ServerFnError> {
    use store::Backend;

    let user = store::UserId::parse(&user_id).map_err(|e| ServerFnError::new(e.to_string()))?;
    let backend = backend::get_backend().map_err(|e| ServerFnError::new(e.to_string()))?;

    backend
        .run_ai_action(&user, &prompt)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[cfg(not(feature = "server"))]
#[post("/api/ai")]
pub async fn run_ai_action(user_id: String, prompt: String) -> Result<AiResponse, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
