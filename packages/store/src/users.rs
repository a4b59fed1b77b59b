//! # User registration and settings persistence
//!
//! All reads and writes of the `users` table go through the [`UserStore`]
//! trait, so the same login and save logic runs against PostgreSQL on the
//! server (`api::db::PgUserStore`) and against [`crate::MemoryStore`] in tests.
//!
//! Login is by name only. An unknown name registers a new record; a known
//! name hands back whatever preferences were stored for it.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::models::{Settings, UserId, UserRecord};

/// Async access to the `users` table.
pub trait UserStore: Send + Sync {
    /// Exact-match lookup by name.
    fn find_by_name(
        &self,
        name: &UserId,
    ) -> impl Future<Output = Result<Option<UserRecord>>> + Send;

    fn insert(&self, record: &UserRecord) -> impl Future<Output = Result<()>> + Send;

    /// Overwrite `channel_id` and `message_format` of the record named `name`.
    /// Fails with [`StoreError::NotFound`] when no such record exists.
    fn update_settings(
        &self,
        name: &UserId,
        settings: &Settings,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// Result of a login, sent back to the page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoginOutcome {
    pub user: UserId,
    /// The stored record when the user already existed.
    pub record: Option<UserRecord>,
}

/// Log in (and register on first use) by name.
///
/// Only an empty name is rejected. Datastore failures are logged and the
/// login still succeeds with no stored preferences.
pub async fn login<S: UserStore>(store: &S, name: &str) -> Result<LoginOutcome> {
    let user = UserId::parse(name)?;

    let record = match store.find_by_name(&user).await {
        Ok(Some(record)) => Some(record),
        Ok(None) => {
            match store.insert(&UserRecord::new(&user)).await {
                Ok(()) => tracing::info!(user = %user, "Registered new user"),
                Err(e) => tracing::warn!(user = %user, "Failed to register user: {}", e),
            }
            None
        }
        Err(e) => {
            tracing::warn!(user = %user, "Failed to look up user: {}", e);
            None
        }
    };

    tracing::info!(user = %user, existing = record.is_some(), "User logged in");
    Ok(LoginOutcome { user, record })
}

/// Persist the current channel and message template for `user`.
pub async fn save_settings<S: UserStore>(
    store: &S,
    user: &UserId,
    settings: &Settings,
) -> Result<()> {
    match store.update_settings(user, settings).await {
        Ok(()) => {
            tracing::info!(user = %user, channel = %settings.channel_id, "Saved settings");
            Ok(())
        }
        Err(e) => {
            tracing::warn!(user = %user, "Failed to save settings: {}", e);
            Err(e)
        }
    }
}

/// Whether an error came from the caller rather than from the datastore.
pub fn is_user_error(error: &StoreError) -> bool {
    matches!(error, StoreError::EmptyName | StoreError::NotFound(_))
}
