//! # Row type of the `users` table
//!
//! The table is keyed by `name`; the user's name is also their id. Two
//! nullable columns hold the notification preferences:
//!
//! - `channel_id` — the Slack channel notifications are posted to.
//! - `message_format` — free text prepended to every notification.
//!
//! `created_at` / `updated_at` are audit columns maintained by the database
//! and never sent to the client, so [`UserRow`] projects straight into the
//! client-safe [`UserRecord`].

pub use store::UserRecord;

#[cfg(feature = "server")]
use sqlx::FromRow;

/// The columns of a `users` row the application reads.
#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub name: String,
    pub channel_id: Option<String>,
    pub message_format: Option<String>,
}

#[cfg(feature = "server")]
impl UserRow {
    /// Convert to a UserRecord for client consumption.
    pub fn into_record(self) -> UserRecord {
        UserRecord {
            name: self.name,
            channel_id: self.channel_id,
            message_format: self.message_format,
        }
    }
}
