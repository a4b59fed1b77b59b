//! Data models for the application.

mod user;

#[cfg(feature = "server")]
pub use user::UserRow;
pub use user::UserRecord;
