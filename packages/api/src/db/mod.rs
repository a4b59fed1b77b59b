//! # Database module — PostgreSQL access to the `users` table
//!
//! Entirely gated behind `#[cfg(feature = "server")]` so that client (WASM)
//! builds never pull in SQLx or Tokio networking code.
//!
//! - [`get_pool`] — returns `&'static PgPool`, reading `DATABASE_URL` and
//!   opening up to 5 connections on first use.
//! - [`PgUserStore`] — the [`store::UserStore`] implementation used by the
//!   `login` and `save_settings` server functions.

#[cfg(feature = "server")]
mod pool;
#[cfg(feature = "server")]
mod users;

#[cfg(feature = "server")]
pub use pool::{get_pool, MIGRATOR};
#[cfg(feature = "server")]
pub use users::PgUserStore;
