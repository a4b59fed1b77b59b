//! Database connection pool using the OnceCell pattern.

use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::OnceCell;

use crate::config;

static POOL: OnceCell<PgPool> = OnceCell::const_new();

/// Schema of the `users` table.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Get or initialize the database connection pool.
/// Uses the DATABASE_URL environment variable for the connection string.
pub async fn get_pool() -> Result<&'static PgPool, sqlx::Error> {
    POOL.get_or_try_init(|| async {
        let database_url =
            config::database_url().map_err(|e| sqlx::Error::Configuration(e.into()))?;

        PgPoolOptions::new()
            .max_connections(5)
            .connect(&database_url)
            .await
    })
    .await
}
