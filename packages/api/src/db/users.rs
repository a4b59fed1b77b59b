use sqlx::PgPool;
use store::error::{Result, StoreError};
use store::{Settings, UserId, UserRecord, UserStore};

use crate::models::UserRow;

fn datastore(e: sqlx::Error) -> StoreError {
    StoreError::Datastore(e.to_string())
}

/// `users` table in PostgreSQL.
#[derive(Clone, Debug)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store backed by the shared process-wide pool.
    pub async fn connect() -> Result<Self> {
        let pool = super::get_pool().await.map_err(datastore)?;
        Ok(Self::new(pool.clone()))
    }
}

impl UserStore for PgUserStore {
    async fn find_by_name(&self, name: &UserId) -> Result<Option<UserRecord>> {
        let row: Option<UserRow> =
            sqlx::query_as("SELECT name, channel_id, message_format FROM users WHERE name = $1")
                .bind(name.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(datastore)?;

        Ok(row.map(UserRow::into_record))
    }

    async fn insert(&self, record: &UserRecord) -> Result<()> {
        sqlx::query("INSERT INTO users (name, channel_id, message_format) VALUES ($1, $2, $3)")
            .bind(&record.name)
            .bind(&record.channel_id)
            .bind(&record.message_format)
            .execute(&self.pool)
            .await
            .map_err(datastore)?;

        Ok(())
    }

    async fn update_settings(&self, name: &UserId, settings: &Settings) -> Result<()> {
        let result = sqlx::query(
            "UPDATE users SET channel_id = $2, message_format = $3, updated_at = NOW() WHERE name = $1",
        )
        .bind(name.as_str())
        .bind(&settings.channel_id)
        .bind(&settings.message_format)
        .execute(&self.pool)
        .await
        .map_err(datastore)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(name.to_string()));
        }
        Ok(())
    }
}
