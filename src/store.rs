use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::{Connection, PgConnection};

use crate::config::Config;

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS app_data (
    key TEXT PRIMARY KEY,
    value JSONB NOT NULL,
    updated_at TIMESTAMPTZ DEFAULT NOW()
)";

const SELECT_VALUE_SQL: &str = "SELECT value FROM app_data WHERE key = $1";

const UPSERT_SQL: &str = "INSERT INTO app_data (key, value, updated_at)
    VALUES ($1, $2, NOW())
    ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
    RETURNING updated_at";

/// PostgreSQL-backed JSON document store
///
/// Holds only the connection URL. Every operation opens a fresh connection,
/// runs a single statement and closes it again, so concurrent requests never
/// share a connection and the `key` primary key is the only coordination
/// between writers (last writer wins).
#[derive(Clone)]
pub struct KvStore {
    database_url: String,
}

impl KvStore {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }

    /// Create a store from configuration, or `None` when no database is configured
    pub fn from_config(config: &Config) -> Option<Self> {
        config.database_url.as_deref().map(Self::new)
    }

    async fn connect(&self) -> Result<PgConnection> {
        PgConnection::connect(&self.database_url)
            .await
            .context("Failed to connect to database")
    }

    /// Provision the `app_data` table if it does not exist yet
    ///
    /// Safe to run against a database that already has the table.
    pub async fn bootstrap(&self) -> Result<()> {
        let mut conn = self.connect().await?;

        sqlx::query(CREATE_TABLE_SQL)
            .execute(&mut conn)
            .await
            .context("Failed to create app_data table")?;

        close(conn).await;
        tracing::info!("Table app_data is ready");
        Ok(())
    }

    /// Upsert a JSON document under `key`, returning the new `updated_at`
    ///
    /// The whole document is replaced; there is no merge with a previous value.
    ///
    /// # Errors
    /// Returns an error if the connection or the statement fails
    pub async fn upsert(&self, key: &str, value: &JsonValue) -> Result<DateTime<Utc>> {
        let mut conn = self.connect().await?;

        let updated_at: DateTime<Utc> = sqlx::query_scalar(UPSERT_SQL)
            .bind(key)
            .bind(value)
            .fetch_one(&mut conn)
            .await
            .context("Failed to upsert record")?;

        close(conn).await;
        tracing::debug!("Upserted record {} at {}", key, updated_at.to_rfc3339());
        Ok(updated_at)
    }

    /// Read the JSON document stored under `key`
    ///
    /// # Returns
    /// * `Ok(Some(value))` - Record found
    /// * `Ok(None)` - No record for this key
    /// * `Err(_)` - Connection or query failed
    pub async fn read(&self, key: &str) -> Result<Option<JsonValue>> {
        let mut conn = self.connect().await?;

        let value: Option<JsonValue> = sqlx::query_scalar(SELECT_VALUE_SQL)
            .bind(key)
            .fetch_optional(&mut conn)
            .await
            .context("Failed to read record")?;

        close(conn).await;
        match &value {
            Some(_) => tracing::debug!("Read record {}", key),
            None => tracing::debug!("Record not found: {}", key),
        }
        Ok(value)
    }

    /// Check connectivity with a trivial `SELECT 1`
    pub async fn health_check(&self) -> Result<()> {
        let mut conn = self.connect().await?;

        let one: i32 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&mut conn)
            .await
            .context("Failed to execute health check query")?;

        close(conn).await;
        if one == 1 {
            Ok(())
        } else {
            Err(anyhow::anyhow!("Health check query returned {}", one))
        }
    }
}

async fn close(conn: PgConnection) {
    if let Err(e) = conn.close().await {
        tracing::warn!("Failed to close database connection cleanly: {}", e);
    }
}
