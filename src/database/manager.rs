use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from the persistence layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Invalid database name: {0}")]
    InvalidDatabaseName(String),

    #[error("Connection timed out after {0}s")]
    Timeout(u64),

    #[error("Query error: {0}")]
    Query(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Opens the process-wide connection pool.
pub struct DatabaseManager;

impl DatabaseManager {
    /// Connect to `uri` (optionally switching to `database_name`) and verify
    /// liveness with a round-trip probe, all within `timeout`.
    pub async fn connect(
        uri: &str,
        database_name: Option<&str>,
        max_connections: u32,
        timeout: Duration,
    ) -> Result<PgPool, DatabaseError> {
        let connection_string = match database_name {
            Some(name) => Self::build_connection_string(uri, name)?,
            None => uri.to_string(),
        };

        let connect = async {
            let pool = PgPoolOptions::new()
                .max_connections(max_connections)
                .acquire_timeout(timeout)
                .connect(&connection_string)
                .await?;
            sqlx::query("SELECT 1").execute(&pool).await?;
            Ok::<_, DatabaseError>(pool)
        };

        let pool = tokio::time::timeout(timeout, connect)
            .await
            .map_err(|_| DatabaseError::Timeout(timeout.as_secs()))??;

        info!("Connected to database{}", database_name.map(|n| format!(" {}", n)).unwrap_or_default());
        Ok(pool)
    }

    pub async fn connect_with(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let uri = config
            .url
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;
        Self::connect(
            uri,
            config.name.as_deref(),
            config.max_connections,
            Duration::from_secs(config.connect_timeout_secs),
        )
        .await
    }

    /// Build connection string by swapping the DB name into the URL path
    fn build_connection_string(base: &str, database_name: &str) -> Result<String, DatabaseError> {
        if !Self::is_valid_db_name(database_name) {
            return Err(DatabaseError::InvalidDatabaseName(database_name.to_string()));
        }
        let mut url = url::Url::parse(base).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        url.set_path(&format!("/{}", database_name));
        Ok(url.into())
    }

    /// Letters, digits and underscores only
    fn is_valid_db_name(name: &str) -> bool {
        !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    }
}
