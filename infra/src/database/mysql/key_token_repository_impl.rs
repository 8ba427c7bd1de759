//! MySQL implementation of the KeyTokenRepository trait.
//!
//! Records live in `key_tokens`, one row per public key, and reference their
//! owner in `users`:
//!
//! ```sql
//! CREATE TABLE users (
//!     id VARCHAR(64) PRIMARY KEY
//! );
//!
//! CREATE TABLE key_tokens (
//!     id CHAR(36) PRIMARY KEY,
//!     user_id VARCHAR(64) NOT NULL,
//!     public_key TEXT NOT NULL,
//!     public_key_hash CHAR(64) NOT NULL UNIQUE,
//!     refresh_tokens JSON NOT NULL,
//!     created_at DATETIME(6) NOT NULL,
//!     updated_at DATETIME(6) NOT NULL,
//!     FOREIGN KEY (user_id) REFERENCES users(id)
//! );
//! ```
//!
//! PEM keys are too long to index directly, so upserts and lookups go
//! through the SHA-256 fingerprint in `public_key_hash`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::types::Json;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use kt_core::domain::entities::{public_key_fingerprint, KeyToken};
use kt_core::errors::DomainError;
use kt_core::repositories::KeyTokenRepository;

const SELECT_COLUMNS: &str = r#"
    SELECT kt.id, kt.user_id, kt.public_key, kt.refresh_tokens, kt.created_at, kt.updated_at
    FROM key_tokens kt
    INNER JOIN users u ON u.id = kt.user_id
"#;

/// MySQL implementation of KeyTokenRepository
pub struct MySqlKeyTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlKeyTokenRepository {
    /// Create a new MySQL key-token repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to KeyToken entity
    fn row_to_key_token(row: &MySqlRow) -> Result<KeyToken, DomainError> {
        let id: String = row.try_get("id").map_err(|e| persistence("get id", e))?;
        let refresh_tokens: Json<Vec<String>> = row
            .try_get("refresh_tokens")
            .map_err(|e| persistence("get refresh_tokens", e))?;

        Ok(KeyToken {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Persistence {
                message: format!("Invalid record UUID: {}", e),
            })?,
            user_id: row
                .try_get("user_id")
                .map_err(|e| persistence("get user_id", e))?,
            public_key: row
                .try_get("public_key")
                .map_err(|e| persistence("get public_key", e))?,
            refresh_tokens: refresh_tokens.0,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| persistence("get created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| persistence("get updated_at", e))?,
        })
    }

    async fn fetch_one_where(
        &self,
        condition: &str,
        value: &str,
    ) -> Result<Option<KeyToken>, DomainError> {
        let query = format!("{} WHERE {} LIMIT 1", SELECT_COLUMNS, condition);

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| persistence("find key token", e))?;

        row.as_ref().map(Self::row_to_key_token).transpose()
    }
}

#[async_trait]
impl KeyTokenRepository for MySqlKeyTokenRepository {
    async fn save(&self, record: KeyToken) -> Result<KeyToken, DomainError> {
        let public_key_hash = record.public_key_hash();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| persistence("begin transaction", e))?;

        // Owners are referenced, not managed, here
        sqlx::query("INSERT IGNORE INTO users (id) VALUES (?)")
            .bind(&record.user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| persistence("register user", e))?;

        let query = r#"
            INSERT INTO key_tokens (
                id, user_id, public_key, public_key_hash, refresh_tokens, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                user_id = VALUES(user_id),
                refresh_tokens = VALUES(refresh_tokens),
                updated_at = VALUES(updated_at)
        "#;

        sqlx::query(query)
            .bind(record.id.to_string())
            .bind(&record.user_id)
            .bind(&record.public_key)
            .bind(&public_key_hash)
            .bind(Json(&record.refresh_tokens))
            .bind(record.created_at)
            .bind(record.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| persistence("save key token", e))?;

        tx.commit()
            .await
            .map_err(|e| persistence("commit key token", e))?;

        tracing::debug!(
            user_id = %record.user_id,
            public_key = %public_key_hash,
            "Upserted key token"
        );

        self.fetch_one_where("kt.public_key_hash = ?", &public_key_hash)
            .await?
            .ok_or_else(|| DomainError::Persistence {
                message: "saved key token could not be read back".to_string(),
            })
    }

    async fn find_by_user_id(&self, user_id: &str) -> Result<Vec<KeyToken>, DomainError> {
        let query = format!("{} WHERE u.id = ? ORDER BY kt.updated_at DESC", SELECT_COLUMNS);

        let rows = sqlx::query(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| persistence("find user key tokens", e))?;

        rows.iter().map(Self::row_to_key_token).collect()
    }

    async fn find_by_public_key(&self, public_key: &str) -> Result<Option<KeyToken>, DomainError> {
        self.fetch_one_where("kt.public_key_hash = ?", &public_key_fingerprint(public_key))
            .await
    }

    async fn find_by_refresh_token(&self, refresh_token: &str) -> Result<Option<KeyToken>, DomainError> {
        self.fetch_one_where("JSON_CONTAINS(kt.refresh_tokens, JSON_QUOTE(?))", refresh_token)
            .await
    }

    async fn count_user_records(&self, user_id: &str) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM key_tokens WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| persistence("count user key tokens", e))?;

        Ok(count as usize)
    }
}

fn persistence(context: &str, e: sqlx::Error) -> DomainError {
    tracing::error!(error = %e, "Failed to {}", context);
    DomainError::Persistence {
        message: format!("Failed to {}: {}", context, e),
    }
}
