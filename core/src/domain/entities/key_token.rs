//! Persisted association between a user, a public key and its refresh tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::token::public_key_fingerprint;

/// Key-token record stored by the persistence layer
///
/// Records are keyed by public key: saving a record whose public key is
/// already stored replaces the previous refresh-token list and owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyToken {
    /// Unique identifier for the record
    pub id: Uuid,

    /// User this record belongs to
    pub user_id: String,

    /// PKCS#1 PEM public key that verifies the stored tokens
    pub public_key: String,

    /// Currently valid refresh tokens, most recent last
    pub refresh_tokens: Vec<String>,

    /// Timestamp when the record was created
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last save
    pub updated_at: DateTime<Utc>,
}

impl KeyToken {
    /// Creates a new record holding a single refresh token
    ///
    /// # Arguments
    ///
    /// * `user_id` - Owner taken from the token claims
    /// * `public_key` - PEM public key paired with the signing key
    /// * `refresh_token` - The refresh token to store
    pub fn new(user_id: String, public_key: String, refresh_token: String) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            user_id,
            public_key,
            refresh_tokens: vec![refresh_token],
            created_at: now,
            updated_at: now,
        }
    }

    /// SHA-256 fingerprint of the public key
    pub fn public_key_hash(&self) -> String {
        public_key_fingerprint(&self.public_key)
    }

    /// Checks whether this record holds the given refresh token
    pub fn holds(&self, refresh_token: &str) -> bool {
        self.refresh_tokens.iter().any(|t| t == refresh_token)
    }

    /// The most recently stored refresh token
    pub fn latest_refresh_token(&self) -> Option<&str> {
        self.refresh_tokens.last().map(String::as_str)
    }

    /// Overwrites this record with the contents of a newer save
    ///
    /// Identity and creation time are kept; owner and refresh tokens are
    /// replaced wholesale.
    pub fn overwrite_with(&mut self, newer: KeyToken) {
        self.user_id = newer.user_id;
        self.refresh_tokens = newer.refresh_tokens;
        self.updated_at = newer.updated_at;
    }
}
