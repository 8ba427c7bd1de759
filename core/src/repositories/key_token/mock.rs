//! Mock implementation of KeyTokenRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::key_token::KeyToken;
use crate::errors::DomainError;

use super::r#trait::KeyTokenRepository;

/// In-memory key-token repository keyed by public key
pub struct MockKeyTokenRepository {
    records: Arc<RwLock<HashMap<String, KeyToken>>>,
    fail_writes: AtomicBool,
}

impl MockKeyTokenRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Make every subsequent `save` fail with a persistence error
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Every stored record, in no particular order
    pub async fn all(&self) -> Vec<KeyToken> {
        self.records.read().await.values().cloned().collect()
    }
}

impl Default for MockKeyTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyTokenRepository for MockKeyTokenRepository {
    async fn save(&self, record: KeyToken) -> Result<KeyToken, DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::Persistence {
                message: "store unavailable".to_string(),
            });
        }

        let mut records = self.records.write().await;

        let stored = match records.get_mut(&record.public_key) {
            Some(existing) => {
                existing.overwrite_with(record);
                existing.clone()
            }
            None => {
                records.insert(record.public_key.clone(), record.clone());
                record
            }
        };

        Ok(stored)
    }

    async fn find_by_user_id(&self, user_id: &str) -> Result<Vec<KeyToken>, DomainError> {
        let records = self.records.read().await;
        let mut found: Vec<KeyToken> = records
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(found)
    }

    async fn find_by_public_key(&self, public_key: &str) -> Result<Option<KeyToken>, DomainError> {
        let records = self.records.read().await;
        Ok(records.get(public_key).cloned())
    }

    async fn find_by_refresh_token(&self, refresh_token: &str) -> Result<Option<KeyToken>, DomainError> {
        let records = self.records.read().await;
        Ok(records.values().find(|r| r.holds(refresh_token)).cloned())
    }
}
