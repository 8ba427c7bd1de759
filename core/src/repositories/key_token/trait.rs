//! Key-token repository trait defining the interface for record persistence.

use async_trait::async_trait;

use crate::domain::entities::key_token::KeyToken;
use crate::errors::DomainError;

/// Repository trait for KeyToken persistence operations
///
/// Records are keyed by public key and related to exactly one user.
/// Implementations report every storage failure as
/// [`DomainError::Persistence`].
#[async_trait]
pub trait KeyTokenRepository: Send + Sync {
    /// Upsert a record by public key
    ///
    /// When a record with the same public key exists, its owner and
    /// refresh-token list are replaced by the ones in `record`; its id and
    /// creation time are kept.
    ///
    /// # Returns
    /// * `Ok(KeyToken)` - The record as stored
    /// * `Err(DomainError)` - Save failed
    ///
    /// # Example
    /// ```no_run
    /// # use kt_core::repositories::KeyTokenRepository;
    /// # use kt_core::domain::entities::KeyToken;
    /// # async fn example(repo: &impl KeyTokenRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// let record = KeyToken::new("u1".to_string(), "public pem".to_string(), "refresh".to_string());
    ///
    /// let saved = repo.save(record).await?;
    /// println!("Stored {} refresh token(s)", saved.refresh_tokens.len());
    /// # Ok(())
    /// # }
    /// ```
    async fn save(&self, record: KeyToken) -> Result<KeyToken, DomainError>;

    /// Find all records joined to a user
    ///
    /// # Returns
    /// * `Ok(Vec<KeyToken>)` - Records for the user, newest first; empty if none
    /// * `Err(DomainError)` - Database error occurred
    async fn find_by_user_id(&self, user_id: &str) -> Result<Vec<KeyToken>, DomainError>;

    /// Find the record stored under a public key
    ///
    /// # Returns
    /// * `Ok(Some(KeyToken))` - Record found
    /// * `Ok(None)` - No record for this key
    /// * `Err(DomainError)` - Database error occurred
    async fn find_by_public_key(&self, public_key: &str) -> Result<Option<KeyToken>, DomainError>;

    /// Find the record whose refresh-token list holds `refresh_token`
    ///
    /// # Returns
    /// * `Ok(Some(KeyToken))` - Record found
    /// * `Ok(None)` - The token is not stored anywhere
    /// * `Err(DomainError)` - Database error occurred
    async fn find_by_refresh_token(&self, refresh_token: &str) -> Result<Option<KeyToken>, DomainError>;

    /// Count records for a user
    async fn count_user_records(&self, user_id: &str) -> Result<usize, DomainError> {
        let records = self.find_by_user_id(user_id).await?;
        Ok(records.len())
    }
}
