//! Main key-token service implementation

use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::domain::entities::key_token::KeyToken;
use crate::domain::entities::token::{public_key_fingerprint, KeyPair, TokenPair};
use crate::domain::value_objects::{Payload, VerifiedClaims, USER_ID_CLAIM};
use crate::errors::{DomainError, DomainResult, VerificationError};
use crate::repositories::KeyTokenRepository;
use kt_shared::types::MessageResponse;

use super::config::TokenServiceConfig;
use super::key_pair::RsaKeyPairGenerator;
use super::signer::Rs256Signer;

/// Confirmation message returned by [`TokenService::save_key_token`]
pub const KEY_TOKEN_SAVED_MESSAGE: &str = "KeyToken saved successfully";

/// Issues, verifies and rotates RS256 token pairs
///
/// Every issuance generates a fresh RSA key pair. The private key signs the
/// pair and is then dropped; the public key is stored next to the refresh
/// token so later verifications can find it.
pub struct TokenService<R: KeyTokenRepository> {
    pub(crate) repository: R,
    config: TokenServiceConfig,
    key_generator: RsaKeyPairGenerator,
    signer: Rs256Signer,
}

impl<R: KeyTokenRepository> TokenService<R> {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `repository` - Key-token repository for persistence
    /// * `config` - Key size and token lifetimes
    pub fn new(repository: R, config: TokenServiceConfig) -> Self {
        let key_generator = RsaKeyPairGenerator::new(config.modulus_bits);

        Self {
            repository,
            config,
            key_generator,
            signer: Rs256Signer::new(),
        }
    }

    /// Creates a token service with explicit collaborators
    ///
    /// The generator's modulus length wins over `config.modulus_bits`.
    pub fn with_components(
        repository: R,
        config: TokenServiceConfig,
        key_generator: RsaKeyPairGenerator,
        signer: Rs256Signer,
    ) -> Self {
        Self {
            repository,
            config,
            key_generator,
            signer,
        }
    }

    /// The active configuration
    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// The underlying repository
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Generates a fresh RSA key pair on the blocking pool
    ///
    /// # Returns
    ///
    /// * `Ok(KeyPair)` - PKCS#1 PEM public and private key
    /// * `Err(DomainError::KeyGeneration)` - The primitive failed
    pub async fn generate_key_pair(&self) -> DomainResult<KeyPair> {
        let generator = self.key_generator;
        let started = Instant::now();

        let key_pair = tokio::task::spawn_blocking(move || generator.generate())
            .await
            .map_err(|e| DomainError::KeyGeneration {
                message: format!("key generation task failed: {}", e),
            })??;

        debug!(
            modulus_bits = generator.modulus_bits(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            public_key = %key_pair.fingerprint(),
            "Generated RSA key pair"
        );

        Ok(key_pair)
    }

    /// Signs an access and a refresh token over the same payload
    ///
    /// Both tokens share the same `iat`. The access token expires after the
    /// configured access lifetime, the refresh token after the refresh
    /// lifetime.
    ///
    /// # Arguments
    ///
    /// * `payload` - Claims to embed; must not contain `iat` or `exp`
    /// * `public_key` - Public half of the pair, used only for logging
    /// * `private_key` - PEM private key that signs both tokens
    pub async fn create_token_pair(
        &self,
        payload: &Payload,
        public_key: &str,
        private_key: &str,
    ) -> DomainResult<TokenPair> {
        let signer = self.signer.clone();
        let payload = payload.clone();
        let private_key = private_key.to_string();
        let access_ttl = self.config.access_token_expiry_seconds;
        let refresh_ttl = self.config.refresh_token_expiry_seconds;

        let pair = tokio::task::spawn_blocking(move || {
            let issued_at = Utc::now();
            let access_token = signer.sign_at(&payload, &private_key, issued_at, access_ttl)?;
            let refresh_token = signer.sign_at(&payload, &private_key, issued_at, refresh_ttl)?;
            Ok::<_, DomainError>(TokenPair::new(access_token, refresh_token))
        })
        .await
        .map_err(|e| DomainError::Signing {
            message: format!("signing task failed: {}", e),
        })??;

        debug!(public_key = %public_key_fingerprint(public_key), "Signed token pair");

        Ok(pair)
    }

    /// Verifies a token against a public key
    ///
    /// # Returns
    ///
    /// * `Ok(VerifiedClaims)` - Caller claims plus issue and expiry times
    /// * `Err(DomainError::Verification)` - Expired, malformed, bad signature
    ///   or unusable key
    pub fn verify_token(&self, token: &str, public_key: &str) -> DomainResult<VerifiedClaims> {
        self.signer.verify(token, public_key)
    }

    /// Returns every key-token record of a user, newest first
    pub async fn find_tokens_by_user(&self, user_id: &str) -> DomainResult<Vec<KeyToken>> {
        self.repository.find_by_user_id(user_id).await
    }

    /// Verifies `token` with `public_key` and stores it as the record's only
    /// refresh token
    ///
    /// The owner comes from the verified `userId` (or `sub`) claim. Saving
    /// under an already stored public key replaces its token list.
    ///
    /// # Returns
    ///
    /// * `Ok(MessageResponse)` - Confirmation carrying the stored token list
    /// * `Err(DomainError::Verification)` - Token invalid or has no owner
    /// * `Err(DomainError::Persistence)` - Store rejected the write
    pub async fn save_key_token(
        &self,
        token: &str,
        public_key: &str,
    ) -> DomainResult<MessageResponse<Vec<String>>> {
        let claims = self.verify_token(token, public_key)?;
        let user_id = claims.user_id().ok_or_else(|| VerificationError::MissingClaim {
            claim: USER_ID_CLAIM.to_string(),
        })?;

        let record = KeyToken::new(user_id, public_key.to_string(), token.to_string());
        let stored = self.repository.save(record).await?;

        debug!(
            user_id = %stored.user_id,
            public_key = %stored.public_key_hash(),
            "Saved key token"
        );

        Ok(MessageResponse::success(
            KEY_TOKEN_SAVED_MESSAGE,
            stored.refresh_tokens,
        ))
    }

    /// Issues a token pair for `payload` and returns the access token
    ///
    /// A fresh key pair signs the tokens; the refresh token is stored under
    /// the new public key.
    pub async fn create_token(&self, payload: Payload) -> DomainResult<String> {
        let (pair, key_pair) = self.issue(&payload).await?;

        info!(
            user_id = ?payload.user_id(),
            public_key = %key_pair.fingerprint(),
            "Issued token"
        );

        Ok(pair.access_token)
    }

    /// Issues a new token pair wrapping `old_token` and returns the new
    /// access token
    ///
    /// The old token is embedded verbatim under the `token` claim. Its owner
    /// is read from its unverified claims and carried over so the new record
    /// stays attached to the same user. Nothing about the old token is
    /// checked or revoked.
    pub async fn refresh_token(&self, old_token: &str) -> DomainResult<String> {
        let user_id = self
            .signer
            .inspect_unverified(old_token)
            .and_then(|claims| claims.user_id());
        if user_id.is_none() {
            warn!("Refreshing a token without a readable owner");
        }

        let payload = Payload::with_previous_token(old_token, user_id);
        let (pair, key_pair) = self.issue(&payload).await?;

        info!(
            user_id = ?payload.user_id(),
            public_key = %key_pair.fingerprint(),
            "Refreshed token"
        );

        Ok(pair.access_token)
    }

    /// Verifies a stored refresh token with the public key it was saved under
    ///
    /// # Returns
    ///
    /// * `Ok(VerifiedClaims)` - Token is stored and valid
    /// * `Err(DomainError::Verification(UnknownToken))` - No record holds it
    /// * `Err(DomainError::Verification)` - Stored but expired or tampered
    pub async fn verify_refresh_token(&self, token: &str) -> DomainResult<VerifiedClaims> {
        let record = self
            .repository
            .find_by_refresh_token(token)
            .await?
            .ok_or(VerificationError::UnknownToken)?;

        self.verify_token(token, &record.public_key)
    }

    async fn issue(&self, payload: &Payload) -> DomainResult<(TokenPair, KeyPair)> {
        let result = async {
            let key_pair = self.generate_key_pair().await?;
            let pair = self
                .create_token_pair(payload, &key_pair.public_key, &key_pair.private_key)
                .await?;
            self.save_key_token(&pair.refresh_token, &key_pair.public_key)
                .await?;
            Ok::<_, DomainError>((pair, key_pair))
        }
        .await;

        if let Err(e) = &result {
            warn!(code = e.code(), error = %e, "Token issuance failed");
        }

        result
    }
}
