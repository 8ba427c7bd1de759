//! RS256 signing and verification of token payloads

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{Map, Value};

use crate::domain::value_objects::{Payload, VerifiedClaims};
use crate::errors::{DomainError, VerificationError};

/// Signs payloads with a PEM private key and verifies them with the matching
/// public key
///
/// Tokens carry the caller's claims plus `iat` and `exp` (seconds since the
/// epoch). Verification allows the default clock leeway of 60 seconds.
#[derive(Debug, Clone)]
pub struct Rs256Signer {
    validation: Validation,
}

impl Rs256Signer {
    /// Creates a signer with the default leeway
    pub fn new() -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_exp = true;
        validation.validate_aud = false;

        Self { validation }
    }

    /// Overrides the clock leeway applied to `exp`
    pub fn with_leeway(mut self, seconds: u64) -> Self {
        self.validation.leeway = seconds;
        self
    }

    /// Signs `payload`, valid for `ttl_seconds` from now
    ///
    /// # Arguments
    ///
    /// * `payload` - Caller claims; must not already contain `iat` or `exp`
    /// * `private_key` - PKCS#1 or PKCS#8 PEM private key
    /// * `ttl_seconds` - Lifetime added to the issue time
    pub fn sign(
        &self,
        payload: &Payload,
        private_key: &str,
        ttl_seconds: i64,
    ) -> Result<String, DomainError> {
        self.sign_at(payload, private_key, Utc::now(), ttl_seconds)
    }

    /// Signs `payload` as if issued at `issued_at`
    ///
    /// RS256 signatures are deterministic, so identical inputs produce the
    /// identical token.
    pub fn sign_at(
        &self,
        payload: &Payload,
        private_key: &str,
        issued_at: DateTime<Utc>,
        ttl_seconds: i64,
    ) -> Result<String, DomainError> {
        if let Some(claim) = ["iat", "exp"].into_iter().find(|c| payload.contains(c)) {
            return Err(DomainError::Signing {
                message: format!("payload already carries an {} claim", claim),
            });
        }

        let key = EncodingKey::from_rsa_pem(private_key.as_bytes()).map_err(|e| {
            DomainError::Signing {
                message: format!("Invalid private key: {}", e),
            }
        })?;

        let iat = issued_at.timestamp();
        let exp = iat.checked_add(ttl_seconds).ok_or_else(|| DomainError::Signing {
            message: format!("lifetime of {} seconds overflows the expiry time", ttl_seconds),
        })?;

        let mut claims = payload.as_map().clone();
        claims.insert("iat".to_string(), Value::from(iat));
        claims.insert("exp".to_string(), Value::from(exp));

        encode(&Header::new(Algorithm::RS256), &claims, &key).map_err(|e| DomainError::Signing {
            message: e.to_string(),
        })
    }

    /// Verifies signature and expiry of `token` against `public_key`
    pub fn verify(&self, token: &str, public_key: &str) -> Result<VerifiedClaims, DomainError> {
        let key = DecodingKey::from_rsa_pem(public_key.as_bytes()).map_err(|e| {
            VerificationError::InvalidKey {
                message: e.to_string(),
            }
        })?;

        let data = decode::<Map<String, Value>>(token, &key, &self.validation)
            .map_err(into_verification_error)?;

        Ok(VerifiedClaims::from_claims(data.claims)?)
    }

    /// Reads the claims of `token` without checking signature or expiry
    ///
    /// Returns `None` when the token cannot be parsed at all.
    pub fn inspect_unverified(&self, token: &str) -> Option<Payload> {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        decode::<Map<String, Value>>(token, &DecodingKey::from_secret(&[]), &validation)
            .ok()
            .map(|data| Payload::from(data.claims))
    }
}

impl Default for Rs256Signer {
    fn default() -> Self {
        Self::new()
    }
}

fn into_verification_error(e: jsonwebtoken::errors::Error) -> VerificationError {
    match e.kind() {
        ErrorKind::ExpiredSignature => VerificationError::TokenExpired,
        ErrorKind::InvalidSignature => VerificationError::InvalidSignature,
        ErrorKind::InvalidRsaKey(_) | ErrorKind::InvalidKeyFormat => VerificationError::InvalidKey {
            message: e.to_string(),
        },
        ErrorKind::MissingRequiredClaim(claim) => VerificationError::MissingClaim {
            claim: claim.clone(),
        },
        _ => VerificationError::InvalidTokenFormat,
    }
}
