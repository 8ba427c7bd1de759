//! Configuration for the key-token service

use kt_shared::config::KeyTokenConfig;

use crate::domain::entities::token::{
    ACCESS_TOKEN_EXPIRY_SECONDS, REFRESH_TOKEN_EXPIRY_SECONDS, RSA_MODULUS_BITS,
};

/// Configuration for the key-token service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenServiceConfig {
    /// RSA modulus length for generated key pairs
    pub modulus_bits: usize,
    /// Access token expiry in seconds
    pub access_token_expiry_seconds: i64,
    /// Refresh token expiry in seconds
    pub refresh_token_expiry_seconds: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            modulus_bits: RSA_MODULUS_BITS,
            access_token_expiry_seconds: ACCESS_TOKEN_EXPIRY_SECONDS,
            refresh_token_expiry_seconds: REFRESH_TOKEN_EXPIRY_SECONDS,
        }
    }
}

impl TokenServiceConfig {
    /// Set the RSA modulus length
    pub fn with_modulus_bits(mut self, bits: usize) -> Self {
        self.modulus_bits = bits;
        self
    }

    /// Set both token lifetimes in seconds
    pub fn with_expiry_seconds(mut self, access: i64, refresh: i64) -> Self {
        self.access_token_expiry_seconds = access;
        self.refresh_token_expiry_seconds = refresh;
        self
    }
}

impl From<&KeyTokenConfig> for TokenServiceConfig {
    fn from(config: &KeyTokenConfig) -> Self {
        Self {
            modulus_bits: config.rsa_modulus_bits,
            access_token_expiry_seconds: config.access_token_expiry,
            refresh_token_expiry_seconds: config.refresh_token_expiry,
        }
    }
}
