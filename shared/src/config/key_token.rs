//! Key pair and token lifetime configuration

use serde::{Deserialize, Serialize};

/// Configuration for RS256 key pair generation and token lifetimes
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct KeyTokenConfig {
    /// RSA modulus length in bits for every generated key pair
    #[serde(default = "default_modulus_bits")]
    pub rsa_modulus_bits: usize,

    /// Access token expiry time in seconds
    #[serde(default = "default_access_expiry")]
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    #[serde(default = "default_refresh_expiry")]
    pub refresh_token_expiry: i64,
}

impl Default for KeyTokenConfig {
    fn default() -> Self {
        Self {
            rsa_modulus_bits: default_modulus_bits(),
            access_token_expiry: default_access_expiry(),
            refresh_token_expiry: default_refresh_expiry(),
        }
    }
}

impl KeyTokenConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let rsa_modulus_bits = std::env::var("KEYTOKEN_RSA_BITS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_modulus_bits);
        let access_token_expiry = std::env::var("KEYTOKEN_ACCESS_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_access_expiry);
        let refresh_token_expiry = std::env::var("KEYTOKEN_REFRESH_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_refresh_expiry);

        Self {
            rsa_modulus_bits,
            access_token_expiry,
            refresh_token_expiry,
        }
    }

    /// Set the RSA modulus length
    pub fn with_modulus_bits(mut self, bits: usize) -> Self {
        self.rsa_modulus_bits = bits;
        self
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86400;
        self
    }
}

fn default_modulus_bits() -> usize {
    4096
}

fn default_access_expiry() -> i64 {
    3600 // 1 hour
}

fn default_refresh_expiry() -> i64 {
    604800 // 7 days
}
