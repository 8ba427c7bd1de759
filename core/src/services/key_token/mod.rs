//! Key-token service module
//!
//! This module handles the whole token lifecycle:
//! - RSA key pair generation (one fresh pair per issuance)
//! - RS256 signing of access/refresh token pairs
//! - Verification against a stored public key
//! - Persisting refresh tokens and rotating them on refresh

mod config;
mod key_pair;
mod service;
mod signer;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use key_pair::RsaKeyPairGenerator;
pub use service::{TokenService, KEY_TOKEN_SAVED_MESSAGE};
pub use signer::Rs256Signer;
