//! Token verification errors

use thiserror::Error;

/// Token-related verification failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid key: {message}")]
    InvalidKey { message: String },

    #[error("Missing claim: {claim}")]
    MissingClaim { claim: String },

    #[error("Unknown refresh token")]
    UnknownToken,
}

impl VerificationError {
    /// Short machine-readable code for the failure
    pub fn code(&self) -> &'static str {
        match self {
            VerificationError::TokenExpired => "TOKEN_EXPIRED",
            VerificationError::InvalidTokenFormat => "INVALID_TOKEN_FORMAT",
            VerificationError::InvalidSignature => "INVALID_SIGNATURE",
            VerificationError::InvalidKey { .. } => "INVALID_KEY",
            VerificationError::MissingClaim { .. } => "MISSING_CLAIM",
            VerificationError::UnknownToken => "UNKNOWN_TOKEN",
        }
    }
}
