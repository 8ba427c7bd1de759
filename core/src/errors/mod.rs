//! Domain-specific error types and error handling.

mod types;


// Re-export all error types
pub use types::VerificationError;

use thiserror::Error;

/// Core domain errors
///
/// Every key-token operation reports failures through this type. The
/// variants follow the stages of the issuance workflow so callers can tell
/// which collaborator failed without inspecting messages.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Key generation failed: {message}")]
    KeyGeneration { message: String },

    #[error("Token signing failed: {message}")]
    Signing { message: String },

    #[error("Persistence error: {message}")]
    Persistence { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Verification(#[from] VerificationError),
}

impl DomainError {
    /// Check whether the failure came from token verification
    pub fn is_verification(&self) -> bool {
        matches!(self, DomainError::Verification(_))
    }

    /// Short machine-readable code for the error class
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::KeyGeneration { .. } => "KEY_GENERATION_FAILED",
            DomainError::Signing { .. } => "SIGNING_FAILED",
            DomainError::Persistence { .. } => "PERSISTENCE_FAILED",
            DomainError::Verification(e) => e.code(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
