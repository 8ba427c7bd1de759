//! Value objects representing immutable domain concepts.

pub mod payload;

// Re-export commonly used types
pub use payload::{Payload, VerifiedClaims, PREVIOUS_TOKEN_CLAIM, USER_ID_CLAIM};
