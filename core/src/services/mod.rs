//! Business services containing domain logic and use cases.

pub mod key_token;

// Re-export commonly used types
pub use key_token::{Rs256Signer, RsaKeyPairGenerator, TokenService, TokenServiceConfig};
