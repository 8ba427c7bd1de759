//! Domain entities representing core business objects.

pub mod key_token;
pub mod token;


// Re-export commonly used types
pub use key_token::KeyToken;
pub use token::{
    public_key_fingerprint, KeyPair, TokenPair,
    ACCESS_TOKEN_EXPIRY_SECONDS, REFRESH_TOKEN_EXPIRY_SECONDS, RSA_MODULUS_BITS,
};
