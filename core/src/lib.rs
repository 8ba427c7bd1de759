//! # KeyToken Core
//!
//! Core business logic and domain layer for the KeyToken service.
//! This crate contains the key-token entities, the RS256 signing services,
//! the repository interface and the error types the infrastructure layer
//! builds on.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod errors;

// Re-export commonly used types for convenience
pub use domain::entities::{KeyPair, KeyToken, TokenPair};
pub use domain::value_objects::{Payload, VerifiedClaims};
pub use services::{Rs256Signer, RsaKeyPairGenerator, TokenService, TokenServiceConfig};
pub use repositories::KeyTokenRepository;
pub use errors::{DomainError, DomainResult, VerificationError};
