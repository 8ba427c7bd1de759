//! Shared configuration and common types for the KeyToken workspace
//!
//! This crate provides functionality used across the server crates:
//! - Configuration types (environment, database, key-token lifetimes, logging)
//! - Response envelopes returned by service operations

pub mod config;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{AppConfig, DatabaseConfig, Environment, KeyTokenConfig, LogFormat, LoggingConfig};
pub use types::MessageResponse;
