//! MySQL-specific database implementations
//!
//! This module contains MySQL implementations of repository traits
//! using SQLx for database operations.

pub mod key_token_repository_impl;

// Re-export the MySQL implementations
pub use key_token_repository_impl::MySqlKeyTokenRepository;
