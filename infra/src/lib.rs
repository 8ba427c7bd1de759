//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the KeyToken service.
//! It provides the concrete pieces the core crate leaves abstract.
//!
//! ## Architecture
//!
//! - **Database**: MySQL connection pool and `MySqlKeyTokenRepository` using SQLx
//! - **Configuration**: `.env` loading on top of the shared config types
//! - **Telemetry**: tracing subscriber installation
//!
//! [`bootstrap`] wires all of them into a ready [`TokenService`].

use anyhow::Context;

use kt_core::services::{TokenService, TokenServiceConfig};

// Re-export core types for convenience
pub use kt_core::errors::*;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Telemetry module - tracing subscriber setup
pub mod telemetry;

/// Configuration module for infrastructure services
pub mod config {
    //! Configuration types re-exported from the shared crate
    //!
    //! Handles:
    //! - Database connection strings and pool sizing
    //! - RSA key size and token lifetimes
    //! - Logging level and format

    pub use kt_shared::config::{
        AppConfig, DatabaseConfig, Environment, KeyTokenConfig, LogFormat, LoggingConfig,
    };
}

use config::AppConfig;
use database::{DatabasePool, MySqlKeyTokenRepository};

/// Token service backed by MySQL
pub type MySqlTokenService = TokenService<MySqlKeyTokenRepository>;

/// Smallest RSA modulus the signer accepts
const MIN_RSA_MODULUS_BITS: usize = kt_core::services::RsaKeyPairGenerator::MIN_MODULUS_BITS;

/// Load configuration from the environment
///
/// A `.env` file in the working directory is read first when present.
pub fn load_config() -> Result<AppConfig, InfrastructureError> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    validate_config(&config)?;

    Ok(config)
}

/// Reject settings the token service cannot run with
pub fn validate_config(config: &AppConfig) -> Result<(), InfrastructureError> {
    let key_token = &config.key_token;

    if key_token.rsa_modulus_bits < MIN_RSA_MODULUS_BITS {
        return Err(InfrastructureError::Config(format!(
            "KEYTOKEN_RSA_BITS must be at least {}, got {}",
            MIN_RSA_MODULUS_BITS, key_token.rsa_modulus_bits
        )));
    }
    if key_token.access_token_expiry <= 0 || key_token.refresh_token_expiry <= 0 {
        return Err(InfrastructureError::Config(
            "token lifetimes must be positive".to_string(),
        ));
    }
    if config.database.max_connections == 0 {
        return Err(InfrastructureError::Config(
            "DATABASE_MAX_CONNECTIONS must be positive".to_string(),
        ));
    }

    Ok(())
}

/// Build a MySQL-backed token service from configuration
///
/// Connects the pool, checks it answers, and wires the repository into a
/// [`TokenService`].
pub async fn bootstrap(config: &AppConfig) -> anyhow::Result<MySqlTokenService> {
    validate_config(config).context("invalid configuration")?;

    tracing::info!(
        environment = %config.environment,
        rsa_modulus_bits = config.key_token.rsa_modulus_bits,
        "Initializing key-token service"
    );

    let pool = DatabasePool::new(config.database.clone())
        .await
        .context("failed to connect to the key-token database")?;

    if !pool.health_check().await.context("database health check failed")? {
        anyhow::bail!("database health check returned an unexpected result");
    }

    let repository = MySqlKeyTokenRepository::new(pool.get_pool().clone());
    let service = TokenService::new(repository, TokenServiceConfig::from(&config.key_token));

    tracing::info!(pool = %pool.get_statistics(), "Key-token service initialized");

    Ok(service)
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
