//! RSA key pair generation for RS256 signing

use rsa::pkcs1::{EncodeRsaPrivateKey, EncodeRsaPublicKey, LineEnding};
use rsa::rand_core::OsRng;
use rsa::{RsaPrivateKey, RsaPublicKey};

use crate::domain::entities::token::{KeyPair, RSA_MODULUS_BITS};
use crate::errors::DomainError;

/// Generates PKCS#1 PEM encoded RSA key pairs
///
/// Generation is CPU bound; async callers should run [`generate`] on the
/// blocking pool.
///
/// [`generate`]: RsaKeyPairGenerator::generate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsaKeyPairGenerator {
    modulus_bits: usize,
}

impl RsaKeyPairGenerator {
    /// Smallest modulus the RS256 signer accepts
    pub const MIN_MODULUS_BITS: usize = 2048;

    /// Creates a generator for the given modulus length
    pub fn new(modulus_bits: usize) -> Self {
        Self { modulus_bits }
    }

    /// Modulus length of generated keys
    pub fn modulus_bits(&self) -> usize {
        self.modulus_bits
    }

    /// Generates a fresh key pair
    ///
    /// # Returns
    ///
    /// * `Ok(KeyPair)` - Public and private key, both `RSA ... KEY` PEM
    /// * `Err(DomainError::KeyGeneration)` - Modulus too small or the
    ///   primitive failed
    pub fn generate(&self) -> Result<KeyPair, DomainError> {
        if self.modulus_bits < Self::MIN_MODULUS_BITS {
            return Err(DomainError::KeyGeneration {
                message: format!(
                    "modulus of {} bits is below the {} bit minimum",
                    self.modulus_bits,
                    Self::MIN_MODULUS_BITS
                ),
            });
        }

        let mut rng = OsRng;

        let private_key = RsaPrivateKey::new(&mut rng, self.modulus_bits).map_err(|e| {
            DomainError::KeyGeneration {
                message: format!("Failed to generate RSA private key: {}", e),
            }
        })?;
        let public_key = RsaPublicKey::from(&private_key);

        let private_pem = private_key
            .to_pkcs1_pem(LineEnding::LF)
            .map_err(|e| DomainError::KeyGeneration {
                message: format!("Failed to encode private key to PEM: {}", e),
            })?;
        let public_pem = public_key
            .to_pkcs1_pem(LineEnding::LF)
            .map_err(|e| DomainError::KeyGeneration {
                message: format!("Failed to encode public key to PEM: {}", e),
            })?;

        Ok(KeyPair::new(public_pem, private_pem.to_string()))
    }
}

impl Default for RsaKeyPairGenerator {
    fn default() -> Self {
        Self::new(RSA_MODULUS_BITS)
    }
}
