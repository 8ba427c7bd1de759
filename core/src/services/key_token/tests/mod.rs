mod signer_tests;

use std::sync::OnceLock;

use crate::domain::entities::token::KeyPair;

use super::RsaKeyPairGenerator;

/// Smallest modulus the signer accepts, to keep key generation quick
pub(super) const TEST_MODULUS_BITS: usize = 2048;

/// Key pair shared by tests that only need some valid key
pub(super) fn shared_key_pair() -> &'static KeyPair {
    static KEY_PAIR: OnceLock<KeyPair> = OnceLock::new();
    KEY_PAIR.get_or_init(|| RsaKeyPairGenerator::new(TEST_MODULUS_BITS).generate().unwrap())
}

/// A second, unrelated key pair
pub(super) fn other_key_pair() -> &'static KeyPair {
    static KEY_PAIR: OnceLock<KeyPair> = OnceLock::new();
    KEY_PAIR.get_or_init(|| RsaKeyPairGenerator::new(TEST_MODULUS_BITS).generate().unwrap())
}
