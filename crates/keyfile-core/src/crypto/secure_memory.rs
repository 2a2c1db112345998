//! Secure memory handling with automatic zeroization

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::KEY_LEN;

/// Key derived from a passphrase - automatically zeroed when dropped
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Create a derived key from raw bytes
    pub fn new(key: [u8; KEY_LEN]) -> Self {
        Self { key }
    }

    /// Get the key bytes (use carefully - avoid copying)
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.key
    }

    pub(crate) fn as_mut_bytes(&mut self) -> &mut [u8; KEY_LEN] {
        &mut self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Decrypted secret bytes - automatically zeroed when dropped
#[derive(Zeroize, ZeroizeOnDrop, PartialEq, Eq)]
pub struct Secret {
    value: Vec<u8>,
}

impl Secret {
    /// Wrap plaintext secret bytes
    pub fn new(value: Vec<u8>) -> Self {
        Self { value }
    }

    /// Get the secret bytes (use carefully)
    pub fn expose(&self) -> &[u8] {
        &self.value
    }

    /// Length of the secret in bytes
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// Report whether the secret has no bytes
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Consume and return the inner bytes
    pub fn into_inner(mut self) -> Vec<u8> {
        std::mem::take(&mut self.value)
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secret")
            .field("len", &self.value.len())
            .field("value", &"[REDACTED]")
            .finish()
    }
}
