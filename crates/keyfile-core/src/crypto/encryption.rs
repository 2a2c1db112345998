//! AES-256-GCM authenticated encryption
//!
//! Sealed output is `ciphertext || tag` exactly as produced by `aes-gcm`;
//! no associated data is bound. The nonce is supplied by the caller so the
//! container can persist it next to the ciphertext.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use rand::{rngs::OsRng, RngCore};

use super::{DerivedKey, NONCE_LEN, SALT_LEN};
use crate::error::{KeyfileError, Result};

/// Fill a new buffer of `n` bytes from the operating system CSPRNG
pub fn random_bytes(n: usize) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; n];
    OsRng
        .try_fill_bytes(&mut buf)
        .map_err(|e| KeyfileError::RandomError(e.to_string()))?;
    Ok(buf)
}

/// Generate a fresh random scrypt salt
pub fn generate_salt() -> Result<Vec<u8>> {
    random_bytes(SALT_LEN)
}

/// Generate a fresh random GCM nonce
pub fn generate_nonce() -> Result<[u8; NONCE_LEN]> {
    let mut nonce = [0u8; NONCE_LEN];
    OsRng
        .try_fill_bytes(&mut nonce)
        .map_err(|e| KeyfileError::RandomError(e.to_string()))?;
    Ok(nonce)
}

fn cipher(key: &DerivedKey) -> Result<Aes256Gcm> {
    Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| KeyfileError::EncryptionError(e.to_string()))
}

/// Seal plaintext under `key` and `nonce`
///
/// # Returns
/// The ciphertext with the 16-byte authentication tag appended
pub fn seal(plaintext: &[u8], key: &DerivedKey, nonce: &[u8; NONCE_LEN]) -> Result<Vec<u8>> {
    cipher(key)?
        .encrypt(Nonce::from_slice(nonce), plaintext)
        .map_err(|e| KeyfileError::EncryptionError(e.to_string()))
}

/// Open sealed data under `key` and `nonce`
///
/// Any authentication failure is reported as [`KeyfileError::BadPassphrase`]:
/// a wrong key and a corrupted ciphertext are indistinguishable here.
pub fn open(sealed: &[u8], key: &DerivedKey, nonce: &[u8]) -> Result<Vec<u8>> {
    if nonce.len() != NONCE_LEN {
        return Err(KeyfileError::MalformedPacket(format!(
            "invalid nonce length: expected {}, got {}",
            NONCE_LEN,
            nonce.len()
        )));
    }

    cipher(key)?
        .decrypt(Nonce::from_slice(nonce), sealed)
        .map_err(|_| KeyfileError::BadPassphrase)
}
