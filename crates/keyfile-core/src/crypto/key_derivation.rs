//! Passphrase-based key derivation using scrypt

use scrypt::{scrypt, Params};

use super::{DerivedKey, KEY_LEN};
use crate::error::{KeyfileError, Result};

/// Parameters for scrypt key derivation
///
/// The defaults are part of the keyfile format: packets written with
/// different parameters cannot be opened by this version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyDerivationParams {
    /// log2 of the CPU/memory cost N (default: 15, i.e. N = 32768)
    pub log_n: u8,
    /// Block size r (default: 8)
    pub block_size: u32,
    /// Parallelism p (default: 1)
    pub parallelism: u32,
}

impl Default for KeyDerivationParams {
    fn default() -> Self {
        Self {
            log_n: 15,
            block_size: 8,
            parallelism: 1,
        }
    }
}

/// Derive a 256-bit key from a passphrase and salt using scrypt
///
/// # Arguments
/// * `passphrase` - The user's passphrase
/// * `salt` - The salt stored alongside the ciphertext (must not be empty)
/// * `params` - Optional cost parameters; `None` uses the format defaults
///
/// # Returns
/// A 32-byte key suitable for AES-256-GCM
pub fn derive_key(
    passphrase: &str,
    salt: &[u8],
    params: Option<KeyDerivationParams>,
) -> Result<DerivedKey> {
    if salt.is_empty() {
        return Err(KeyfileError::KeyDerivationError(
            "salt must not be empty".to_string(),
        ));
    }

    let params = params.unwrap_or_default();
    let scrypt_params = Params::new(params.log_n, params.block_size, params.parallelism, KEY_LEN)
        .map_err(|e| KeyfileError::KeyDerivationError(e.to_string()))?;

    let mut key = DerivedKey::new([0u8; KEY_LEN]);
    scrypt(passphrase.as_bytes(), salt, &scrypt_params, key.as_mut_bytes())
        .map_err(|e| KeyfileError::KeyDerivationError(e.to_string()))?;

    Ok(key)
}
