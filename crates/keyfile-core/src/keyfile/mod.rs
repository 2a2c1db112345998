//! The keyfile container
//!
//! A [`Keyfile`] holds one secret sealed with AES-256-GCM under a key derived
//! from a passphrase with scrypt. It stores only the salt, the nonce and the
//! sealed bytes; plaintext and derived keys live only inside a single call.

mod packet;

use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::{self, Secret, NONCE_LEN};
use crate::error::{KeyfileError, Result};

pub use packet::{HEADER_LEN, MAGIC};

/// A passphrase-protected secret
///
/// A default value is empty and ready for use. Fields are wiped when the
/// value is dropped or replaced.
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Keyfile {
    salt: Vec<u8>,
    nonce: Vec<u8>,
    ciphertext: Vec<u8>,
}

impl Keyfile {
    /// Create a new empty keyfile
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a keyfile from its binary encoding
    ///
    /// This is purely structural: the ciphertext is not checked until
    /// [`Keyfile::get`] is called.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let fields = packet::split(data)?;
        debug!(
            salt_len = fields.salt.len(),
            nonce_len = fields.nonce.len(),
            ciphertext_len = fields.ciphertext.len(),
            "Parsed keyfile packet"
        );

        Ok(Self {
            salt: fields.salt.to_vec(),
            nonce: fields.nonce.to_vec(),
            ciphertext: fields.ciphertext.to_vec(),
        })
    }

    /// Encode the keyfile in binary format
    pub fn encode(&self) -> Vec<u8> {
        packet::join(&packet::Fields {
            salt: &self.salt,
            nonce: &self.nonce,
            ciphertext: &self.ciphertext,
        })
    }

    /// Report whether a secret has been stored
    pub fn has_key(&self) -> bool {
        !self.salt.is_empty() && !self.nonce.is_empty()
    }

    /// The scrypt salt, empty until a secret is stored
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    /// The GCM nonce of the current ciphertext
    pub fn nonce(&self) -> &[u8] {
        &self.nonce
    }

    /// The sealed secret, including the authentication tag
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Decrypt the stored secret with the passphrase
    ///
    /// Reports [`KeyfileError::NoKey`] if nothing was ever stored, and
    /// [`KeyfileError::BadPassphrase`] if authentication fails.
    pub fn get(&self, passphrase: &str) -> Result<Secret> {
        if !self.has_key() {
            return Err(KeyfileError::NoKey);
        }
        if self.nonce.len() != NONCE_LEN {
            return Err(KeyfileError::MalformedPacket(format!(
                "invalid nonce length: expected {}, got {}",
                NONCE_LEN,
                self.nonce.len()
            )));
        }

        let key = crypto::derive_key(passphrase, &self.salt, None)?;
        let plaintext = crypto::open(&self.ciphertext, &key, &self.nonce)?;

        debug!(len = plaintext.len(), "Decrypted keyfile secret");
        Ok(Secret::new(plaintext))
    }

    /// Encrypt `secret` with the passphrase, replacing any previous contents
    ///
    /// An existing salt is kept; the nonce is always regenerated. On error
    /// the keyfile is left unchanged.
    pub fn set(&mut self, passphrase: &str, secret: &[u8]) -> Result<()> {
        let salt = if self.salt.is_empty() {
            crypto::generate_salt()?
        } else {
            self.salt.clone()
        };

        let key = crypto::derive_key(passphrase, &salt, None)?;
        let nonce = crypto::generate_nonce()?;
        let ciphertext = crypto::seal(secret, &key, &nonce)?;

        *self = Self {
            salt,
            nonce: nonce.to_vec(),
            ciphertext,
        };

        debug!(len = secret.len(), "Stored keyfile secret");
        Ok(())
    }

    /// Generate `n` random bytes, store them as the secret, and return them
    pub fn random(&mut self, passphrase: &str, n: usize) -> Result<Secret> {
        if n == 0 {
            return Err(KeyfileError::InvalidSize(n));
        }

        let secret = Secret::new(crypto::random_bytes(n)?);
        self.set(passphrase, secret.expose())?;
        Ok(secret)
    }
}

impl std::fmt::Debug for Keyfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keyfile")
            .field("salt_len", &self.salt.len())
            .field("nonce_len", &self.nonce.len())
            .field("ciphertext_len", &self.ciphertext.len())
            .finish()
    }
}
