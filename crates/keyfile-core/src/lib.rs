//! # keyfile-core
//!
//! Passphrase-protected storage for a single secret:
//! - scrypt key derivation (N=32768, r=8, p=1) from a passphrase and salt
//! - AES-256-GCM sealing with a fresh nonce on every write
//! - A compact binary packet format with structural validation
//! - Zeroize-on-drop handling of derived keys and decrypted secrets

pub mod crypto;
pub mod error;
mod keyfile;
mod load;

pub use crypto::{DerivedKey, KeyDerivationParams, Secret};
pub use error::{KeyfileError, Result};
pub use keyfile::{Keyfile, HEADER_LEN, MAGIC};
pub use load::{load_key, read_keyfile, rekey};
