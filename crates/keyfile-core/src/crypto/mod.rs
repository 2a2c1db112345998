//! Cryptographic primitives for the keyfile format
//!
//! This module provides:
//! - scrypt key derivation from passphrases
//! - AES-256-GCM authenticated encryption
//! - Secure memory handling with zeroize

mod encryption;
mod key_derivation;
mod secure_memory;

pub use encryption::{generate_nonce, generate_salt, open, random_bytes, seal};
pub use key_derivation::{derive_key, KeyDerivationParams};
pub use secure_memory::{DerivedKey, Secret};

/// Derived key length in bytes (AES-256)
pub const KEY_LEN: usize = 32;

/// Length of a freshly generated scrypt salt
pub const SALT_LEN: usize = 16;

/// AES-GCM nonce length
pub const NONCE_LEN: usize = 12;
