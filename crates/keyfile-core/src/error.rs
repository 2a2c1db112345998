//! Error types for keyfile-core

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for keyfile operations
pub type Result<T> = std::result::Result<T, KeyfileError>;

/// Keyfile error types
#[derive(Error, Debug)]
pub enum KeyfileError {
    /// Structural violation found while parsing a packet
    #[error("malformed key file packet: {0}")]
    MalformedPacket(String),

    /// The container has never had a secret stored in it
    #[error("no key is present")]
    NoKey,

    /// Authentication failed: wrong passphrase or corrupted ciphertext
    #[error("invalid passphrase")]
    BadPassphrase,

    #[error("invalid key size: {0}")]
    InvalidSize(usize),

    #[error("Key derivation failed: {0}")]
    KeyDerivationError(String),

    #[error("Encryption failed: {0}")]
    EncryptionError(String),

    #[error("Random generation failed: {0}")]
    RandomError(String),

    /// The passphrase provider could not supply a passphrase
    #[error("read passphrase: {0}")]
    Passphrase(String),

    #[error("read key file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse key file {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<KeyfileError>,
    },

    #[error("decrypt key file {}", .path.display())]
    Decrypt {
        path: PathBuf,
        #[source]
        source: Box<KeyfileError>,
    },
}

impl KeyfileError {
    /// Strip load-stage wrappers and return the underlying error.
    pub fn root(&self) -> &KeyfileError {
        match self {
            KeyfileError::Parse { source, .. } | KeyfileError::Decrypt { source, .. } => {
                source.root()
            }
            other => other,
        }
    }
}
