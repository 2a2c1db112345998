//! Convenience helpers for keyfiles stored on disk

use std::path::Path;

use tracing::debug;

use crate::crypto::Secret;
use crate::error::{KeyfileError, Result};
use crate::keyfile::Keyfile;

/// Read and parse a keyfile from `path`
pub fn read_keyfile(path: impl AsRef<Path>) -> Result<Keyfile> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|source| KeyfileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Read {} bytes from {:?}", data.len(), path);

    Keyfile::parse(&data).map_err(|e| KeyfileError::Parse {
        path: path.to_path_buf(),
        source: Box::new(e),
    })
}

/// Load the secret stored in the keyfile at `path`
///
/// `passphrase` is called exactly once, after the file has been read and
/// parsed, to obtain the passphrase. Errors are wrapped with the stage that
/// failed; use [`KeyfileError::root`] to inspect the cause.
pub fn load_key<F, P>(path: impl AsRef<Path>, passphrase: F) -> Result<Secret>
where
    F: FnOnce() -> Result<P>,
    P: AsRef<str>,
{
    let path = path.as_ref();
    let keyfile = read_keyfile(path)?;

    let decrypt_err = |e: KeyfileError| KeyfileError::Decrypt {
        path: path.to_path_buf(),
        source: Box::new(e),
    };
    let passphrase = passphrase().map_err(decrypt_err)?;
    keyfile.get(passphrase.as_ref()).map_err(decrypt_err)
}

/// Re-encrypt the secret in `keyfile` under a new passphrase
///
/// `new_passphrase` is called exactly once, and only after `old_passphrase`
/// has opened the keyfile. The result is a new keyfile with its own salt and
/// nonce; `keyfile` itself is not modified.
pub fn rekey<F, P>(keyfile: &Keyfile, old_passphrase: &str, new_passphrase: F) -> Result<Keyfile>
where
    F: FnOnce() -> Result<P>,
    P: AsRef<str>,
{
    let secret = keyfile.get(old_passphrase)?;
    let new_passphrase = new_passphrase()?;

    let mut rekeyed = Keyfile::new();
    rekeyed.set(new_passphrase.as_ref(), secret.expose())?;

    debug!("Rekeyed keyfile secret");
    Ok(rekeyed)
}
