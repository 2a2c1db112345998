//! Atomic keyfile replacement on disk

use std::io::{self, Write};
use std::path::Path;

use keyfile_core::Keyfile;
use tempfile::NamedTempFile;
use tracing::debug;

/// Write `keyfile` to `path`, replacing any existing file atomically
///
/// The encoding goes to a freshly created, uniquely named temp file in the
/// same directory (mode 0600 on Unix), which is synced and then renamed over
/// `path`. On failure the temp file is removed and `path` is untouched.
pub fn save_keyfile(path: &Path, keyfile: &Keyfile) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(&keyfile.encode())?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;

    debug!("Saved keyfile to {:?}", path);
    Ok(())
}
