//! Atomic file write using the write-rename pattern.
//!
//! Writes data to a temporary file (`{path}.tmp`), calls `sync_all()` to
//! ensure bytes are flushed to persistent storage, then swaps it into place.
//! The previous file is parked at `{path}.bak` during the swap and restored
//! if the final rename fails, so a crash or error never leaves the path
//! without a complete save.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut s: OsString = path.as_os_str().to_owned();
    s.push(suffix);
    PathBuf::from(s)
}

/// Atomically writes `data` to `path`.
///
/// 1. Write to `{path}.tmp` and `sync_all()`
/// 2. Move an existing `path` to `{path}.bak`
/// 3. Rename the temp file to `path` (rolling back the backup on failure)
/// 4. Remove the backup
pub fn atomic_write(path: &Path, data: &[u8]) -> io::Result<()> {
    let tmp_path = sibling(path, ".tmp");
    let bak_path = sibling(path, ".bak");

    // Ensure parent directory exists.
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    // Stale temp file from a crashed save.
    let _ = fs::remove_file(&tmp_path);

    let mut file = File::create(&tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;
    drop(file);

    let _ = fs::remove_file(&bak_path);
    let had_previous = path.exists();
    if had_previous {
        fs::rename(path, &bak_path)?;
    }

    if let Err(e) = fs::rename(&tmp_path, path) {
        if had_previous {
            let _ = fs::rename(&bak_path, path);
        }
        return Err(e);
    }

    if had_previous {
        let _ = fs::remove_file(&bak_path);
    }
    Ok(())
}
