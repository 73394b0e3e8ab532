//! Destination paths and relocation of finished downloads.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use url::Url;

use crate::error::Result;
use crate::fs::naming::locator_basename;

/// Get the destination path for a locator inside the staging directory.
pub fn destination_path(destination_dir: &Path, url: &Url) -> Result<PathBuf> {
    Ok(destination_dir.join(locator_basename(url)?))
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Move a finished download to its destination, replacing any existing file.
///
/// Either the complete file ends up at `destination` or nothing new does. A
/// rename is tried first; when source and destination live on different
/// filesystems the contents are copied into a sibling temporary file which is
/// then renamed into place.
pub fn relocate(source: &Path, destination: &Path) -> io::Result<()> {
    match std::fs::rename(source, destination) {
        Ok(()) => return Ok(()),
        Err(e) => tracing::debug!(
            "Rename {} -> {} failed ({}), copying instead",
            source.display(),
            destination.display(),
            e
        ),
    }

    let parent = destination
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let mut staged = NamedTempFile::new_in(parent)?;
    let mut reader = std::fs::File::open(source)?;
    io::copy(&mut reader, staged.as_file_mut())?;
    staged.as_file().sync_all()?;
    staged.persist(destination).map_err(|e| e.error)?;

    // Best effort: the transport owns its scratch file.
    let _ = std::fs::remove_file(source);
    Ok(())
}
