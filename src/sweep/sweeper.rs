//! Sweeper Module
//!
//! The scan-and-delete pass over the managed artifact directory.

use std::fs;
use std::io;
use std::path::Path;
use std::time::{Duration, SystemTime};

use tracing::{debug, warn};

use crate::error::{JanitorError, Result};
use crate::sweep::{has_artifact_extension, Artifact};

// == Sweep Directory ==
/// Scans `dir` once and deletes every expired artifact directly inside it.
///
/// Only regular files carrying the artifact extension are considered;
/// sub-directories and files with other extensions are never inspected or
/// deleted. The scan is non-recursive. A file is expired when its age,
/// measured from its last modification time, is strictly greater than `ttl`.
///
/// A missing directory is a normal startup state, not an error: the sweep
/// reports zero removals and never creates the directory itself.
///
/// Failures on individual entries (stat or delete) are logged and skipped so
/// one bad file cannot stop the rest of the pass. A file that disappears
/// between the scan and the delete was removed by another actor and is not
/// counted.
///
/// # Arguments
/// * `dir` - The managed artifact directory
/// * `ttl` - Maximum age a file may reach before deletion
///
/// # Returns
/// The number of files actually deleted in this pass.
///
/// # Errors
/// `JanitorError::DirScan` if the directory exists but cannot be read.
pub fn sweep_directory(dir: &Path, ttl: Duration) -> Result<usize> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(dir = %dir.display(), "Artifact directory does not exist, nothing to sweep");
            return Ok(0);
        }
        Err(source) => {
            return Err(JanitorError::DirScan {
                dir: dir.to_path_buf(),
                source,
            })
        }
    };

    let now = SystemTime::now();
    let mut removed = 0;

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "Skipping unreadable directory entry");
                continue;
            }
        };

        let path = entry.path();

        // Only regular files are swept; sub-directories and symlinks are inert
        match entry.file_type() {
            Ok(file_type) if file_type.is_file() => {}
            Ok(_) => continue,
            Err(err) => {
                debug!(path = %path.display(), error = %err, "Could not determine entry type, skipping");
                continue;
            }
        }

        if !has_artifact_extension(&path) {
            continue;
        }

        let modified = match entry.metadata().and_then(|meta| meta.modified()) {
            Ok(modified) => modified,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                // Removed by another actor between listing and stat
                debug!(path = %path.display(), "Artifact vanished during scan, skipping");
                continue;
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Could not read modification time, skipping");
                continue;
            }
        };

        let artifact = Artifact::new(path, modified);
        if !artifact.is_expired(now, ttl) {
            continue;
        }

        match fs::remove_file(&artifact.path) {
            Ok(()) => {
                debug!(path = %artifact.path.display(), "Removed expired artifact");
                removed += 1;
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %artifact.path.display(), "Artifact already removed, skipping");
            }
            Err(err) => {
                warn!(path = %artifact.path.display(), error = %err, "Failed to remove expired artifact, skipping");
            }
        }
    }

    Ok(removed)
}
