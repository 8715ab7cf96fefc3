//! Letter Filename Module
//!
//! Computes the next increment suffix for generated letter filenames.
//!
//! Generated letters are named `{prefix}_{identifier}_{date}_{nnn}.pdf`,
//! where `nnn` is a three-digit, zero-padded increment distinguishing
//! letters generated for the same identifier on the same day.

use std::fs;
use std::io;
use std::path::Path;

use regex::Regex;

use crate::error::{JanitorError, Result};
use crate::sweep::ARTIFACT_EXTENSION;

// == Next Increment ==
/// Returns the increment for the next letter named `{prefix}_{identifier}_{date}`.
///
/// Scans `dir` for files matching the base name followed by a three-digit
/// increment and the artifact extension, and returns the highest increment
/// found plus one, zero-padded to three digits. Files for other prefixes,
/// identifiers or dates never influence the result. The base name is
/// escaped before matching, so identifiers may contain pattern
/// metacharacters.
///
/// # Arguments
/// * `dir` - Directory the generated letters are written to
/// * `prefix` - Letter type prefix, e.g. "APPROVAL_SHEET"
/// * `identifier` - Sanitized recipient identifier
/// * `date` - Date component, e.g. "28-01-2026"
///
/// # Returns
/// The next free increment, `"001"` when no letter of this name exists yet
/// (including when the directory itself does not exist).
///
/// # Errors
/// `JanitorError::DirScan` if the directory exists but cannot be read.
pub fn next_increment(dir: &Path, prefix: &str, identifier: &str, date: &str) -> Result<String> {
    let base = format!("{}_{}_{}", prefix, identifier, date);
    let pattern = Regex::new(&format!(
        r"^{}_(\d{{3}})\.{}$",
        regex::escape(&base),
        ARTIFACT_EXTENSION
    ))?;

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok("001".to_string()),
        Err(source) => {
            return Err(JanitorError::DirScan {
                dir: dir.to_path_buf(),
                source,
            })
        }
    };

    let mut max_increment = 0u32;
    for entry in entries.flatten() {
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if let Some(captures) = pattern.captures(name) {
            if let Ok(increment) = captures[1].parse::<u32>() {
                max_increment = max_increment.max(increment);
            }
        }
    }

    Ok(format!("{:03}", max_increment + 1))
}
