//! Error types for the janitor
//!
//! Provides unified error handling using thiserror.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

// == Janitor Error Enum ==
/// Unified error type for the janitor.
#[derive(Error, Debug)]
pub enum JanitorError {
    /// Zero interval passed to start
    #[error("Invalid sweep interval: must be greater than zero")]
    InvalidInterval,

    /// The artifact directory exists but could not be scanned
    #[error("Failed to scan artifact directory {}: {source}", .dir.display())]
    DirScan { dir: PathBuf, source: io::Error },

    /// A letter filename pattern could not be compiled
    #[error("Invalid filename pattern: {0}")]
    Pattern(#[from] regex::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the janitor.
pub type Result<T> = std::result::Result<T, JanitorError>;
