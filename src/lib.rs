//! PDF Janitor - background cleanup for generated PDF letters
//!
//! Owns a directory of generated PDF artifacts and deletes files older than
//! a configured TTL, either on demand or from a periodic background task.

pub mod config;
pub mod error;
pub mod naming;
pub mod sweep;
pub mod tasks;

pub use config::Config;
pub use error::{JanitorError, Result};
pub use sweep::{sweep_directory, SweepStats};
pub use tasks::{JanitorStatus, PdfJanitor, SweepTaskId};
