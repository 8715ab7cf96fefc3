//! Sweep Module
//!
//! Scans the managed artifact directory and deletes expired PDF files.

mod artifact;
mod stats;
mod sweeper;


// Re-export public types
pub use artifact::{has_artifact_extension, Artifact};
pub use stats::SweepStats;
pub use sweeper::sweep_directory;

// == Public Constants ==
/// File extension recognized as a generated artifact
pub const ARTIFACT_EXTENSION: &str = "pdf";
