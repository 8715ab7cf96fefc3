//! Configuration Module
//!
//! Handles loading and managing janitor configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Janitor configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory the generated PDF artifacts are written to
    pub pdf_dir: PathBuf,
    /// Artifact time-to-live in minutes
    pub ttl_minutes: u64,
    /// Background sweep interval in seconds
    pub sweep_interval_secs: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PDF_DIR` - Managed artifact directory (default: /tmp/pdfs)
    /// - `PDF_TTL_MINUTES` - Artifact TTL in minutes (default: 15)
    /// - `SWEEP_INTERVAL_SECS` - Sweep frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        Self {
            pdf_dir: env::var("PDF_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/tmp/pdfs")),
            ttl_minutes: env::var("PDF_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(15),
            sweep_interval_secs: env::var("SWEEP_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
        }
    }

    /// Returns the artifact TTL as a duration.
    ///
    /// Saturates at the maximum duration for absurdly large minute values.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_minutes.saturating_mul(60))
    }

    /// Returns the sweep interval as a duration.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pdf_dir: PathBuf::from("/tmp/pdfs"),
            ttl_minutes: 15,
            sweep_interval_secs: 60,
        }
    }
}
