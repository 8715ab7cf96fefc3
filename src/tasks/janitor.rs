//! PDF Janitor Module
//!
//! Owns the recurring background sweep over the managed artifact directory
//! and its start/stop lifecycle.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::{JanitorError, Result};
use crate::sweep::{sweep_directory, SweepStats};

// == Sweep Task Id ==
/// Identity of one spawned sweep loop.
///
/// Repeated `start` calls without an intervening `stop` return the same id,
/// so callers can tell that their call reused the running loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SweepTaskId(u64);

impl fmt::Display for SweepTaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sweep-{}", self.0)
    }
}

// == Janitor Status ==
/// Snapshot of the janitor's lifecycle state and sweep statistics.
#[derive(Debug, Clone, Serialize)]
pub struct JanitorStatus {
    /// Whether the periodic sweep loop is currently running
    pub running: bool,
    /// Cumulative sweep statistics
    pub stats: SweepStats,
}

// == Active Sweep ==
/// Handle to the running sweep loop, stored while the janitor is started.
#[derive(Debug)]
struct ActiveSweep {
    id: SweepTaskId,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

// == Pdf Janitor ==
/// Background cleanup service for the managed artifact directory.
///
/// Deletes generated PDF artifacts older than the configured TTL, either on
/// demand via [`sweep_now`](Self::sweep_now) or from a periodic task managed
/// by [`start`](Self::start) and [`stop`](Self::stop). All methods take
/// `&self`, so one instance can be shared behind an `Arc`.
#[derive(Debug)]
pub struct PdfJanitor {
    /// Directory the janitor deletes artifacts from
    pdf_dir: PathBuf,
    /// Maximum artifact age before deletion
    ttl: Duration,
    /// Shared sweep statistics, updated by the loop and by manual sweeps
    stats: Arc<RwLock<SweepStats>>,
    /// Handle to the active sweep loop; None while idle
    active: Mutex<Option<ActiveSweep>>,
    /// Lock-free mirror of the lifecycle state for is_running
    running: AtomicBool,
    /// Source of ids for spawned loops
    next_task_id: AtomicU64,
}

impl PdfJanitor {
    // == Constructor ==
    /// Creates an idle janitor for `pdf_dir` with the given artifact TTL.
    ///
    /// Does not touch the filesystem; a directory that does not exist yet is
    /// handled by the sweep itself.
    pub fn new(pdf_dir: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            pdf_dir: pdf_dir.into(),
            ttl,
            stats: Arc::new(RwLock::new(SweepStats::new())),
            active: Mutex::new(None),
            running: AtomicBool::new(false),
            next_task_id: AtomicU64::new(1),
        }
    }

    /// Creates a janitor from the process configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.pdf_dir.clone(), config.ttl())
    }

    // == Accessors ==
    /// The directory this janitor sweeps.
    pub fn pdf_dir(&self) -> &Path {
        &self.pdf_dir
    }

    /// The artifact TTL this janitor enforces.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Start ==
    /// Starts the periodic sweep loop, or returns the id of the loop that is
    /// already running.
    ///
    /// The loop sleeps first, so the first sweep happens one full `interval`
    /// after this call; use [`sweep_now`](Self::sweep_now) when an immediate
    /// pass is needed. A second `start` without an intervening `stop` spawns
    /// nothing and keeps the original interval, even when called with a
    /// different one.
    ///
    /// # Arguments
    /// * `interval` - Time between sweep passes; must be non-zero
    ///
    /// # Returns
    /// The id of the running sweep loop.
    ///
    /// # Errors
    /// `JanitorError::InvalidInterval` if `interval` is zero; no background
    /// task is created in that case.
    pub async fn start(&self, interval: Duration) -> Result<SweepTaskId> {
        if interval.is_zero() {
            return Err(JanitorError::InvalidInterval);
        }

        let mut active = self.active.lock().await;
        if let Some(active) = active.as_ref() {
            debug!("Sweep task {} already running, reusing it", active.id);
            return Ok(active.id);
        }

        let id = SweepTaskId(self.next_task_id.fetch_add(1, Ordering::Relaxed));
        let cancel = CancellationToken::new();
        let handle = spawn_sweep_loop(
            self.pdf_dir.clone(),
            self.ttl,
            interval,
            cancel.clone(),
            Arc::clone(&self.stats),
        );

        *active = Some(ActiveSweep { id, cancel, handle });
        self.running.store(true, Ordering::SeqCst);
        info!("Started sweep task {} with an interval of {:?}", id, interval);

        Ok(id)
    }

    // == Stop ==
    /// Stops the periodic sweep loop and waits for it to terminate.
    ///
    /// A no-op when nothing is running. After this returns the loop has
    /// observed the cancellation and exited, not merely been asked to, so no
    /// further sweep will run. The lifecycle lock is held across the join;
    /// a concurrent `start` waits for the shutdown to finish.
    pub async fn stop(&self) {
        let mut active = self.active.lock().await;
        let Some(ActiveSweep { id, cancel, handle }) = active.take() else {
            debug!("Stop requested but no sweep task is running");
            return;
        };

        self.running.store(false, Ordering::SeqCst);
        cancel.cancel();
        if let Err(err) = handle.await {
            warn!("Sweep task {} did not shut down cleanly: {}", id, err);
        }

        info!("Sweep task {} stopped", id);
    }

    // == Is Running ==
    /// Returns true while the periodic sweep loop is running.
    ///
    /// Reflects a completed `start` or `stop` immediately and never blocks
    /// on a lifecycle operation in progress.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    // == Sweep Now ==
    /// Runs one sweep pass immediately with the janitor's directory and TTL.
    ///
    /// Works whether or not the periodic loop is running and records the
    /// outcome in the shared statistics.
    ///
    /// # Returns
    /// The number of files removed by this pass.
    ///
    /// # Errors
    /// `JanitorError::DirScan` if the directory exists but cannot be read.
    pub async fn sweep_now(&self) -> Result<usize> {
        match sweep_directory(&self.pdf_dir, self.ttl) {
            Ok(removed) => {
                self.stats.write().await.record_sweep(removed);
                Ok(removed)
            }
            Err(err) => {
                self.stats.write().await.record_failure();
                Err(err)
            }
        }
    }

    // == Status ==
    /// Returns a snapshot of the lifecycle state and sweep statistics.
    pub async fn status(&self) -> JanitorStatus {
        let stats = self.stats.read().await.clone();
        JanitorStatus {
            running: self.is_running(),
            stats,
        }
    }
}

// == Sweep Loop ==
/// Spawns the background task that periodically sweeps the directory.
///
/// Each iteration sleeps for `interval` and then runs one sweep pass. The
/// cancellation token is checked with priority before every pass, so a stop
/// requested during the sleep is honored without one more sweep. Sweep
/// failures are logged and counted; they never terminate the loop.
fn spawn_sweep_loop(
    pdf_dir: PathBuf,
    ttl: Duration,
    interval: Duration,
    cancel: CancellationToken,
    stats: Arc<RwLock<SweepStats>>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "Sweep loop running over {} with a TTL of {:?}",
            pdf_dir.display(),
            ttl
        );

        loop {
            // Sleep first; cancellation wins over an elapsed interval
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(interval) => {}
            }

            match sweep_directory(&pdf_dir, ttl) {
                Ok(removed) => {
                    stats.write().await.record_sweep(removed);
                    if removed > 0 {
                        info!("Sweep removed {} expired artifacts", removed);
                    } else {
                        debug!("Sweep found no expired artifacts");
                    }
                }
                Err(err) => {
                    stats.write().await.record_failure();
                    error!("Sweep failed, retrying next interval: {}", err);
                }
            }
        }

        debug!("Sweep loop terminated");
    })
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;
    use tokio_test::{assert_err, assert_ok};

    fn test_janitor(dir: &TempDir) -> PdfJanitor {
        PdfJanitor::new(dir.path(), Duration::from_secs(15 * 60))
    }

    #[tokio::test]
    async fn test_new_janitor_is_idle() {
        let dir = TempDir::new().unwrap();
        let janitor = test_janitor(&dir);

        assert!(!janitor.is_running());
        assert_eq!(janitor.pdf_dir(), dir.path());
        assert_eq!(janitor.ttl(), Duration::from_secs(900));
    }

    #[tokio::test]
    async fn test_from_config() {
        let config = Config::default();
        let janitor = PdfJanitor::from_config(&config);

        assert_eq!(janitor.pdf_dir(), Path::new("/tmp/pdfs"));
        assert_eq!(janitor.ttl(), Duration::from_secs(15 * 60));
        assert!(!janitor.is_running());
    }

    #[tokio::test]
    async fn test_start_rejects_zero_interval() {
        let dir = TempDir::new().unwrap();
        let janitor = test_janitor(&dir);

        assert_err!(janitor.start(Duration::ZERO).await);
        assert!(!janitor.is_running());
    }

    #[tokio::test]
    async fn test_start_and_stop_toggle_running() {
        let dir = TempDir::new().unwrap();
        let janitor = test_janitor(&dir);

        assert_ok!(janitor.start(Duration::from_secs(60)).await);
        assert!(janitor.is_running());

        janitor.stop().await;
        assert!(!janitor.is_running());
    }

    #[tokio::test]
    async fn test_stop_without_start_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        let janitor = test_janitor(&dir);

        janitor.stop().await;
        assert!(!janitor.is_running());
    }

    #[tokio::test]
    async fn test_second_start_returns_same_id() {
        let dir = TempDir::new().unwrap();
        let janitor = test_janitor(&dir);

        let first = janitor.start(Duration::from_secs(60)).await.unwrap();
        let second = janitor.start(Duration::from_secs(1)).await.unwrap();

        assert_eq!(first, second);
        janitor.stop().await;
    }

    #[tokio::test]
    async fn test_restart_uses_fresh_id() {
        let dir = TempDir::new().unwrap();
        let janitor = test_janitor(&dir);

        let first = janitor.start(Duration::from_secs(60)).await.unwrap();
        janitor.stop().await;
        let second = janitor.start(Duration::from_secs(60)).await.unwrap();

        assert_ne!(first, second);
        janitor.stop().await;
    }

    #[tokio::test]
    async fn test_task_id_display() {
        let dir = TempDir::new().unwrap();
        let janitor = test_janitor(&dir);

        let id = janitor.start(Duration::from_secs(60)).await.unwrap();
        assert_eq!(id.to_string(), "sweep-1");
        janitor.stop().await;
    }

    #[tokio::test]
    async fn test_sweep_now_missing_directory() {
        let dir = TempDir::new().unwrap();
        let janitor = PdfJanitor::new(dir.path().join("not_there"), Duration::from_secs(60));

        let removed = janitor.sweep_now().await.unwrap();
        assert_eq!(removed, 0);
    }

    #[tokio::test]
    async fn test_sweep_now_scan_failure_counts() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker.txt");
        std::fs::write(&blocker, b"not a directory").unwrap();
        let janitor = PdfJanitor::new(blocker.join("sub"), Duration::from_secs(60));

        let err = assert_err!(janitor.sweep_now().await);
        assert!(matches!(err, JanitorError::DirScan { .. }));

        let status = janitor.status().await;
        assert_eq!(status.stats.sweep_failures, 1);
        assert_eq!(status.stats.sweeps_completed, 0);
        assert!(status.stats.last_sweep_at.is_none());
    }

    #[tokio::test]
    async fn test_sweep_now_updates_stats() {
        let dir = TempDir::new().unwrap();
        let janitor = PdfJanitor::new(dir.path(), Duration::ZERO);

        let path = dir.path().join("old.pdf");
        std::fs::write(&path, b"%PDF-1.4").unwrap();
        let mtime = filetime::FileTime::from_system_time(
            std::time::SystemTime::now() - Duration::from_secs(5),
        );
        filetime::set_file_mtime(&path, mtime).unwrap();

        let removed = janitor.sweep_now().await.unwrap();
        assert_eq!(removed, 1);

        let status = janitor.status().await;
        assert!(!status.running);
        assert_eq!(status.stats.sweeps_completed, 1);
        assert_eq!(status.stats.files_removed, 1);
        assert_eq!(status.stats.last_removed, 1);
        assert!(status.stats.last_sweep_at.is_some());
    }

    #[tokio::test]
    async fn test_status_serializes() {
        let dir = TempDir::new().unwrap();
        let janitor = test_janitor(&dir);

        let json = serde_json::to_value(janitor.status().await).unwrap();
        assert_eq!(json["running"], false);
        assert_eq!(json["stats"]["sweeps_completed"], 0);
    }
}
