// Log Rotator - truncate-and-reopen cycles for the supervised server's logs

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use gantry_core::{AppError, Result};

use crate::shutdown::ShutdownToken;

/// Rotates the monitored log files and signals the writer to reopen them.
///
/// The path set and threshold are fixed at construction. Each path carries
/// its own async mutex so at most one truncate/signal cycle is in flight
/// per path; a rotation requested while one is running coalesces into it.
pub struct LogRotator {
    paths: Vec<PathBuf>,
    rotate_threshold_bytes: u64,
    locks: HashMap<PathBuf, Mutex<()>>,
}

impl LogRotator {
    pub fn new(paths: Vec<PathBuf>, rotate_threshold_bytes: u64) -> Self {
        let locks = paths
            .iter()
            .map(|p| (p.clone(), Mutex::new(())))
            .collect();
        Self {
            paths,
            rotate_threshold_bytes,
            locks,
        }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Rotate one monitored path and signal `pid` to reopen its descriptor.
    ///
    /// Returns `Ok(false)` when a cycle for this path is already in flight
    /// and the request coalesced into it.
    pub async fn rotate(&self, pid: i32, path: &Path) -> Result<bool> {
        let lock = self.locks.get(path).ok_or_else(|| {
            AppError::InvalidState(format!("Path is not monitored: {}", path.display()))
        })?;
        let _guard = match lock.try_lock() {
            Ok(guard) => guard,
            Err(_) => {
                debug!(path = %path.display(), "Rotation already in flight, coalescing");
                return Ok(false);
            }
        };

        let backup = rotated_name(path);
        tokio::fs::rename(path, &backup).await?;
        tokio::fs::File::create(path).await?;

        kill(Pid::from_raw(pid), Signal::SIGUSR1)
            .map_err(|e| AppError::Internal(format!("Reopen signal to pid {} failed: {}", pid, e)))?;

        info!(path = %path.display(), backup = %backup.display(), pid, "Rotated log file");
        Ok(true)
    }

    /// Rotate every monitored path; one failed path does not stop the rest.
    pub async fn rotate_all(&self, pid: i32) {
        for path in &self.paths {
            if let Err(e) = self.rotate(pid, path).await {
                warn!(path = %path.display(), error = %e, "Log rotation failed, continuing");
            }
        }
    }

    /// Background loop rotating every path at/above the threshold on a
    /// fixed interval. Terminates promptly when the supervisor shuts down.
    pub fn start(
        self: Arc<Self>,
        pid: i32,
        interval: Duration,
        mut shutdown: ShutdownToken,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick fires immediately; skip it so startup does not
            // rotate freshly opened logs.
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = ticker.tick() => self.rotate_oversized(pid).await,
                    _ = shutdown.wait() => {
                        debug!("Rotation loop observed shutdown");
                        break;
                    }
                }
            }
        })
    }

    async fn rotate_oversized(&self, pid: i32) {
        for path in &self.paths {
            let size = match tokio::fs::metadata(path).await {
                Ok(meta) => meta.len(),
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "Skipping unreadable log path");
                    continue;
                }
            };
            if size < self.rotate_threshold_bytes {
                continue;
            }
            if let Err(e) = self.rotate(pid, path).await {
                warn!(path = %path.display(), error = %e, "Log rotation failed, continuing");
            }
        }
    }
}

fn rotated_name(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".1");
    PathBuf::from(name)
}
