//! Process lifecycle shared between the commands and the binary.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};

/// Tracks uptime and whether the next client shutdown should restart.
#[derive(Debug)]
pub struct Lifecycle {
    started_at: DateTime<Utc>,
    restart_requested: AtomicBool,
}

impl Lifecycle {
    /// Starts the uptime clock now.
    pub fn new() -> Self {
        Self::started_at(Utc::now())
    }

    /// Uses an explicit start time.
    pub const fn started_at(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            restart_requested: AtomicBool::new(false),
        }
    }

    /// When the process started.
    pub const fn start_time(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Time since start.
    pub fn uptime(&self) -> chrono::Duration {
        Utc::now() - self.started_at
    }

    /// Marks the next shutdown as a restart.
    pub fn request_restart(&self) {
        self.restart_requested.store(true, Ordering::SeqCst);
    }

    /// Returns and clears the restart flag.
    pub fn take_restart(&self) -> bool {
        self.restart_requested.swap(false, Ordering::SeqCst)
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}
