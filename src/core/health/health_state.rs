use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Process liveness data shared between the bot and the health endpoint.
#[derive(Debug)]
pub struct HealthState {
    started: Instant,
    servers: AtomicUsize,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemoryUsage {
    /// Resident set size in bytes, where the platform reports it.
    pub rss: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    /// Seconds since startup.
    pub uptime: u64,
    pub servers: usize,
    pub memory: MemoryUsage,
    pub timestamp: DateTime<Utc>,
}

impl HealthState {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            servers: AtomicUsize::new(0),
        }
    }

    pub fn set_server_count(&self, count: usize) {
        self.servers.store(count, Ordering::Relaxed);
    }

    pub fn server_count(&self) -> usize {
        self.servers.load(Ordering::Relaxed)
    }

    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn report(&self, memory: MemoryUsage) -> HealthReport {
        HealthReport {
            status: "healthy",
            uptime: self.uptime().as_secs(),
            servers: self.server_count(),
            memory,
            timestamp: Utc::now(),
        }
    }
}

impl Default for HealthState {
    fn default() -> Self {
        Self::new()
    }
}
