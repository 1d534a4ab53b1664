//! Counters describing how the handler routed its traffic.
//!
//! The host framework usually carries its own crawl-wide statistics; these
//! counters cover only what the handler itself decides — how many requests
//! went to the plain transport, how many were routed through the grid, how
//! many sessions were opened, and how many grid downloads failed. All
//! counters are atomic, so the collector can be shared across concurrent
//! downloads without locking.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Thread-safe routing counters for a [`WebDriverDownloader`](crate::downloader::WebDriverDownloader).
#[derive(Debug, Default)]
pub struct HandlerStats {
    requests_passed_through: AtomicUsize,
    requests_grid_routed: AtomicUsize,
    sessions_opened: AtomicUsize,
    requests_failed: AtomicUsize,
}

/// A point-in-time copy of the counters, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerStatsSnapshot {
    pub requests_passed_through: usize,
    pub requests_grid_routed: usize,
    pub sessions_opened: usize,
    pub requests_failed: usize,
}

impl HandlerStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_passed_through(&self) {
        self.requests_passed_through.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn record_grid_routed(&self) {
        self.requests_grid_routed.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn record_session_opened(&self) {
        self.sessions_opened.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn record_failure(&self) {
        self.requests_failed.fetch_add(1, Ordering::SeqCst);
    }

    pub fn requests_passed_through(&self) -> usize {
        self.requests_passed_through.load(Ordering::SeqCst)
    }

    pub fn requests_grid_routed(&self) -> usize {
        self.requests_grid_routed.load(Ordering::SeqCst)
    }

    pub fn sessions_opened(&self) -> usize {
        self.sessions_opened.load(Ordering::SeqCst)
    }

    pub fn requests_failed(&self) -> usize {
        self.requests_failed.load(Ordering::SeqCst)
    }

    /// Takes a point-in-time copy of all counters for reporting.
    pub fn snapshot(&self) -> HandlerStatsSnapshot {
        HandlerStatsSnapshot {
            requests_passed_through: self.requests_passed_through(),
            requests_grid_routed: self.requests_grid_routed(),
            sessions_opened: self.sessions_opened(),
            requests_failed: self.requests_failed(),
        }
    }
}
