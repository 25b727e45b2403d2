//! Report formatter: turn aggregate interval stats into throughput figures.

use crate::beacon::IntervalStats;
use crate::error::HarnessError;
use serde::Serialize;
use std::fmt;

/// Final throughput summary for one run, renderable as text or JSON.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Number of consecutive-beacon gaps across all files.
    pub event_count: u64,
    pub total_elapsed_secs: f64,
    pub mean_interval_secs: f64,
    pub beacons_per_sec: f64,
}

impl Report {
    /// Errors with [`HarnessError::NoEvents`] on a zero gap count instead of
    /// dividing by it; an empty run must never read as a throughput of 0 or
    /// infinity.
    pub fn from_stats(stats: &IntervalStats) -> Result<Self, HarnessError> {
        if stats.gap_count == 0 {
            return Err(HarnessError::NoEvents);
        }
        let total_elapsed_secs = stats.total_secs();
        let mean_interval_secs = total_elapsed_secs / stats.gap_count as f64;
        Ok(Self {
            event_count: stats.gap_count,
            total_elapsed_secs,
            mean_interval_secs,
            beacons_per_sec: 1.0 / mean_interval_secs,
        })
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Beacons per second: {:.3}", self.beacons_per_sec)?;
        write!(
            f,
            "Average time between two beacon values: {:.6}s over {} intervals",
            self.mean_interval_secs, self.event_count
        )
    }
}
