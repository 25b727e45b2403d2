//! Inter-arrival aggregation across log files.

use crate::beacon::parse::{BeaconLine, LineParser};
use crate::error::HarnessError;
use anyhow::Context;
use chrono::Duration;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Running totals over every analyzed file.
///
/// The first beacon of each file seeds that file's cursor and contributes no
/// gap, so cross-file and before-first-event deltas never leak in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalStats {
    pub total_elapsed: Duration,
    pub gap_count: u64,
}

impl IntervalStats {
    pub fn new() -> Self {
        Self {
            total_elapsed: Duration::zero(),
            gap_count: 0,
        }
    }

    pub fn total_secs(&self) -> f64 {
        match self.total_elapsed.num_microseconds() {
            Some(us) => us as f64 / 1e6,
            None => self.total_elapsed.num_milliseconds() as f64 / 1e3,
        }
    }
}

impl Default for IntervalStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Scan every `.log` file under `dir` and aggregate consecutive beacon
/// gaps. File order does not matter; the totals are commutative. A marker
/// line that violates the timestamp contract aborts the whole analysis with
/// [`HarnessError::MalformedTimestamp`] rather than skewing the totals.
pub fn analyze_dir(dir: &Path) -> anyhow::Result<IntervalStats> {
    let parser = LineParser::new()?;
    let mut stats = IntervalStats::new();

    let entries =
        fs::read_dir(dir).with_context(|| format!("read log directory {}", dir.display()))?;
    for entry in entries {
        let entry = entry?;
        if !entry.file_name().to_string_lossy().ends_with(".log") {
            continue;
        }
        analyze_file(&parser, &entry.path(), &mut stats)?;
    }
    Ok(stats)
}

fn analyze_file(parser: &LineParser, path: &Path, stats: &mut IntervalStats) -> anyhow::Result<()> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read log file {}", path.display()))?;

    // Per-file cursor; never carried across files.
    let mut prev = None;
    let mut gaps_here = 0u64;

    for (lineno, line) in text.lines().enumerate() {
        match parser.classify(line) {
            None => continue,
            Some(BeaconLine::Malformed) => {
                return Err(HarnessError::MalformedTimestamp {
                    file: path.to_path_buf(),
                    line: lineno + 1,
                    text: line.to_string(),
                }
                .into());
            }
            Some(BeaconLine::Timestamped(ts)) => {
                if let Some(prev_ts) = prev {
                    stats.total_elapsed = stats.total_elapsed + (ts - prev_ts);
                    stats.gap_count += 1;
                    gaps_here += 1;
                }
                prev = Some(ts);
            }
        }
    }

    debug!(file = %path.display(), gaps = gaps_here, "analyzed");
    Ok(())
}
