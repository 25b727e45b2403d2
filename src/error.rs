//! Error taxonomy for the harness.
//!
//! Cleanup steps (stale-process kill, log clearing) are best-effort and never
//! surface here; spawn failures are per-index outcomes on the fleet summary,
//! not errors. Only conditions that must abort a run or an analysis pass get
//! a variant.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    /// The hosts file has fewer addresses than requested nodes.
    #[error("topology needs {wanted} hosts but only {got} were supplied")]
    InsufficientHosts { wanted: usize, got: usize },

    /// A beacon line's timestamp did not match the declared line format.
    #[error("malformed beacon timestamp at {}:{line}: {text:?}", .file.display())]
    MalformedTimestamp {
        file: PathBuf,
        line: usize,
        text: String,
    },

    /// The analysis pass produced zero inter-arrival gaps; a throughput
    /// figure would be a division by zero.
    #[error("no beacon events found in the log directory")]
    NoEvents,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
