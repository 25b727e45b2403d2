//! Beacon-interval analysis over a directory of node log files.

pub mod parse;
pub mod stats;

pub use parse::{BeaconLine, LineParser, BEACON_MARKER};
pub use stats::{analyze_dir, IntervalStats};
