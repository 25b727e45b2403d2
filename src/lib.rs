//! Test harness for a distributed beacon-emitting node application.
//!
//! One run is strictly sequential: build the topology, clean the log
//! directory, run the node fleet for a fixed duration, then analyze the
//! recovered logs and report beacon throughput.

pub mod beacon;
pub mod error;
pub mod logdir;
pub mod orchestrator;
pub mod report;
pub mod topology;

pub type Result<T> = anyhow::Result<T>;
