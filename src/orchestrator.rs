//! Process orchestrator: lifecycle of the node fleet for one timed run.
//!
//! The protocol is deliberately coarse: kill stale instances by name, spawn
//! N node processes with their output redirected to per-index log files,
//! sleep for the run duration, then kill every handle and sweep by name once
//! more. The orchestrator never waits for node readiness and never inspects
//! node output; correctness of node behavior is the analyzer's job.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Everything the orchestrator needs for one run, passed explicitly rather
/// than read from ambient process state.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Path to the node binary. Its file name is also the kill-by-name key.
    pub binary: PathBuf,
    pub topology_file: PathBuf,
    pub log_dir: PathBuf,
    pub duration: Duration,
    /// Fixed third argument handed to every node.
    pub protocol_param: u32,
}

/// A spawned node the orchestrator holds a handle for.
#[derive(Debug)]
pub struct NodeProcess {
    pub index: usize,
    pub log_file: PathBuf,
    child: Child,
}

/// Result of one spawn attempt. A failed index never blocks the rest of the
/// fleet; it is recorded and reported instead.
#[derive(Debug)]
pub enum SpawnOutcome {
    Started(NodeProcess),
    Failed { index: usize, reason: String },
}

/// What the run looked like from the orchestrator's side. Node-level
/// correctness is not part of this; a failed index shows up later as a
/// missing or empty log file too.
#[derive(Debug)]
pub struct FleetSummary {
    pub started: usize,
    pub failed: Vec<(usize, String)>,
}

/// Forcibly terminate every process running under `name`. Best-effort: a
/// missing `killall` or no matching process is a normal pre-condition, not
/// an error.
pub fn kill_by_name(name: &str) {
    match Command::new("killall").arg("-9").arg(name).status() {
        Ok(status) if status.success() => info!(name, "killed stale processes"),
        Ok(_) => debug!(name, "no stale processes"),
        Err(e) => debug!(name, error = %e, "kill-by-name unavailable"),
    }
}

fn spawn_node(ctx: &RunContext, index: usize) -> Result<NodeProcess, String> {
    let log_file = ctx.log_dir.join(format!("{index}.log"));
    let file = File::create(&log_file).map_err(|e| format!("create {}: {e}", log_file.display()))?;
    let stderr = file
        .try_clone()
        .map_err(|e| format!("clone log handle: {e}"))?;

    let child = Command::new(&ctx.binary)
        .arg(index.to_string())
        .arg(&ctx.topology_file)
        .arg(ctx.protocol_param.to_string())
        .stdin(Stdio::null())
        .stdout(Stdio::from(file))
        .stderr(Stdio::from(stderr))
        .spawn()
        .map_err(|e| format!("spawn {}: {e}", ctx.binary.display()))?;

    Ok(NodeProcess {
        index,
        log_file,
        child,
    })
}

/// Spawn the fleet without blocking on node startup. Every index is
/// attempted even when an earlier one fails.
pub fn spawn_fleet(ctx: &RunContext, nodes: usize) -> Vec<SpawnOutcome> {
    (0..nodes)
        .map(|index| match spawn_node(ctx, index) {
            Ok(proc) => SpawnOutcome::Started(proc),
            Err(reason) => {
                warn!(index, %reason, "node spawn failed");
                SpawnOutcome::Failed { index, reason }
            }
        })
        .collect()
}

/// Kill and reap every held handle, then sweep by name to catch processes
/// that forked or escaped their handle.
pub fn teardown(binary: &Path, fleet: Vec<SpawnOutcome>) {
    for outcome in fleet {
        if let SpawnOutcome::Started(mut proc) = outcome {
            if let Err(e) = proc.child.kill() {
                debug!(index = proc.index, error = %e, "kill failed (already exited?)");
            }
            let _ = proc.child.wait();
        }
    }
    if let Some(name) = binary.file_name().and_then(|n| n.to_str()) {
        kill_by_name(name);
    }
}

/// Execute the full lifecycle: preemptive kill, spawn, timed run, teardown.
pub fn run_fleet(ctx: &RunContext, nodes: usize) -> FleetSummary {
    if let Some(name) = ctx.binary.file_name().and_then(|n| n.to_str()) {
        kill_by_name(name);
    }

    info!(nodes, "starting node fleet");
    let fleet = spawn_fleet(ctx, nodes);

    let failed: Vec<(usize, String)> = fleet
        .iter()
        .filter_map(|o| match o {
            SpawnOutcome::Failed { index, reason } => Some((*index, reason.clone())),
            SpawnOutcome::Started(_) => None,
        })
        .collect();
    let started = nodes - failed.len();

    info!(secs = ctx.duration.as_secs(), "fleet running");
    std::thread::sleep(ctx.duration);

    info!("shutting down node fleet");
    teardown(&ctx.binary, fleet);

    FleetSummary { started, failed }
}
