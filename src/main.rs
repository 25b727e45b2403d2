use beacon_harness::{beacon, logdir, orchestrator, report, topology, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "beacon-harness")]
#[command(about = "Throughput test harness for beacon-emitting node fleets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full run: build topology, clean logs, run the fleet, report throughput.
    Run {
        /// Number of node processes to launch.
        nodes: usize,

        /// How long the fleet runs, in seconds.
        duration_secs: u64,

        /// Node binary to launch; its file name is also the kill-by-name key.
        #[arg(long, default_value = "target/release/app")]
        binary: PathBuf,

        #[arg(long, default_value = "logs")]
        log_dir: PathBuf,

        /// Where the generated topology is written.
        #[arg(long, default_value = "local_ips.txt")]
        topology_file: PathBuf,

        /// Host addresses, one per line. Omit for a local-only run.
        #[arg(long)]
        hosts_file: Option<PathBuf>,

        #[arg(long, default_value_t = 9000)]
        base_port: u16,

        /// Fixed third argument handed to every node.
        #[arg(long, default_value_t = 2)]
        protocol_param: u32,

        /// Also write the report as JSON to this path.
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Analyze an existing log directory without running anything.
    Analyze {
        #[arg(long, default_value = "logs")]
        log_dir: PathBuf,

        #[arg(long)]
        json: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Run {
            nodes,
            duration_secs,
            binary,
            log_dir,
            topology_file,
            hosts_file,
            base_port,
            protocol_param,
            json,
        } => {
            // 1) Topology.
            let topo = match hosts_file {
                Some(path) => {
                    let hosts = topology::read_hosts_file(&path)?;
                    topology::Topology::from_hosts(nodes, base_port, &hosts)?
                }
                None => topology::Topology::local(nodes, base_port),
            };
            topo.write(&topology_file)?;
            info!(nodes, topology = %topology_file.display(), "topology written");

            // 2) Clean slate for logs.
            logdir::prepare(&log_dir)?;

            // 3) Timed fleet run.
            let ctx = orchestrator::RunContext {
                binary,
                topology_file,
                log_dir: log_dir.clone(),
                duration: Duration::from_secs(duration_secs),
                protocol_param,
            };
            let summary = orchestrator::run_fleet(&ctx, nodes);
            for (index, reason) in &summary.failed {
                warn!(index = *index, reason = %reason, "node never started");
            }
            info!(started = summary.started, failed = summary.failed.len(), "run complete");

            // 4) + 5) Analyze and report.
            report_on(&log_dir, json.as_deref())?;
        }

        Commands::Analyze { log_dir, json } => {
            report_on(&log_dir, json.as_deref())?;
        }
    }

    Ok(())
}

fn report_on(log_dir: &Path, json: Option<&Path>) -> Result<()> {
    let stats = beacon::analyze_dir(log_dir)?;
    let report = report::Report::from_stats(&stats)?;
    println!("{report}");
    if let Some(path) = json {
        std::fs::write(path, serde_json::to_string_pretty(&report)?)?;
        info!(path = %path.display(), "wrote JSON report");
    }
    Ok(())
}
