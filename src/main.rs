// Tue Jan 13 2026 - Alex

use anyhow::Context;
use clap::Parser;
use disk_snapshot_controller::{
    cloud::{GceClient, KubeClient, TokenSource},
    config::{AccessMode, Config, DEFAULT_RETAIN},
    reconcile::{ReconcileError, ReconciliationLoop, ThreadSleeper},
    utils::LoggingUtils,
};
use log::{error, info};
use std::process;
use std::time::Duration;

const HTTP_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Parser, Debug)]
#[command(name = "disk-snapshot-controller")]
#[command(author = "Alex")]
#[command(version)]
#[command(about = "Snapshots the GCE disks behind Kubernetes persistent volumes", long_about = None)]
struct Args {
    /// The ID of the GCP project.
    #[arg(long)]
    project: String,

    /// The name of the zone the disks live in.
    #[arg(long)]
    zone: String,

    /// Interval between snapshot passes.
    #[arg(long, default_value = "1h", value_parser = humantime::parse_duration)]
    interval: Duration,

    /// The maximum number of snapshots to retain per disk.
    #[arg(long, default_value_t = DEFAULT_RETAIN)]
    retain: usize,

    /// Find the Kubernetes cluster from the environment instead of a local proxy.
    #[arg(long)]
    in_cluster: bool,

    /// Run once and exit.
    #[arg(long)]
    once: bool,

    /// Log what would change without creating or deleting snapshots.
    #[arg(long)]
    dry_run: bool,

    /// Enable debug logging.
    #[arg(long)]
    debug: bool,
}

impl Args {
    fn into_config(self) -> Config {
        let access_mode = if self.in_cluster {
            AccessMode::InCluster
        } else {
            AccessMode::Proxy
        };

        Config::new(self.project, self.zone)
            .with_interval(self.interval)
            .with_retain(self.retain)
            .with_access_mode(access_mode)
            .with_once(self.once)
            .with_dry_run(self.dry_run)
            .with_debug(self.debug)
    }
}

fn main() {
    let config = Args::parse().into_config();

    LoggingUtils::init(config.debug);

    if let Err(e) = run(&config) {
        error!("{:#}", e);
        process::exit(1);
    }
}

fn run(config: &Config) -> anyhow::Result<()> {
    config.validate().map_err(ReconcileError::Config)?;

    let kube = KubeClient::from_access_mode(config.access_mode)
        .context("Failed to create Kubernetes client")?;

    let http = reqwest::blocking::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .context("Failed to create HTTP client")?;
    let gce = GceClient::new(http.clone(), TokenSource::from_environment(http));

    info!(
        "Managing snapshots for project {} in zone {} (retain {}, dry run: {})",
        config.project, config.zone, config.retain, config.dry_run
    );

    ReconciliationLoop::new(config, &kube, &gce, &ThreadSleeper).run()?;

    Ok(())
}
