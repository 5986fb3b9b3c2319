// Tue Jan 13 2026 - Alex

use super::correlator::{Correlation, Correlator};
use super::error::{ReconcileError, ReconcileResult};
use super::executor::OperationExecutor;
use super::planner::SnapshotPlanner;
use super::poller::PollTrigger;
use super::report::PassSummary;
use super::retention::RetentionEvaluator;
use crate::cloud::{DiskService, VolumeSource};
use crate::config::Config;
use log::info;
use std::time::Instant;

/// Runs list, correlate, plan and execute passes against the two APIs.
///
/// Nothing is carried between passes. A pass stops at the first error and
/// hands it back to the caller, which decides whether the process lives on.
pub struct ReconciliationLoop<'a> {
    config: &'a Config,
    volumes: &'a dyn VolumeSource,
    compute: &'a dyn DiskService,
    trigger: &'a dyn PollTrigger,
    correlator: Correlator,
    retention: RetentionEvaluator,
}

impl<'a> ReconciliationLoop<'a> {
    pub fn new(
        config: &'a Config,
        volumes: &'a dyn VolumeSource,
        compute: &'a dyn DiskService,
        trigger: &'a dyn PollTrigger,
    ) -> Self {
        Self {
            config,
            volumes,
            compute,
            trigger,
            correlator: Correlator::new(),
            retention: RetentionEvaluator::new(config.retain),
        }
    }

    pub fn run_pass(&self) -> ReconcileResult<PassSummary> {
        let start = Instant::now();
        let config = self.config;

        let volumes = self
            .volumes
            .list_volumes()
            .map_err(ReconcileError::list("persistent volumes"))?;
        let disks = self
            .compute
            .list_disks(&config.project, &config.zone)
            .map_err(ReconcileError::list("disks"))?;
        let snapshots = self
            .compute
            .list_snapshots(&config.project)
            .map_err(ReconcileError::list("snapshots"))?;

        let Correlation {
            volumes,
            disks,
            snapshots,
        } = self.correlator.correlate(&volumes, &disks, &snapshots);

        info!("Found the following Kubernetes Persistent Volumes:");
        for volume in &volumes {
            info!("  {}", volume.disk_name.as_deref().unwrap_or_default());
        }

        info!("Found the following Google Cloud Engine Persistent Disks:");
        for disk in &disks {
            info!("  {}", disk.name);
        }

        info!("Found the following Google Cloud Engine Snapshots:");
        for snapshot in &snapshots {
            info!("  {} (for: {})", snapshot.name, snapshot.source_disk_name());
        }

        let creations = SnapshotPlanner::new(config).plan(&disks, &volumes);

        info!("Going to create the following snapshots:");
        for plan in &creations {
            info!("  {} -> {}", plan.source_disk_name, plan.snapshot_name);
        }

        let deletions = self.retention.expired(&snapshots);

        info!("Going to delete the following expired snapshots:");
        for snapshot in &deletions {
            info!("  {}", snapshot.name);
        }

        let executor = OperationExecutor::new(config, self.compute, self.trigger);
        let created = executor.create_all(&creations)?;
        let deleted = executor.delete_all(&deletions)?;

        Ok(PassSummary {
            volumes: volumes.len(),
            disks: disks.len(),
            snapshots: snapshots.len(),
            planned_creations: creations.len(),
            planned_deletions: deletions.len(),
            created,
            deleted,
            elapsed: start.elapsed(),
        })
    }

    /// Repeats passes until one fails. With `once` set, returns the summary
    /// of the single pass.
    pub fn run(&self) -> ReconcileResult<PassSummary> {
        self.config.validate().map_err(ReconcileError::Config)?;

        loop {
            let summary = self.run_pass()?;
            info!("{}", summary.headline());
            info!("{}", summary.summary());

            if self.config.once {
                info!("Supposed to run once. Exiting...");
                return Ok(summary);
            }

            info!(
                "Sleeping for {}...",
                humantime::format_duration(self.config.interval)
            );
            self.trigger.wait(self.config.interval);
        }
    }
}
