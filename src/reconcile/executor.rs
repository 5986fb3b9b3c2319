// Tue Jan 13 2026 - Alex

use super::error::{ReconcileError, ReconcileResult};
use super::poller::{OperationPoller, PollTrigger};
use crate::cloud::DiskService;
use crate::config::Config;
use crate::model::{Snapshot, SnapshotConfiguration};
use log::{debug, info};

/// Applies planned creations and deletions to the compute API, one at a
/// time. The first failure stops the batch; work already done stays done.
pub struct OperationExecutor<'a> {
    service: &'a dyn DiskService,
    poller: OperationPoller<'a>,
    project: &'a str,
    dry_run: bool,
}

impl<'a> OperationExecutor<'a> {
    pub fn new(config: &'a Config, service: &'a dyn DiskService, trigger: &'a dyn PollTrigger) -> Self {
        Self {
            service,
            poller: OperationPoller::new(service, trigger, &config.project, config.poll_delay),
            project: &config.project,
            dry_run: config.dry_run,
        }
    }

    /// Returns how many snapshots were actually created.
    pub fn create_all(&self, plans: &[SnapshotConfiguration]) -> ReconcileResult<usize> {
        for plan in plans {
            self.create(plan)?;
        }
        Ok(if self.dry_run { 0 } else { plans.len() })
    }

    pub fn create(&self, plan: &SnapshotConfiguration) -> ReconcileResult<()> {
        if self.dry_run {
            info!(
                "Dry run enabled. Skipping creation of snapshot {} for disk {}",
                plan.snapshot_name, plan.source_disk_name
            );
            return Ok(());
        }

        info!("Creating snapshot {} of disk {}", plan.snapshot_name, plan.source_disk_name);

        let operation = self
            .service
            .create_snapshot(&plan.project, &plan.zone, &plan.source_disk_name, &plan.snapshot_name)
            .map_err(ReconcileError::submit("create snapshot", &plan.snapshot_name))?;
        self.poller.await_completion(operation)?;

        // setLabels needs the fingerprint of the snapshot as it exists now.
        let created = self
            .service
            .get_snapshot(&plan.project, &plan.snapshot_name)
            .map_err(ReconcileError::submit("read snapshot", &plan.snapshot_name))?;

        debug!(
            "Labelling snapshot {} (fingerprint {})",
            plan.snapshot_name, created.label_fingerprint
        );

        let operation = self
            .service
            .set_snapshot_labels(
                &plan.project,
                &plan.snapshot_name,
                &created.label_fingerprint,
                &plan.labels,
            )
            .map_err(ReconcileError::submit("label snapshot", &plan.snapshot_name))?;
        self.poller.await_completion(operation)?;

        Ok(())
    }

    /// Returns how many snapshots were actually deleted.
    pub fn delete_all(&self, snapshots: &[Snapshot]) -> ReconcileResult<usize> {
        for snapshot in snapshots {
            self.delete(snapshot)?;
        }
        Ok(if self.dry_run { 0 } else { snapshots.len() })
    }

    pub fn delete(&self, snapshot: &Snapshot) -> ReconcileResult<()> {
        if self.dry_run {
            info!("Dry run enabled. Skipping deletion of snapshot {}", snapshot.name);
            return Ok(());
        }

        info!("Deleting snapshot {}", snapshot.name);

        let operation = self
            .service
            .delete_snapshot(self.project, &snapshot.name)
            .map_err(ReconcileError::submit("delete snapshot", &snapshot.name))?;
        self.poller.await_completion(operation)?;

        Ok(())
    }
}
