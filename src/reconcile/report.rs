// Tue Jan 13 2026 - Alex

use crate::utils::{format_duration, pluralize};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub volumes: usize,
    pub disks: usize,
    pub snapshots: usize,
    pub planned_creations: usize,
    pub planned_deletions: usize,
    pub created: usize,
    pub deleted: usize,
    pub elapsed: Duration,
}

impl PassSummary {
    pub fn summary(&self) -> String {
        format!(
            "Volumes: {}, Disks: {}, Snapshots: {}, Created: {}/{}, Deleted: {}/{}, took {}",
            self.volumes,
            self.disks,
            self.snapshots,
            self.created,
            self.planned_creations,
            self.deleted,
            self.planned_deletions,
            format_duration(self.elapsed)
        )
    }

    pub fn headline(&self) -> String {
        format!(
            "Pass complete: {} created, {} deleted",
            pluralize(self.created, "snapshot", "snapshots"),
            pluralize(self.deleted, "snapshot", "snapshots")
        )
    }
}
