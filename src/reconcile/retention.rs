// Tue Jan 13 2026 - Alex

use crate::model::{resource_name, Snapshot};
use indexmap::IndexMap;
use log::{debug, log_enabled, Level};

/// Selects managed snapshots that exceed the per-disk retention count.
#[derive(Debug, Clone, Copy)]
pub struct RetentionEvaluator {
    retain: usize,
}

impl RetentionEvaluator {
    pub fn new(retain: usize) -> Self {
        Self { retain }
    }

    pub fn retain(&self) -> usize {
        self.retain
    }

    /// Managed snapshots grouped by source disk, newest first. Groups appear
    /// in the order their first snapshot was listed; equal timestamps keep
    /// list order.
    pub fn group<'s>(&self, snapshots: &'s [Snapshot]) -> IndexMap<&'s str, Vec<&'s Snapshot>> {
        let mut groups: IndexMap<&str, Vec<&Snapshot>> = IndexMap::new();

        for snapshot in snapshots {
            if !snapshot.is_managed() {
                debug!("Ignoring snapshot {} without heritage label", snapshot.name);
                continue;
            }
            groups
                .entry(snapshot.source_disk.as_str())
                .or_default()
                .push(snapshot);
        }

        for group in groups.values_mut() {
            group.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        }

        groups
    }

    pub fn expired(&self, snapshots: &[Snapshot]) -> Vec<Snapshot> {
        let groups = self.group(snapshots);

        if log_enabled!(Level::Debug) {
            debug!("Snapshots grouped by source disk and ordered by creation time:");
            for (source, group) in &groups {
                debug!("{}", resource_name(source));
                for snapshot in group {
                    debug!("  {} ({})", snapshot.name, snapshot.created_at.to_rfc3339());
                }
            }
        }

        groups
            .values()
            .flat_map(|group| group.iter().skip(self.retain))
            .map(|snapshot| (*snapshot).clone())
            .collect()
    }
}
