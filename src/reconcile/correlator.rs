// Tue Jan 13 2026 - Alex

use crate::model::{Disk, Snapshot, Volume};
use log::debug;
use std::collections::HashSet;

/// Entities of one pass that are connected to each other.
#[derive(Debug, Clone, Default)]
pub struct Correlation {
    pub volumes: Vec<Volume>,
    pub disks: Vec<Disk>,
    pub snapshots: Vec<Snapshot>,
}

/// Matches cluster volumes to disks and disks to snapshots by identity.
///
/// Volumes reference disks by name, snapshots reference disks by self link.
/// Matching is exact string equality in both cases. All methods keep the
/// input order of the collection being filtered.
#[derive(Debug, Clone, Copy, Default)]
pub struct Correlator;

impl Correlator {
    pub fn new() -> Self {
        Self
    }

    pub fn correlate(&self, volumes: &[Volume], disks: &[Disk], snapshots: &[Snapshot]) -> Correlation {
        let volumes = self.disk_backed_volumes(volumes);
        let disks = self.disks_in_use(&volumes, disks);
        let snapshots = self.snapshots_of(snapshots, &disks);

        Correlation {
            volumes,
            disks,
            snapshots,
        }
    }

    pub fn disk_backed_volumes(&self, volumes: &[Volume]) -> Vec<Volume> {
        volumes
            .iter()
            .filter(|v| {
                if !v.is_disk_backed() {
                    debug!("Skipping volume {} without a persistent disk", v.id);
                }
                v.is_disk_backed()
            })
            .cloned()
            .collect()
    }

    pub fn disks_in_use(&self, volumes: &[Volume], disks: &[Disk]) -> Vec<Disk> {
        let names: HashSet<&str> = volumes.iter().filter_map(|v| v.disk_name.as_deref()).collect();

        disks
            .iter()
            .filter(|d| names.contains(d.name.as_str()))
            .cloned()
            .collect()
    }

    pub fn snapshots_of(&self, snapshots: &[Snapshot], disks: &[Disk]) -> Vec<Snapshot> {
        let links: HashSet<&str> = disks.iter().map(|d| d.self_link.as_str()).collect();

        snapshots
            .iter()
            .filter(|s| links.contains(s.source_disk.as_str()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn disk(name: &str, link: &str) -> Disk {
        Disk::new(name, "z", "p", link)
    }

    fn snapshot(name: &str, source: &str) -> Snapshot {
        Snapshot::new(name, source, Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap())
    }

    #[test]
    fn test_only_disks_backing_volumes() {
        let volumes = vec![Volume::backed_by("pvc1", "disk-a")];
        let disks = vec![disk("disk-a", "L1"), disk("disk-b", "L2")];

        let correlated = Correlator::new().disks_in_use(&volumes, &disks);
        assert_eq!(correlated, vec![disk("disk-a", "L1")]);
    }

    #[test]
    fn test_volumes_without_disk_are_excluded() {
        let volumes = vec![
            Volume::new("nfs-volume"),
            Volume::backed_by("pvc1", "disk-a"),
        ];
        let kept = Correlator::new().disk_backed_volumes(&volumes);
        assert_eq!(kept, vec![Volume::backed_by("pvc1", "disk-a")]);
    }

    #[test]
    fn test_disk_named_by_several_volumes_appears_once() {
        let volumes = vec![
            Volume::backed_by("pvc1", "disk-a"),
            Volume::backed_by("pvc2", "disk-a"),
        ];
        let disks = vec![disk("disk-a", "L1")];
        assert_eq!(Correlator::new().disks_in_use(&volumes, &disks).len(), 1);
    }

    #[test]
    fn test_snapshot_matching_is_exact() {
        let disks = vec![disk("disk-a", "projects/p/zones/z/disks/disk-a")];
        let snapshots = vec![
            snapshot("s1", "projects/p/zones/z/disks/disk-a"),
            snapshot("s2", "projects/p/zones/z/disks/disk-a-2"),
            snapshot("s3", "projects/p/zones/z/disks/disk-"),
            snapshot("s4", "projects/p/zones/z/disks/disk-a/"),
            snapshot("s5", ""),
        ];

        let correlated = Correlator::new().snapshots_of(&snapshots, &disks);
        let names: Vec<&str> = correlated.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["s1"]);
    }

    #[test]
    fn test_correlate_completeness() {
        let volumes = vec![
            Volume::backed_by("pvc1", "disk-a"),
            Volume::backed_by("pvc2", "disk-c"),
            Volume::backed_by("pvc3", "missing"),
            Volume::new("local"),
        ];
        let disks = vec![disk("disk-a", "L1"), disk("disk-b", "L2"), disk("disk-c", "L3")];
        let snapshots = vec![snapshot("s1", "L1"), snapshot("s2", "L2"), snapshot("s3", "L3")];

        let correlation = Correlator::new().correlate(&volumes, &disks, &snapshots);

        assert_eq!(correlation.volumes.len(), 3);
        for d in &disks {
            let expected = volumes.iter().any(|v| v.disk_name.as_deref() == Some(d.name.as_str()));
            assert_eq!(correlation.disks.contains(d), expected, "disk {}", d.name);
        }
        let names: Vec<&str> = correlation.snapshots.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["s1", "s3"]);
    }
}
