// Tue Jan 13 2026 - Alex

use crate::config::Config;
use crate::model::labels::heritage_labels;
use crate::model::{Disk, Labels, SnapshotConfiguration, Volume, VOLUME_LABEL_KEY};
use rand::Rng;
use std::collections::HashMap;

pub const MAX_SNAPSHOT_NAME_LENGTH: usize = 63;
pub const RANDOM_SUFFIX_LENGTH: usize = 4;
pub const NAME_SEPARATOR: char = '-';

const SUFFIX_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Decides the name and labels of the snapshot to take for each disk.
pub struct SnapshotPlanner<'a> {
    config: &'a Config,
}

impl<'a> SnapshotPlanner<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    pub fn plan(&self, disks: &[Disk], volumes: &[Volume]) -> Vec<SnapshotConfiguration> {
        self.plan_with_rng(disks, volumes, &mut rand::thread_rng())
    }

    pub fn plan_with_rng<R: Rng + ?Sized>(
        &self,
        disks: &[Disk],
        volumes: &[Volume],
        rng: &mut R,
    ) -> Vec<SnapshotConfiguration> {
        // Later volumes win when several name the same disk.
        let by_disk: HashMap<&str, &Volume> = volumes
            .iter()
            .filter_map(|v| v.disk_name.as_deref().map(|name| (name, v)))
            .collect();

        disks
            .iter()
            .map(|disk| SnapshotConfiguration {
                project: self.config.project.clone(),
                zone: self.config.zone.clone(),
                source_disk_name: disk.name.clone(),
                snapshot_name: snapshot_name(&disk.name, &mut *rng),
                labels: snapshot_labels(by_disk.get(disk.name.as_str()).copied()),
            })
            .collect()
    }
}

/// Disk name, cut so the result fits the platform limit, followed by a
/// random suffix.
pub fn snapshot_name<R: Rng + ?Sized>(disk_name: &str, rng: &mut R) -> String {
    let mut cutoff = disk_name.len().min(MAX_SNAPSHOT_NAME_LENGTH - RANDOM_SUFFIX_LENGTH - 1);
    while !disk_name.is_char_boundary(cutoff) {
        cutoff -= 1;
    }
    let mut name = disk_name[..cutoff].to_string();
    name.push(NAME_SEPARATOR);
    name.push_str(&random_suffix(rng, RANDOM_SUFFIX_LENGTH));
    name
}

pub fn snapshot_labels(volume: Option<&Volume>) -> Labels {
    let mut labels = heritage_labels();
    if let Some(volume) = volume {
        labels.insert(VOLUME_LABEL_KEY.to_string(), volume.id.clone());
    }
    labels
}

fn random_suffix<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| SUFFIX_ALPHABET[rng.gen_range(0..SUFFIX_ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HERITAGE_LABEL_KEY, HERITAGE_LABEL_VALUE};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn disk(name: &str) -> Disk {
        Disk::new(name, "z", "p", Disk::link_for("p", "z", name))
    }

    fn is_suffix_char(c: char) -> bool {
        c.is_ascii_lowercase() || c.is_ascii_digit()
    }

    #[test]
    fn test_short_name_is_kept() {
        let mut rng = StdRng::seed_from_u64(7);
        let name = snapshot_name("disk-a", &mut rng);

        assert_eq!(name.len(), "disk-a".len() + 1 + RANDOM_SUFFIX_LENGTH);
        assert!(name.starts_with("disk-a-"));
        assert!(name[7..].chars().all(is_suffix_char));
    }

    #[test]
    fn test_long_name_is_truncated() {
        let mut rng = StdRng::seed_from_u64(7);
        let disk_name = "d".repeat(62);
        let name = snapshot_name(&disk_name, &mut rng);

        assert!(name.len() <= MAX_SNAPSHOT_NAME_LENGTH);
        assert_eq!(name.len(), 63);
        assert_eq!(&name[..58], &disk_name[..58]);
        assert_eq!(name.chars().nth(58), Some('-'));
        assert!(name[59..].chars().all(is_suffix_char));
        assert_eq!(name[59..].len(), 4);
    }

    #[test]
    fn test_name_length_bound() {
        let mut rng = StdRng::seed_from_u64(99);
        for len in 0..120 {
            let disk_name = "x".repeat(len);
            let name = snapshot_name(&disk_name, &mut rng);
            assert!(name.len() <= MAX_SNAPSHOT_NAME_LENGTH, "length {} produced {}", len, name);
        }
    }

    #[test]
    fn test_multibyte_name_stays_within_bytes() {
        let mut rng = StdRng::seed_from_u64(5);
        let disk_name = "\u{e9}".repeat(40);
        let name = snapshot_name(&disk_name, &mut rng);

        assert!(name.len() <= MAX_SNAPSHOT_NAME_LENGTH);
        assert!(name.starts_with(&"\u{e9}".repeat(29)));
        assert_eq!(name.chars().nth(29), Some('-'));
    }

    #[test]
    fn test_suffix_is_random() {
        let mut rng = StdRng::seed_from_u64(1);
        let names: std::collections::HashSet<String> =
            (0..50).map(|_| snapshot_name("disk-a", &mut rng)).collect();
        assert!(names.len() > 40);
    }

    #[test]
    fn test_plan_labels() {
        let config = Config::new("proj", "europe-west1-b");
        let planner = SnapshotPlanner::new(&config);
        let volumes = vec![Volume::backed_by("pvc-1", "disk-a")];
        let disks = vec![disk("disk-a"), disk("disk-b")];

        let plans = planner.plan_with_rng(&disks, &volumes, &mut StdRng::seed_from_u64(3));

        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].project, "proj");
        assert_eq!(plans[0].zone, "europe-west1-b");
        assert_eq!(plans[0].source_disk_name, "disk-a");
        assert_eq!(
            plans[0].labels.get(HERITAGE_LABEL_KEY).map(String::as_str),
            Some(HERITAGE_LABEL_VALUE)
        );
        assert_eq!(plans[0].labels.get(VOLUME_LABEL_KEY).map(String::as_str), Some("pvc-1"));

        assert_eq!(plans[1].source_disk_name, "disk-b");
        assert_eq!(plans[1].labels.len(), 1);
        assert!(plans[1].labels.contains_key(HERITAGE_LABEL_KEY));
    }

    #[test]
    fn test_last_volume_wins() {
        let volumes = vec![
            Volume::backed_by("pvc-old", "disk-a"),
            Volume::backed_by("pvc-new", "disk-a"),
        ];
        let config = Config::new("p", "z");
        let plans = SnapshotPlanner::new(&config).plan(&[disk("disk-a")], &volumes);
        assert_eq!(plans[0].labels.get(VOLUME_LABEL_KEY).map(String::as_str), Some("pvc-new"));
    }
}
