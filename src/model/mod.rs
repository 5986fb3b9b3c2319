// Tue Jan 13 2026 - Alex

pub mod disk;
pub mod labels;
pub mod operation;
pub mod snapshot;
pub mod volume;

pub use disk::Disk;
pub use labels::{Labels, HERITAGE_LABEL_KEY, HERITAGE_LABEL_VALUE, VOLUME_LABEL_KEY};
pub use operation::{OperationErrorDetail, OperationScope, OperationStatus, RemoteOperation};
pub use snapshot::{Snapshot, SnapshotConfiguration};
pub use volume::Volume;

/// Returns the trailing path segment of a resource link, which is how the
/// compute API names the referenced resource.
pub fn resource_name(link: &str) -> &str {
    let trimmed = link.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_name() {
        assert_eq!(
            resource_name("https://www.googleapis.com/compute/v1/projects/p/zones/z/disks/disk-a"),
            "disk-a"
        );
        assert_eq!(resource_name("disk-b"), "disk-b");
        assert_eq!(resource_name("projects/p/zones/europe-west1-b/"), "europe-west1-b");
    }
}
