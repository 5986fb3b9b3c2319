// Tue Jan 13 2026 - Alex

use super::error::ClientResult;
use crate::model::{Disk, Labels, RemoteOperation, Snapshot, Volume};

/// Lists the volumes currently known to the cluster.
pub trait VolumeSource: Send + Sync {
    fn list_volumes(&self) -> ClientResult<Vec<Volume>>;
}

/// The subset of the compute API the controller talks to.
///
/// Mutating calls return the accepted [`RemoteOperation`]; callers poll it
/// with [`DiskService::get_zone_operation`] or
/// [`DiskService::get_global_operation`] depending on its scope.
pub trait DiskService: Send + Sync {
    fn list_disks(&self, project: &str, zone: &str) -> ClientResult<Vec<Disk>>;

    fn list_snapshots(&self, project: &str) -> ClientResult<Vec<Snapshot>>;

    fn create_snapshot(
        &self,
        project: &str,
        zone: &str,
        disk_name: &str,
        snapshot_name: &str,
    ) -> ClientResult<RemoteOperation>;

    fn get_zone_operation(
        &self,
        project: &str,
        zone: &str,
        operation: &str,
    ) -> ClientResult<RemoteOperation>;

    fn get_global_operation(&self, project: &str, operation: &str) -> ClientResult<RemoteOperation>;

    fn get_snapshot(&self, project: &str, name: &str) -> ClientResult<Snapshot>;

    fn set_snapshot_labels(
        &self,
        project: &str,
        name: &str,
        fingerprint: &str,
        labels: &Labels,
    ) -> ClientResult<RemoteOperation>;

    fn delete_snapshot(&self, project: &str, name: &str) -> ClientResult<RemoteOperation>;
}
