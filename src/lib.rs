// Tue Jan 13 2026 - Alex

pub mod cloud;
pub mod config;
pub mod model;
pub mod reconcile;
pub mod utils;

pub use cloud::{ClientError, DiskService, GceClient, KubeClient, TokenSource, VolumeSource};
pub use config::{AccessMode, Config};
pub use model::{Disk, RemoteOperation, Snapshot, SnapshotConfiguration, Volume};
pub use reconcile::{
    Correlator, OperationExecutor, PassSummary, ReconcileError, ReconciliationLoop,
    RetentionEvaluator, SnapshotPlanner, ThreadSleeper,
};
