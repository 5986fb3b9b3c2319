// Tue Jan 13 2026 - Alex

pub mod auth;
pub mod error;
pub mod fake;
pub mod gce;
pub mod kube;
#[cfg(test)]
mod stub;
pub mod traits;

pub use auth::TokenSource;
pub use error::{ClientError, ClientResult};
pub use fake::{FakeCluster, FakeCompute};
pub use gce::GceClient;
pub use kube::KubeClient;
pub use traits::{DiskService, VolumeSource};
