// Tue Jan 13 2026 - Alex

use super::labels::{has_heritage, Labels};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub name: String,
    /// Self link of the disk this snapshot was taken from.
    pub source_disk: String,
    pub created_at: DateTime<Utc>,
    pub labels: Labels,
    pub label_fingerprint: String,
    pub status: String,
}

impl Snapshot {
    pub fn new(
        name: impl Into<String>,
        source_disk: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            source_disk: source_disk.into(),
            created_at,
            labels: Labels::new(),
            label_fingerprint: String::new(),
            status: "READY".to_string(),
        }
    }

    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_fingerprint(mut self, fingerprint: impl Into<String>) -> Self {
        self.label_fingerprint = fingerprint.into();
        self
    }

    pub fn is_managed(&self) -> bool {
        has_heritage(&self.labels)
    }

    pub fn source_disk_name(&self) -> &str {
        super::resource_name(&self.source_disk)
    }
}

/// A snapshot the controller intends to create during the current pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotConfiguration {
    pub project: String,
    pub zone: String,
    pub source_disk_name: String,
    pub snapshot_name: String,
    pub labels: Labels,
}
