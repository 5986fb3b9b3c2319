// Tue Jan 13 2026 - Alex

/// A cluster volume as seen by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Volume {
    pub id: String,
    /// Name of the backing persistent disk. `None` for volumes backed by
    /// any other storage type.
    pub disk_name: Option<String>,
}

impl Volume {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            disk_name: None,
        }
    }

    pub fn backed_by(id: impl Into<String>, disk_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            disk_name: Some(disk_name.into()),
        }
    }

    pub fn is_disk_backed(&self) -> bool {
        self.disk_name.is_some()
    }
}
