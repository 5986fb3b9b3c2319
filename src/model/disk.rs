// Tue Jan 13 2026 - Alex

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disk {
    pub name: String,
    pub zone: String,
    pub project: String,
    pub self_link: String,
}

impl Disk {
    pub fn new(
        name: impl Into<String>,
        zone: impl Into<String>,
        project: impl Into<String>,
        self_link: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            zone: zone.into(),
            project: project.into(),
            self_link: self_link.into(),
        }
    }

    pub fn link_for(project: &str, zone: &str, name: &str) -> String {
        format!(
            "https://www.googleapis.com/compute/v1/projects/{}/zones/{}/disks/{}",
            project, zone, name
        )
    }
}
