// Tue Jan 13 2026 - Alex

use std::collections::BTreeMap;

pub type Labels = BTreeMap<String, String>;

/// Marks a snapshot as created and owned by this controller.
pub const HERITAGE_LABEL_KEY: &str = "heritage";
pub const HERITAGE_LABEL_VALUE: &str = "snapshot-controller";

/// Records which cluster volume a snapshot was taken for.
pub const VOLUME_LABEL_KEY: &str = "persistentvolume";

pub fn heritage_labels() -> Labels {
    let mut labels = Labels::new();
    labels.insert(HERITAGE_LABEL_KEY.to_string(), HERITAGE_LABEL_VALUE.to_string());
    labels
}

pub fn has_heritage(labels: &Labels) -> bool {
    labels.get(HERITAGE_LABEL_KEY).map(String::as_str) == Some(HERITAGE_LABEL_VALUE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heritage_detection() {
        assert!(has_heritage(&heritage_labels()));
        assert!(!has_heritage(&Labels::new()));

        let mut foreign = Labels::new();
        foreign.insert(HERITAGE_LABEL_KEY.to_string(), "someone-else".to_string());
        assert!(!has_heritage(&foreign));
    }
}
