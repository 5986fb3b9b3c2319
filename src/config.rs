// Tue Jan 13 2026 - Alex

use std::time::Duration;

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60 * 60);
pub const DEFAULT_RETAIN: usize = 48;
pub const DEFAULT_POLL_DELAY: Duration = Duration::from_secs(2);

/// How the controller reaches the Kubernetes API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    /// Service account credentials mounted into the pod.
    InCluster,
    /// An unauthenticated `kubectl proxy` on localhost.
    Proxy,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub project: String,
    pub zone: String,
    pub interval: Duration,
    pub retain: usize,
    pub access_mode: AccessMode,
    pub once: bool,
    pub dry_run: bool,
    pub debug: bool,
    pub poll_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project: String::new(),
            zone: String::new(),
            interval: DEFAULT_INTERVAL,
            retain: DEFAULT_RETAIN,
            access_mode: AccessMode::Proxy,
            once: false,
            dry_run: false,
            debug: false,
            poll_delay: DEFAULT_POLL_DELAY,
        }
    }
}

impl Config {
    pub fn new(project: impl Into<String>, zone: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            zone: zone.into(),
            ..Self::default()
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_retain(mut self, retain: usize) -> Self {
        self.retain = retain;
        self
    }

    pub fn with_access_mode(mut self, access_mode: AccessMode) -> Self {
        self.access_mode = access_mode;
        self
    }

    pub fn with_once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_poll_delay(mut self, poll_delay: Duration) -> Self {
        self.poll_delay = poll_delay;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.project.trim().is_empty() {
            return Err("project must be set".to_string());
        }
        if self.zone.trim().is_empty() {
            return Err("zone must be set".to_string());
        }
        if !self.once && self.interval.is_zero() {
            return Err("interval must be greater than 0 unless running once".to_string());
        }
        Ok(())
    }
}
