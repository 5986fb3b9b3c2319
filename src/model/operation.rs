// Tue Jan 13 2026 - Alex

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationStatus {
    Pending,
    Running,
    Done,
    Unknown(String),
}

impl OperationStatus {
    pub fn parse(s: &str) -> Self {
        match s {
            "PENDING" => OperationStatus::Pending,
            "RUNNING" => OperationStatus::Running,
            "DONE" => OperationStatus::Done,
            other => OperationStatus::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            OperationStatus::Pending => "PENDING",
            OperationStatus::Running => "RUNNING",
            OperationStatus::Done => "DONE",
            OperationStatus::Unknown(s) => s,
        }
    }

    pub fn is_done(&self) -> bool {
        *self == OperationStatus::Done
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an operation lives, which decides the endpoint used to poll it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationScope {
    Zone(String),
    Global,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationErrorDetail {
    pub code: String,
    pub message: String,
}

impl fmt::Display for OperationErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// Handle of an asynchronous request accepted by the compute API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteOperation {
    pub name: String,
    pub scope: OperationScope,
    pub status: OperationStatus,
    pub errors: Vec<OperationErrorDetail>,
}

impl RemoteOperation {
    pub fn new(name: impl Into<String>, scope: OperationScope, status: OperationStatus) -> Self {
        Self {
            name: name.into(),
            scope,
            status,
            errors: Vec::new(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_done()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}
