// Tue Jan 13 2026 - Alex

use crate::cloud::ClientError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("Failed to list {resource}: {source}")]
    List {
        resource: &'static str,
        #[source]
        source: ClientError,
    },
    #[error("Failed to {action} {target}: {source}")]
    Submit {
        action: &'static str,
        target: String,
        #[source]
        source: ClientError,
    },
    #[error("Failed to poll operation {operation}: {source}")]
    Poll {
        operation: String,
        #[source]
        source: ClientError,
    },
    #[error("Operation {operation} finished with errors: {message}")]
    OperationFailed { operation: String, message: String },
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ReconcileError {
    pub fn list(resource: &'static str) -> impl FnOnce(ClientError) -> Self {
        move |source| ReconcileError::List { resource, source }
    }

    pub fn submit(action: &'static str, target: &str) -> impl FnOnce(ClientError) -> Self {
        let target = target.to_string();
        move |source| ReconcileError::Submit {
            action,
            target,
            source,
        }
    }
}

pub type ReconcileResult<T> = std::result::Result<T, ReconcileError>;
