// Tue Jan 13 2026 - Alex

pub mod coordinator;
pub mod correlator;
pub mod error;
pub mod executor;
pub mod planner;
pub mod poller;
pub mod report;
pub mod retention;

pub use coordinator::ReconciliationLoop;
pub use correlator::{Correlation, Correlator};
pub use error::{ReconcileError, ReconcileResult};
pub use executor::OperationExecutor;
pub use planner::SnapshotPlanner;
pub use poller::{OperationPoller, OperationState, PollTrigger, RecordingTrigger, ThreadSleeper};
pub use report::PassSummary;
pub use retention::RetentionEvaluator;
