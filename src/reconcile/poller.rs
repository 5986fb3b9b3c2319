// Tue Jan 13 2026 - Alex

use super::error::{ReconcileError, ReconcileResult};
use crate::cloud::DiskService;
use crate::model::{OperationScope, RemoteOperation};
use log::debug;
use parking_lot::Mutex;
use std::thread;
use std::time::Duration;

/// Blocks between two polls of a pending operation, and between passes.
pub trait PollTrigger: Send + Sync {
    fn wait(&self, delay: Duration);
}

pub struct ThreadSleeper;

impl PollTrigger for ThreadSleeper {
    fn wait(&self, delay: Duration) {
        thread::sleep(delay);
    }
}

/// Returns immediately and remembers every requested delay.
#[derive(Default)]
pub struct RecordingTrigger {
    waits: Mutex<Vec<Duration>>,
}

impl RecordingTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn waits(&self) -> Vec<Duration> {
        self.waits.lock().clone()
    }

    pub fn wait_count(&self) -> usize {
        self.waits.lock().len()
    }
}

impl PollTrigger for RecordingTrigger {
    fn wait(&self, delay: Duration) {
        self.waits.lock().push(delay);
    }
}

/// Lifecycle of a submitted operation.
///
/// ```text
/// Submitted -> Polling -> Done
///     |           |
///     +-----------+-----> Error
/// ```
#[derive(Debug)]
pub enum OperationState {
    Submitted(RemoteOperation),
    Polling { operation: RemoteOperation, polls: u32 },
    Done(RemoteOperation),
    Error(ReconcileError),
}

impl OperationState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, OperationState::Done(_) | OperationState::Error(_))
    }

    fn settle(operation: RemoteOperation, polls: u32) -> Self {
        if !operation.is_terminal() {
            return OperationState::Polling { operation, polls };
        }
        if operation.has_errors() {
            return OperationState::Error(ReconcileError::OperationFailed {
                message: operation.error_summary(),
                operation: operation.name,
            });
        }
        OperationState::Done(operation)
    }
}

/// Drives operations to completion at a fixed delay, with no timeout.
pub struct OperationPoller<'a> {
    service: &'a dyn DiskService,
    trigger: &'a dyn PollTrigger,
    project: &'a str,
    delay: Duration,
}

impl<'a> OperationPoller<'a> {
    pub fn new(
        service: &'a dyn DiskService,
        trigger: &'a dyn PollTrigger,
        project: &'a str,
        delay: Duration,
    ) -> Self {
        Self {
            service,
            trigger,
            project,
            delay,
        }
    }

    pub fn step(&self, state: OperationState) -> OperationState {
        match state {
            OperationState::Submitted(operation) => OperationState::settle(operation, 0),
            OperationState::Polling { operation, polls } => {
                self.trigger.wait(self.delay);
                match self.fetch(&operation) {
                    Ok(current) => {
                        debug!("Operation {} is {}", current.name, current.status);
                        OperationState::settle(current, polls + 1)
                    }
                    Err(source) => OperationState::Error(ReconcileError::Poll {
                        operation: operation.name,
                        source,
                    }),
                }
            }
            terminal => terminal,
        }
    }

    pub fn await_completion(&self, operation: RemoteOperation) -> ReconcileResult<RemoteOperation> {
        let mut state = OperationState::Submitted(operation);
        loop {
            state = match self.step(state) {
                OperationState::Done(operation) => return Ok(operation),
                OperationState::Error(err) => return Err(err),
                next => next,
            };
        }
    }

    fn fetch(&self, operation: &RemoteOperation) -> crate::cloud::ClientResult<RemoteOperation> {
        match &operation.scope {
            OperationScope::Zone(zone) => {
                self.service
                    .get_zone_operation(self.project, zone, &operation.name)
            }
            OperationScope::Global => self.service.get_global_operation(self.project, &operation.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::fake::{Call, FakeCompute};
    use crate::model::{Disk, OperationStatus};

    const DELAY: Duration = Duration::from_secs(2);

    fn compute(polls: u32) -> FakeCompute {
        FakeCompute::new()
            .with_disks(vec![Disk::new("disk-a", "z", "p", "L1")])
            .with_polls_until_done(polls)
    }

    #[test]
    fn test_done_operation_does_not_wait() {
        let compute = compute(0);
        let trigger = RecordingTrigger::new();
        let poller = OperationPoller::new(&compute, &trigger, "p", DELAY);

        let op = compute.create_snapshot("p", "z", "disk-a", "snap").unwrap();
        let done = poller.await_completion(op).unwrap();

        assert_eq!(done.status, OperationStatus::Done);
        assert_eq!(trigger.wait_count(), 0);
        assert_eq!(compute.calls().len(), 1);
    }

    #[test]
    fn test_waits_once_per_poll() {
        let compute = compute(3);
        let trigger = RecordingTrigger::new();
        let poller = OperationPoller::new(&compute, &trigger, "p", DELAY);

        let op = compute.create_snapshot("p", "z", "disk-a", "snap").unwrap();
        poller.await_completion(op).unwrap();

        assert_eq!(trigger.waits(), vec![DELAY; 3]);
        let polls: Vec<Call> = compute
            .calls()
            .into_iter()
            .filter(|c| c.method() == "get_zone_operation")
            .collect();
        assert_eq!(polls.len(), 3);
    }

    #[test]
    fn test_state_transitions() {
        let compute = compute(2);
        let trigger = RecordingTrigger::new();
        let poller = OperationPoller::new(&compute, &trigger, "p", DELAY);

        let op = compute.create_snapshot("p", "z", "disk-a", "snap").unwrap();
        let state = poller.step(OperationState::Submitted(op));
        assert!(matches!(state, OperationState::Polling { polls: 0, .. }));

        let state = poller.step(state);
        assert!(matches!(state, OperationState::Polling { polls: 1, .. }));
        assert!(!state.is_terminal());

        let state = poller.step(state);
        assert!(matches!(state, OperationState::Done(_)));
        assert!(state.is_terminal());

        let state = poller.step(state);
        assert!(matches!(state, OperationState::Done(_)));
        assert_eq!(trigger.wait_count(), 2);
    }

    #[test]
    fn test_global_operations_use_global_endpoint() {
        let compute = compute(1);
        compute.create_snapshot("p", "z", "disk-a", "snap").unwrap();
        let trigger = RecordingTrigger::new();
        let poller = OperationPoller::new(&compute, &trigger, "p", DELAY);

        let op = compute.delete_snapshot("p", "snap").unwrap();
        poller.await_completion(op).unwrap();

        let last = compute.calls().pop().unwrap();
        assert_eq!(last.method(), "get_global_operation");
    }

    #[test]
    fn test_poll_error_aborts() {
        let compute = compute(5).fail_on("get_zone_operation", 1, "backend unavailable");
        let trigger = RecordingTrigger::new();
        let poller = OperationPoller::new(&compute, &trigger, "p", DELAY);

        let op = compute.create_snapshot("p", "z", "disk-a", "snap").unwrap();
        let err = poller.await_completion(op).unwrap_err();

        assert!(matches!(err, ReconcileError::Poll { .. }));
        assert_eq!(trigger.wait_count(), 2);
    }

    #[test]
    fn test_done_with_errors_fails() {
        let compute = compute(1).fail_operation("create_snapshot", "QUOTA_EXCEEDED", "no quota");
        let trigger = RecordingTrigger::new();
        let poller = OperationPoller::new(&compute, &trigger, "p", DELAY);

        let op = compute.create_snapshot("p", "z", "disk-a", "snap").unwrap();
        let err = poller.await_completion(op).unwrap_err();

        match err {
            ReconcileError::OperationFailed { message, .. } => {
                assert_eq!(message, "QUOTA_EXCEEDED: no quota")
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
