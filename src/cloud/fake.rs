// Thu Jan 15 2026 - Alex

use super::error::{ClientError, ClientResult};
use super::traits::{DiskService, VolumeSource};
use crate::model::{
    Disk, Labels, OperationErrorDetail, OperationScope, OperationStatus, RemoteOperation, Snapshot,
    Volume,
};
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;

// 2026-01-01T00:00:00Z
const FAKE_EPOCH_SECS: i64 = 1_767_225_600;

/// A call received by [`FakeCompute`], in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListDisks { project: String, zone: String },
    ListSnapshots { project: String },
    CreateSnapshot { project: String, zone: String, disk: String, name: String },
    GetZoneOperation { project: String, zone: String, operation: String },
    GetGlobalOperation { project: String, operation: String },
    GetSnapshot { project: String, name: String },
    SetSnapshotLabels { project: String, name: String, fingerprint: String, labels: Labels },
    DeleteSnapshot { project: String, name: String },
}

impl Call {
    pub fn method(&self) -> &'static str {
        match self {
            Call::ListDisks { .. } => "list_disks",
            Call::ListSnapshots { .. } => "list_snapshots",
            Call::CreateSnapshot { .. } => "create_snapshot",
            Call::GetZoneOperation { .. } => "get_zone_operation",
            Call::GetGlobalOperation { .. } => "get_global_operation",
            Call::GetSnapshot { .. } => "get_snapshot",
            Call::SetSnapshotLabels { .. } => "set_snapshot_labels",
            Call::DeleteSnapshot { .. } => "delete_snapshot",
        }
    }

    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Call::CreateSnapshot { .. } | Call::SetSnapshotLabels { .. } | Call::DeleteSnapshot { .. }
        )
    }
}

#[derive(Debug, Clone)]
struct Failure {
    method: &'static str,
    remaining_successes: usize,
    message: String,
}

impl Failure {
    fn trip(&mut self, method: &str) -> Option<ClientError> {
        if self.method != method {
            return None;
        }
        if self.remaining_successes > 0 {
            self.remaining_successes -= 1;
            return None;
        }
        Some(ClientError::api(500, self.message.clone()))
    }
}

struct PendingOperation {
    scope: OperationScope,
    remaining_polls: u32,
    errors: Vec<OperationErrorDetail>,
}

struct ComputeState {
    disks: Vec<Disk>,
    snapshots: Vec<Snapshot>,
    operations: HashMap<String, PendingOperation>,
    calls: Vec<Call>,
    failures: Vec<Failure>,
    operation_errors: HashMap<String, OperationErrorDetail>,
    polls_until_done: u32,
    next_id: u64,
    now: DateTime<Utc>,
}

/// In-memory compute API.
///
/// Operations complete after `polls_until_done` polls, snapshots get a new
/// fingerprint on every label change and creation times advance by one
/// minute per created snapshot.
pub struct FakeCompute {
    state: Mutex<ComputeState>,
}

impl FakeCompute {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ComputeState {
                disks: Vec::new(),
                snapshots: Vec::new(),
                operations: HashMap::new(),
                calls: Vec::new(),
                failures: Vec::new(),
                operation_errors: HashMap::new(),
                polls_until_done: 0,
                next_id: 1,
                now: DateTime::from_timestamp(FAKE_EPOCH_SECS, 0).unwrap_or_default(),
            }),
        }
    }

    pub fn with_disks(self, disks: Vec<Disk>) -> Self {
        self.state.lock().disks = disks;
        self
    }

    pub fn with_snapshots(self, snapshots: Vec<Snapshot>) -> Self {
        self.state.lock().snapshots = snapshots;
        self
    }

    pub fn with_polls_until_done(self, polls: u32) -> Self {
        self.state.lock().polls_until_done = polls;
        self
    }

    /// Makes the call to `method` fail after `successes` successful calls.
    pub fn fail_on(self, method: &'static str, successes: usize, message: &str) -> Self {
        self.state.lock().failures.push(Failure {
            method,
            remaining_successes: successes,
            message: message.to_string(),
        });
        self
    }

    /// Operations submitted by `method` finish `DONE` but carry this error.
    pub fn fail_operation(self, method: &'static str, code: &str, message: &str) -> Self {
        self.state.lock().operation_errors.insert(
            method.to_string(),
            OperationErrorDetail {
                code: code.to_string(),
                message: message.to_string(),
            },
        );
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().calls.clone()
    }

    pub fn mutating_calls(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutating).collect()
    }

    pub fn snapshots(&self) -> Vec<Snapshot> {
        self.state.lock().snapshots.clone()
    }

    pub fn snapshot_names(&self) -> Vec<String> {
        self.state.lock().snapshots.iter().map(|s| s.name.clone()).collect()
    }
}

impl Default for FakeCompute {
    fn default() -> Self {
        Self::new()
    }
}

impl ComputeState {
    fn record(&mut self, call: Call) -> ClientResult<()> {
        let method = call.method();
        self.calls.push(call);
        for failure in &mut self.failures {
            if let Some(err) = failure.trip(method) {
                return Err(err);
            }
        }
        Ok(())
    }

    fn submit(&mut self, method: &str, scope: OperationScope) -> RemoteOperation {
        let name = format!("operation-{}", self.next_id);
        self.next_id += 1;

        let errors: Vec<OperationErrorDetail> =
            self.operation_errors.get(method).cloned().into_iter().collect();

        let status = if self.polls_until_done == 0 {
            OperationStatus::Done
        } else {
            OperationStatus::Pending
        };

        self.operations.insert(
            name.clone(),
            PendingOperation {
                scope: scope.clone(),
                remaining_polls: self.polls_until_done,
                errors: errors.clone(),
            },
        );

        let mut op = RemoteOperation::new(name, scope, status);
        if op.is_terminal() {
            op.errors = errors;
        }
        op
    }

    fn poll(&mut self, name: &str, scope: OperationScope) -> ClientResult<RemoteOperation> {
        let pending = self
            .operations
            .get_mut(name)
            .filter(|op| op.scope == scope)
            .ok_or_else(|| ClientError::api(404, format!("operation {} not found", name)))?;

        pending.remaining_polls = pending.remaining_polls.saturating_sub(1);

        let mut op = RemoteOperation::new(name, scope, OperationStatus::Running);
        if pending.remaining_polls == 0 {
            op.status = OperationStatus::Done;
            op.errors = pending.errors.clone();
        }
        Ok(op)
    }

    fn snapshot_index(&self, name: &str) -> ClientResult<usize> {
        self.snapshots
            .iter()
            .position(|s| s.name == name)
            .ok_or_else(|| ClientError::api(404, format!("snapshot {} not found", name)))
    }
}

impl DiskService for FakeCompute {
    fn list_disks(&self, project: &str, zone: &str) -> ClientResult<Vec<Disk>> {
        let mut state = self.state.lock();
        state.record(Call::ListDisks {
            project: project.to_string(),
            zone: zone.to_string(),
        })?;
        Ok(state
            .disks
            .iter()
            .filter(|d| d.project == project && d.zone == zone)
            .cloned()
            .collect())
    }

    fn list_snapshots(&self, project: &str) -> ClientResult<Vec<Snapshot>> {
        let mut state = self.state.lock();
        state.record(Call::ListSnapshots {
            project: project.to_string(),
        })?;
        Ok(state.snapshots.clone())
    }

    fn create_snapshot(
        &self,
        project: &str,
        zone: &str,
        disk_name: &str,
        snapshot_name: &str,
    ) -> ClientResult<RemoteOperation> {
        let mut state = self.state.lock();
        state.record(Call::CreateSnapshot {
            project: project.to_string(),
            zone: zone.to_string(),
            disk: disk_name.to_string(),
            name: snapshot_name.to_string(),
        })?;

        if state.snapshots.iter().any(|s| s.name == snapshot_name) {
            return Err(ClientError::api(
                409,
                format!("snapshot {} already exists", snapshot_name),
            ));
        }

        let source = state
            .disks
            .iter()
            .find(|d| d.name == disk_name && d.zone == zone)
            .map(|d| d.self_link.clone())
            .ok_or_else(|| ClientError::api(404, format!("disk {} not found", disk_name)))?;

        state.now = state.now + Duration::minutes(1);
        let fingerprint = format!("fp-{}", state.next_id);
        let snapshot = Snapshot::new(snapshot_name, source, state.now).with_fingerprint(fingerprint);
        state.snapshots.push(snapshot);

        Ok(state.submit("create_snapshot", OperationScope::Zone(zone.to_string())))
    }

    fn get_zone_operation(
        &self,
        project: &str,
        zone: &str,
        operation: &str,
    ) -> ClientResult<RemoteOperation> {
        let mut state = self.state.lock();
        state.record(Call::GetZoneOperation {
            project: project.to_string(),
            zone: zone.to_string(),
            operation: operation.to_string(),
        })?;
        state.poll(operation, OperationScope::Zone(zone.to_string()))
    }

    fn get_global_operation(&self, project: &str, operation: &str) -> ClientResult<RemoteOperation> {
        let mut state = self.state.lock();
        state.record(Call::GetGlobalOperation {
            project: project.to_string(),
            operation: operation.to_string(),
        })?;
        state.poll(operation, OperationScope::Global)
    }

    fn get_snapshot(&self, project: &str, name: &str) -> ClientResult<Snapshot> {
        let mut state = self.state.lock();
        state.record(Call::GetSnapshot {
            project: project.to_string(),
            name: name.to_string(),
        })?;
        let index = state.snapshot_index(name)?;
        Ok(state.snapshots[index].clone())
    }

    fn set_snapshot_labels(
        &self,
        project: &str,
        name: &str,
        fingerprint: &str,
        labels: &Labels,
    ) -> ClientResult<RemoteOperation> {
        let mut state = self.state.lock();
        state.record(Call::SetSnapshotLabels {
            project: project.to_string(),
            name: name.to_string(),
            fingerprint: fingerprint.to_string(),
            labels: labels.clone(),
        })?;

        let index = state.snapshot_index(name)?;
        if state.snapshots[index].label_fingerprint != fingerprint {
            return Err(ClientError::api(412, "label fingerprint does not match"));
        }

        let next_fingerprint = format!("fp-{}", state.next_id);
        let snapshot = &mut state.snapshots[index];
        snapshot.labels = labels.clone();
        snapshot.label_fingerprint = next_fingerprint;

        Ok(state.submit("set_snapshot_labels", OperationScope::Global))
    }

    fn delete_snapshot(&self, project: &str, name: &str) -> ClientResult<RemoteOperation> {
        let mut state = self.state.lock();
        state.record(Call::DeleteSnapshot {
            project: project.to_string(),
            name: name.to_string(),
        })?;

        let index = state.snapshot_index(name)?;
        state.snapshots.remove(index);

        Ok(state.submit("delete_snapshot", OperationScope::Global))
    }
}

/// In-memory cluster volume listing.
pub struct FakeCluster {
    volumes: Vec<Volume>,
    failure: Mutex<Option<Failure>>,
    list_count: Mutex<usize>,
}

impl FakeCluster {
    pub fn new(volumes: Vec<Volume>) -> Self {
        Self {
            volumes,
            failure: Mutex::new(None),
            list_count: Mutex::new(0),
        }
    }

    /// Makes listing fail after `successes` successful calls.
    pub fn fail_after(self, successes: usize, message: &str) -> Self {
        *self.failure.lock() = Some(Failure {
            method: "list_volumes",
            remaining_successes: successes,
            message: message.to_string(),
        });
        self
    }

    pub fn list_count(&self) -> usize {
        *self.list_count.lock()
    }
}

impl VolumeSource for FakeCluster {
    fn list_volumes(&self) -> ClientResult<Vec<Volume>> {
        *self.list_count.lock() += 1;
        if let Some(failure) = self.failure.lock().as_mut() {
            if let Some(err) = failure.trip("list_volumes") {
                return Err(err);
            }
        }
        Ok(self.volumes.clone())
    }
}
