// Tue Jan 13 2026 - Alex

use super::auth::TokenSource;
use super::error::{decode, ClientError, ClientResult};
use super::traits::DiskService;
use crate::model::{
    resource_name, Disk, Labels, OperationErrorDetail, OperationScope, OperationStatus,
    RemoteOperation, Snapshot,
};
use chrono::{DateTime, Utc};
use log::debug;
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub const COMPUTE_API_URL: &str = "https://compute.googleapis.com/compute/v1";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListPage<T> {
    items: Option<Vec<T>>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DiskResource {
    name: String,
    zone: String,
    self_link: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotResource {
    name: String,
    #[serde(default)]
    source_disk: String,
    creation_timestamp: String,
    #[serde(default)]
    labels: Labels,
    #[serde(default)]
    label_fingerprint: String,
    #[serde(default)]
    status: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OperationResource {
    name: String,
    status: String,
    zone: Option<String>,
    error: Option<OperationErrors>,
}

#[derive(Debug, Deserialize)]
struct OperationErrors {
    #[serde(default)]
    errors: Vec<OperationErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct OperationErrorEntry {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

#[derive(Serialize)]
struct CreateSnapshotRequest<'a> {
    name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SetLabelsRequest<'a> {
    label_fingerprint: &'a str,
    labels: &'a Labels,
}

impl DiskResource {
    fn into_disk(self, project: &str) -> Disk {
        let zone = resource_name(&self.zone).to_string();
        Disk::new(self.name, zone, project, self.self_link)
    }
}

impl SnapshotResource {
    fn into_snapshot(self) -> ClientResult<Snapshot> {
        let created_at = DateTime::parse_from_rfc3339(&self.creation_timestamp)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| {
                ClientError::InvalidResponse(format!(
                    "snapshot {} has unparsable creationTimestamp {:?}: {}",
                    self.name, self.creation_timestamp, e
                ))
            })?;

        let mut snapshot = Snapshot::new(self.name, self.source_disk, created_at)
            .with_labels(self.labels)
            .with_fingerprint(self.label_fingerprint);
        snapshot.status = self.status;
        Ok(snapshot)
    }
}

impl From<OperationResource> for RemoteOperation {
    fn from(op: OperationResource) -> Self {
        let scope = match op.zone.as_deref() {
            Some(zone) if !zone.is_empty() => OperationScope::Zone(resource_name(zone).to_string()),
            _ => OperationScope::Global,
        };

        let mut operation = RemoteOperation::new(op.name, scope, OperationStatus::parse(&op.status));
        if let Some(error) = op.error {
            operation.errors = error
                .errors
                .into_iter()
                .map(|e| OperationErrorDetail {
                    code: e.code,
                    message: e.message,
                })
                .collect();
        }
        operation
    }
}

/// Blocking client for the Compute Engine v1 REST API.
pub struct GceClient {
    http: Client,
    tokens: TokenSource,
    base_url: String,
}

impl GceClient {
    pub fn new(http: Client, tokens: TokenSource) -> Self {
        Self {
            http,
            tokens,
            base_url: COMPUTE_API_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn project_url(&self, project: &str) -> String {
        format!("{}/projects/{}", self.base_url, project)
    }

    fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let token = self.tokens.token()?;
        let response = request.bearer_auth(token).send()?;
        decode(response)
    }

    fn list_all<T: DeserializeOwned>(&self, url: &str) -> ClientResult<Vec<T>> {
        let mut items = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self.http.get(url);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let page: ListPage<T> = self.send(request)?;
            items.extend(page.items.unwrap_or_default());

            match page.next_page_token {
                Some(token) if !token.is_empty() => {
                    debug!("Following next page of {}", url);
                    page_token = Some(token);
                }
                _ => break,
            }
        }

        Ok(items)
    }
}

impl DiskService for GceClient {
    fn list_disks(&self, project: &str, zone: &str) -> ClientResult<Vec<Disk>> {
        let url = format!("{}/zones/{}/disks", self.project_url(project), zone);
        let disks: Vec<DiskResource> = self.list_all(&url)?;
        Ok(disks.into_iter().map(|d| d.into_disk(project)).collect())
    }

    fn list_snapshots(&self, project: &str) -> ClientResult<Vec<Snapshot>> {
        let url = format!("{}/global/snapshots", self.project_url(project));
        let snapshots: Vec<SnapshotResource> = self.list_all(&url)?;
        snapshots.into_iter().map(SnapshotResource::into_snapshot).collect()
    }

    fn create_snapshot(
        &self,
        project: &str,
        zone: &str,
        disk_name: &str,
        snapshot_name: &str,
    ) -> ClientResult<RemoteOperation> {
        let url = format!(
            "{}/zones/{}/disks/{}/createSnapshot",
            self.project_url(project),
            zone,
            disk_name
        );
        let body = CreateSnapshotRequest { name: snapshot_name };
        let op: OperationResource = self.send(self.http.post(&url).json(&body))?;
        Ok(op.into())
    }

    fn get_zone_operation(
        &self,
        project: &str,
        zone: &str,
        operation: &str,
    ) -> ClientResult<RemoteOperation> {
        let url = format!(
            "{}/zones/{}/operations/{}",
            self.project_url(project),
            zone,
            operation
        );
        let op: OperationResource = self.send(self.http.get(&url))?;
        Ok(op.into())
    }

    fn get_global_operation(&self, project: &str, operation: &str) -> ClientResult<RemoteOperation> {
        let url = format!("{}/global/operations/{}", self.project_url(project), operation);
        let op: OperationResource = self.send(self.http.get(&url))?;
        Ok(op.into())
    }

    fn get_snapshot(&self, project: &str, name: &str) -> ClientResult<Snapshot> {
        let url = format!("{}/global/snapshots/{}", self.project_url(project), name);
        let snapshot: SnapshotResource = self.send(self.http.get(&url))?;
        snapshot.into_snapshot()
    }

    fn set_snapshot_labels(
        &self,
        project: &str,
        name: &str,
        fingerprint: &str,
        labels: &Labels,
    ) -> ClientResult<RemoteOperation> {
        let url = format!(
            "{}/global/snapshots/{}/setLabels",
            self.project_url(project),
            name
        );
        let body = SetLabelsRequest {
            label_fingerprint: fingerprint,
            labels,
        };
        let op: OperationResource = self.send(self.http.post(&url).json(&body))?;
        Ok(op.into())
    }

    fn delete_snapshot(&self, project: &str, name: &str) -> ClientResult<RemoteOperation> {
        let url = format!("{}/global/snapshots/{}", self.project_url(project), name);
        let op: OperationResource = self.send(self.http.delete(&url))?;
        Ok(op.into())
    }
}
