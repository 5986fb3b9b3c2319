// Tue Jan 13 2026 - Alex

use super::error::{decode, ClientError, ClientResult};
use super::traits::VolumeSource;
use crate::config::AccessMode;
use crate::model::{resource_name, Volume};
use reqwest::blocking::Client;
use reqwest::Certificate;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

pub const PROXY_URL: &str = "http://127.0.0.1:8001";
pub const SERVICE_ACCOUNT_DIR: &str = "/var/run/secrets/kubernetes.io/serviceaccount";

const GCE_PD_CSI_DRIVER: &str = "pd.csi.storage.gke.io";

#[derive(Debug, Deserialize)]
struct PersistentVolumeList {
    #[serde(default)]
    items: Vec<PersistentVolume>,
}

#[derive(Debug, Deserialize)]
struct PersistentVolume {
    metadata: ObjectMeta,
    #[serde(default)]
    spec: PersistentVolumeSpec,
}

#[derive(Debug, Deserialize)]
struct ObjectMeta {
    name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistentVolumeSpec {
    gce_persistent_disk: Option<GcePersistentDiskSource>,
    csi: Option<CsiSource>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GcePersistentDiskSource {
    pd_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CsiSource {
    driver: String,
    volume_handle: String,
}

impl From<PersistentVolume> for Volume {
    fn from(pv: PersistentVolume) -> Self {
        let disk_name = match (pv.spec.gce_persistent_disk, pv.spec.csi) {
            (Some(gce), _) => Some(gce.pd_name),
            // projects/<project>/zones/<zone>/disks/<name>
            (None, Some(csi)) if csi.driver == GCE_PD_CSI_DRIVER => {
                Some(resource_name(&csi.volume_handle).to_string())
            }
            _ => None,
        };

        Volume {
            id: pv.metadata.name,
            disk_name,
        }
    }
}

/// Blocking client for the PersistentVolume listing of the Kubernetes API.
pub struct KubeClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl KubeClient {
    pub fn new(http: Client, base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn from_access_mode(mode: AccessMode) -> ClientResult<Self> {
        match mode {
            AccessMode::InCluster => Self::in_cluster(),
            AccessMode::Proxy => Self::proxy(),
        }
    }

    /// Talks to a local `kubectl proxy`, which handles authentication.
    pub fn proxy() -> ClientResult<Self> {
        Ok(Self::new(Client::builder().build()?, PROXY_URL, None))
    }

    /// Uses the service account mounted into the running pod.
    pub fn in_cluster() -> ClientResult<Self> {
        let host = env::var("KUBERNETES_SERVICE_HOST").map_err(|_| {
            ClientError::Auth("KUBERNETES_SERVICE_HOST is not set, not running in a cluster".to_string())
        })?;
        let port = env::var("KUBERNETES_SERVICE_PORT").unwrap_or_else(|_| "443".to_string());

        let dir = Path::new(SERVICE_ACCOUNT_DIR);
        let token = fs::read_to_string(dir.join("token"))?;
        let ca = fs::read(dir.join("ca.crt"))?;

        let http = Client::builder()
            .add_root_certificate(Certificate::from_pem(&ca)?)
            .build()?;

        Ok(Self::new(
            http,
            api_server_url(&host, &port),
            Some(token.trim().to_string()),
        ))
    }
}

fn api_server_url(host: &str, port: &str) -> String {
    if host.contains(':') {
        format!("https://[{}]:{}", host, port)
    } else {
        format!("https://{}:{}", host, port)
    }
}

impl VolumeSource for KubeClient {
    fn list_volumes(&self) -> ClientResult<Vec<Volume>> {
        let url = format!("{}/api/v1/persistentvolumes", self.base_url);
        let mut request = self.http.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let list: PersistentVolumeList = decode(request.send()?)?;
        Ok(list.items.into_iter().map(Volume::from).collect())
    }
}
