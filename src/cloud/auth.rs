// Tue Jan 13 2026 - Alex

use super::error::{ClientError, ClientResult};
use log::debug;
use parking_lot::Mutex;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::env;
use std::time::{Duration, Instant};

pub const ACCESS_TOKEN_ENV: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";
pub const METADATA_TOKEN_URL: &str =
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token";

const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct MetadataToken {
    access_token: String,
    expires_in: u64,
}

struct CachedToken {
    value: String,
    expires_at: Instant,
}

/// Supplies OAuth access tokens for the compute API.
///
/// A token exported through `GOOGLE_OAUTH_ACCESS_TOKEN` is used verbatim.
/// Otherwise tokens come from the instance metadata server and are reused
/// until shortly before they expire.
pub struct TokenSource {
    client: Client,
    metadata_url: String,
    fixed: Option<String>,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenSource {
    pub fn from_environment(client: Client) -> Self {
        let fixed = env::var(ACCESS_TOKEN_ENV)
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Self {
            client,
            metadata_url: METADATA_TOKEN_URL.to_string(),
            fixed,
            cached: Mutex::new(None),
        }
    }

    pub fn fixed(client: Client, token: impl Into<String>) -> Self {
        Self {
            client,
            metadata_url: METADATA_TOKEN_URL.to_string(),
            fixed: Some(token.into()),
            cached: Mutex::new(None),
        }
    }

    pub fn with_metadata_url(mut self, url: impl Into<String>) -> Self {
        self.metadata_url = url.into();
        self
    }

    pub fn token(&self) -> ClientResult<String> {
        if let Some(token) = &self.fixed {
            return Ok(token.clone());
        }

        let mut cached = self.cached.lock();
        if let Some(token) = cached.as_ref() {
            if token.expires_at > Instant::now() {
                return Ok(token.value.clone());
            }
        }

        debug!("Fetching access token from {}", self.metadata_url);

        let response = self
            .client
            .get(&self.metadata_url)
            .header("Metadata-Flavor", "Google")
            .send()
            .map_err(|e| ClientError::Auth(format!("metadata server unreachable: {}", e)))?;

        if !response.status().is_success() {
            return Err(ClientError::Auth(format!(
                "metadata server returned {}",
                response.status()
            )));
        }

        let token: MetadataToken = response
            .json()
            .map_err(|e| ClientError::Auth(format!("malformed token response: {}", e)))?;

        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(EXPIRY_MARGIN);
        *cached = Some(CachedToken {
            value: token.access_token.clone(),
            expires_at: Instant::now() + lifetime,
        });

        Ok(token.access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_token() {
        let source = TokenSource::fixed(Client::new(), "ya29.test");
        assert_eq!(source.token().unwrap(), "ya29.test");
    }

    #[test]
    fn test_unreachable_metadata_server() {
        let source = TokenSource {
            client: Client::new(),
            metadata_url: String::new(),
            fixed: None,
            cached: Mutex::new(None),
        }
        .with_metadata_url("http://127.0.0.1:1/token");

        assert!(matches!(source.token(), Err(ClientError::Auth(_))));
    }
}
