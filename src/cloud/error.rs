// Tue Jan 13 2026 - Alex

use reqwest::blocking::Response;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Authentication failed: {0}")]
    Auth(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        ClientError::Api {
            status,
            message: message.into(),
        }
    }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

// Google APIs wrap the message in `error`, Kubernetes returns a bare Status.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Google { error: ErrorMessage },
    Kubernetes { message: String },
}

#[derive(Debug, Deserialize)]
struct ErrorMessage {
    message: String,
}

pub(crate) fn api_error(status: u16, body: &str) -> ClientError {
    let message = match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody::Google { error }) => error.message,
        Ok(ErrorBody::Kubernetes { message }) => message,
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.trim().to_string(),
    };
    ClientError::api(status, message)
}

pub(crate) fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json()?);
    }
    let body = response.text().unwrap_or_default();
    Err(api_error(status.as_u16(), &body))
}
