// ABOUTME: Custom error types for the Chevereto SDK with user-friendly messages
// ABOUTME: Separates transport failures from faults that callers must handle themselves

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout: Upload took too long to complete")]
    Timeout,

    #[error("HTTP error: server responded with status {status}")]
    HttpStatus { status: u16 },

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Invalid upload request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl UploadError {
    pub fn help_text(&self) -> Option<&'static str> {
        match self {
            UploadError::Network(_) => Some("Check your internet connection and try again"),
            UploadError::Timeout => Some("The mirror may be overloaded; try another endpoint"),
            UploadError::HttpStatus { status } if *status == 401 || *status == 403 => {
                Some("The API key was rejected by the server")
            }
            UploadError::InvalidEndpoint(_) => {
                Some("Upload URLs look like https://example.com/api/1/upload")
            }
            UploadError::Configuration(_) => Some(
                "Set upload_url and api_key in ~/.config/chevereto/config.toml or use CHEVERETO_UPLOAD_URL and CHEVERETO_API_KEY",
            ),
            _ => None,
        }
    }

    /// True when the failure happened on the wire. These are reported through
    /// a failed `UploadResult` instead of an `Err`.
    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self,
            UploadError::Network(_) | UploadError::Timeout | UploadError::HttpStatus { .. }
        )
    }
}

impl From<reqwest::Error> for UploadError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UploadError::Timeout
        } else if let Some(status) = err.status() {
            UploadError::HttpStatus {
                status: status.as_u16(),
            }
        } else if err.is_builder() {
            UploadError::InvalidRequest(err.to_string())
        } else {
            UploadError::Network(err.to_string())
        }
    }
}

impl From<url::ParseError> for UploadError {
    fn from(err: url::ParseError) -> Self {
        UploadError::InvalidEndpoint(err.to_string())
    }
}
