// ABOUTME: Chevereto SDK library providing an upload client for Chevereto-compatible hosts
// ABOUTME: Includes the protocol adapter, mirror registry and the mirror diagnostic runner

pub mod builder;
pub mod constants;
pub mod diagnostics;
pub mod endpoint;
pub mod error;
pub mod registry;
pub mod response;
pub mod transport;

#[cfg(test)]
mod test_helpers;

use secrecy::ExposeSecret;
use std::sync::Arc;

pub use builder::CheveretoClientConfig;
pub use diagnostics::{
    DiagnosticReport, DiagnosticRunner, FileNameGenerator, ProbeOutcome, RandomFileName,
};
pub use endpoint::Endpoint;
pub use error::UploadError;
pub use registry::EndpointRegistry;
pub use response::{ServiceImage, ServiceResponse, ServiceThumb, UploadResult};
pub use transport::{HttpTransport, MultipartRequest, TransportResponse, UploadTransport};

pub use reqwest::Proxy;

pub type Result<T> = std::result::Result<T, UploadError>;

/// Uploads images to a single Chevereto endpoint.
///
/// The endpoint and the direct-URL preference are fixed at construction; the
/// client keeps no other state between calls.
#[derive(Clone)]
pub struct CheveretoClient {
    transport: Arc<dyn UploadTransport>,
    endpoint: Endpoint,
    direct_url: bool,
}

impl CheveretoClient {
    /// Client with the default HTTP transport, returning viewer page URLs.
    pub fn new(endpoint: Endpoint) -> Result<Self> {
        let transport = HttpTransport::with_defaults()?;
        Ok(Self::with_transport(Arc::new(transport), endpoint, false))
    }

    pub fn with_transport(
        transport: Arc<dyn UploadTransport>,
        endpoint: Endpoint,
        direct_url: bool,
    ) -> Self {
        Self {
            transport,
            endpoint,
            direct_url,
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn direct_url(&self) -> bool {
        self.direct_url
    }

    /// Uploads `image` under `file_name`.
    ///
    /// Transport failures come back as a failed `UploadResult`. A body that
    /// does not parse still counts as a success, just without a URL. `Err` is
    /// reserved for faults on our side: empty input or an unusable endpoint.
    pub async fn upload(&self, image: &[u8], file_name: &str) -> Result<UploadResult> {
        if image.is_empty() {
            return Err(UploadError::InvalidRequest(
                "image data must not be empty".to_string(),
            ));
        }
        if file_name.trim().is_empty() {
            return Err(UploadError::InvalidRequest(
                "file name must not be empty".to_string(),
            ));
        }

        let request = MultipartRequest {
            url: self.endpoint.request_url()?,
            fields: vec![
                (
                    constants::form::KEY_FIELD,
                    self.endpoint.api_key().expose_secret().to_string(),
                ),
                (
                    constants::form::FORMAT_FIELD,
                    constants::form::FORMAT_JSON.to_string(),
                ),
            ],
            file_field: constants::form::SOURCE_FIELD,
            file_name,
            data: image,
        };

        log::debug!("Uploading {} to {}", file_name, self.endpoint);

        match self.transport.send(request).await {
            Ok(response) if response.is_success() => {
                let result = UploadResult::from_success_body(response.body, self.direct_url);
                if result.url.is_none() {
                    log::debug!(
                        "{} accepted the upload but returned no usable image URL",
                        self.endpoint
                    );
                }
                Ok(result)
            }
            Ok(response) => {
                let error = UploadError::HttpStatus {
                    status: response.status,
                };
                Ok(UploadResult::failed(response.body, error.to_string()))
            }
            Err(error) if error.is_transport_failure() => {
                log::debug!("Upload to {} failed: {}", self.endpoint, error);
                Ok(UploadResult::failed(String::new(), error.to_string()))
            }
            Err(error) => Err(error),
        }
    }
}
