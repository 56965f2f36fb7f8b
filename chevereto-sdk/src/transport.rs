// ABOUTME: Transport seam for multipart uploads plus the reqwest-backed implementation
// ABOUTME: Keeps connection, proxy and timeout handling out of the protocol adapter

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::constants::{timeouts, urls};
use crate::error::UploadError;

/// One multipart POST: plain text fields plus a single file field.
#[derive(Debug, Clone)]
pub struct MultipartRequest<'a> {
    pub url: Url,
    pub fields: Vec<(&'static str, String)>,
    pub file_field: &'static str,
    pub file_name: &'a str,
    pub data: &'a [u8],
}

/// What came back over the wire, before any protocol interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a multipart request and returns the raw response.
///
/// Implementations return `Ok` for any response the server produced, whatever
/// its status, and reserve `Err` for requests that never got one.
#[async_trait]
pub trait UploadTransport: Send + Sync {
    async fn send(&self, request: MultipartRequest<'_>) -> Result<TransportResponse, UploadError>;
}

pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration, proxy: Option<reqwest::Proxy>) -> Result<Self, UploadError> {
        let mut builder = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(urls::USER_AGENT);

        if let Some(proxy) = proxy {
            builder = builder.proxy(proxy);
        }

        let client = builder.build().map_err(|e| {
            UploadError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self { client })
    }

    pub fn with_defaults() -> Result<Self, UploadError> {
        Self::new(timeouts::UPLOAD_TIMEOUT, None)
    }
}

#[async_trait]
impl UploadTransport for HttpTransport {
    async fn send(&self, request: MultipartRequest<'_>) -> Result<TransportResponse, UploadError> {
        let part = Part::bytes(request.data.to_vec())
            .file_name(request.file_name.to_string())
            .mime_str(mime_for_file_name(request.file_name))
            .map_err(|e| UploadError::InvalidRequest(e.to_string()))?;

        let mut form = Form::new();
        for (name, value) in request.fields {
            form = form.text(name, value);
        }
        form = form.part(request.file_field, part);

        log::debug!("POST {} ({} bytes)", request.url, request.data.len());

        let response = self.client.post(request.url).multipart(form).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        log::debug!("Upload response status {} ({} bytes)", status, body.len());

        Ok(TransportResponse { status, body })
    }
}

/// MIME type sent with the file part, derived from the file extension.
pub fn mime_for_file_name(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("tif") | Some("tiff") => "image/tiff",
        _ => "application/octet-stream",
    }
}
