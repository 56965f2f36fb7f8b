// ABOUTME: Endpoint value type pairing a Chevereto upload URL with its API key
// ABOUTME: Handles scheme normalization and the host label used in reports

use crate::constants::urls;
use crate::error::UploadError;
use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use url::Url;

/// One mirror: where to upload and which key to send.
///
/// Both values are non-empty and fixed once constructed. The key is kept in a
/// `SecretString` so it never shows up in `Debug` output or logs.
#[derive(Clone)]
pub struct Endpoint {
    upload_url: String,
    api_key: SecretString,
}

impl Endpoint {
    pub fn new(
        upload_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, UploadError> {
        let upload_url = upload_url.into().trim().to_string();
        let api_key = api_key.into().trim().to_string();

        if upload_url.is_empty() {
            return Err(UploadError::InvalidEndpoint(
                "upload URL must not be empty".to_string(),
            ));
        }
        if api_key.is_empty() {
            return Err(UploadError::InvalidEndpoint(format!(
                "API key for {} must not be empty",
                upload_url
            )));
        }

        Ok(Self {
            upload_url,
            api_key: SecretString::new(api_key.into_boxed_str()),
        })
    }

    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }

    pub fn api_key(&self) -> &SecretString {
        &self.api_key
    }

    /// Absolute URL the upload is posted to.
    pub fn request_url(&self) -> Result<Url, UploadError> {
        let url = Url::parse(&fix_prefix(&self.upload_url))?;
        if url.host_str().is_none() {
            return Err(UploadError::InvalidEndpoint(format!(
                "{} has no host",
                self.upload_url
            )));
        }
        Ok(url)
    }

    /// Host name without a leading `www.`, or the raw URL when it has no host.
    pub fn host_name(&self) -> String {
        Url::parse(&fix_prefix(&self.upload_url))
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
            .map(|host| host.strip_prefix("www.").unwrap_or(&host).to_string())
            .unwrap_or_else(|| self.upload_url.clone())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.host_name())
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("upload_url", &self.upload_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl PartialEq for Endpoint {
    fn eq(&self, other: &Self) -> bool {
        self.upload_url == other.upload_url
            && self.api_key.expose_secret() == other.api_key.expose_secret()
    }
}

impl Eq for Endpoint {}

/// Prepends the default scheme when `url` has neither `http://` nor `https://`.
pub fn fix_prefix(url: &str) -> String {
    let url = url.trim();
    let lower = url.to_ascii_lowercase();

    if urls::KNOWN_SCHEMES
        .iter()
        .any(|scheme| lower.starts_with(scheme))
    {
        url.to_string()
    } else {
        format!("{}{}", urls::DEFAULT_SCHEME, url)
    }
}
