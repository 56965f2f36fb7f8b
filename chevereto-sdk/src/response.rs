// ABOUTME: Wire types for the Chevereto JSON response and the normalized upload result
// ABOUTME: Optional fields are modeled with Option so absence never fails a parse

use serde::{Deserialize, Serialize};

/// Body returned by a Chevereto upload call when `format=json` is requested.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ServiceResponse {
    #[serde(default)]
    pub image: Option<ServiceImage>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ServiceImage {
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub url_viewer: Option<String>,

    #[serde(default)]
    pub thumb: Option<ServiceThumb>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ServiceThumb {
    #[serde(default)]
    pub url: Option<String>,
}

impl ServiceResponse {
    /// Parses a response body. Anything that is not a JSON object of the
    /// expected shape yields `None`.
    pub fn parse(body: &str) -> Option<Self> {
        match serde_json::from_str::<ServiceResponse>(body) {
            Ok(response) => Some(response),
            Err(err) => {
                log::debug!("Ignoring unparseable upload response: {}", err);
                None
            }
        }
    }
}

impl ServiceImage {
    /// Direct image link when `direct_url` is set, viewer page otherwise.
    pub fn select_url(&self, direct_url: bool) -> Option<&str> {
        let url = if direct_url {
            self.url.as_deref()
        } else {
            self.url_viewer.as_deref()
        };
        url.filter(|u| !u.is_empty())
    }

    pub fn thumbnail_url(&self) -> Option<&str> {
        self.thumb
            .as_ref()
            .and_then(|thumb| thumb.url.as_deref())
            .filter(|u| !u.is_empty())
    }
}

/// Outcome of a single upload attempt.
///
/// `url` is only set when the transport succeeded and the body carried an
/// `image`. A successful transport with an unusable body still reports
/// `is_success = true`, so callers must check `url` separately.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UploadResult {
    pub is_success: bool,
    pub url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub raw_response: String,
    pub error_detail: Option<String>,
}

impl UploadResult {
    /// Result of a 2xx exchange with the URLs picked out of `raw_response`.
    pub fn from_success_body(raw_response: String, direct_url: bool) -> Self {
        let (url, thumbnail_url) = match ServiceResponse::parse(&raw_response)
            .and_then(|response| response.image)
        {
            Some(image) => (
                image.select_url(direct_url).map(str::to_string),
                image.thumbnail_url().map(str::to_string),
            ),
            None => (None, None),
        };

        Self {
            is_success: true,
            url,
            thumbnail_url,
            raw_response,
            error_detail: None,
        }
    }

    pub fn failed(raw_response: String, error_detail: impl Into<String>) -> Self {
        Self {
            is_success: false,
            url: None,
            thumbnail_url: None,
            raw_response,
            error_detail: Some(error_detail.into()),
        }
    }

    /// True when the upload succeeded and produced a usable link.
    pub fn has_url(&self) -> bool {
        self.is_success && self.url.as_deref().is_some_and(|u| !u.is_empty())
    }
}
