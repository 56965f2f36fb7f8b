// ABOUTME: Builder pattern implementation for CheveretoClient configuration
// ABOUTME: Wires endpoint, URL preference, timeout and proxy into an HTTP-backed client

use crate::constants::timeouts;
use crate::endpoint::Endpoint;
use crate::error::UploadError;
use crate::transport::HttpTransport;
use crate::CheveretoClient;
use std::sync::Arc;
use std::time::Duration;
use typed_builder::TypedBuilder;
use url::Url;

#[derive(Debug, TypedBuilder)]
#[builder(build_method(into = Result<CheveretoClient, UploadError>))]
pub struct CheveretoClientConfig {
    pub endpoint: Endpoint,

    #[builder(default = false)]
    pub direct_url: bool,

    #[builder(default = timeouts::UPLOAD_TIMEOUT)]
    pub timeout: Duration,

    #[builder(default = None)]
    pub proxy: Option<reqwest::Proxy>,
}

impl From<CheveretoClientConfig> for Result<CheveretoClient, UploadError> {
    fn from(config: CheveretoClientConfig) -> Self {
        CheveretoClient::from_config(config)
    }
}

impl CheveretoClient {
    pub fn builder() -> CheveretoClientConfigBuilder<((), (), (), ())> {
        CheveretoClientConfig::builder()
    }

    pub fn from_config(config: CheveretoClientConfig) -> Result<Self, UploadError> {
        // Surface a bad URL now rather than on the first upload.
        config.endpoint.request_url()?;

        let transport = HttpTransport::new(config.timeout, config.proxy)?;
        Ok(Self::with_transport(
            Arc::new(transport),
            config.endpoint,
            config.direct_url,
        ))
    }

    pub fn create_proxy(url: &str) -> Result<reqwest::Proxy, UploadError> {
        let parsed_url = Url::parse(url)
            .map_err(|e| UploadError::Configuration(format!("Invalid proxy URL: {}", e)))?;

        reqwest::Proxy::all(parsed_url.as_str())
            .map_err(|e| UploadError::Configuration(format!("Invalid proxy configuration: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint() -> Endpoint {
        Endpoint::new("https://img.example/api/1/upload", "test-api-key").unwrap()
    }

    #[test]
    fn test_builder_with_minimal_config() {
        let client = CheveretoClient::builder().endpoint(endpoint()).build();

        assert!(client.is_ok());
        assert!(!client.unwrap().direct_url());
    }

    #[test]
    fn test_builder_with_all_options() {
        let proxy = CheveretoClient::create_proxy("http://proxy:8080").unwrap();
        let client = CheveretoClient::builder()
            .endpoint(endpoint())
            .direct_url(true)
            .timeout(Duration::from_secs(5))
            .proxy(Some(proxy))
            .build()
            .unwrap();

        assert!(client.direct_url());
        assert_eq!(client.endpoint(), &endpoint());
    }

    #[test]
    fn test_builder_rejects_unusable_endpoint() {
        let endpoint = Endpoint::new("http://", "key").unwrap();
        let result = CheveretoClient::builder().endpoint(endpoint).build();

        assert!(matches!(result, Err(UploadError::InvalidEndpoint(_))));
    }

    #[test]
    fn test_builder_validates_proxy_url() {
        let result = CheveretoClient::create_proxy("not-a-url");

        match result {
            Err(UploadError::Configuration(msg)) => {
                assert!(msg.contains("Invalid proxy URL"));
            }
            _ => panic!("Expected configuration error"),
        }
    }

    #[test]
    fn test_config_debug_hides_api_key() {
        let config = CheveretoClientConfig {
            endpoint: endpoint(),
            direct_url: false,
            timeout: timeouts::UPLOAD_TIMEOUT,
            proxy: None,
        };

        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("img.example"));
        assert!(!debug_str.contains("test-api-key"));
    }
}
