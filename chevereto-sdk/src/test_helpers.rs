// ABOUTME: Test helper utilities for mocking Chevereto responses and transports
// ABOUTME: Provides mockito server setup and a scripted in-memory UploadTransport

use async_trait::async_trait;
use mockito::{Server, ServerGuard};
use serde_json::json;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use crate::error::UploadError;
use crate::transport::{MultipartRequest, TransportResponse, UploadTransport};

pub async fn mock_upload_server() -> ServerGuard {
    Server::new_async().await
}

pub fn mock_upload_response() -> serde_json::Value {
    json!({
        "status_code": 200,
        "success": {
            "message": "image uploaded",
            "code": 200
        },
        "image": {
            "name": "abc",
            "extension": "png",
            "url": "https://img.example/images/2024/01/01/abc.png",
            "url_viewer": "https://img.example/image/abc",
            "thumb": {
                "filename": "abc.th.png",
                "url": "https://img.example/images/2024/01/01/abc.th.png"
            }
        },
        "status_txt": "OK"
    })
}

pub fn mock_upload_response_without_thumb() -> serde_json::Value {
    json!({
        "status_code": 200,
        "image": {
            "url": "https://img.example/images/2024/01/01/def.png",
            "url_viewer": "https://img.example/image/def"
        }
    })
}

pub fn mock_error_response() -> serde_json::Value {
    json!({
        "status_code": 400,
        "error": {
            "message": "Invalid API v1 key.",
            "code": 100
        },
        "status_txt": "Bad Request"
    })
}

/// Canned outcome for one request to a host.
#[derive(Debug)]
pub enum TransportReply {
    Respond {
        status: u16,
        body: String,
        delay: Duration,
    },
    Fail(UploadError),
}

impl TransportReply {
    pub fn ok(body: &str) -> Self {
        Self::status(200, body)
    }

    pub fn status(status: u16, body: &str) -> Self {
        TransportReply::Respond {
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    /// Response that takes `millis` of (tokio) time to arrive.
    pub fn after(self, millis: u64) -> Self {
        match self {
            TransportReply::Respond { status, body, .. } => TransportReply::Respond {
                status,
                body,
                delay: Duration::from_millis(millis),
            },
            other => other,
        }
    }
}

/// Owned copy of a request seen by `ScriptedTransport`.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub url: String,
    pub fields: Vec<(String, String)>,
    pub file_field: String,
    pub file_name: String,
    pub data: Vec<u8>,
}

/// Transport that answers from per-host queues and records every request.
/// Hosts without a queued reply fail with a network error.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<HashMap<String, VecDeque<TransportReply>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, host: &str, reply: TransportReply) -> Self {
        self.replies
            .lock()
            .unwrap()
            .entry(host.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn hosts_called(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter_map(|r| url::Url::parse(&r.url).ok())
            .filter_map(|u| u.host_str().map(str::to_string))
            .collect()
    }
}

#[async_trait]
impl UploadTransport for ScriptedTransport {
    async fn send(&self, request: MultipartRequest<'_>) -> Result<TransportResponse, UploadError> {
        let host = request.url.host_str().unwrap_or_default().to_string();

        self.requests.lock().unwrap().push(RecordedRequest {
            url: request.url.to_string(),
            fields: request
                .fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            file_field: request.file_field.to_string(),
            file_name: request.file_name.to_string(),
            data: request.data.to_vec(),
        });

        let reply = self
            .replies
            .lock()
            .unwrap()
            .get_mut(&host)
            .and_then(|queue| queue.pop_front());

        match reply {
            Some(TransportReply::Respond {
                status,
                body,
                delay,
            }) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                Ok(TransportResponse { status, body })
            }
            Some(TransportReply::Fail(error)) => Err(error),
            None => Err(UploadError::Network(format!(
                "no scripted reply for {}",
                host
            ))),
        }
    }
}
