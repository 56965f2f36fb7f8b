// ABOUTME: Mirror diagnostics that upload a sample image to every registered endpoint
// ABOUTME: Times each probe, classifies it and renders a plain-text report

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tokio::time::Instant;

use crate::constants::diagnostics;
use crate::registry::EndpointRegistry;
use crate::transport::UploadTransport;
use crate::CheveretoClient;

/// Produces the file name sent with each probe upload.
pub trait FileNameGenerator: Send + Sync {
    fn generate(&self) -> String;
}

impl<F> FileNameGenerator for F
where
    F: Fn() -> String + Send + Sync,
{
    fn generate(&self) -> String {
        self()
    }
}

/// Random alphanumeric stem plus a fixed extension, e.g. `a8Xk20PqLm.png`.
#[derive(Debug, Clone)]
pub struct RandomFileName {
    pub length: usize,
    pub extension: &'static str,
}

impl Default for RandomFileName {
    fn default() -> Self {
        Self {
            length: diagnostics::FILE_NAME_LENGTH,
            extension: diagnostics::FILE_NAME_EXTENSION,
        }
    }
}

impl FileNameGenerator for RandomFileName {
    fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        let stem: String = (0..self.length)
            .map(|_| rng.sample(Alphanumeric) as char)
            .collect();
        format!("{}.{}", stem, self.extension)
    }
}

/// One probed endpoint. Only successful probes carry a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeOutcome {
    pub label: String,
    pub elapsed_ms: Option<u64>,
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.elapsed_ms {
            Some(ms) => write!(f, "{} ({}ms)", self.label, ms),
            None => write!(f, "{}", self.label),
        }
    }
}

/// Result of a full diagnostic pass.
///
/// `successful` stays sorted by elapsed time (ties keep probe order);
/// `failed` is in probe order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiagnosticReport {
    successful: Vec<ProbeOutcome>,
    failed: Vec<ProbeOutcome>,
}

impl DiagnosticReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self, label: impl Into<String>, elapsed_ms: u64) {
        let index = self
            .successful
            .partition_point(|outcome| outcome.elapsed_ms.unwrap_or(0) <= elapsed_ms);
        self.successful.insert(
            index,
            ProbeOutcome {
                label: label.into(),
                elapsed_ms: Some(elapsed_ms),
            },
        );
    }

    pub fn record_failure(&mut self, label: impl Into<String>) {
        self.failed.push(ProbeOutcome {
            label: label.into(),
            elapsed_ms: None,
        });
    }

    pub fn successful(&self) -> &[ProbeOutcome] {
        &self.successful
    }

    pub fn failed(&self) -> &[ProbeOutcome] {
        &self.failed
    }

    pub fn total(&self) -> usize {
        self.successful.len() + self.failed.len()
    }
}

impl fmt::Display for DiagnosticReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |outcomes: &[ProbeOutcome]| {
            outcomes
                .iter()
                .map(ProbeOutcome::to_string)
                .collect::<Vec<_>>()
                .join("\n")
        };

        write!(
            f,
            "Successful uploads ({}):\n\n{}\n\nFailed uploads ({}):\n\n{}",
            self.successful.len(),
            join(&self.successful),
            self.failed.len(),
            join(&self.failed)
        )
    }
}

/// Probes every endpoint of a registry, one after another.
pub struct DiagnosticRunner {
    registry: EndpointRegistry,
    transport: Arc<dyn UploadTransport>,
    file_names: Box<dyn FileNameGenerator>,
    direct_url: bool,
}

impl DiagnosticRunner {
    pub fn new(registry: EndpointRegistry, transport: Arc<dyn UploadTransport>) -> Self {
        Self {
            registry,
            transport,
            file_names: Box::new(RandomFileName::default()),
            direct_url: false,
        }
    }

    pub fn with_file_names(mut self, file_names: impl FileNameGenerator + 'static) -> Self {
        self.file_names = Box::new(file_names);
        self
    }

    pub fn direct_url(mut self, direct_url: bool) -> Self {
        self.direct_url = direct_url;
        self
    }

    pub fn registry(&self) -> &EndpointRegistry {
        &self.registry
    }

    /// Uploads `sample` once to each endpoint in registry order and reports
    /// which mirrors returned a usable URL.
    ///
    /// A probe counts as successful only when the upload returned a URL. A
    /// fault on one endpoint is logged and recorded as a failure; the loop
    /// always visits every endpoint.
    pub async fn test_all_endpoints(&self, sample: &[u8]) -> DiagnosticReport {
        let mut report = DiagnosticReport::new();

        for endpoint in &self.registry {
            let label = endpoint.to_string();
            let file_name = self.file_names.generate();
            let client = CheveretoClient::with_transport(
                Arc::clone(&self.transport),
                endpoint.clone(),
                self.direct_url,
            );

            let started = Instant::now();
            let outcome = client.upload(sample, &file_name).await;
            let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

            match outcome {
                Ok(result) if result.has_url() => {
                    log::info!("{} responded in {}ms", label, elapsed_ms);
                    report.record_success(label, elapsed_ms);
                }
                Ok(result) => {
                    log::info!(
                        "{} failed: {}",
                        label,
                        result
                            .error_detail
                            .as_deref()
                            .unwrap_or("no image URL in response")
                    );
                    report.record_failure(label);
                }
                Err(error) => {
                    log::warn!("Probe of {} aborted: {}", label, error);
                    report.record_failure(label);
                }
            }
        }

        report
    }
}
