// ABOUTME: Command implementations shared by the binary and integration tests
// ABOUTME: Resolves the target endpoint, performs uploads and runs the mirror diagnostic pass

use anyhow::{Context, Result, anyhow};
use chevereto_sdk::{
    CheveretoClient, DiagnosticReport, DiagnosticRunner, Endpoint, EndpointRegistry,
    HttpTransport, UploadResult,
};
use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::sample;

/// Where an upload should go, as requested on the command line
#[derive(Debug, Default, Clone, Copy)]
pub struct Target<'a> {
    pub url: Option<&'a str>,
    pub api_key: Option<&'a str>,
    pub mirror: Option<&'a str>,
}

/// Picks the endpoint for an upload.
///
/// Explicit `--url`/`--api-key` win, then `--mirror`, then the configured endpoint.
pub fn resolve_endpoint(
    target: Target<'_>,
    config: &Config,
    registry: &EndpointRegistry,
) -> Result<Endpoint> {
    match (target.url, target.api_key, target.mirror) {
        (Some(url), Some(key), _) => Ok(Endpoint::new(url, key)?),
        (Some(_), None, _) | (None, Some(_), _) => {
            Err(anyhow!("--url and --api-key must be given together"))
        }
        (None, None, Some(label)) => registry.find(label).cloned().ok_or_else(|| {
            anyhow!(
                "Unknown mirror '{}'. Run `chevereto mirrors` to list available hosts",
                label
            )
        }),
        (None, None, None) => config.endpoint().context(
            "No upload endpoint configured. Pass --url and --api-key, pick a --mirror, \
             or set CHEVERETO_UPLOAD_URL and CHEVERETO_API_KEY",
        ),
    }
}

/// Direct-URL preference: the flag wins, otherwise the config value
pub fn direct_url_preference(flag: bool, config: &Config) -> bool {
    flag || config.direct_url.unwrap_or(false)
}

/// Reads `path` and uploads it to `endpoint` using the configured timeout and proxy
pub async fn upload_file(
    endpoint: Endpoint,
    path: &Path,
    direct_url: bool,
    config: &Config,
) -> Result<UploadResult> {
    let data = sample::load_image(path)?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(crate::constants::sample::FILE_NAME);

    let client = CheveretoClient::builder()
        .endpoint(endpoint)
        .direct_url(direct_url)
        .timeout(config.timeout())
        .proxy(config.proxy()?)
        .build()?;

    log::debug!("Uploading {} ({} bytes)", path.display(), data.len());
    let result = client.upload(&data, file_name).await?;
    Ok(result)
}

/// Probes every endpoint in `registry` with `sample`
pub async fn run_diagnostics(
    registry: EndpointRegistry,
    sample: &[u8],
    direct_url: bool,
    config: &Config,
) -> Result<DiagnosticReport> {
    let transport = HttpTransport::new(config.timeout(), config.proxy()?)?;
    let runner = DiagnosticRunner::new(registry, Arc::new(transport)).direct_url(direct_url);

    log::info!("Probing {} mirrors", runner.registry().len());
    Ok(runner.test_all_endpoints(sample).await)
}

/// Sample bytes for `test`: the given file, or a generated PNG
pub fn diagnostic_sample(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => sample::load_image(path),
        None => sample::generated_sample(),
    }
}
