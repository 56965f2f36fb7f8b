// ABOUTME: Main entry point for the Chevereto CLI application
// ABOUTME: Parses arguments, loads configuration and dispatches upload, mirrors and test commands

use anyhow::Result;
use chevereto_cli::cli::{Cli, Commands};
use chevereto_cli::cli_output::CliOutput;
use chevereto_cli::commands::{self, Target};
use chevereto_cli::config::Config;
use chevereto_cli::output::{JsonFormatter, OutputFormat, TableFormatter};
use chevereto_sdk::{EndpointRegistry, UploadError};
use clap::Parser;
use std::env;
use std::io::IsTerminal;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let use_color = should_use_color(&cli);
    let out = CliOutput::with_color(use_color);

    match run(cli, use_color, &out).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            out.error(&format!("{:#}", err));
            if let Some(help) = err
                .downcast_ref::<UploadError>()
                .and_then(UploadError::help_text)
            {
                out.hint(help);
            }
            std::process::exit(1);
        }
    }
}

fn should_use_color(cli: &Cli) -> bool {
    if cli.force_color {
        return true;
    }
    !cli.no_color
        && env::var("NO_COLOR").is_err()
        && env::var("TERM").unwrap_or_default() != "dumb"
        && std::io::stdout().is_terminal()
}

fn load_config(cli: &Cli) -> Result<Config> {
    match cli.config {
        Some(ref path) => {
            let config = Config::load_from_file(path)?;
            Ok(config.apply_env(|name| env::var(name).ok()))
        }
        None => Config::load(),
    }
}

fn formatter(json: bool, pretty: bool, use_color: bool) -> Box<dyn OutputFormat> {
    if json {
        Box::new(JsonFormatter::new(pretty))
    } else {
        Box::new(TableFormatter::new(use_color))
    }
}

/// Runs the selected command; `Ok(false)` means the command ran but failed
async fn run(cli: Cli, use_color: bool, out: &CliOutput) -> Result<bool> {
    let config = load_config(&cli)?;
    log::debug!("Loaded configuration: {:?}", config);

    match cli.command {
        Commands::Upload {
            file,
            url,
            api_key,
            mirror,
            direct,
            json,
            pretty,
        } => {
            let registry = EndpointRegistry::builtin()?;
            let target = Target {
                url: url.as_deref(),
                api_key: api_key.as_deref(),
                mirror: mirror.as_deref(),
            };
            let endpoint = commands::resolve_endpoint(target, &config, &registry)?;
            let direct = commands::direct_url_preference(direct, &config);

            let result = commands::upload_file(endpoint, &file, direct, &config).await?;
            println!("{}", formatter(json, pretty, use_color).format_upload(&result)?);

            if !result.is_success {
                if !json {
                    out.error("Upload failed");
                }
                return Ok(false);
            }
            if !result.has_url() && !json {
                out.warning("The host accepted the upload but returned no image URL");
            }
            Ok(true)
        }
        Commands::Mirrors { json, pretty } => {
            let registry = EndpointRegistry::builtin()?;
            println!(
                "{}",
                formatter(json, pretty, use_color).format_mirrors(&registry)?
            );
            Ok(true)
        }
        Commands::Test {
            sample,
            direct,
            json,
            pretty,
        } => {
            let sample = commands::diagnostic_sample(sample.as_deref())?;
            let registry = EndpointRegistry::builtin()?;
            let direct = commands::direct_url_preference(direct, &config);

            let spinner = out.spinner(format!("Uploading sample to {} mirrors", registry.len()));
            let report = commands::run_diagnostics(registry, &sample, direct, &config).await;
            spinner.finish_and_clear();
            let report = report?;

            println!("{}", formatter(json, pretty, use_color).format_report(&report)?);
            if !json && !report.successful().is_empty() {
                out.success(&format!(
                    "{} of {} mirrors accepted the sample",
                    report.successful().len(),
                    report.total()
                ));
            }
            Ok(true)
        }
    }
}
