// ABOUTME: This module handles output formatting for the Chevereto CLI
// ABOUTME: It provides table and JSON formatters for uploads, mirror lists and diagnostic reports

use anyhow::Result;
use chevereto_sdk::{DiagnosticReport, EndpointRegistry, UploadResult};
use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::constants::ui;

pub trait OutputFormat {
    fn format_upload(&self, result: &UploadResult) -> Result<String>;
    fn format_mirrors(&self, registry: &EndpointRegistry) -> Result<String>;
    fn format_report(&self, report: &DiagnosticReport) -> Result<String>;
}

/// Mirror entry as shown to users. Keys are never included.
#[derive(Debug, Serialize)]
struct MirrorEntry {
    host: String,
    upload_url: String,
}

fn mirror_entries(registry: &EndpointRegistry) -> Vec<MirrorEntry> {
    registry
        .iter()
        .map(|endpoint| MirrorEntry {
            host: endpoint.host_name(),
            upload_url: endpoint.upload_url().to_string(),
        })
        .collect()
}

pub struct TableFormatter {
    use_color: bool,
}

impl TableFormatter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn truncate(text: &str, max_len: usize) -> String {
        if text.chars().count() <= max_len {
            text.to_string()
        } else {
            let kept: String = text.chars().take(max_len.saturating_sub(3)).collect();
            format!("{}...", kept)
        }
    }

    fn format_status(&self, is_success: bool) -> String {
        let text = if is_success { "Success" } else { "Failed" };

        if !self.use_color {
            return text.to_string();
        }
        if is_success {
            text.green().to_string()
        } else {
            text.red().to_string()
        }
    }

    fn format_optional(&self, value: Option<&str>) -> String {
        match value {
            Some(text) => text.to_string(),
            None if self.use_color => "-".dimmed().to_string(),
            None => "-".to_string(),
        }
    }
}

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct MirrorRow {
    #[tabled(rename = "Host")]
    host: String,
    #[tabled(rename = "Upload URL")]
    upload_url: String,
}

impl OutputFormat for TableFormatter {
    fn format_upload(&self, result: &UploadResult) -> Result<String> {
        let mut rows = vec![
            FieldRow {
                field: "Status",
                value: self.format_status(result.is_success),
            },
            FieldRow {
                field: "URL",
                value: self.format_optional(result.url.as_deref()),
            },
            FieldRow {
                field: "Thumbnail",
                value: self.format_optional(result.thumbnail_url.as_deref()),
            },
        ];

        if let Some(ref detail) = result.error_detail {
            rows.push(FieldRow {
                field: "Error",
                value: Self::truncate(detail, ui::MAX_DETAIL_WIDTH),
            });
        }

        let mut table = Table::new(rows);
        table.with(Style::psql());
        Ok(table.to_string())
    }

    fn format_mirrors(&self, registry: &EndpointRegistry) -> Result<String> {
        let rows: Vec<MirrorRow> = mirror_entries(registry)
            .into_iter()
            .map(|entry| MirrorRow {
                host: entry.host,
                upload_url: entry.upload_url,
            })
            .collect();

        let mut table = Table::new(rows);
        table.with(Style::psql());
        Ok(table.to_string())
    }

    fn format_report(&self, report: &DiagnosticReport) -> Result<String> {
        let text = report.to_string();
        if !self.use_color {
            return Ok(text);
        }

        let lines: Vec<String> = text
            .lines()
            .map(|line| {
                if line.starts_with("Successful uploads (") {
                    line.green().bold().to_string()
                } else if line.starts_with("Failed uploads (") {
                    line.red().bold().to_string()
                } else {
                    line.to_string()
                }
            })
            .collect();
        Ok(lines.join("\n"))
    }
}

pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn render<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormat for JsonFormatter {
    fn format_upload(&self, result: &UploadResult) -> Result<String> {
        self.render(result)
    }

    fn format_mirrors(&self, registry: &EndpointRegistry) -> Result<String> {
        self.render(&mirror_entries(registry))
    }

    fn format_report(&self, report: &DiagnosticReport) -> Result<String> {
        self.render(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn success_result() -> UploadResult {
        UploadResult {
            is_success: true,
            url: Some("https://img.example/image/abc".to_string()),
            thumbnail_url: Some("https://img.example/images/abc.th.png".to_string()),
            raw_response: "{}".to_string(),
            error_detail: None,
        }
    }

    fn sample_report() -> DiagnosticReport {
        let mut report = DiagnosticReport::new();
        report.record_success("slow.example", 120);
        report.record_failure("broken.example");
        report.record_success("fast.example", 40);
        report
    }

    fn sample_registry() -> EndpointRegistry {
        EndpointRegistry::from_pairs([
            ("https://www.first.example/api/1/upload", "secret-one"),
            ("second.example/api/1/upload", "secret-two"),
        ])
        .unwrap()
    }

    #[test]
    fn test_table_upload_success() {
        let formatter = TableFormatter::new(false);
        let output = formatter.format_upload(&success_result()).unwrap();

        assert!(output.contains("Success"));
        assert!(output.contains("https://img.example/image/abc"));
        assert!(output.contains("https://img.example/images/abc.th.png"));
        assert!(!output.contains("Error"));
    }

    #[test]
    fn test_table_upload_failure_truncates_detail() {
        let formatter = TableFormatter::new(false);
        let result = UploadResult::failed(String::new(), "x".repeat(200));
        let output = formatter.format_upload(&result).unwrap();

        assert!(output.contains("Failed"));
        assert!(output.contains("Error"));
        assert!(output.contains("..."));
        assert!(!output.contains(&"x".repeat(ui::MAX_DETAIL_WIDTH)));
    }

    #[test]
    fn test_table_upload_with_color() {
        let formatter = TableFormatter::new(true);
        let output = formatter.format_upload(&success_result()).unwrap();
        assert!(output.contains("\u{1b}["));
    }

    #[test]
    fn test_table_mirrors_hide_keys() {
        let formatter = TableFormatter::new(false);
        let output = formatter.format_mirrors(&sample_registry()).unwrap();

        assert!(output.contains("Host"));
        assert!(output.contains("first.example"));
        assert!(output.contains("second.example/api/1/upload"));
        assert!(!output.contains("secret-one"));
        assert!(!output.contains("secret-two"));
    }

    #[test]
    fn test_plain_report_matches_display() {
        let formatter = TableFormatter::new(false);
        let report = sample_report();
        let output = formatter.format_report(&report).unwrap();

        assert_eq!(output, report.to_string());
        assert_eq!(
            output,
            "Successful uploads (2):\n\nfast.example (40ms)\nslow.example (120ms)\n\nFailed uploads (1):\n\nbroken.example"
        );
    }

    #[test]
    fn test_colored_report_keeps_entries() {
        let formatter = TableFormatter::new(true);
        let output = formatter.format_report(&sample_report()).unwrap();

        assert!(output.contains("\u{1b}["));
        assert!(output.contains("fast.example (40ms)"));
        assert!(output.contains("broken.example"));
    }

    #[test]
    fn test_truncate_handles_multibyte_text() {
        let text = "é".repeat(10);
        assert_eq!(TableFormatter::truncate(&text, 20), text);
        assert_eq!(TableFormatter::truncate(&text, 5), "éé...");
    }

    #[test]
    fn test_json_upload() {
        let formatter = JsonFormatter::new(false);
        let output = formatter.format_upload(&success_result()).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["is_success"], true);
        assert_eq!(parsed["url"], "https://img.example/image/abc");
        assert!(parsed["error_detail"].is_null());
    }

    #[test]
    fn test_json_mirrors_hide_keys() {
        let formatter = JsonFormatter::new(true);
        let output = formatter.format_mirrors(&sample_registry()).unwrap();

        assert!(output.contains('\n'));
        assert!(!output.contains("secret"));

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 2);
        assert_eq!(parsed[0]["host"], "first.example");
        assert_eq!(parsed[1]["upload_url"], "second.example/api/1/upload");
    }

    #[test]
    fn test_json_report() {
        let formatter = JsonFormatter::new(false);
        let output = formatter.format_report(&sample_report()).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["successful"][0]["label"], "fast.example");
        assert_eq!(parsed["successful"][0]["elapsed_ms"], 40);
        assert_eq!(parsed["failed"][0]["label"], "broken.example");
        assert!(parsed["failed"][0]["elapsed_ms"].is_null());
    }
}
