//! Output formatting for multiple formats
//!
//! Formatters for JSON, YAML and human-readable text. The serializable
//! report types here are presentation shapes; the detection engine's own
//! types stay untouched.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::detect::Detection;
use crate::scan::MicroserviceInfo;
use crate::services::ServiceConfig;
use crate::tools::ToolStatus;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format (human-friendly, version-control friendly)
    Yaml,
    /// Human-readable formatted text
    Human,
}

/// The full result of one `detect` invocation
#[derive(Debug, Serialize)]
pub struct DetectReport {
    pub detection: Detection,
    pub services: Vec<ServiceConfig>,
}

#[derive(Debug, Serialize)]
struct ScanRow {
    path: String,
    name: String,
    framework: String,
    indicators: Vec<String>,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_detect(&self, report: &DetectReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(report).context("Failed to serialize detect report")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(report).context("Failed to serialize detect report")
            }
            OutputFormat::Human => Ok(self.detect_human(report)),
        }
    }

    pub fn format_scan(&self, services: &[MicroserviceInfo]) -> Result<String> {
        let rows: Vec<ScanRow> = services
            .iter()
            .map(|s| ScanRow {
                path: s.path.display().to_string(),
                name: s.name.clone(),
                framework: s.framework.clone(),
                indicators: s.indicators.clone(),
            })
            .collect();

        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(&rows).context("Failed to serialize scan result")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(&rows).context("Failed to serialize scan result")
            }
            OutputFormat::Human => Ok(self.scan_human(services)),
        }
    }

    pub fn format_doctor(&self, statuses: &[ToolStatus]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(statuses).context("Failed to serialize tool status")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(statuses).context("Failed to serialize tool status")
            }
            OutputFormat::Human => Ok(self.doctor_human(statuses)),
        }
    }

    fn detect_human(&self, report: &DetectReport) -> String {
        let d = &report.detection;
        let mut out = String::new();

        if d.detected {
            out.push_str(&format!("Framework:    {}\n", d.framework));
            out.push_str(&format!("Build system: {}\n", d.build_system));
            if let Some(java) = &d.java_version {
                out.push_str(&format!("Java:         {}\n", java));
            }
            if let Some(port) = &d.port {
                out.push_str(&format!("Port:         {}\n", port));
            }
            if !d.dependencies.is_empty() {
                out.push_str(&format!("Dependencies: {}\n", d.dependencies.len()));
            }
        } else {
            out.push_str("No recognized framework found\n");
        }

        if report.services.is_empty() {
            out.push_str("\nNo backing services inferred\n");
        } else {
            out.push_str("\nInferred backing services:\n");
            for service in &report.services {
                out.push_str(&format!(
                    "  - {} (port {}, version {})\n",
                    service.kind, service.port, service.version
                ));
            }
        }
        out
    }

    fn scan_human(&self, services: &[MicroserviceInfo]) -> String {
        if services.is_empty() {
            return "No services found\n".to_string();
        }
        let mut out = format!("Found {} service(s):\n", services.len());
        for service in services {
            out.push_str(&format!(
                "  {} [{}]  {}\n",
                service.name,
                service.framework,
                service.indicators.join(", ")
            ));
        }
        out
    }

    fn doctor_human(&self, statuses: &[ToolStatus]) -> String {
        let mut out = String::new();
        for status in statuses {
            let mark = if status.available { "ok" } else { "missing" };
            let note = if status.required && !status.available {
                " (required)"
            } else {
                ""
            };
            match &status.version {
                Some(version) => {
                    out.push_str(&format!("{:<16} {}  {}\n", status.name, mark, version))
                }
                None => out.push_str(&format!("{:<16} {}{}\n", status.name, mark, note)),
            }
        }
        out
    }
}
