//! External tool health checks
//!
//! The generated scaffolding assumes a handful of tools exist on PATH.
//! `doctor` probes each one with `--version` and reports what it found;
//! a missing optional tool is information, not a failure.

use serde::Serialize;
use std::process::Command;
use tracing::debug;

/// Status of one external tool
#[derive(Debug, Clone, Serialize)]
pub struct ToolStatus {
    pub name: &'static str,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Tools the dev loop cannot run without
    pub required: bool,
}

struct Probe {
    name: &'static str,
    command: &'static str,
    args: &'static [&'static str],
    required: bool,
}

const PROBES: &[Probe] = &[
    Probe {
        name: "docker",
        command: "docker",
        args: &["--version"],
        required: true,
    },
    Probe {
        name: "docker compose",
        command: "docker",
        args: &["compose", "version"],
        required: true,
    },
    Probe {
        name: "tilt",
        command: "tilt",
        args: &["version"],
        required: false,
    },
    Probe {
        name: "java",
        command: "java",
        args: &["--version"],
        required: false,
    },
    Probe {
        name: "maven",
        command: "mvn",
        args: &["--version"],
        required: false,
    },
    Probe {
        name: "gradle",
        command: "gradle",
        args: &["--version"],
        required: false,
    },
];

/// Probe every known tool
pub fn check_all() -> Vec<ToolStatus> {
    PROBES
        .iter()
        .map(|probe| {
            let version = run_probe(probe.command, probe.args);
            debug!(tool = probe.name, available = version.is_some(), "tool probe");
            ToolStatus {
                name: probe.name,
                available: version.is_some(),
                version,
                required: probe.required,
            }
        })
        .collect()
}

/// True when every required tool is present
pub fn all_required_available(statuses: &[ToolStatus]) -> bool {
    statuses.iter().all(|s| s.available || !s.required)
}

fn run_probe(command: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(command).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .lines()
        .find(|l| !l.trim().is_empty())
        .map(|l| l.trim().to_string())
}
