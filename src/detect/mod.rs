//! Framework classification
//!
//! The classifier inspects a single project directory and resolves it to
//! exactly one framework. Evidence is checked in a fixed priority order:
//! build descriptors first (most authoritative, cheapest), then config
//! files, then Java source imports. Within any one evidence source the
//! marker order is quarkus > micronaut > spring; Quarkus and Micronaut
//! projects routinely pull in Spring-compatible libraries, so checking
//! their markers first avoids misclassifying them as Spring.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

mod classifier;
pub(crate) mod config;
mod gradle;
mod maven;
mod sources;

pub use classifier::Classifier;

/// Candidate config file names, in lookup order
pub(crate) const CONFIG_FILES: &[&str] = &[
    "application.properties",
    "application.yml",
    "application.yaml",
];

/// JVM framework a project targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    Spring,
    Quarkus,
    Micronaut,
    /// Plain JVM project with a recognized build descriptor but no
    /// framework markers
    Java,
    #[default]
    Unknown,
}

impl Framework {
    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::Spring => "spring",
            Framework::Quarkus => "quarkus",
            Framework::Micronaut => "micronaut",
            Framework::Java => "java",
            Framework::Unknown => "unknown",
        }
    }

    /// Default HTTP port for server frameworks; plain Java projects get
    /// no default because nothing says they listen at all.
    pub fn default_port(&self) -> Option<&'static str> {
        match self {
            Framework::Spring | Framework::Quarkus | Framework::Micronaut => Some("8080"),
            Framework::Java | Framework::Unknown => None,
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build tool in use, inferred from which descriptor file is present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BuildSystem {
    Maven,
    Gradle,
    #[default]
    Unknown,
}

impl BuildSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildSystem::Maven => "maven",
            BuildSystem::Gradle => "gradle",
            BuildSystem::Unknown => "unknown",
        }
    }
}

impl fmt::Display for BuildSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying one directory
///
/// Immutable once returned; consumers copy fields into manifest records.
/// Invariant: `detected == true` implies `framework != Unknown`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Detection {
    pub framework: Framework,
    pub build_system: BuildSystem,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub java_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    /// Raw dependency identifiers found in the build descriptor, in
    /// declaration order
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub dependencies: Vec<String>,
    /// Key/value pairs scraped from `application.*` config files
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub properties: HashMap<String, String>,
    /// True only when a positive signal was found; distinct from
    /// `Unknown`, which means classification ran and found nothing
    pub detected: bool,
}

impl Detection {
    /// Classification ran but found nothing
    pub fn none() -> Self {
        Self::default()
    }
}

/// A candidate file exists but could not be read
///
/// Absence of an evidence file is never an error; only permission or I/O
/// failures on files that exist surface this way.
#[derive(Debug, Error)]
#[error("failed to read evidence file {path}: {source}")]
pub struct EvidenceError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Read a candidate file, treating absence as `Ok(None)`
pub(crate) fn read_optional(
    fs: &dyn crate::fs::FileSystem,
    path: &Path,
) -> Result<Option<String>, EvidenceError> {
    match fs.read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(EvidenceError {
            path: path.to_path_buf(),
            source: err,
        }),
    }
}

/// Check build-file text for framework markers, in precedence order.
///
/// The quarkus > micronaut > spring order is a contract: it is what keeps
/// transitive Spring-compatible dependencies from winning.
pub(crate) fn marker_in(text: &str) -> Option<Framework> {
    if text.contains("quarkus") {
        Some(Framework::Quarkus)
    } else if text.contains("micronaut") {
        Some(Framework::Micronaut)
    } else if text.contains("springframework") || text.contains("spring-boot") {
        Some(Framework::Spring)
    } else {
        None
    }
}
