//! Manifest data model and persistence
//!
//! The manifest is the single source of truth every downstream consumer
//! (renderers, CLI printers, the selection store) works from. A record is
//! polymorphic over two shapes: an *application* (has a `runtime`) or a
//! *dependent service* (has a `type`). Exactly one of the two must be
//! set; both or neither is rejected at load and at conversion time,
//! never silently corrected.

use crate::detect::{BuildSystem, Detection, Framework};
use crate::services::{ServiceConfig, ServiceKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

mod render;
mod store;

pub use render::{to_render_options, ConversionError, RenderOptions};
pub use store::ServiceStore;

/// Manifest errors
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Shape rule violated: a record must set exactly one of
    /// `runtime`/`type`
    #[error("service '{name}' (index {index}) must set exactly one of 'runtime' or 'type'")]
    InvalidShape { name: String, index: usize },

    #[error("failed to access manifest at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("manifest is not valid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Which of the two record shapes a service is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceShape {
    Application,
    Dependent,
}

/// One row of the manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ManifestService {
    pub name: String,

    // Application shape
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub java: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<BuildSystem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<Framework>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub dev_mode: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub watch_paths: Vec<String>,

    // Dependent shape
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ServiceKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    // Shared
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
}

impl ManifestService {
    /// Build an application record from a detection result
    pub fn from_detection(name: &str, path: &str, detection: &Detection) -> Self {
        Self {
            name: name.to_string(),
            path: Some(path.to_string()),
            java: detection.java_version.clone(),
            build: match detection.build_system {
                BuildSystem::Unknown => None,
                other => Some(other),
            },
            runtime: Some(detection.framework),
            port: detection.port.clone(),
            dev_mode: true,
            watch_paths: vec!["src/main".to_string()],
            ..Self::default()
        }
    }

    /// Build a dependent record from an inferred service
    pub fn from_service(config: &ServiceConfig) -> Self {
        Self {
            name: config.kind.as_str().to_string(),
            kind: Some(config.kind),
            version: Some(config.version.clone()),
            port: Some(config.port.clone()),
            env: config.env.clone(),
            ..Self::default()
        }
    }

    /// Classify the record shape, rejecting ambiguous or empty records
    pub fn shape(&self, index: usize) -> Result<ServiceShape, ManifestError> {
        match (&self.runtime, &self.kind) {
            (Some(_), None) => Ok(ServiceShape::Application),
            (None, Some(_)) => Ok(ServiceShape::Dependent),
            _ => Err(ManifestError::InvalidShape {
                name: self.name.clone(),
                index,
            }),
        }
    }
}

/// The persisted manifest document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Manifest {
    pub services: Vec<ManifestService>,
}

impl Manifest {
    /// Assemble a manifest from one detection pass
    pub fn from_detection(
        name: &str,
        path: &str,
        detection: &Detection,
        services: &[ServiceConfig],
    ) -> Self {
        let mut records = vec![ManifestService::from_detection(name, path, detection)];
        records.extend(services.iter().map(ManifestService::from_service));
        Self { services: records }
    }

    /// Load and validate a manifest file
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest: Manifest = serde_yaml::from_str(&content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Validate every record's shape
    pub fn validate(&self) -> Result<(), ManifestError> {
        for (index, service) in self.services.iter().enumerate() {
            service.shape(index)?;
        }
        Ok(())
    }

    /// Persist the manifest, write-then-rename so a crash never leaves a
    /// partial file behind
    pub fn save(&self, path: &Path) -> Result<(), ManifestError> {
        self.validate()?;
        let content = serde_yaml::to_string(self)?;

        let tmp = path.with_extension("yaml.tmp");
        let io_err = |source: io::Error| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        };
        std::fs::write(&tmp, content).map_err(io_err)?;
        std::fs::rename(&tmp, path).map_err(io_err)?;
        Ok(())
    }

    pub fn applications(&self) -> impl Iterator<Item = &ManifestService> {
        self.services.iter().filter(|s| s.runtime.is_some())
    }

    pub fn dependents(&self) -> impl Iterator<Item = &ManifestService> {
        self.services.iter().filter(|s| s.kind.is_some())
    }
}
