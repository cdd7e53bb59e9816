//! Manifest record to renderer options conversion
//!
//! Only application records can be rendered into a buildable image.
//! Asking for render options on a dependent record is a caller bug and
//! surfaces as an explicit error, never an empty result.

use crate::detect::{BuildSystem, Framework};
use crate::manifest::ManifestService;
use thiserror::Error;

/// JDK used when the record does not pin one
const DEFAULT_JDK: &str = "17";

#[derive(Debug, Error)]
pub enum ConversionError {
    /// The record is a dependent service; there is nothing to build
    #[error("service '{0}' is a dependent service and cannot be rendered as an application image")]
    DependentService(String),

    /// The record has neither shape
    #[error("service '{0}' has neither a runtime nor a type")]
    MissingRuntime(String),
}

/// Everything the renderers need to emit scaffolding for one application
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub name: String,
    pub framework: Framework,
    pub build: BuildSystem,
    pub jdk_version: String,
    pub port: Option<String>,
    pub path: String,
    pub dev_mode: bool,
}

/// Convert an application-shape record into render options
pub fn to_render_options(service: &ManifestService) -> Result<RenderOptions, ConversionError> {
    let Some(runtime) = service.runtime else {
        return Err(if service.kind.is_some() {
            ConversionError::DependentService(service.name.clone())
        } else {
            ConversionError::MissingRuntime(service.name.clone())
        });
    };

    Ok(RenderOptions {
        name: service.name.clone(),
        framework: runtime,
        build: service.build.unwrap_or(BuildSystem::Maven),
        jdk_version: service
            .java
            .clone()
            .unwrap_or_else(|| DEFAULT_JDK.to_string()),
        port: service.port.clone(),
        path: service.path.clone().unwrap_or_else(|| ".".to_string()),
        dev_mode: service.dev_mode,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ServiceKind;

    #[test]
    fn test_application_record_converts() {
        let record = ManifestService {
            name: "orders".to_string(),
            runtime: Some(Framework::Spring),
            build: Some(BuildSystem::Gradle),
            java: Some("21".to_string()),
            path: Some("./orders".to_string()),
            port: Some("8080".to_string()),
            dev_mode: true,
            ..ManifestService::default()
        };

        let opts = to_render_options(&record).unwrap();
        assert_eq!(opts.name, "orders");
        assert_eq!(opts.framework, Framework::Spring);
        assert_eq!(opts.build, BuildSystem::Gradle);
        assert_eq!(opts.jdk_version, "21");
        assert_eq!(opts.path, "./orders");
        assert!(opts.dev_mode);
    }

    #[test]
    fn test_jdk_defaults_to_17() {
        let record = ManifestService {
            name: "orders".to_string(),
            runtime: Some(Framework::Quarkus),
            ..ManifestService::default()
        };
        assert_eq!(to_render_options(&record).unwrap().jdk_version, "17");
    }

    #[test]
    fn test_dependent_record_is_rejected() {
        let record = ManifestService {
            name: "mysql".to_string(),
            kind: Some(ServiceKind::Mysql),
            ..ManifestService::default()
        };

        let err = to_render_options(&record).unwrap_err();
        assert!(matches!(err, ConversionError::DependentService(_)));
        assert!(err.to_string().contains("mysql"));
    }

    #[test]
    fn test_same_record_with_runtime_succeeds() {
        // The dependent record from the previous test, re-shaped as an
        // application, must convert
        let record = ManifestService {
            name: "mysql".to_string(),
            runtime: Some(Framework::Spring),
            ..ManifestService::default()
        };
        assert!(to_render_options(&record).is_ok());
    }

    #[test]
    fn test_empty_record_is_rejected() {
        let record = ManifestService {
            name: "empty".to_string(),
            ..ManifestService::default()
        };
        assert!(matches!(
            to_render_options(&record).unwrap_err(),
            ConversionError::MissingRuntime(_)
        ));
    }
}
