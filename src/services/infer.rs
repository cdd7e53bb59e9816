//! Dependent-service inference
//!
//! Two independent sub-scans feed one de-duplicated result set:
//!
//! - config files are checked for connection-string markers
//!   (`jdbc:mysql`, `mongodb://`, ...)
//! - build files are lower-cased and checked for driver/client keywords
//!
//! The first occurrence of a service kind wins; a later sub-scan never
//! re-adds or overwrites it. The build-file scan is a blunt substring
//! match over the whole file, which over-reports on purpose: a missed
//! database hurts far more than a spurious compose entry the user
//! deletes, so recall is favored over precision and every result is a
//! suggestion.

use crate::detect::{read_optional, EvidenceError, CONFIG_FILES};
use crate::fs::{FileSystem, StdFileSystem};
use crate::services::{ServiceConfig, ServiceKind};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

const BUILD_FILES: &[&str] = &["pom.xml", "build.gradle", "build.gradle.kts"];

/// Connection-string markers looked for in config files. The URI is a
/// presence signal only; host/port/database are never parsed out of it.
const CONFIG_MARKERS: &[(&str, ServiceKind)] = &[
    ("jdbc:mysql", ServiceKind::Mysql),
    ("jdbc:postgresql", ServiceKind::Postgres),
    ("mongodb://", ServiceKind::Mongodb),
    ("redis://", ServiceKind::Redis),
    ("spring.redis", ServiceKind::Redis),
];

/// Driver/client keywords matched against lower-cased build-file text
const BUILD_KEYWORDS: &[(&str, ServiceKind)] = &[
    ("mysql", ServiceKind::Mysql),
    ("postgresql", ServiceKind::Postgres),
    ("postgres", ServiceKind::Postgres),
    ("mongodb", ServiceKind::Mongodb),
    ("redis", ServiceKind::Redis),
    ("kafka", ServiceKind::Kafka),
    ("rabbitmq", ServiceKind::Rabbitmq),
    ("elasticsearch", ServiceKind::Elasticsearch),
];

/// Result of an inference pass
///
/// A failed sub-scan aborts only itself; whatever the sibling sub-scans
/// found is still here, with the failures alongside so the caller can
/// decide whether a partial result is acceptable.
#[derive(Debug, Default)]
pub struct Inference {
    /// At most one entry per [`ServiceKind`]
    pub services: Vec<ServiceConfig>,
    pub errors: Vec<EvidenceError>,
}

impl Inference {
    fn push_unique(&mut self, kind: ServiceKind) {
        if !self.services.iter().any(|s| s.kind == kind) {
            self.services.push(ServiceConfig::with_defaults(kind));
        }
    }
}

pub struct Inferencer {
    fs: Arc<dyn FileSystem>,
}

impl Inferencer {
    pub fn new() -> Self {
        Self::with_fs(Arc::new(StdFileSystem))
    }

    pub fn with_fs(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Infer backing services for one project directory.
    ///
    /// Missing files are skipped silently; unreadable ones are recorded
    /// in [`Inference::errors`] without aborting the pass.
    pub fn infer(&self, dir: &Path) -> Inference {
        let mut inference = Inference::default();
        self.scan_config_files(dir, &mut inference);
        self.scan_build_files(dir, &mut inference);

        debug!(
            dir = %dir.display(),
            services = inference.services.len(),
            errors = inference.errors.len(),
            "service inference finished"
        );
        inference
    }

    fn scan_config_files(&self, dir: &Path, inference: &mut Inference) {
        for name in CONFIG_FILES {
            let content = match read_optional(self.fs.as_ref(), &dir.join(name)) {
                Ok(Some(content)) => content,
                Ok(None) => continue,
                Err(err) => {
                    inference.errors.push(err);
                    return;
                }
            };
            for (marker, kind) in CONFIG_MARKERS {
                if content.contains(marker) {
                    inference.push_unique(*kind);
                }
            }
        }
    }

    fn scan_build_files(&self, dir: &Path, inference: &mut Inference) {
        for name in BUILD_FILES {
            let content = match read_optional(self.fs.as_ref(), &dir.join(name)) {
                Ok(Some(content)) => content.to_lowercase(),
                Ok(None) => continue,
                Err(err) => {
                    inference.errors.push(err);
                    return;
                }
            };
            for (keyword, kind) in BUILD_KEYWORDS {
                if content.contains(keyword) {
                    inference.push_unique(*kind);
                }
            }
        }
    }
}

impl Default for Inferencer {
    fn default() -> Self {
        Self::new()
    }
}
