//! Recursive microservice discovery
//!
//! Walks a directory tree and reports every directory that looks like a
//! service root. The first indicator file found makes a directory a
//! root; everything underneath it is skipped so nested build modules are
//! never double counted. Depth is measured in path segments relative to
//! the scan root and branches past the limit are pruned before
//! classification.

use crate::detect::Classifier;
use anyhow::{Context, Result};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Files whose presence marks a directory as a service root. Coarse and
/// multi-language on purpose: discovery casts a wide net, framework
/// classification happens later and only for selected directories.
const INDICATOR_FILES: &[(&str, &str)] = &[
    ("pom.xml", "Maven project"),
    ("build.gradle", "Gradle project"),
    ("build.gradle.kts", "Gradle project (Kotlin DSL)"),
    ("package.json", "Node.js project"),
    ("requirements.txt", "Python project"),
    ("go.mod", "Go module"),
    ("Dockerfile", "Dockerized project"),
    ("docker-compose.yml", "Compose project"),
    ("application.properties", "JVM application config"),
    ("application.yml", "JVM application config"),
    ("application.yaml", "JVM application config"),
    ("quarkus.properties", "Quarkus config"),
    ("micronaut-application.yml", "Micronaut config"),
    ("angular.json", "Angular project"),
];

/// One discovered service candidate
#[derive(Debug, Clone)]
pub struct MicroserviceInfo {
    pub path: PathBuf,
    pub name: String,
    /// Lazily filled; stays "unknown" unless classification was requested
    pub framework: String,
    /// Human-readable evidence, for display only
    pub indicators: Vec<String>,
}

pub struct Walker {
    max_depth: usize,
    classify_frameworks: bool,
}

impl Walker {
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            classify_frameworks: false,
        }
    }

    /// Run the framework classifier on every discovered root. Off by
    /// default: callers usually classify only the directories the user
    /// actually selects.
    pub fn classify_frameworks(mut self, classify: bool) -> Self {
        self.classify_frameworks = classify;
        self
    }

    pub fn walk(&self, root: &Path) -> Result<Vec<MicroserviceInfo>> {
        let root = root
            .canonicalize()
            .with_context(|| format!("scan root does not exist: {}", root.display()))?;

        info!(root = %root.display(), max_depth = self.max_depth, "scanning for microservices");

        let mut services: Vec<MicroserviceInfo> = Vec::new();
        let classifier = Classifier::new();

        for result in WalkBuilder::new(&root)
            .max_depth(Some(self.max_depth))
            .hidden(true)
            .git_ignore(true)
            // Deterministic order; also guarantees parents come before
            // their children so root pruning works
            .sort_by_file_name(|a, b| a.cmp(b))
            .build()
        {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(error = %err, "failed to read directory entry");
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|t| t.is_dir()) {
                continue;
            }
            let dir = entry.path();

            // Parents are visited before children, so any ancestor that
            // is already a root prunes this whole branch
            if services.iter().any(|s| dir.starts_with(&s.path) && dir != s.path) {
                continue;
            }

            let indicators = indicators_in(dir);
            if indicators.is_empty() {
                continue;
            }

            let name = dir
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| root.display().to_string());

            let framework = if self.classify_frameworks {
                match classifier.classify(dir) {
                    Ok(detection) => detection.framework.as_str().to_string(),
                    Err(err) => {
                        warn!(dir = %dir.display(), error = %err, "classification failed, leaving framework unknown");
                        "unknown".to_string()
                    }
                }
            } else {
                "unknown".to_string()
            };

            debug!(dir = %dir.display(), ?indicators, "found service root");
            services.push(MicroserviceInfo {
                path: dir.to_path_buf(),
                name,
                framework,
                indicators,
            });
        }

        info!(found = services.len(), "microservice scan finished");
        Ok(services)
    }
}

fn indicators_in(dir: &Path) -> Vec<String> {
    INDICATOR_FILES
        .iter()
        .filter(|(file, _)| dir.join(file).is_file())
        .map(|(file, label)| format!("{} ({})", label, file))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn mkservice(root: &Path, rel: &str, indicator: &str) {
        let dir = root.join(rel);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(indicator), "").unwrap();
    }

    #[test]
    fn test_finds_service_roots() {
        let dir = TempDir::new().unwrap();
        mkservice(dir.path(), "orders", "pom.xml");
        mkservice(dir.path(), "billing", "build.gradle");
        fs::create_dir_all(dir.path().join("docs")).unwrap();

        let mut services = Walker::new(3).walk(dir.path()).unwrap();
        services.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(services.len(), 2);
        assert_eq!(services[0].name, "billing");
        assert_eq!(services[1].name, "orders");
        assert_eq!(services[1].framework, "unknown");
        assert!(services[1].indicators[0].contains("pom.xml"));
    }

    #[test]
    fn test_nested_modules_are_not_double_counted() {
        let dir = TempDir::new().unwrap();
        mkservice(dir.path(), "orders", "pom.xml");
        // Maven submodule under the root: must be swallowed
        mkservice(dir.path(), "orders/core", "pom.xml");
        mkservice(dir.path(), "orders/api", "pom.xml");

        let services = Walker::new(5).walk(dir.path()).unwrap();
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].name, "orders");
    }

    #[test]
    fn test_depth_pruning() {
        let dir = TempDir::new().unwrap();
        // Service at segment depth 4 with a limit of 3: excluded
        mkservice(dir.path(), "a/b/c/deep-service", "pom.xml");
        mkservice(dir.path(), "shallow", "pom.xml");

        let services = Walker::new(3).walk(dir.path()).unwrap();
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].name, "shallow");
    }

    #[test]
    fn test_root_itself_can_be_a_service() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("build.gradle"), "").unwrap();
        mkservice(dir.path(), "sub", "pom.xml");

        let services = Walker::new(3).walk(dir.path()).unwrap();
        // Root is a service root, so the nested dir is skipped
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].path, dir.path().canonicalize().unwrap());
    }

    #[test]
    fn test_optional_classification() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("orders")).unwrap();
        fs::write(
            dir.path().join("orders/pom.xml"),
            "<project><dependencies><dependency><groupId>io.quarkus</groupId><artifactId>quarkus-arc</artifactId></dependency></dependencies></project>",
        )
        .unwrap();

        let services = Walker::new(3)
            .classify_frameworks(true)
            .walk(dir.path())
            .unwrap();
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].framework, "quarkus");
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(Walker::new(3).walk(&missing).is_err());
    }
}
