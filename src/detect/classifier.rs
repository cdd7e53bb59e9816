//! The priority-ordered framework classifier
//!
//! Evidence sources are tried in a fixed order and the first positive
//! signal wins:
//!
//! 1. Maven descriptor (structured tag extraction)
//! 2. Gradle script (raw substring scan)
//! 3. `application.*` config keys (quarkus/micronaut only)
//! 4. Java source imports
//! 5. weak `spring.*` config keys
//!
//! Build-file signals outrank config keys, which outrank source imports:
//! build declarations are the most authoritative evidence and the
//! cheapest to check. The scan is read-only and idempotent.

use crate::detect::config::{framework_from_keys, port_from, scrape_properties, scrape_yaml, spring_keys_present};
use crate::detect::gradle::scan_gradle;
use crate::detect::maven::scan_pom;
use crate::detect::sources::scan_sources;
use crate::detect::{
    marker_in, read_optional, BuildSystem, Detection, EvidenceError, Framework, CONFIG_FILES,
};
use crate::fs::{FileSystem, StdFileSystem};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

const GRADLE_FILES: &[&str] = &["build.gradle", "build.gradle.kts"];

pub struct Classifier {
    fs: Arc<dyn FileSystem>,
}

impl Classifier {
    pub fn new() -> Self {
        Self::with_fs(Arc::new(StdFileSystem))
    }

    pub fn with_fs(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Classify one project directory.
    ///
    /// Never fails on missing evidence; a directory with no recognized
    /// files yields `detected = false`. The only error is an evidence
    /// file that exists but cannot be read.
    pub fn classify(&self, dir: &Path) -> Result<Detection, EvidenceError> {
        let properties = self.scrape_config(dir)?;

        // 1. Maven descriptor
        if let Some(pom) = read_optional(self.fs.as_ref(), &dir.join("pom.xml"))? {
            let scan = scan_pom(&pom);
            if scan.valid {
                let mut haystack = scan.dependencies.join("\n");
                if let Some(parent) = &scan.parent {
                    haystack.push('\n');
                    haystack.push_str(parent);
                }
                let framework = marker_in(&haystack).unwrap_or(Framework::Java);
                debug!(dir = %dir.display(), %framework, "classified from pom.xml");
                return Ok(self.detection(
                    framework,
                    BuildSystem::Maven,
                    scan.java_version,
                    scan.dependencies,
                    properties,
                ));
            }
            // Unparseable pom: fall back to a raw substring scan. The
            // descriptor's presence still pins the build system when a
            // marker is found; otherwise weaker evidence gets its turn.
            if let Some(framework) = marker_in(&pom) {
                debug!(dir = %dir.display(), %framework, "classified from malformed pom.xml text");
                return Ok(self.detection(
                    framework,
                    BuildSystem::Maven,
                    None,
                    Vec::new(),
                    properties,
                ));
            }
        }

        // 2. Gradle script
        for name in GRADLE_FILES {
            if let Some(script) = read_optional(self.fs.as_ref(), &dir.join(name))? {
                let framework = marker_in(&script).unwrap_or(Framework::Java);
                let scan = scan_gradle(&script);
                debug!(dir = %dir.display(), %framework, script = name, "classified from gradle script");
                return Ok(self.detection(
                    framework,
                    BuildSystem::Gradle,
                    scan.java_version,
                    scan.dependencies,
                    properties,
                ));
            }
        }

        // 3. Config keys (strong signals only)
        if let Some(framework) = framework_from_keys(&properties) {
            debug!(dir = %dir.display(), %framework, "classified from config keys");
            return Ok(self.detection(
                framework,
                BuildSystem::Unknown,
                None,
                Vec::new(),
                properties,
            ));
        }

        // 4. Source imports
        let sources = scan_sources(self.fs.as_ref(), dir)?;
        if let Some(framework) = sources.framework() {
            debug!(dir = %dir.display(), %framework, "classified from source imports");
            return Ok(self.detection(
                framework,
                BuildSystem::Unknown,
                None,
                Vec::new(),
                properties,
            ));
        }

        // 5. Weak spring.* keys, only once everything else came up empty
        if spring_keys_present(&properties) {
            debug!(dir = %dir.display(), "classified from weak spring config keys");
            return Ok(self.detection(
                Framework::Spring,
                BuildSystem::Unknown,
                None,
                Vec::new(),
                properties,
            ));
        }

        Ok(Detection {
            properties,
            ..Detection::none()
        })
    }

    fn detection(
        &self,
        framework: Framework,
        build_system: BuildSystem,
        java_version: Option<String>,
        dependencies: Vec<String>,
        properties: HashMap<String, String>,
    ) -> Detection {
        let port = port_from(&properties)
            .or_else(|| framework.default_port().map(str::to_string));
        Detection {
            framework,
            build_system,
            java_version,
            port,
            dependencies,
            properties,
            detected: true,
        }
    }

    /// Merge key/value pairs from every config file present; the first
    /// file in lookup order wins on key collisions.
    fn scrape_config(&self, dir: &Path) -> Result<HashMap<String, String>, EvidenceError> {
        let mut merged = HashMap::new();
        for name in CONFIG_FILES {
            let Some(content) = read_optional(self.fs.as_ref(), &dir.join(name))? else {
                continue;
            };
            let scraped = if name.ends_with(".properties") {
                scrape_properties(&content)
            } else {
                scrape_yaml(&content)
            };
            for (key, value) in scraped {
                merged.entry(key).or_insert(value);
            }
        }
        Ok(merged)
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}
