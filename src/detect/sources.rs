//! Java source scanning
//!
//! Last-resort evidence: when a directory has neither a build descriptor
//! nor framework config keys, import statements under the conventional
//! source root still identify the framework. Conventional class-name
//! suffixes (`*Controller.java`, `*Resource.java`, ...) corroborate a hit
//! but are never sufficient on their own.

use crate::detect::{EvidenceError, Framework};
use crate::fs::{FileSystem, FileType};
use std::path::Path;
use tracing::debug;

const SOURCE_ROOTS: &[&str] = &["src/main/java", "src"];

const CONVENTIONAL_SUFFIXES: &[&str] = &[
    "Controller.java",
    "Resource.java",
    "Client.java",
    "Factory.java",
];

// Keeps a degenerate layout from turning the scan into a crawl
const MAX_SOURCE_FILES: usize = 500;

#[derive(Debug, Default)]
pub(crate) struct SourceScan {
    pub quarkus: bool,
    pub micronaut: bool,
    pub spring: bool,
    pub conventional_names: bool,
}

impl SourceScan {
    /// Resolve the import signals in precedence order
    pub fn framework(&self) -> Option<Framework> {
        if self.quarkus {
            Some(Framework::Quarkus)
        } else if self.micronaut {
            Some(Framework::Micronaut)
        } else if self.spring {
            Some(Framework::Spring)
        } else {
            None
        }
    }
}

pub(crate) fn scan_sources(
    fs: &dyn FileSystem,
    project_dir: &Path,
) -> Result<SourceScan, EvidenceError> {
    let mut scan = SourceScan::default();

    let Some(root) = SOURCE_ROOTS
        .iter()
        .map(|r| project_dir.join(r))
        .find(|p| fs.is_dir(p))
    else {
        return Ok(scan);
    };

    let mut visited = 0usize;
    walk_java(fs, &root, &mut scan, &mut visited)?;

    if scan.conventional_names && scan.framework().is_some() {
        debug!(
            root = %root.display(),
            "conventional class names corroborate import-based detection"
        );
    }

    Ok(scan)
}

fn walk_java(
    fs: &dyn FileSystem,
    dir: &Path,
    scan: &mut SourceScan,
    visited: &mut usize,
) -> Result<(), EvidenceError> {
    let entries = match fs.read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(err) => {
            return Err(EvidenceError {
                path: dir.to_path_buf(),
                source: err,
            })
        }
    };

    for entry in entries {
        if *visited >= MAX_SOURCE_FILES {
            return Ok(());
        }
        match entry.file_type() {
            FileType::Directory => walk_java(fs, entry.path(), scan, visited)?,
            FileType::File if entry.file_name().ends_with(".java") => {
                *visited += 1;
                if CONVENTIONAL_SUFFIXES
                    .iter()
                    .any(|s| entry.file_name().ends_with(s))
                {
                    scan.conventional_names = true;
                }

                let content = fs.read_to_string(entry.path()).map_err(|err| EvidenceError {
                    path: entry.path().to_path_buf(),
                    source: err,
                })?;
                inspect_imports(&content, scan);
            }
            _ => {}
        }
    }
    Ok(())
}

fn inspect_imports(content: &str, scan: &mut SourceScan) {
    for line in content.lines() {
        let line = line.trim_start();
        if !line.starts_with("import ") {
            continue;
        }
        if line.contains("io.quarkus.") {
            scan.quarkus = true;
        } else if line.contains("io.micronaut.") {
            scan.micronaut = true;
        } else if line.contains("org.springframework.") {
            scan.spring = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::StdFileSystem;
    use std::fs;
    use tempfile::TempDir;

    fn write_source(dir: &TempDir, rel: &str, content: &str) {
        let path = dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_spring_imports_detected() {
        let dir = TempDir::new().unwrap();
        write_source(
            &dir,
            "src/main/java/com/example/OrderController.java",
            "package com.example;\nimport org.springframework.web.bind.annotation.RestController;\npublic class OrderController {}\n",
        );

        let scan = scan_sources(&StdFileSystem, dir.path()).unwrap();
        assert!(scan.spring);
        assert!(scan.conventional_names);
        assert_eq!(scan.framework(), Some(Framework::Spring));
    }

    #[test]
    fn test_quarkus_beats_spring_imports() {
        let dir = TempDir::new().unwrap();
        write_source(
            &dir,
            "src/main/java/A.java",
            "import org.springframework.core.Ordered;\n",
        );
        write_source(
            &dir,
            "src/main/java/B.java",
            "import io.quarkus.runtime.Startup;\n",
        );

        let scan = scan_sources(&StdFileSystem, dir.path()).unwrap();
        assert_eq!(scan.framework(), Some(Framework::Quarkus));
    }

    #[test]
    fn test_conventional_names_alone_decide_nothing() {
        let dir = TempDir::new().unwrap();
        write_source(
            &dir,
            "src/main/java/WidgetFactory.java",
            "public class WidgetFactory {}\n",
        );

        let scan = scan_sources(&StdFileSystem, dir.path()).unwrap();
        assert!(scan.conventional_names);
        assert_eq!(scan.framework(), None);
    }

    #[test]
    fn test_no_source_root() {
        let dir = TempDir::new().unwrap();
        let scan = scan_sources(&StdFileSystem, dir.path()).unwrap();
        assert_eq!(scan.framework(), None);
        assert!(!scan.conventional_names);
    }

    #[test]
    fn test_non_import_mentions_ignored() {
        let dir = TempDir::new().unwrap();
        write_source(
            &dir,
            "src/main/java/Doc.java",
            "// see org.springframework.boot docs\npublic class Doc {}\n",
        );

        let scan = scan_sources(&StdFileSystem, dir.path()).unwrap();
        assert_eq!(scan.framework(), None);
    }
}
