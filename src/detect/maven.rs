//! Maven descriptor scanning
//!
//! The pom is the one evidence file that gets structured tag extraction
//! instead of substring matching: parent coordinates and dependency
//! identifiers are short, well-defined XML paths, and pulling them out
//! precisely keeps the marker check from tripping on comments or URLs.
//! No POM inheritance or property interpolation is attempted.

use roxmltree::{Document, Node};

/// What a single pom.xml yields
#[derive(Debug, Default)]
pub(crate) struct PomScan {
    /// The file parsed and its root element is `<project>`
    pub valid: bool,
    /// `groupId:artifactId` of the `<parent>`, if declared
    pub parent: Option<String>,
    /// `groupId:artifactId` of every `<dependency>` element, in document
    /// order; includes `<dependencyManagement>` entries (platform BOMs
    /// are a framework signal too)
    pub dependencies: Vec<String>,
    /// Java release from `maven.compiler.source`, `maven.compiler.release`
    /// or `java.version`
    pub java_version: Option<String>,
}

pub(crate) fn scan_pom(content: &str) -> PomScan {
    let doc = match Document::parse(content) {
        Ok(doc) => doc,
        Err(_) => return PomScan::default(),
    };

    let root = doc.root_element();
    if root.tag_name().name() != "project" {
        return PomScan::default();
    }

    let mut scan = PomScan {
        valid: true,
        ..PomScan::default()
    };

    for child in root.children() {
        if child.has_tag_name("parent") {
            scan.parent = coordinates(&child);
        }
    }

    for node in root.descendants() {
        if node.has_tag_name("dependency") {
            if let Some(id) = coordinates(&node) {
                scan.dependencies.push(id);
            }
        }
    }

    scan.java_version = java_version(&doc);
    scan
}

/// Collect `groupId:artifactId` from the direct children of a node
fn coordinates(node: &Node) -> Option<String> {
    let mut group = None;
    let mut artifact = None;

    for child in node.children() {
        if child.has_tag_name("groupId") {
            group = child.text().map(str::trim);
        }
        if child.has_tag_name("artifactId") {
            artifact = child.text().map(str::trim);
        }
    }

    match (group, artifact) {
        (Some(g), Some(a)) => Some(format!("{}:{}", g, a)),
        (None, Some(a)) => Some(a.to_string()),
        _ => None,
    }
}

fn java_version(doc: &Document) -> Option<String> {
    for node in doc.descendants() {
        if node.has_tag_name("maven.compiler.source")
            || node.has_tag_name("java.version")
            || node.has_tag_name("maven.compiler.release")
        {
            if let Some(version) = node.text() {
                return Some(version.trim().to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUARKUS_POM: &str = r#"<?xml version="1.0"?>
<project>
    <groupId>com.example</groupId>
    <artifactId>orders</artifactId>
    <dependencyManagement>
        <dependencies>
            <dependency>
                <groupId>io.quarkus.platform</groupId>
                <artifactId>quarkus-bom</artifactId>
            </dependency>
        </dependencies>
    </dependencyManagement>
    <dependencies>
        <dependency>
            <groupId>io.quarkus</groupId>
            <artifactId>quarkus-resteasy</artifactId>
        </dependency>
    </dependencies>
</project>"#;

    #[test]
    fn test_scan_collects_dependencies() {
        let scan = scan_pom(QUARKUS_POM);
        assert!(scan.valid);
        assert_eq!(
            scan.dependencies,
            vec![
                "io.quarkus.platform:quarkus-bom".to_string(),
                "io.quarkus:quarkus-resteasy".to_string(),
            ]
        );
    }

    #[test]
    fn test_scan_parent_coordinates() {
        let pom = r#"<project>
            <parent>
                <groupId>org.springframework.boot</groupId>
                <artifactId>spring-boot-starter-parent</artifactId>
                <version>3.2.0</version>
            </parent>
            <artifactId>web-app</artifactId>
        </project>"#;
        let scan = scan_pom(pom);
        assert!(scan.valid);
        assert_eq!(
            scan.parent.as_deref(),
            Some("org.springframework.boot:spring-boot-starter-parent")
        );
        assert!(scan.dependencies.is_empty());
    }

    #[test]
    fn test_scan_java_version() {
        let pom = "<project><properties><java.version>17</java.version></properties></project>";
        assert_eq!(scan_pom(pom).java_version.as_deref(), Some("17"));

        let pom = "<project><properties><maven.compiler.release>21</maven.compiler.release></properties></project>";
        assert_eq!(scan_pom(pom).java_version.as_deref(), Some("21"));

        assert_eq!(scan_pom("<project/>").java_version, None);
    }

    #[test]
    fn test_malformed_pom_is_invalid() {
        let scan = scan_pom("<project><dependencies>");
        assert!(!scan.valid);
        assert!(scan.dependencies.is_empty());
    }

    #[test]
    fn test_non_project_root_is_invalid() {
        let scan = scan_pom("<settings><offline>true</offline></settings>");
        assert!(!scan.valid);
    }

    #[test]
    fn test_artifact_only_dependency() {
        let pom = r#"<project>
            <dependencies>
                <dependency><artifactId>mysql-connector-java</artifactId></dependency>
            </dependencies>
        </project>"#;
        let scan = scan_pom(pom);
        assert_eq!(scan.dependencies, vec!["mysql-connector-java".to_string()]);
    }
}
