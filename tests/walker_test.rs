//! Repository walking tests

use javelin::scan::Walker;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn finds_services_at_multiple_depths() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "orders/pom.xml", "<project/>");
    write(dir.path(), "billing/build.gradle", "plugins {}\n");
    write(dir.path(), "platform/gateway/package.json", "{}");

    let services = Walker::new(3).walk(dir.path()).unwrap();
    let names: Vec<&str> = services.iter().map(|s| s.name.as_str()).collect();
    assert!(names.contains(&"orders"));
    assert!(names.contains(&"billing"));
    assert!(names.contains(&"gateway"));
    assert_eq!(services.len(), 3);
}

#[test]
fn results_are_sorted_by_path() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "zeta/pom.xml", "<project/>");
    write(dir.path(), "alpha/pom.xml", "<project/>");
    write(dir.path(), "mid/pom.xml", "<project/>");

    let services = Walker::new(2).walk(dir.path()).unwrap();
    let names: Vec<&str> = services.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "mid", "zeta"]);
}

#[test]
fn depth_limit_excludes_deep_services() {
    let dir = TempDir::new().unwrap();
    // Four path segments below the root: outside a depth-3 scan
    write(dir.path(), "a/b/c/deep/pom.xml", "<project/>");
    write(dir.path(), "shallow/pom.xml", "<project/>");

    let services = Walker::new(3).walk(dir.path()).unwrap();
    let names: Vec<&str> = services.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["shallow"]);

    let services = Walker::new(5).walk(dir.path()).unwrap();
    assert_eq!(services.len(), 2);
}

#[test]
fn nested_indicators_fold_into_the_root() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "orders/pom.xml", "<project/>");
    write(dir.path(), "orders/submodule/build.gradle", "plugins {}\n");

    let services = Walker::new(4).walk(dir.path()).unwrap();
    assert_eq!(services.len(), 1);
    assert_eq!(services[0].name, "orders");
}

#[test]
fn hidden_directories_are_skipped() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), ".cache/pom.xml", "<project/>");
    write(dir.path(), "visible/pom.xml", "<project/>");

    let services = Walker::new(3).walk(dir.path()).unwrap();
    let names: Vec<&str> = services.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["visible"]);
}

#[test]
fn classification_annotates_discovered_services() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "orders/pom.xml",
        "<project><dependencies><dependency><groupId>io.quarkus</groupId>\
         <artifactId>quarkus-resteasy</artifactId></dependency></dependencies></project>",
    );
    write(dir.path(), "docs/package.json", "{}");

    let services = Walker::new(3)
        .classify_frameworks(true)
        .walk(dir.path())
        .unwrap();
    let orders = services.iter().find(|s| s.name == "orders").unwrap();
    assert_eq!(orders.framework, "quarkus");
    let docs = services.iter().find(|s| s.name == "docs").unwrap();
    assert_eq!(docs.framework, "unknown");
}

#[test]
fn empty_tree_yields_empty_list() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("empty/nested")).unwrap();

    let services = Walker::new(3).walk(dir.path()).unwrap();
    assert!(services.is_empty());
}
