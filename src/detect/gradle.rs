//! Gradle script scanning
//!
//! Gradle build scripts are a Turing-complete DSL, so no structural parse
//! is attempted: markers are substring matches over the raw text, and
//! dependency identifiers / the Java toolchain version come from narrow
//! regexes over common declaration shapes. Works for both the Groovy and
//! Kotlin DSL variants.

use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Default)]
pub(crate) struct GradleScan {
    /// Quoted dependency notations (`group:artifact:version`) found in
    /// declaration order
    pub dependencies: Vec<String>,
    pub java_version: Option<String>,
}

fn dependency_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?m)^\s*(?:implementation|api|compileOnly|runtimeOnly|annotationProcessor|testImplementation)\s*\(?\s*["']([^"']+)["']"#,
        )
        .expect("valid dependency regex")
    })
}

fn java_version_res() -> &'static [Regex; 3] {
    static RES: OnceLock<[Regex; 3]> = OnceLock::new();
    RES.get_or_init(|| {
        [
            Regex::new(r"JavaLanguageVersion\.of\((\d+)\)").expect("valid toolchain regex"),
            Regex::new(r#"sourceCompatibility\s*=?\s*["']?(?:JavaVersion\.VERSION_)?(\d+)"#)
                .expect("valid sourceCompatibility regex"),
            Regex::new(r#"(?m)^\s*java\.sourceCompatibility\s*=\s*JavaVersion\.VERSION_(\d+)"#)
                .expect("valid kts sourceCompatibility regex"),
        ]
    })
}

pub(crate) fn scan_gradle(content: &str) -> GradleScan {
    let dependencies = dependency_re()
        .captures_iter(content)
        .map(|c| c[1].to_string())
        .collect();

    let java_version = java_version_res()
        .iter()
        .find_map(|re| re.captures(content).map(|c| c[1].to_string()));

    GradleScan {
        dependencies,
        java_version,
    }
}
