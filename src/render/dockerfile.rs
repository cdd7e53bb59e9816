//! Dockerfile generation
//!
//! Multi-stage build: a Maven/Gradle builder stage on a JDK image, a JRE
//! runtime stage that only carries the built jar. Quarkus lays out its
//! runnable jar differently from the single-fat-jar frameworks, so the
//! copy step is per-framework.

use crate::detect::{BuildSystem, Framework};
use crate::manifest::RenderOptions;

pub fn render_dockerfile(opts: &RenderOptions) -> String {
    let jdk = &opts.jdk_version;

    let (builder_image, build_command) = match opts.build {
        BuildSystem::Gradle => (
            format!("gradle:8.5-jdk{}", jdk),
            "gradle build -x test".to_string(),
        ),
        // Maven is also the fallback for records that never learned
        // their build system
        _ => (
            format!("maven:3.9-eclipse-temurin-{}", jdk),
            "mvn clean package -DskipTests".to_string(),
        ),
    };

    let copy_artifact = artifact_copy(opts.framework, opts.build);

    let mut out = String::new();
    out.push_str(&format!("# Build stage\nFROM {} AS build\n", builder_image));
    out.push_str("WORKDIR /app\nCOPY . .\n");
    out.push_str(&format!("RUN {}\n\n", build_command));
    out.push_str(&format!(
        "# Runtime stage\nFROM eclipse-temurin:{}-jre\nWORKDIR /app\n",
        jdk
    ));
    out.push_str(&copy_artifact);
    if let Some(port) = &opts.port {
        out.push_str(&format!("EXPOSE {}\n", port));
    }
    out.push_str("ENTRYPOINT [\"java\", \"-jar\", \"app.jar\"]\n");
    out
}

fn artifact_copy(framework: Framework, build: BuildSystem) -> String {
    let target = match build {
        BuildSystem::Gradle => "build/libs",
        _ => "target",
    };
    match framework {
        Framework::Quarkus => format!(
            "COPY --from=build /app/{}/quarkus-app/ ./\nRUN ln -s quarkus-run.jar app.jar\n",
            target
        ),
        _ => format!("COPY --from=build /app/{}/*.jar app.jar\n", target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(framework: Framework, build: BuildSystem) -> RenderOptions {
        RenderOptions {
            name: "orders".to_string(),
            framework,
            build,
            jdk_version: "17".to_string(),
            port: Some("8080".to_string()),
            path: ".".to_string(),
            dev_mode: true,
        }
    }

    #[test]
    fn test_maven_spring_dockerfile() {
        let text = render_dockerfile(&opts(Framework::Spring, BuildSystem::Maven));
        assert!(text.contains("FROM maven:3.9-eclipse-temurin-17 AS build"));
        assert!(text.contains("mvn clean package -DskipTests"));
        assert!(text.contains("FROM eclipse-temurin:17-jre"));
        assert!(text.contains("COPY --from=build /app/target/*.jar app.jar"));
        assert!(text.contains("EXPOSE 8080"));
    }

    #[test]
    fn test_gradle_builder_image() {
        let text = render_dockerfile(&opts(Framework::Micronaut, BuildSystem::Gradle));
        assert!(text.contains("FROM gradle:8.5-jdk17 AS build"));
        assert!(text.contains("gradle build -x test"));
        assert!(text.contains("build/libs"));
    }

    #[test]
    fn test_quarkus_artifact_layout() {
        let text = render_dockerfile(&opts(Framework::Quarkus, BuildSystem::Maven));
        assert!(text.contains("quarkus-app"));
        assert!(text.contains("quarkus-run.jar"));
    }

    #[test]
    fn test_no_expose_without_port() {
        let mut o = opts(Framework::Java, BuildSystem::Maven);
        o.port = None;
        let text = render_dockerfile(&o);
        assert!(!text.contains("EXPOSE"));
    }

    #[test]
    fn test_jdk_version_substituted() {
        let mut o = opts(Framework::Spring, BuildSystem::Maven);
        o.jdk_version = "21".to_string();
        let text = render_dockerfile(&o);
        assert!(text.contains("eclipse-temurin-21"));
        assert!(text.contains("eclipse-temurin:21-jre"));
    }
}
