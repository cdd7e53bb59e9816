//! Command handlers
//!
//! Each handler turns parsed arguments into engine calls and an exit
//! code. Presentation decisions (what to print, how loud to be) live
//! here; the engine itself only ever returns values and errors.

use crate::cli::commands::{DetectArgs, DoctorArgs, InitArgs, ScanArgs};
use crate::cli::output::{DetectReport, OutputFormatter};
use crate::detect::Classifier;
use crate::manifest::Manifest;
use crate::render::{render_compose, render_dockerfile, render_tiltfile};
use crate::services::Inferencer;
use crate::tools;
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const MANIFEST_FILE: &str = "javelin.yaml";

pub fn handle_detect(args: &DetectArgs) -> i32 {
    let dir = project_dir(&args.project_path);
    match run_detect(&dir) {
        Ok(report) => {
            let formatter = OutputFormatter::new(args.format.into());
            match formatter.format_detect(&report) {
                Ok(text) => {
                    println!("{}", text);
                    0
                }
                Err(err) => {
                    eprintln!("Error: {:#}", err);
                    1
                }
            }
        }
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    }
}

fn run_detect(dir: &Path) -> Result<DetectReport> {
    let detection = Classifier::new()
        .classify(dir)
        .with_context(|| format!("failed to classify {}", dir.display()))?;

    let inference = Inferencer::new().infer(dir);
    for err in &inference.errors {
        warn!(error = %err, "partial service inference");
        eprintln!("Warning: {}", err);
    }

    Ok(DetectReport {
        detection,
        services: inference.services,
    })
}

pub fn handle_scan(args: &ScanArgs) -> i32 {
    let root = project_dir(&args.root);
    let walker = crate::scan::Walker::new(args.depth).classify_frameworks(args.classify);

    match walker.walk(&root) {
        Ok(services) => {
            let formatter = OutputFormatter::new(args.format.into());
            match formatter.format_scan(&services) {
                Ok(text) => {
                    println!("{}", text);
                    0
                }
                Err(err) => {
                    eprintln!("Error: {:#}", err);
                    1
                }
            }
        }
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    }
}

pub fn handle_init(args: &InitArgs) -> i32 {
    let dir = project_dir(&args.project_path);
    match run_init(&dir, args) {
        Ok(()) => {
            println!("Scaffolding written to {}", dir.display());
            0
        }
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    }
}

fn run_init(dir: &Path, args: &InitArgs) -> Result<()> {
    let report = run_detect(dir)?;
    if !report.detection.detected {
        bail!(
            "no recognized framework in {}; nothing to scaffold",
            dir.display()
        );
    }

    let name = args
        .name
        .clone()
        .or_else(|| {
            dir.canonicalize()
                .ok()?
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
        })
        .unwrap_or_else(|| "app".to_string());

    let manifest = Manifest::from_detection(&name, ".", &report.detection, &report.services);

    let outputs: &[(&str, String)] = &[
        (
            "Dockerfile",
            render_dockerfile(&crate::manifest::to_render_options(&manifest.services[0])?),
        ),
        ("docker-compose.yml", render_compose(&manifest)?),
        ("Tiltfile", render_tiltfile(&manifest)?),
    ];

    for (file, _) in outputs {
        let path = dir.join(file);
        if path.exists() && !args.force {
            bail!("{} already exists (use --force to overwrite)", path.display());
        }
    }

    for (file, content) in outputs {
        let path = dir.join(file);
        std::fs::write(&path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(file = %path.display(), "wrote scaffolding file");
    }

    let manifest_path = dir.join(MANIFEST_FILE);
    if manifest_path.exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            manifest_path.display()
        );
    }
    manifest
        .save(&manifest_path)
        .with_context(|| format!("failed to write {}", manifest_path.display()))?;
    info!(file = %manifest_path.display(), "wrote manifest");

    Ok(())
}

pub fn handle_doctor(args: &DoctorArgs) -> i32 {
    let statuses = tools::check_all();
    let formatter = OutputFormatter::new(args.format.into());

    match formatter.format_doctor(&statuses) {
        Ok(text) => {
            println!("{}", text);
            if tools::all_required_available(&statuses) {
                0
            } else {
                1
            }
        }
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    }
}

fn project_dir(arg: &Option<PathBuf>) -> PathBuf {
    arg.clone().unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::OutputFormatArg;
    use std::fs;
    use tempfile::TempDir;

    fn spring_project() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("pom.xml"),
            "<project><dependencies><dependency><groupId>org.springframework.boot</groupId>\
             <artifactId>spring-boot-starter-web</artifactId></dependency>\
             <dependency><artifactId>mysql-connector-java</artifactId></dependency>\
             </dependencies></project>",
        )
        .unwrap();
        dir
    }

    #[test]
    fn test_run_detect_full_report() {
        let dir = spring_project();
        let report = run_detect(dir.path()).unwrap();
        assert!(report.detection.detected);
        assert_eq!(report.services.len(), 1);
    }

    #[test]
    fn test_run_init_writes_scaffolding() {
        let dir = spring_project();
        let args = InitArgs {
            project_path: Some(dir.path().to_path_buf()),
            name: Some("orders".to_string()),
            force: false,
        };
        run_init(dir.path(), &args).unwrap();

        assert!(dir.path().join("Dockerfile").exists());
        assert!(dir.path().join("docker-compose.yml").exists());
        assert!(dir.path().join("Tiltfile").exists());

        let manifest = Manifest::load(&dir.path().join(MANIFEST_FILE)).unwrap();
        assert_eq!(manifest.applications().count(), 1);
        assert_eq!(manifest.dependents().count(), 1);
    }

    #[test]
    fn test_run_init_refuses_to_overwrite() {
        let dir = spring_project();
        fs::write(dir.path().join("Dockerfile"), "FROM scratch\n").unwrap();

        let args = InitArgs {
            project_path: Some(dir.path().to_path_buf()),
            name: None,
            force: false,
        };
        let err = run_init(dir.path(), &args).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        // Existing file untouched
        assert_eq!(
            fs::read_to_string(dir.path().join("Dockerfile")).unwrap(),
            "FROM scratch\n"
        );
    }

    #[test]
    fn test_run_init_rejects_unknown_project() {
        let dir = TempDir::new().unwrap();
        let args = InitArgs {
            project_path: Some(dir.path().to_path_buf()),
            name: None,
            force: false,
        };
        assert!(run_init(dir.path(), &args).is_err());
    }

    #[test]
    fn test_handle_detect_exit_code() {
        let dir = spring_project();
        let args = DetectArgs {
            project_path: Some(dir.path().to_path_buf()),
            format: OutputFormatArg::Json,
        };
        assert_eq!(handle_detect(&args), 0);
    }
}
