//! javelin - dev-loop scaffolding generator for JVM microservices
//!
//! This library scans a project directory, decides which JVM framework it
//! targets, infers the backing services it depends on, and produces the
//! normalized manifest that drives scaffolding generation (Dockerfile,
//! Compose file, Tiltfile).
//!
//! # Core Concepts
//!
//! - **Classification**: priority-ordered inspection of evidence files
//!   (Maven/Gradle descriptors, `application.*` config, Java sources) that
//!   resolves to exactly one framework per directory
//! - **Service inference**: substring scans of config and build files that
//!   suggest backing services (databases, brokers, search engines)
//! - **Manifest**: the single normalized record list every downstream
//!   consumer (renderers, CLI printers, selection store) works from
//!
//! # Example Usage
//!
//! ```no_run
//! use javelin::detect::Classifier;
//! use javelin::services::Inferencer;
//! use std::path::Path;
//!
//! fn inspect(dir: &Path) -> anyhow::Result<()> {
//!     let detection = Classifier::new().classify(dir)?;
//!     println!("framework: {}", detection.framework);
//!
//!     let inference = Inferencer::new().infer(dir);
//!     for service in &inference.services {
//!         println!("needs {} on port {}", service.kind, service.port);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Project Structure
//!
//! - [`detect`]: framework classification and evidence reading
//! - [`services`]: dependent-service inference
//! - [`manifest`]: manifest data model, validation, persistence, store
//! - [`scan`]: recursive microservice discovery
//! - [`render`]: Dockerfile / Compose / Tiltfile generation
//! - [`tools`]: external tool health checks

// Public modules
pub mod cli;
pub mod detect;
pub mod fs;
pub mod manifest;
pub mod render;
pub mod scan;
pub mod services;
pub mod tools;

// Re-export key types for convenient access
pub use detect::{BuildSystem, Classifier, Detection, EvidenceError, Framework};
pub use manifest::{
    ConversionError, Manifest, ManifestError, ManifestService, RenderOptions, ServiceStore,
};
pub use scan::{MicroserviceInfo, Walker};
pub use services::{Inference, Inferencer, ServiceConfig, ServiceKind};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
