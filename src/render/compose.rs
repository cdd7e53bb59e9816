//! Compose file generation
//!
//! Application records become `build:` services, dependent records
//! become `image:` services with their inferred defaults. Applications
//! depend on every dependent service in the manifest; for local dev
//! scaffolding that coarse wiring is good enough and trivially edited.

use crate::manifest::{Manifest, ManifestError, ManifestService, ServiceShape};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
struct ComposeFile {
    services: BTreeMap<String, ComposeService>,
}

#[derive(Debug, Default, Serialize)]
struct ComposeService {
    #[serde(skip_serializing_if = "Option::is_none")]
    build: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    ports: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    environment: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    depends_on: Vec<String>,
}

pub fn render_compose(manifest: &Manifest) -> Result<String, ManifestError> {
    manifest.validate()?;

    let dependent_names: Vec<String> = manifest.dependents().map(|s| s.name.clone()).collect();

    let mut services = BTreeMap::new();
    for (index, record) in manifest.services.iter().enumerate() {
        let service = match record.shape(index)? {
            ServiceShape::Application => application_entry(record, &dependent_names),
            ServiceShape::Dependent => dependent_entry(record),
        };
        services.insert(record.name.clone(), service);
    }

    let yaml = serde_yaml::to_string(&ComposeFile { services })?;
    Ok(yaml)
}

fn application_entry(record: &ManifestService, dependents: &[String]) -> ComposeService {
    ComposeService {
        build: Some(record.path.clone().unwrap_or_else(|| ".".to_string())),
        ports: record
            .port
            .iter()
            .map(|p| format!("{}:{}", p, p))
            .collect(),
        environment: record.env.clone(),
        depends_on: dependents.to_vec(),
        ..ComposeService::default()
    }
}

fn dependent_entry(record: &ManifestService) -> ComposeService {
    // shape() guaranteed kind is set
    let kind = record.kind.expect("dependent record has a kind");
    let version = record.version.as_deref().unwrap_or("latest");
    ComposeService {
        image: Some(format!("{}:{}", kind.default_image(), version)),
        ports: record
            .port
            .iter()
            .map(|p| format!("{}:{}", p, p))
            .collect(),
        environment: record.env.clone(),
        ..ComposeService::default()
    }
}
