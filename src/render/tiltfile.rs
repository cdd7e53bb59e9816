//! Tiltfile generation
//!
//! Wires the compose file into Tilt and adds live-update sync rules for
//! every application with dev mode on, using the record's watch paths.

use crate::manifest::{Manifest, ManifestError};

pub fn render_tiltfile(manifest: &Manifest) -> Result<String, ManifestError> {
    manifest.validate()?;

    let mut out = String::new();
    out.push_str("# Generated by javelin\n");
    out.push_str("docker_compose('docker-compose.yml')\n\n");

    for app in manifest.applications() {
        let path = app.path.as_deref().unwrap_or(".");

        if app.dev_mode && !app.watch_paths.is_empty() {
            let syncs: Vec<String> = app
                .watch_paths
                .iter()
                .map(|w| format!("        sync('{}/{}', '/app/{}'),", path, w, w))
                .collect();
            out.push_str(&format!(
                "docker_build(\n    '{}',\n    '{}',\n    live_update=[\n{}\n    ],\n)\n",
                app.name,
                path,
                syncs.join("\n")
            ));
        } else {
            out.push_str(&format!("docker_build('{}', '{}')\n", app.name, path));
        }
        out.push_str(&format!("dc_resource('{}', labels=['apps'])\n\n", app.name));
    }

    for dep in manifest.dependents() {
        out.push_str(&format!(
            "dc_resource('{}', labels=['services'])\n",
            dep.name
        ));
    }

    Ok(out)
}
