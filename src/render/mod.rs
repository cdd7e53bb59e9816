//! Scaffolding renderers
//!
//! Thin text generation on top of the manifest: a Dockerfile per
//! application, one Compose file for the whole manifest, and a Tiltfile
//! wiring live reload. The renderers never make decisions; everything
//! they need was decided during detection and lives in the manifest.

mod compose;
mod dockerfile;
mod tiltfile;

pub use compose::render_compose;
pub use dockerfile::render_dockerfile;
pub use tiltfile::render_tiltfile;
