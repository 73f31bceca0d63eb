//! Storage layer: in-memory project store and data model.
//!
//! Holds the project collection, the demo data set and fixture loading.

pub mod models;
pub mod sample;
mod store;

pub use store::{ProjectStore, StoreError};

use anyhow::Context;
use models::Project;
use std::path::Path;

/// Reads a JSON array of projects, as written by `save_fixture`.
pub fn load_fixture(path: &Path) -> anyhow::Result<Vec<Project>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read fixture {}", path.display()))?;
    let projects: Vec<Project> = serde_json::from_str(&raw)
        .with_context(|| format!("decode fixture {}", path.display()))?;
    tracing::debug!(count = projects.len(), path = %path.display(), "loaded fixture");
    Ok(projects)
}

pub fn save_fixture(path: &Path, projects: &[Project]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let json = serde_json::to_string_pretty(projects)?;
    std::fs::write(path, json).with_context(|| format!("write fixture {}", path.display()))?;
    Ok(())
}

/// Opens a store from `fixture` when given, otherwise from the sample set.
pub fn open(fixture: Option<&Path>) -> anyhow::Result<ProjectStore> {
    let projects = match fixture {
        Some(path) => load_fixture(path)?,
        None => sample::sample_projects(),
    };
    Ok(ProjectStore::new(projects)?)
}
