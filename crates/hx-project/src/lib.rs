//! hx-project: mesh description files.
//!
//! A `MeshFile` is a versioned, serde-friendly description of a mesh that can
//! be stored as YAML or JSON, validated structurally, and replayed into a
//! `hx_mesh::Mesh` with [`build_mesh`].

pub mod build;
pub mod schema;
pub mod validate;

use std::path::Path;

use tracing::debug;

pub use build::build_mesh;
pub use schema::*;
pub use validate::{ValidationError, validate_mesh_file};

/// Newest file format version this crate understands.
pub const LATEST_VERSION: u32 = 1;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Mesh error: {0}")]
    Mesh(#[from] hx_mesh::MeshError),

    #[error("Unknown file format: {path} (expected .yaml, .yml or .json)")]
    UnknownFormat { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Yaml,
    Json,
}

fn format_of(path: &Path) -> ProjectResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml" | "yml") => Ok(Format::Yaml),
        Some("json") => Ok(Format::Json),
        _ => Err(ProjectError::UnknownFormat {
            path: path.display().to_string(),
        }),
    }
}

pub fn load_yaml(path: &Path) -> ProjectResult<MeshFile> {
    let content = std::fs::read_to_string(path)?;
    let file: MeshFile = serde_yaml::from_str(&content)?;
    validate_mesh_file(&file)?;
    debug!(path = %path.display(), "loaded mesh file");
    Ok(file)
}

pub fn save_yaml(path: &Path, file: &MeshFile) -> ProjectResult<()> {
    validate_mesh_file(file)?;
    let content = serde_yaml::to_string(file)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ProjectResult<MeshFile> {
    let content = std::fs::read_to_string(path)?;
    let file: MeshFile = serde_json::from_str(&content)?;
    validate_mesh_file(&file)?;
    debug!(path = %path.display(), "loaded mesh file");
    Ok(file)
}

pub fn save_json(path: &Path, file: &MeshFile) -> ProjectResult<()> {
    validate_mesh_file(file)?;
    let content = serde_json::to_string_pretty(file)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load a mesh file, picking the format from the extension.
pub fn load(path: &Path) -> ProjectResult<MeshFile> {
    match format_of(path)? {
        Format::Yaml => load_yaml(path),
        Format::Json => load_json(path),
    }
}

/// Save a mesh file, picking the format from the extension.
pub fn save(path: &Path, file: &MeshFile) -> ProjectResult<()> {
    match format_of(path)? {
        Format::Yaml => save_yaml(path, file),
        Format::Json => save_json(path, file),
    }
}

/// Load `path` and build the mesh it describes.
pub fn load_mesh(path: &Path) -> ProjectResult<hx_mesh::Mesh> {
    build_mesh(&load(path)?)
}
