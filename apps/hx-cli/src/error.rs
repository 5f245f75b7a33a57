//! Error type for the command-line front end.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(#[from] hx_project::ProjectError),

    #[error("Render error: {0}")]
    Render(#[from] hx_render::RenderError),

    #[error("Failed to read template: {path}")]
    TemplateRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write output: {path}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Error class when the mesh itself rejected the description.
    pub fn mesh_kind(&self) -> Option<&'static str> {
        match self {
            AppError::Project(hx_project::ProjectError::Mesh(err)) => Some(err.kind()),
            _ => None,
        }
    }
}
