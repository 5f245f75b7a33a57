//! Render error types.

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}

pub type RenderResult<T> = Result<T, RenderError>;
