use thiserror::Error;

pub type MeshResult<T> = Result<T, MeshError>;

/// Validation failures raised by mesh mutations.
///
/// Every variant is a synchronous, non-retryable rejection of a single call.
/// The mesh is left exactly as it was before the failing call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    #[error("Duplicate entry: {what}")]
    DuplicateEntry { what: String },

    #[error("Invalid component: {what}")]
    InvalidComponent { what: String },

    #[error("Invalid domain: {what}")]
    InvalidDomain { what: String },

    #[error("Invalid port: {what}")]
    InvalidPort { what: String },

    #[error("Invalid connection: {what}")]
    InvalidConnection { what: String },

    #[error("Invalid resource: {what}")]
    InvalidResource { what: String },
}

impl MeshError {
    pub fn duplicate(what: impl Into<String>) -> Self {
        Self::DuplicateEntry { what: what.into() }
    }

    pub fn invalid_component(what: impl Into<String>) -> Self {
        Self::InvalidComponent { what: what.into() }
    }

    pub fn invalid_domain(what: impl Into<String>) -> Self {
        Self::InvalidDomain { what: what.into() }
    }

    pub fn invalid_port(what: impl Into<String>) -> Self {
        Self::InvalidPort { what: what.into() }
    }

    pub fn invalid_connection(what: impl Into<String>) -> Self {
        Self::InvalidConnection { what: what.into() }
    }

    pub fn invalid_resource(what: impl Into<String>) -> Self {
        Self::InvalidResource { what: what.into() }
    }

    /// Short, stable name of the error class, logged by the CLI.
    pub fn kind(&self) -> &'static str {
        match self {
            MeshError::DuplicateEntry { .. } => "DuplicateEntry",
            MeshError::InvalidComponent { .. } => "InvalidComponent",
            MeshError::InvalidDomain { .. } => "InvalidDomain",
            MeshError::InvalidPort { .. } => "InvalidPort",
            MeshError::InvalidConnection { .. } => "InvalidConnection",
            MeshError::InvalidResource { .. } => "InvalidResource",
        }
    }
}
