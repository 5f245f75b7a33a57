//! hx-core: shared foundation for hexmesh.
//!
//! Contains:
//! - ids (compact typed IDs for mesh objects)
//! - role (needs/provides port roles)
//! - error (the mesh error taxonomy)

pub mod error;
pub mod ids;
pub mod role;

// Re-exports: nice ergonomics for downstream crates
pub use error::{MeshError, MeshResult};
pub use ids::*;
pub use role::PortRole;
