//! hx-mesh: model layer for hexmesh.
//!
//! Provides:
//! - Node records (components, domains, resources) with ordered port lists
//! - Typed connections (plain, domain exports, resource edges)
//! - The `Mesh` aggregate that validates every mutation up front
//! - Projection into an owned `MeshSnapshot` for renderers
//!
//! # Example
//!
//! ```
//! use hx_mesh::Mesh;
//!
//! let mut mesh = Mesh::new();
//! mesh.add_component("A", &["n1"], &[]).unwrap();
//! mesh.add_component("B", &[], &["p1"]).unwrap();
//! mesh.add_connection("A", "n1", "B", "p1").unwrap();
//!
//! let snapshot = mesh.snapshot();
//! assert_eq!(snapshot.components.len(), 2);
//! assert_eq!(snapshot.connections.len(), 1);
//! ```

pub mod connection;
pub mod indexing;
pub mod mesh;
pub mod node;
pub mod snapshot;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use connection::{Connection, ConnectionKey, ConnectionTarget, Endpoint, PortAnchor};
pub use hx_core::{MeshError, MeshResult, PortRole};
pub use indexing::NameIndex;
pub use mesh::Mesh;
pub use node::{Node, NodeKind, Resource};
pub use snapshot::{
    ComponentSnapshot, ConnectionSnapshot, DomainExport, DomainSnapshot, MeshSnapshot,
    anchor_label,
};
