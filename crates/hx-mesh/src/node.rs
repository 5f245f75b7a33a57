//! Node records: components and domains.

use hx_core::{MeshError, MeshResult, NodeId, PortRole, ResourceId};

/// What kind of node this is, with the kind-specific links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A leaf component. `parent` is set at most once.
    Component { parent: Option<NodeId> },
    /// A grouping of components that can forward child ports as its own.
    Domain { children: Vec<NodeId> },
}

/// A component or domain in the mesh.
///
/// Needs and provides ports are independent ordered lists; the same string may
/// appear in both. Order is insertion order and is what the renderer lays out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    pub needs_ports: Vec<String>,
    pub provides_ports: Vec<String>,
    pub highlighted: bool,
}

impl Node {
    pub(crate) fn component(id: NodeId, name: String) -> Self {
        Self {
            id,
            name,
            kind: NodeKind::Component { parent: None },
            needs_ports: Vec::new(),
            provides_ports: Vec::new(),
            highlighted: false,
        }
    }

    pub(crate) fn domain(id: NodeId, name: String) -> Self {
        Self {
            id,
            name,
            kind: NodeKind::Domain {
                children: Vec::new(),
            },
            needs_ports: Vec::new(),
            provides_ports: Vec::new(),
            highlighted: false,
        }
    }

    pub fn is_domain(&self) -> bool {
        matches!(self.kind, NodeKind::Domain { .. })
    }

    /// Parent domain of a component (always `None` for domains).
    pub fn parent(&self) -> Option<NodeId> {
        match self.kind {
            NodeKind::Component { parent } => parent,
            NodeKind::Domain { .. } => None,
        }
    }

    /// Child components of a domain (empty for components).
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Component { .. } => &[],
            NodeKind::Domain { children } => children,
        }
    }

    /// Ports declared in the given role, in insertion order.
    pub fn ports(&self, role: PortRole) -> &[String] {
        match role {
            PortRole::Needs => &self.needs_ports,
            PortRole::Provides => &self.provides_ports,
        }
    }

    pub fn has_port(&self, role: PortRole, port: &str) -> bool {
        self.ports(role).iter().any(|p| p == port)
    }

    /// Fails with `InvalidPort` unless `port` is declared in `role`.
    pub(crate) fn require_port(&self, role: PortRole, port: &str) -> MeshResult<()> {
        if self.has_port(role, port) {
            Ok(())
        } else {
            Err(MeshError::invalid_port(format!(
                "'{}' is not a valid {} port for '{}'",
                port, role, self.name
            )))
        }
    }

    /// Fails with `DuplicateEntry` if `port` is already declared in `role`.
    pub(crate) fn require_new_port(&self, role: PortRole, port: &str) -> MeshResult<()> {
        if self.has_port(role, port) {
            Err(MeshError::duplicate(format!(
                "{} port '{}' already exists for '{}'",
                role, port, self.name
            )))
        } else {
            Ok(())
        }
    }

    pub(crate) fn push_port(&mut self, role: PortRole, port: String) {
        match role {
            PortRole::Needs => self.needs_ports.push(port),
            PortRole::Provides => self.provides_ports.push(port),
        }
    }
}

/// An external, portless endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub id: ResourceId,
    pub name: String,
    pub highlighted: bool,
}
