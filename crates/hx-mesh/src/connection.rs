//! Connection records and their lookup keys.

use hx_core::{ConnId, NodeId, PortRole, ResourceId};

/// One end of a connection on a node: (node, port, role).
///
/// The role keeps a domain's needs side and provides side apart even when a
/// port name appears on both.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PortAnchor {
    pub node: NodeId,
    pub port: String,
    pub role: PortRole,
}

impl PortAnchor {
    pub fn needs(node: NodeId, port: impl Into<String>) -> Self {
        Self {
            node,
            port: port.into(),
            role: PortRole::Needs,
        }
    }

    pub fn provides(node: NodeId, port: impl Into<String>) -> Self {
        Self {
            node,
            port: port.into(),
            role: PortRole::Provides,
        }
    }
}

/// Where a connection ends up, tagged by connection kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionTarget {
    /// Needs port -> provides port of another node.
    Plain(PortAnchor),
    /// Child needs port -> the owning domain's needs port.
    NeedsExport(PortAnchor),
    /// Domain provides port -> the child's provides port.
    ProvidesExport(PortAnchor),
    /// Needs port -> external resource.
    Resource(ResourceId),
}

/// The far end of a connection as used in its key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Port(PortAnchor),
    Resource(ResourceId),
}

/// Unique key of a connection: (consumer anchor, producer endpoint).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionKey {
    pub consumer: PortAnchor,
    pub producer: Endpoint,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub id: ConnId,
    pub consumer: PortAnchor,
    pub target: ConnectionTarget,
    pub highlighted: bool,
}

impl Connection {
    pub fn key(&self) -> ConnectionKey {
        let producer = match &self.target {
            ConnectionTarget::Plain(anchor)
            | ConnectionTarget::NeedsExport(anchor)
            | ConnectionTarget::ProvidesExport(anchor) => Endpoint::Port(anchor.clone()),
            ConnectionTarget::Resource(id) => Endpoint::Resource(*id),
        };
        ConnectionKey {
            consumer: self.consumer.clone(),
            producer,
        }
    }

    pub fn is_domain_export(&self) -> bool {
        matches!(
            self.target,
            ConnectionTarget::NeedsExport(_) | ConnectionTarget::ProvidesExport(_)
        )
    }
}
