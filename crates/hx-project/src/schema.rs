//! Mesh description file schema.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MeshFile {
    pub version: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub domains: Vec<DomainDef>,
    #[serde(default)]
    pub components: Vec<ComponentDef>,
    #[serde(default)]
    pub resources: Vec<ResourceDef>,
    #[serde(default)]
    pub connections: Vec<ConnectionDef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComponentDef {
    pub name: String,
    #[serde(default)]
    pub needs: Vec<String>,
    #[serde(default)]
    pub provides: Vec<String>,
    /// Domain this component belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// Needs ports forwarded through the parent domain.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub expose_needs: Vec<String>,
    /// Provides ports forwarded through the parent domain.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub expose_provides: Vec<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub highlighted: bool,
}

/// A domain and the ports authored directly on it.
///
/// Ports forwarded from children through `expose_*` are added when the mesh
/// is built and need not be listed here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DomainDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub needs: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub provides: Vec<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub highlighted: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResourceDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub highlighted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PortRef {
    pub node: String,
    pub port: String,
}

impl PortRef {
    pub fn new(node: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            port: port.into(),
        }
    }
}

/// A consumer's needs port wired to exactly one of `producer` or `resource`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectionDef {
    pub consumer: PortRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub producer: Option<PortRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub highlighted: bool,
}

impl ConnectionDef {
    pub fn to_port(consumer: PortRef, producer: PortRef) -> Self {
        Self {
            consumer,
            producer: Some(producer),
            resource: None,
            highlighted: false,
        }
    }

    pub fn to_resource(consumer: PortRef, resource: impl Into<String>) -> Self {
        Self {
            consumer,
            producer: None,
            resource: Some(resource.into()),
            highlighted: false,
        }
    }

    pub fn highlighted(mut self) -> Self {
        self.highlighted = true;
        self
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}
