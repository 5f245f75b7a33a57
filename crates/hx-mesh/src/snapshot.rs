//! Projection of a mesh into plain, owned data for renderers.
//!
//! The snapshot is the only thing a renderer sees. Domain anchor labels are
//! computed here: a domain gets one label for its needs side and another for
//! its provides side, so a diagram can place both without a name clash.

use hx_core::PortRole;
use serde::{Deserialize, Serialize};

use crate::connection::{Connection, ConnectionTarget, PortAnchor};
use crate::mesh::Mesh;
use crate::node::Node;

pub(crate) const NEEDS_LABEL_SUFFIX: &str = "__needs";
pub(crate) const PROVIDES_LABEL_SUFFIX: &str = "__provides";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MeshSnapshot {
    pub components: Vec<ComponentSnapshot>,
    pub domains: Vec<DomainSnapshot>,
    pub connections: Vec<ConnectionSnapshot>,
    pub resources: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlighted_resources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentSnapshot {
    pub name: String,
    pub needs_ports: Vec<String>,
    pub provides_ports: Vec<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainSnapshot {
    pub name: String,
    pub needs_ports: Vec<String>,
    pub provides_ports: Vec<String>,
    pub children: Vec<String>,
    pub label_for_needs: String,
    pub label_for_provides: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub highlighted: bool,
}

/// Which way a domain export forwards a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainExport {
    Needs,
    Provides,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConnectionSnapshot {
    Port {
        consumer_component: String,
        consumer_port: String,
        producer_component: String,
        producer_port: String,
        #[serde(default, skip_serializing_if = "is_false")]
        highlighted: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        domain_export: Option<DomainExport>,
    },
    Resource {
        consumer_component: String,
        consumer_port: String,
        resource: String,
        #[serde(default, skip_serializing_if = "is_false")]
        highlighted: bool,
    },
}

impl ConnectionSnapshot {
    pub fn is_highlighted(&self) -> bool {
        match self {
            ConnectionSnapshot::Port { highlighted, .. }
            | ConnectionSnapshot::Resource { highlighted, .. } => *highlighted,
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Label used for a node's anchor on the given side.
///
/// Components use their name on both sides; domains get a distinct label per
/// side.
pub fn anchor_label(node: &Node, role: PortRole) -> String {
    if !node.is_domain() {
        return node.name.clone();
    }
    let suffix = match role {
        PortRole::Needs => NEEDS_LABEL_SUFFIX,
        PortRole::Provides => PROVIDES_LABEL_SUFFIX,
    };
    format!("{}{}", node.name, suffix)
}

impl Mesh {
    /// Project the mesh into an owned snapshot.
    pub fn snapshot(&self) -> MeshSnapshot {
        let components = self
            .components()
            .map(|node| ComponentSnapshot {
                name: node.name.clone(),
                needs_ports: node.needs_ports.clone(),
                provides_ports: node.provides_ports.clone(),
                highlighted: node.highlighted,
            })
            .collect();

        let domains = self
            .domains()
            .map(|node| DomainSnapshot {
                name: node.name.clone(),
                needs_ports: node.needs_ports.clone(),
                provides_ports: node.provides_ports.clone(),
                children: node
                    .children()
                    .iter()
                    .filter_map(|id| self.node_by_id(*id))
                    .map(|child| child.name.clone())
                    .collect(),
                label_for_needs: anchor_label(node, PortRole::Needs),
                label_for_provides: anchor_label(node, PortRole::Provides),
                highlighted: node.highlighted,
            })
            .collect();

        let connections = self
            .connections()
            .iter()
            .map(|conn| self.connection_snapshot(conn))
            .collect();

        MeshSnapshot {
            components,
            domains,
            connections,
            resources: self.resources().iter().map(|r| r.name.clone()).collect(),
            highlighted_resources: self
                .resources()
                .iter()
                .filter(|r| r.highlighted)
                .map(|r| r.name.clone())
                .collect(),
        }
    }

    fn connection_snapshot(&self, conn: &Connection) -> ConnectionSnapshot {
        let consumer_component = self.anchor_name(&conn.consumer);
        let consumer_port = conn.consumer.port.clone();
        let highlighted = conn.highlighted;

        let (producer, domain_export) = match &conn.target {
            ConnectionTarget::Plain(anchor) => (anchor, None),
            ConnectionTarget::NeedsExport(anchor) => (anchor, Some(DomainExport::Needs)),
            ConnectionTarget::ProvidesExport(anchor) => (anchor, Some(DomainExport::Provides)),
            ConnectionTarget::Resource(id) => {
                return ConnectionSnapshot::Resource {
                    consumer_component,
                    consumer_port,
                    resource: self
                        .resource_by_id(*id)
                        .map(|r| r.name.clone())
                        .unwrap_or_default(),
                    highlighted,
                };
            }
        };

        ConnectionSnapshot::Port {
            consumer_component,
            consumer_port,
            producer_component: self.anchor_name(producer),
            producer_port: producer.port.clone(),
            highlighted,
            domain_export,
        }
    }

    fn anchor_name(&self, anchor: &PortAnchor) -> String {
        self.node_by_id(anchor.node)
            .map(|node| anchor_label(node, anchor.role))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_snapshot_serializes_without_optional_keys() {
        let json = serde_json::to_value(Mesh::new().snapshot()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "components": [],
                "domains": [],
                "connections": [],
                "resources": [],
            })
        );
    }

    #[test]
    fn highlighted_key_only_when_set() {
        let mut mesh = Mesh::new();
        mesh.add_component("A", &[], &[]).unwrap();
        mesh.add_component("B", &[], &[]).unwrap();
        mesh.highlight_component("B").unwrap();

        let json = serde_json::to_value(mesh.snapshot()).unwrap();
        assert_eq!(
            json["components"],
            serde_json::json!([
                {"name": "A", "needs_ports": [], "provides_ports": []},
                {"name": "B", "needs_ports": [], "provides_ports": [], "highlighted": true},
            ])
        );
    }

    #[test]
    fn export_connections_carry_kind_tag() {
        let mut mesh = Mesh::new();
        mesh.add_component("A", &["n1"], &["p1"]).unwrap();
        mesh.add_domain("D").unwrap();
        mesh.add_component_to_domain("A", "D").unwrap();
        mesh.expose_component_needs_port("A", "n1").unwrap();
        mesh.expose_component_provides_port("A", "p1").unwrap();

        let json = serde_json::to_value(mesh.snapshot()).unwrap();
        assert_eq!(
            json["connections"],
            serde_json::json!([
                {
                    "consumer_component": "A",
                    "consumer_port": "n1",
                    "producer_component": "D__needs",
                    "producer_port": "n1",
                    "domain_export": "needs",
                },
                {
                    "consumer_component": "D__provides",
                    "consumer_port": "p1",
                    "producer_component": "A",
                    "producer_port": "p1",
                    "domain_export": "provides",
                },
            ])
        );
    }

    #[test]
    fn resource_connection_shape() {
        let mut mesh = Mesh::new();
        mesh.add_component("A", &["data"], &[]).unwrap();
        mesh.add_resource("Store").unwrap();
        mesh.add_connection_to_resource("A", "data", "Store").unwrap();
        mesh.highlight_connection_to_resource("A", "data", "Store").unwrap();

        let snapshot = mesh.snapshot();
        assert_eq!(
            snapshot.connections,
            vec![ConnectionSnapshot::Resource {
                consumer_component: "A".into(),
                consumer_port: "data".into(),
                resource: "Store".into(),
                highlighted: true,
            }]
        );
        assert!(snapshot.connections[0].is_highlighted());
    }
}
