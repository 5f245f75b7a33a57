//! The mesh aggregate: owns every node, resource and connection.

use std::collections::{HashMap, HashSet};

use hx_core::{ConnId, MeshError, MeshResult, NodeId, PortRole, ResourceId};
use tracing::debug;

use crate::connection::{Connection, ConnectionKey, ConnectionTarget, Endpoint, PortAnchor};
use crate::indexing::NameIndex;
use crate::node::{Node, NodeKind, Resource};
use crate::snapshot::{NEEDS_LABEL_SUFFIX, PROVIDES_LABEL_SUFFIX};
use crate::validate;

/// Roles tried, in order, when a connection is addressed only by names:
/// plain, then needs export, then provides export.
const PORT_KEY_ROLES: [(PortRole, PortRole); 3] = [
    (PortRole::Needs, PortRole::Provides),
    (PortRole::Needs, PortRole::Needs),
    (PortRole::Provides, PortRole::Provides),
];

/// In-memory model of a hexagonal architecture.
///
/// Every mutation validates its arguments up front and either fully succeeds
/// or returns an error without touching any state. Nothing is ever removed.
///
/// Use `add_component`, `add_domain` and `add_resource` to create entities,
/// wire them with `add_connection*` and `expose_component_*_port`, then call
/// `snapshot()` to hand the result to a renderer.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    nodes: Vec<Node>,
    node_index: NameIndex,
    resources: Vec<Resource>,
    resource_index: NameIndex,
    connections: Vec<Connection>,
    connection_index: HashMap<ConnectionKey, ConnId>,
    /// Consumer anchors that already have their one producer.
    connected: HashSet<PortAnchor>,
}

impl Mesh {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component with its initial needs and provides ports.
    pub fn add_component(
        &mut self,
        name: impl Into<String>,
        needs_ports: &[&str],
        provides_ports: &[&str],
    ) -> MeshResult<NodeId> {
        let name = name.into();
        self.require_unused_node_name(&name)?;
        validate::unique_ports(&name, PortRole::Needs, needs_ports)?;
        validate::unique_ports(&name, PortRole::Provides, provides_ports)?;

        let id = NodeId::from_len(self.nodes.len());
        let mut node = Node::component(id, name);
        node.needs_ports = needs_ports.iter().map(|p| (*p).to_owned()).collect();
        node.provides_ports = provides_ports.iter().map(|p| (*p).to_owned()).collect();
        debug!(
            component = %node.name,
            needs = needs_ports.len(),
            provides = provides_ports.len(),
            "added component"
        );
        self.insert_node(node);
        Ok(id)
    }

    /// Add an empty domain. Its ports normally come from exposing child ports.
    pub fn add_domain(&mut self, name: impl Into<String>) -> MeshResult<NodeId> {
        let name = name.into();
        self.require_unused_node_name(&name)?;

        let id = NodeId::from_len(self.nodes.len());
        debug!(domain = %name, "added domain");
        self.insert_node(Node::domain(id, name));
        Ok(id)
    }

    /// Add an external resource.
    pub fn add_resource(&mut self, name: impl Into<String>) -> MeshResult<ResourceId> {
        let name = name.into();
        let id = ResourceId::from_len(self.resources.len());
        if !self.resource_index.insert(&name, id) {
            return Err(MeshError::duplicate(format!(
                "resource '{}' already exists",
                name
            )));
        }
        debug!(resource = %name, "added resource");
        self.resources.push(Resource {
            id,
            name,
            highlighted: false,
        });
        Ok(id)
    }

    /// Declare an additional needs port on an existing component or domain.
    pub fn add_needs_port(&mut self, node: &str, port: impl Into<String>) -> MeshResult<()> {
        self.add_port(node, PortRole::Needs, port.into())
    }

    /// Declare an additional provides port on an existing component or domain.
    pub fn add_provides_port(&mut self, node: &str, port: impl Into<String>) -> MeshResult<()> {
        self.add_port(node, PortRole::Provides, port.into())
    }

    fn add_port(&mut self, node: &str, role: PortRole, port: String) -> MeshResult<()> {
        let id = self.node_id(node)?;
        let target = &mut self.nodes[id.slot()];
        target.require_new_port(role, &port)?;
        debug!(node, %role, port = %port, "added port");
        target.push_port(role, port);
        Ok(())
    }

    /// Connect a consumer's needs port to a producer's provides port.
    ///
    /// A needs port accepts exactly one producer over the mesh's lifetime.
    pub fn add_connection(
        &mut self,
        consumer_node: &str,
        consumer_port: &str,
        producer_node: &str,
        producer_port: &str,
    ) -> MeshResult<ConnId> {
        let consumer = self.node_id(consumer_node)?;
        self.nodes[consumer.slot()].require_port(PortRole::Needs, consumer_port)?;
        let producer = self.node_id(producer_node)?;
        self.nodes[producer.slot()].require_port(PortRole::Provides, producer_port)?;

        let anchor = PortAnchor::needs(consumer, consumer_port);
        validate::unconnected(&self.connected, &anchor, consumer_node)?;

        debug!(
            consumer = consumer_node,
            consumer_port,
            producer = producer_node,
            producer_port,
            "added connection"
        );
        Ok(self.push_connection(
            anchor,
            ConnectionTarget::Plain(PortAnchor::provides(producer, producer_port)),
        ))
    }

    /// Connect a consumer's needs port to an external resource.
    pub fn add_connection_to_resource(
        &mut self,
        consumer_node: &str,
        consumer_port: &str,
        resource: &str,
    ) -> MeshResult<ConnId> {
        let consumer = self.node_id(consumer_node)?;
        self.nodes[consumer.slot()].require_port(PortRole::Needs, consumer_port)?;
        let resource_id = self.resource_id(resource)?;

        let anchor = PortAnchor::needs(consumer, consumer_port);
        validate::unconnected(&self.connected, &anchor, consumer_node)?;

        debug!(
            consumer = consumer_node,
            consumer_port, resource, "added connection to resource"
        );
        Ok(self.push_connection(anchor, ConnectionTarget::Resource(resource_id)))
    }

    /// Place a component inside a domain. A component joins at most one
    /// domain and domains cannot be nested.
    pub fn add_component_to_domain(&mut self, component: &str, domain: &str) -> MeshResult<()> {
        let component_id = self.node_id(component)?;
        match self.nodes[component_id.slot()].kind {
            NodeKind::Domain { .. } => {
                return Err(MeshError::invalid_component(format!(
                    "cannot add '{}' to '{}': nested domains are not supported",
                    component, domain
                )));
            }
            NodeKind::Component {
                parent: Some(parent),
            } => {
                return Err(MeshError::duplicate(format!(
                    "component '{}' is already part of domain '{}'",
                    component,
                    self.nodes[parent.slot()].name
                )));
            }
            NodeKind::Component { parent: None } => {}
        }

        let domain_id = self
            .node_index
            .get(domain)
            .filter(|id| self.nodes[id.slot()].is_domain())
            .ok_or_else(|| {
                MeshError::invalid_domain(format!("'{}' domain does not exist in the mesh", domain))
            })?;

        self.nodes[component_id.slot()].kind = NodeKind::Component {
            parent: Some(domain_id),
        };
        if let NodeKind::Domain { children } = &mut self.nodes[domain_id.slot()].kind {
            children.push(component_id);
        }
        debug!(component, domain, "added component to domain");
        Ok(())
    }

    /// Forward a child's needs port through its parent domain.
    ///
    /// The domain gains the needs port on first exposure; later children may
    /// expose the same port and share it.
    pub fn expose_component_needs_port(&mut self, component: &str, port: &str) -> MeshResult<ConnId> {
        let component_id = self.node_id(component)?;
        self.nodes[component_id.slot()].require_port(PortRole::Needs, port)?;
        let domain_id = self.parent_domain(component_id)?;

        let anchor = PortAnchor::needs(component_id, port);
        validate::unconnected(&self.connected, &anchor, component)?;

        let domain = &mut self.nodes[domain_id.slot()];
        if !domain.has_port(PortRole::Needs, port) {
            domain.push_port(PortRole::Needs, port.to_owned());
        }
        debug!(component, port, domain = %domain.name, "exposed needs port");
        Ok(self.push_connection(
            anchor,
            ConnectionTarget::NeedsExport(PortAnchor::needs(domain_id, port)),
        ))
    }

    /// Forward a child's provides port through its parent domain.
    ///
    /// Only one child may provide a given domain capability.
    pub fn expose_component_provides_port(
        &mut self,
        component: &str,
        port: &str,
    ) -> MeshResult<ConnId> {
        let component_id = self.node_id(component)?;
        self.nodes[component_id.slot()].require_port(PortRole::Provides, port)?;
        let domain_id = self.parent_domain(component_id)?;

        let domain = &self.nodes[domain_id.slot()];
        if domain.has_port(PortRole::Provides, port) {
            return Err(MeshError::duplicate(format!(
                "'{}' domain already has exposed provides port for '{}'",
                domain.name, port
            )));
        }
        let anchor = PortAnchor::provides(domain_id, port);
        validate::unconnected(&self.connected, &anchor, &domain.name)?;

        let domain = &mut self.nodes[domain_id.slot()];
        domain.push_port(PortRole::Provides, port.to_owned());
        debug!(component, port, domain = %domain.name, "exposed provides port");
        Ok(self.push_connection(
            anchor,
            ConnectionTarget::ProvidesExport(PortAnchor::provides(component_id, port)),
        ))
    }

    /// Highlight a component or domain.
    pub fn highlight_component(&mut self, name: &str) -> MeshResult<()> {
        let id = self.node_id(name)?;
        self.nodes[id.slot()].highlighted = true;
        Ok(())
    }

    pub fn highlight_resource(&mut self, name: &str) -> MeshResult<()> {
        let id = self.resource_id(name)?;
        self.resources[id.slot()].highlighted = true;
        Ok(())
    }

    /// Highlight the connection from `(consumer_node, consumer_port)` to
    /// `(producer_node, producer_port)`, including domain exports.
    ///
    /// Names resolve as in [`Mesh::find_connection`].
    pub fn highlight_connection(
        &mut self,
        consumer_node: &str,
        consumer_port: &str,
        producer_node: &str,
        producer_port: &str,
    ) -> MeshResult<()> {
        let id = self
            .find_connection(consumer_node, consumer_port, producer_node, producer_port)
            .ok_or_else(|| {
                MeshError::invalid_connection(format!(
                    "('{}', '{}') -> ('{}', '{}')",
                    consumer_node, consumer_port, producer_node, producer_port
                ))
            })?;
        self.connections[id.slot()].highlighted = true;
        Ok(())
    }

    pub fn highlight_connection_to_resource(
        &mut self,
        consumer_node: &str,
        consumer_port: &str,
        resource: &str,
    ) -> MeshResult<()> {
        let id = self
            .find_resource_connection(consumer_node, consumer_port, resource)
            .ok_or_else(|| {
                MeshError::invalid_connection(format!(
                    "('{}', '{}') -> '{}'",
                    consumer_node, consumer_port, resource
                ))
            })?;
        self.connections[id.slot()].highlighted = true;
        Ok(())
    }

    /// Look up a port-to-port connection by names.
    ///
    /// A domain may be named by its side label (`D__needs`, `D__provides`) to
    /// pin the role; a bare domain name tries plain, needs export, then
    /// provides export.
    pub fn find_connection(
        &self,
        consumer_node: &str,
        consumer_port: &str,
        producer_node: &str,
        producer_port: &str,
    ) -> Option<ConnId> {
        let (consumer, consumer_side) = self.resolve_anchor_name(consumer_node)?;
        let (producer, producer_side) = self.resolve_anchor_name(producer_node)?;
        PORT_KEY_ROLES
            .into_iter()
            .filter(|(consumer_role, producer_role)| {
                consumer_side.is_none_or(|role| role == *consumer_role)
                    && producer_side.is_none_or(|role| role == *producer_role)
            })
            .find_map(|(consumer_role, producer_role)| {
                let key = ConnectionKey {
                    consumer: PortAnchor {
                        node: consumer,
                        port: consumer_port.to_owned(),
                        role: consumer_role,
                    },
                    producer: Endpoint::Port(PortAnchor {
                        node: producer,
                        port: producer_port.to_owned(),
                        role: producer_role,
                    }),
                };
                self.connection_index.get(&key).copied()
            })
    }

    /// Look up a resource edge by names.
    pub fn find_resource_connection(
        &self,
        consumer_node: &str,
        consumer_port: &str,
        resource: &str,
    ) -> Option<ConnId> {
        let key = ConnectionKey {
            consumer: PortAnchor::needs(self.node_index.get(consumer_node)?, consumer_port),
            producer: Endpoint::Resource(self.resource_index.get(resource)?),
        };
        self.connection_index.get(&key).copied()
    }

    /// Get a component or domain by name.
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.node_index.get(name).and_then(|id| self.node_by_id(id))
    }

    /// Get a node by ID (returns None if ID out of bounds).
    pub fn node_by_id(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.slot())
    }

    /// All components and domains in creation order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Components (excluding domains) in creation order.
    pub fn components(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| !n.is_domain())
    }

    /// Domains in creation order.
    pub fn domains(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.is_domain())
    }

    pub fn resource(&self, name: &str) -> Option<&Resource> {
        self.resource_index
            .get(name)
            .and_then(|id| self.resource_by_id(id))
    }

    pub fn resource_by_id(&self, id: ResourceId) -> Option<&Resource> {
        self.resources.get(id.slot())
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// All connections in creation order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn connection(&self, id: ConnId) -> Option<&Connection> {
        self.connections.get(id.slot())
    }

    /// Whether `(node, port)` already has its producer.
    pub fn is_connected(&self, node: &str, port: &str) -> bool {
        self.node_index
            .get(node)
            .is_some_and(|id| self.connected.contains(&PortAnchor::needs(id, port)))
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.resources.is_empty()
    }

    fn node_id(&self, name: &str) -> MeshResult<NodeId> {
        self.node_index.get(name).ok_or_else(|| {
            MeshError::invalid_component(format!("'{}' component does not exist in the mesh", name))
        })
    }

    fn resource_id(&self, name: &str) -> MeshResult<ResourceId> {
        self.resource_index.get(name).ok_or_else(|| {
            MeshError::invalid_resource(format!("'{}' resource does not exist in the mesh", name))
        })
    }

    /// Resolve a node name, or a domain side label to the domain and its side.
    fn resolve_anchor_name(&self, name: &str) -> Option<(NodeId, Option<PortRole>)> {
        if let Some(id) = self.node_index.get(name) {
            return Some((id, None));
        }
        [
            (NEEDS_LABEL_SUFFIX, PortRole::Needs),
            (PROVIDES_LABEL_SUFFIX, PortRole::Provides),
        ]
        .into_iter()
        .find_map(|(suffix, role)| {
            let id = self.node_index.get(name.strip_suffix(suffix)?)?;
            self.nodes[id.slot()].is_domain().then_some((id, Some(role)))
        })
    }

    fn parent_domain(&self, component: NodeId) -> MeshResult<NodeId> {
        let node = &self.nodes[component.slot()];
        node.parent().ok_or_else(|| {
            MeshError::invalid_domain(format!(
                "parent domain for '{}' is unspecified or invalid",
                node.name
            ))
        })
    }

    fn require_unused_node_name(&self, name: &str) -> MeshResult<()> {
        if self.node_index.contains(name) {
            return Err(MeshError::duplicate(format!(
                "component or domain '{}' already exists",
                name
            )));
        }
        Ok(())
    }

    fn insert_node(&mut self, node: Node) {
        let inserted = self.node_index.insert(&node.name, node.id);
        debug_assert!(inserted, "node name checked before insert");
        self.nodes.push(node);
    }

    fn push_connection(&mut self, consumer: PortAnchor, target: ConnectionTarget) -> ConnId {
        let id = ConnId::from_len(self.connections.len());
        let connection = Connection {
            id,
            consumer: consumer.clone(),
            target,
            highlighted: false,
        };
        self.connection_index.insert(connection.key(), id);
        self.connected.insert(consumer);
        self.connections.push(connection);
        id
    }
}
