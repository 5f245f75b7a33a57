//! Replays a mesh description through the `Mesh` API.

use hx_mesh::Mesh;
use tracing::debug;

use crate::ProjectResult;
use crate::schema::{ConnectionDef, MeshFile};

/// Build a [`Mesh`] from `file`.
///
/// Steps run in a fixed order: domains, components (ports, then domain
/// membership), resources, exposures, connections, highlights. The first
/// rejected step aborts the build with its `MeshError`.
pub fn build_mesh(file: &MeshFile) -> ProjectResult<Mesh> {
    let mut mesh = Mesh::new();

    for domain in &file.domains {
        mesh.add_domain(domain.name.as_str())?;
        for port in &domain.needs {
            mesh.add_needs_port(&domain.name, port.as_str())?;
        }
        for port in &domain.provides {
            mesh.add_provides_port(&domain.name, port.as_str())?;
        }
    }

    for component in &file.components {
        mesh.add_component(
            component.name.as_str(),
            &as_strs(&component.needs),
            &as_strs(&component.provides),
        )?;
        if let Some(domain) = &component.domain {
            mesh.add_component_to_domain(&component.name, domain)?;
        }
    }

    for resource in &file.resources {
        mesh.add_resource(resource.name.as_str())?;
    }

    for component in &file.components {
        for port in &component.expose_needs {
            mesh.expose_component_needs_port(&component.name, port)?;
        }
        for port in &component.expose_provides {
            mesh.expose_component_provides_port(&component.name, port)?;
        }
    }

    for connection in &file.connections {
        connect(&mut mesh, connection)?;
    }

    apply_highlights(&mut mesh, file)?;

    debug!(
        name = %file.name,
        nodes = mesh.nodes().len(),
        resources = mesh.resources().len(),
        connections = mesh.connections().len(),
        "built mesh"
    );
    Ok(mesh)
}

fn connect(mesh: &mut Mesh, connection: &ConnectionDef) -> ProjectResult<()> {
    let consumer = &connection.consumer;
    if let Some(producer) = &connection.producer {
        mesh.add_connection(&consumer.node, &consumer.port, &producer.node, &producer.port)?;
    } else if let Some(resource) = &connection.resource {
        mesh.add_connection_to_resource(&consumer.node, &consumer.port, resource)?;
    }
    Ok(())
}

fn apply_highlights(mesh: &mut Mesh, file: &MeshFile) -> ProjectResult<()> {
    let nodes = file
        .domains
        .iter()
        .filter(|d| d.highlighted)
        .map(|d| &d.name)
        .chain(
            file.components
                .iter()
                .filter(|c| c.highlighted)
                .map(|c| &c.name),
        );
    for name in nodes {
        mesh.highlight_component(name)?;
    }

    for resource in file.resources.iter().filter(|r| r.highlighted) {
        mesh.highlight_resource(&resource.name)?;
    }

    for connection in file.connections.iter().filter(|c| c.highlighted) {
        let consumer = &connection.consumer;
        if let Some(producer) = &connection.producer {
            mesh.highlight_connection(
                &consumer.node,
                &consumer.port,
                &producer.node,
                &producer.port,
            )?;
        } else if let Some(resource) = &connection.resource {
            mesh.highlight_connection_to_resource(&consumer.node, &consumer.port, resource)?;
        }
    }

    Ok(())
}

fn as_strs(names: &[String]) -> Vec<&str> {
    names.iter().map(String::as_str).collect()
}
