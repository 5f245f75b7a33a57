//! Structural validation of mesh description files.
//!
//! Only checks that names are unique and references resolve. Port-level rules
//! are enforced by the mesh itself while the file is built.

use std::collections::HashSet;

use crate::LATEST_VERSION;
use crate::schema::{ConnectionDef, MeshFile};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_mesh_file(file: &MeshFile) -> Result<(), ValidationError> {
    if file.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: file.version,
        });
    }

    // Components and domains share one namespace.
    let mut node_names = HashSet::new();
    let mut domain_names = HashSet::new();
    for domain in &file.domains {
        if !node_names.insert(domain.name.as_str()) {
            return Err(duplicate(&domain.name, "nodes"));
        }
        domain_names.insert(domain.name.as_str());
    }
    for component in &file.components {
        if !node_names.insert(component.name.as_str()) {
            return Err(duplicate(&component.name, "nodes"));
        }
    }

    let mut resource_names = HashSet::new();
    for resource in &file.resources {
        if !resource_names.insert(resource.name.as_str()) {
            return Err(duplicate(&resource.name, "resources"));
        }
    }

    for component in &file.components {
        let Some(domain) = &component.domain else {
            continue;
        };
        if !domain_names.contains(domain.as_str()) {
            return Err(ValidationError::MissingReference {
                id: domain.clone(),
                context: format!("component '{}' domain", component.name),
            });
        }
    }

    for (idx, connection) in file.connections.iter().enumerate() {
        validate_connection(idx, connection, &node_names, &resource_names)?;
    }

    Ok(())
}

fn validate_connection(
    idx: usize,
    connection: &ConnectionDef,
    node_names: &HashSet<&str>,
    resource_names: &HashSet<&str>,
) -> Result<(), ValidationError> {
    let consumer = &connection.consumer;
    if !node_names.contains(consumer.node.as_str()) {
        return Err(ValidationError::MissingReference {
            id: consumer.node.clone(),
            context: format!("connections[{idx}] consumer"),
        });
    }

    match (&connection.producer, &connection.resource) {
        (Some(producer), None) => {
            if !node_names.contains(producer.node.as_str()) {
                return Err(ValidationError::MissingReference {
                    id: producer.node.clone(),
                    context: format!("connections[{idx}] producer"),
                });
            }
        }
        (None, Some(resource)) => {
            if !resource_names.contains(resource.as_str()) {
                return Err(ValidationError::MissingReference {
                    id: resource.clone(),
                    context: format!("connections[{idx}] resource"),
                });
            }
        }
        (producer, _) => {
            let reason = if producer.is_some() {
                "both producer and resource given"
            } else {
                "neither producer nor resource given"
            };
            return Err(ValidationError::InvalidValue {
                field: format!("connections[{idx}]"),
                value: format!("{}.{}", consumer.node, consumer.port),
                reason: reason.to_string(),
            });
        }
    }

    Ok(())
}

fn duplicate(id: &str, context: &str) -> ValidationError {
    ValidationError::DuplicateId {
        id: id.to_string(),
        context: context.to_string(),
    }
}
