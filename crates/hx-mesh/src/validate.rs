//! Argument checks shared by mesh mutations.
//!
//! Each helper maps one lookup failure onto its error class; callers run all
//! of them before touching any state.

use std::collections::HashSet;

use hx_core::{MeshError, MeshResult, PortRole};

use crate::connection::PortAnchor;

/// Fail with `DuplicateEntry` if `ports` repeats a name.
pub(crate) fn unique_ports(node: &str, role: PortRole, ports: &[&str]) -> MeshResult<()> {
    let mut seen = HashSet::with_capacity(ports.len());
    for port in ports {
        if !seen.insert(*port) {
            return Err(MeshError::duplicate(format!(
                "{} port '{}' already exists for '{}'",
                role, port, node
            )));
        }
    }
    Ok(())
}

/// Fail with `InvalidConnection` if `anchor` already consumes a connection.
pub(crate) fn unconnected(
    connected: &HashSet<PortAnchor>,
    anchor: &PortAnchor,
    node: &str,
) -> MeshResult<()> {
    if connected.contains(anchor) {
        return Err(MeshError::invalid_connection(format!(
            "('{}', '{}') already connected",
            node, anchor.port
        )));
    }
    Ok(())
}
