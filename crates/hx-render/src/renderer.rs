//! Template rendering over mesh snapshots.

use hx_mesh::{Mesh, MeshSnapshot};
use minijinja::Environment;
use tracing::{debug, trace};

use crate::error::RenderResult;
use crate::filters;

/// Graphviz DOT template used by [`Renderer::render_dot`].
pub const DOT_TEMPLATE: &str = include_str!("templates/mesh.dot.j2");

/// A template environment with the mesh filters registered.
///
/// Templates see the snapshot's fields (`components`, `domains`,
/// `connections`, `resources`, `highlighted_resources`) as top-level
/// variables. Extra text filters can be added with [`Renderer::with_filter`].
pub struct Renderer {
    env: Environment<'static>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.add_filter("anchor", |value: String| filters::anchor(&value));
        env.add_filter("anchor_p", |value: String| filters::anchor_p(&value));
        env.add_filter("escape", |value: String| filters::escape(&value));
        env.add_filter("html_escape", |value: String| filters::html_escape(&value));
        Self { env }
    }

    /// Register (or replace) a text filter under `name`.
    pub fn with_filter<F>(mut self, name: impl Into<String>, filter: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        let name = name.into();
        debug!(filter = %name, "registered custom filter");
        self.env
            .add_filter(name, move |value: String| filter(&value));
        self
    }

    /// Render `template` against `snapshot`.
    pub fn render(&self, snapshot: &MeshSnapshot, template: &str) -> RenderResult<String> {
        debug!(
            components = snapshot.components.len(),
            domains = snapshot.domains.len(),
            connections = snapshot.connections.len(),
            "rendering mesh"
        );
        let output = self.env.render_str(template, snapshot)?;
        trace!(bytes = output.len(), "rendered mesh");
        Ok(output)
    }

    /// Render `snapshot` with the bundled DOT template.
    pub fn render_dot(&self, snapshot: &MeshSnapshot) -> RenderResult<String> {
        self.render(snapshot, DOT_TEMPLATE)
    }
}

/// Render `mesh` with `template` using the default filters.
pub fn render_mesh(mesh: &Mesh, template: &str) -> RenderResult<String> {
    Renderer::new().render(&mesh.snapshot(), template)
}

/// Render `mesh` as Graphviz DOT.
pub fn render_mesh_as_dot(mesh: &Mesh) -> RenderResult<String> {
    Renderer::new().render_dot(&mesh.snapshot())
}
