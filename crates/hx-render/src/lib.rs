//! hx-render: feeds mesh snapshots through a template engine.
//!
//! The mesh crate knows nothing about diagram syntax. This crate hands a
//! `MeshSnapshot` plus a template and a few text filters to `minijinja` and
//! returns the rendered text. A Graphviz DOT template ships as the default.

pub mod error;
pub mod filters;
pub mod renderer;

pub use error::{RenderError, RenderResult};
pub use renderer::{DOT_TEMPLATE, Renderer, render_mesh, render_mesh_as_dot};
