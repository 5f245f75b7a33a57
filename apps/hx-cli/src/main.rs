use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use hx_mesh::Mesh;
use hx_render::{DOT_TEMPLATE, Renderer};

mod error;

use error::{AppError, AppResult};

#[derive(Parser)]
#[command(name = "hexmesh")]
#[command(about = "hexmesh - hexagonal architecture diagrams from mesh files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a mesh file and build the mesh it describes
    Validate {
        /// Path to the mesh file (.yaml, .yml or .json)
        mesh_path: PathBuf,
    },
    /// Print the mesh snapshot as JSON
    Snapshot {
        /// Path to the mesh file (.yaml, .yml or .json)
        mesh_path: PathBuf,
    },
    /// Render the mesh through a template (Graphviz DOT by default)
    Render {
        /// Path to the mesh file (.yaml, .yml or .json)
        mesh_path: PathBuf,
        /// Template file to use instead of the bundled DOT template
        #[arg(short, long)]
        template: Option<PathBuf>,
        /// Output file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    // Diagnostics go to stderr so rendered output on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { mesh_path } => cmd_validate(&mesh_path),
        Commands::Snapshot { mesh_path } => cmd_snapshot(&mesh_path),
        Commands::Render {
            mesh_path,
            template,
            output,
        } => cmd_render(&mesh_path, template.as_deref(), output.as_deref()),
    };

    if let Some(kind) = result.as_ref().err().and_then(AppError::mesh_kind) {
        tracing::error!(kind, "mesh description rejected");
    }
    result
}

fn cmd_validate(mesh_path: &Path) -> AppResult<()> {
    println!("Validating mesh: {}", mesh_path.display());
    let mesh = hx_project::load_mesh(mesh_path)?;
    println!("✓ Mesh is valid");
    println!("  Components: {}", mesh.components().count());
    println!("  Domains: {}", mesh.domains().count());
    println!("  Resources: {}", mesh.resources().len());
    println!("  Connections: {}", mesh.connections().len());
    Ok(())
}

fn cmd_snapshot(mesh_path: &Path) -> AppResult<()> {
    let mesh = hx_project::load_mesh(mesh_path)?;
    let json = snapshot_json(&mesh)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", json)?;
    Ok(())
}

fn cmd_render(mesh_path: &Path, template: Option<&Path>, output: Option<&Path>) -> AppResult<()> {
    let mesh = hx_project::load_mesh(mesh_path)?;
    let rendered = render(&mesh, template)?;

    if let Some(path) = output {
        std::fs::write(path, &rendered).map_err(|source| AppError::OutputWrite {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), bytes = rendered.len(), "wrote rendered mesh");
        println!("✓ Rendered mesh to {}", path.display());
    } else {
        let mut stdout = io::stdout().lock();
        stdout.write_all(rendered.as_bytes())?;
    }
    Ok(())
}

fn snapshot_json(mesh: &Mesh) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(&mesh.snapshot())?)
}

fn render(mesh: &Mesh, template: Option<&Path>) -> AppResult<String> {
    let snapshot = mesh.snapshot();
    let renderer = Renderer::new();
    let rendered = match template {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|source| AppError::TemplateRead {
                path: path.to_path_buf(),
                source,
            })?;
            renderer.render(&snapshot, &text)?
        }
        None => renderer.render(&snapshot, DOT_TEMPLATE)?,
    };
    Ok(rendered)
}
