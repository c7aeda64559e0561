//! doosabin CLI - Doo-Sabin subdivision from the command line.
//!
//! Usage: doosabin <COMMAND> [OPTIONS] <INPUT> [OUTPUT]
//!
//! Run `doosabin --help` for available commands. Set `RUST_LOG=debug` to see
//! per-vertex diagnostics.

use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use clap::{Parser, Subcommand};

use doosabin::algo::subdivide::{self, Adjacency, VertexClass, DEFAULT_MAX_FACE_ORDER};
use doosabin::algo::Progress;
use doosabin::io;
use doosabin::mesh::{PolyMesh, TriMesh};

#[derive(Parser)]
#[command(name = "doosabin")]
#[command(author, version, about = "Doo-Sabin subdivision CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display mesh information
    Info {
        /// Input mesh file
        input: PathBuf,
    },

    /// Subdivide a mesh
    Subdivide {
        /// Input mesh file
        input: PathBuf,

        /// Output mesh file
        output: PathBuf,

        /// Number of subdivision iterations
        #[arg(short, long, default_value = "1")]
        iterations: usize,

        /// Largest supported face order
        #[arg(long, default_value_t = DEFAULT_MAX_FACE_ORDER)]
        max_face_order: usize,

        /// Use single-threaded execution (for benchmarking)
        #[arg(long)]
        sequential: bool,
    },

    /// Split every polygon into a triangle fan
    Triangulate {
        /// Input mesh file
        input: PathBuf,

        /// Output mesh file
        output: PathBuf,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Info { input } => {
            cmd_info(&input)?;
        }

        Commands::Subdivide {
            input,
            output,
            iterations,
            max_face_order,
            sequential,
        } => {
            cmd_subdivide(&input, &output, iterations, max_face_order, sequential)?;
        }

        Commands::Triangulate { input, output } => {
            cmd_triangulate(&input, &output)?;
        }
    }

    Ok(())
}

/// Create a progress reporter that displays a progress bar on the terminal.
fn create_progress() -> Progress {
    let max_percent = Arc::new(AtomicUsize::new(0)); // Track highest percent seen (monotonic)

    Progress::new(move |current, total, message| {
        if total == 0 {
            return;
        }

        let raw_percent = if current >= total {
            100
        } else {
            ((current * 100) + (total / 2)) / total
        };

        let previous = max_percent.fetch_max(raw_percent, Ordering::Relaxed);
        if raw_percent <= previous && raw_percent != 100 {
            return;
        }

        let bar_width = 30;
        let filled = (raw_percent * bar_width) / 100;
        let bar = "=".repeat(filled);
        let space = " ".repeat(bar_width - filled);

        // Use carriage return to overwrite the line
        eprint!("\r[{}{}] {:3}% {}", bar, space, raw_percent, message);
        let _ = std::io::stderr().flush();

        if current >= total {
            eprintln!();
        }
    })
}

fn cmd_info(input: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let mesh: PolyMesh = io::load(input)?;

    println!("File: {}", input.display());
    println!("Vertices: {}", mesh.num_vertices());
    println!("Faces: {}", mesh.num_faces());
    println!("Corners: {}", mesh.num_corners());
    println!("Largest face: {} corners", mesh.max_face_order());

    let total_area: f64 = mesh.face_ids().map(|f| mesh.face_area(f)).sum();
    println!("Surface area: {:.6}", total_area);

    if let Some(c) = mesh.centroid() {
        println!("Centroid: ({:.3}, {:.3}, {:.3})", c.x, c.y, c.z);
    }

    // Bounding box
    if let Some((min, max)) = mesh.bounding_box() {
        println!(
            "Bounding box: ({:.3}, {:.3}, {:.3}) to ({:.3}, {:.3}, {:.3})",
            min.x, min.y, min.z, max.x, max.y, max.z
        );
        let diag = max - min;
        println!("Dimensions: {:.3} x {:.3} x {:.3}", diag.x, diag.y, diag.z);
    }

    // Check mesh type
    if mesh.is_triangle_mesh() {
        println!("Mesh type: Triangle mesh");
    } else if mesh.is_quad_mesh() {
        println!("Mesh type: Quad mesh");
    } else {
        println!("Mesh type: Mixed polygon mesh");
    }

    match Adjacency::build(&mesh) {
        Ok(adjacency) => {
            println!("Edges: {}", adjacency.num_edges());
            println!(
                "Vertices: {} regular, {} boundary, {} unused",
                adjacency.count(VertexClass::Regular),
                adjacency.count(VertexClass::Boundary),
                adjacency.count(VertexClass::Orphan)
            );
            if adjacency.count(VertexClass::Boundary) == 0 {
                println!("Topology: Closed (no boundary)");
            } else {
                println!("Topology: Open");
            }
        }
        Err(e) => println!("Topology: cannot be subdivided ({})", e),
    }

    Ok(())
}

fn cmd_subdivide(
    input: &PathBuf,
    output: &PathBuf,
    iterations: usize,
    max_face_order: usize,
    sequential: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mesh: PolyMesh = io::load(input)?;

    println!("Loaded: {} vertices, {} faces", mesh.num_vertices(), mesh.num_faces());

    let options = subdivide::SubdivideOptions::new(iterations)
        .with_parallel(!sequential)
        .with_max_face_order(max_face_order);
    let mode = if sequential { "sequential" } else { "parallel" };
    let progress = create_progress();

    println!("Applying Doo-Sabin subdivision ({} iterations, {})...", iterations, mode);
    let start = Instant::now();
    let result = subdivide::doo_sabin_subdivide_with_progress(&mesh, &options, &progress)?;
    let elapsed = start.elapsed();

    println!("Result: {} vertices, {} faces", result.num_vertices(), result.num_faces());
    io::save(&result, output)?;
    println!("Saved: {} ({:.2?})", output.display(), elapsed);

    Ok(())
}

fn cmd_triangulate(input: &PathBuf, output: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let mesh: PolyMesh = io::load(input)?;

    let tri = TriMesh::from_poly(&mesh);
    println!("Triangulated: {} faces -> {} triangles", mesh.num_faces(), tri.num_triangles());

    io::save(&tri.to_poly(), output)?;
    println!("Saved: {}", output.display());

    Ok(())
}
