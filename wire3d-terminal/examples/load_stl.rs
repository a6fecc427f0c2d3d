/// Example: Load an STL file and push its wireframe through the pipeline
///
/// Usage: cargo run --example load_stl -- path/to/file.stl
///
/// Prints the mesh bounds and the screen-space segments it produces for
/// the default camera, without touching the terminal.
use std::env;

use anyhow::Context;
use wire3d_core::{load_stl, CameraInfo, ClientBuffer, Color, Mesh, Pen, Segment, Space};

fn main() -> anyhow::Result<()> {
    let mesh = match env::args().nth(1) {
        Some(path) => {
            println!("Loading STL file: {path}");
            load_stl(&path).with_context(|| format!("loading {path}"))?
        }
        None => {
            eprintln!("No STL file provided, using default cube...");
            Mesh::cube(2.0)
        }
    };

    println!("Loaded {} triangles", mesh.len());
    if let Some((min, max)) = mesh.bounds() {
        println!("Bounds: {min} .. {max}");
    }

    let camera = CameraInfo::looking_at_origin(ClientBuffer::default())?;
    let mut segments: Vec<Segment> = Vec::new();
    let drawn: usize = mesh
        .normalized()
        .wireframe(Pen::new(Color::GREEN))
        .iter()
        .map(|line| line.draw(Space::World, &camera, &mut segments))
        .sum();

    println!("Emitted {drawn} segments into an 800x600 buffer");
    for segment in segments.iter().take(5) {
        println!(
            "  ({:.1}, {:.1}) -> ({:.1}, {:.1})",
            segment.from.x, segment.from.y, segment.to.x, segment.to.y
        );
    }
    Ok(())
}
