//! Labels a small two-block mesh three ways (variable values, point ids,
//! cell ids) and prints what would be drawn.
//!
//! Run with `RUST_LOG=debug cargo run --bin label_demo` to watch the filter
//! chains being rebuilt.

use anyhow::Result;
use cgmath::Vector3;

use exoviz::prelude::*;

fn build_mesh() -> Dataset {
    // Two unit quads side by side, one per block
    let mut mesh = Dataset::default();
    mesh.points = vec![
        Vector3::new(-0.8, -0.4, 0.5),
        Vector3::new(0.0, -0.4, 0.5),
        Vector3::new(0.0, 0.4, 0.5),
        Vector3::new(-0.8, 0.4, 0.5),
        Vector3::new(0.8, -0.4, 0.5),
        Vector3::new(0.8, 0.4, 0.5),
    ];
    mesh.cells = vec![
        Cell::new(1, vec![0, 1, 2, 3]),
        Cell::new(2, vec![1, 4, 5, 2]),
    ];
    mesh.point_arrays.insert(
        "temperature".to_string(),
        vec![293.0, 298.5, 301.0, 295.25, 310.0, 307.5],
    );
    mesh.cell_arrays
        .insert("stress".to_string(), vec![12.5, 47.0]);
    mesh
}

fn print_labels(title: &str, labels: &LabelSource) -> Result<()> {
    println!("{}", title);
    for label in labels.labels()? {
        println!(
            "  [{:+.2}, {:+.2}, {:+.2}]  {}",
            label.position.x, label.position.y, label.position.z, label.text
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let mut source = ExodusSource::new(build_mesh());
    source.set_variable("temperature")?;
    let source = source.into_ref();

    let renderer = Renderer::default().into_ref();

    let mut labels = LabelSource::new(source, Overrides::new())?;
    labels.set_renderer(renderer);

    // Default label_type is "variable": field values at the mesh points
    labels.update(&Overrides::new())?;
    print_labels("temperature values:", &labels)?;

    let mut point_ids = Overrides::new();
    point_ids.set_str("label_type", "point");
    labels.update(&point_ids)?;
    print_labels("point ids:", &labels)?;

    let mut cell_ids = Overrides::new();
    cell_ids.set_str("label_type", "cell");
    labels.update(&cell_ids)?;
    print_labels("cell ids (at centroids):", &labels)?;

    Ok(())
}
