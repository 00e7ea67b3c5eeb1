//! # Fine Mesh
//!
//! Denser field with smaller particles and narrowing lines at 70px: close
//! pairs get bold strokes that thin out toward the connection radius.
//!
//! Run with: `cargo run --example fine_mesh`

use plexus::prelude::*;

fn main() {
    Background::new()
        .with_config(FieldConfig::fine_mesh())
        .with_title("plexus - fine mesh")
        .run()
        .expect("Background failed");
}
