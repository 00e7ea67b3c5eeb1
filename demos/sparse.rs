//! # Sparse Field
//!
//! Fewer particles and no connection pass: just discs scattering around
//! the cursor.
//!
//! Run with: `cargo run --example sparse`

use plexus::prelude::*;

fn main() {
    Background::new()
        .with_config(FieldConfig::sparse())
        .with_title("plexus - sparse")
        .run()
        .expect("Background failed");
}
