//! # Drift
//!
//! The pointer-blind rendition: particles drift and respawn, nothing else.
//! Seeded, so every run plays the same field.
//!
//! Run with: `cargo run --example drift`

use plexus::prelude::*;

fn main() {
    Background::new()
        .with_config(FieldConfig::drift())
        .with_title("plexus - drift")
        .with_seed(7)
        .run()
        .expect("Background failed");
}
