//! # Classic Plexus
//!
//! The canonical rendition: medium density, pointer repulsion, and
//! widening connection lines at 60px.
//!
//! ## Controls
//!
//! - **Move the cursor**: particles within the interaction radius scatter
//! - **Hold a button**: the interaction radius grows by 1.25x
//! - **Escape**: close
//!
//! Run with: `cargo run --example classic`

use plexus::prelude::*;

fn main() {
    Background::new()
        .with_config(FieldConfig::classic())
        .with_title("plexus - classic")
        .run()
        .expect("Background failed");
}
