//! Configuration for the asset tools
//!
//! Provides types, discovery and loading for the optional `sprep.toml`.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
