//! sprep - offline sprite asset preparation
//!
//! This library provides the tools behind the `sprep` binary:
//! - Stack PNG frames into a spritesheet with TexturePacker metadata
//! - Resize images and rebuild butterflies at several wing widths
//! - Render a swirling bubble burst animation
//! - Bake SVG transforms into path geometry and pull inline SVGs out of HTML

pub mod burst;
pub mod cli;
pub mod config;
pub mod export;
pub mod extract;
pub mod output;
pub mod paint;
pub mod resize;
pub mod shapes;
pub mod slice;
pub mod spritesheet;
pub mod svg;
pub mod swirl;
