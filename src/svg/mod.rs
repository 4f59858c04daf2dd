//! SVG geometry tools.
//!
//! - [`matrix`]: affine matrices in SVG order
//! - [`transform`]: `transform` attribute parsing
//! - [`path`]: path data parsing, sampling and serialization
//! - [`flatten`]: rewriting documents so shapes carry no transform

pub mod flatten;
pub mod matrix;
pub mod path;
pub mod transform;

pub use flatten::{flatten_svg_file, flatten_svg_str, FlattenError, FlattenOptions, FlattenReport};
pub use matrix::Matrix;
pub use path::{ellipse_path, format_number, parse_path_data, PathData, PathError};
pub use transform::{parse_transform, TransformError};
