//! Baking element transforms into path geometry
//!
//! The document is streamed event by event. Ellipses, circles and transformed
//! paths are replaced in place by a plain `<path>`; everything else is copied
//! through untouched.

use quick_xml::events::{BytesDecl, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::matrix::Matrix;
use super::path::{
    ellipse_path, flatten_path, parse_path_data, PathError, DEFAULT_PRECISION, DEFAULT_STEPS,
};
use super::transform::{parse_transform, TransformError};
use crate::output::{ensure_parent_dir, with_stem_suffix};

/// Suffix appended to the input file stem when no output is given
pub const DEFAULT_SUFFIX: &str = "_flat";

/// Presentation attributes carried over to the replacement path
const COPIED_ATTRIBUTES: [&str; 9] = [
    "id",
    "class",
    "style",
    "fill",
    "stroke",
    "stroke-width",
    "opacity",
    "fill-opacity",
    "stroke-opacity",
];

/// Error type for flattening
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FlattenError {
    /// Malformed XML
    #[error("XML error at byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },
    /// Writing XML failed
    #[error("XML write error: {0}")]
    Write(#[from] quick_xml::Error),
    /// Reading or writing failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A numeric attribute could not be parsed
    #[error("<{element}> attribute '{attribute}' is not a number: '{value}'")]
    InvalidNumber {
        element: String,
        attribute: String,
        value: String,
    },
    /// A `transform` attribute could not be parsed
    #[error("<{element}>: {source}")]
    Transform {
        element: String,
        #[source]
        source: TransformError,
    },
    /// A `d` attribute could not be parsed
    #[error("<path>: {0}")]
    Path(#[from] PathError),
}

/// Settings for one flatten run
#[derive(Debug, Clone, PartialEq)]
pub struct FlattenOptions {
    /// Samples per path segment
    pub steps: u32,
    /// Decimal places in the written path data
    pub precision: usize,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self { steps: DEFAULT_STEPS, precision: DEFAULT_PRECISION }
    }
}

/// What a flatten run changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlattenReport {
    pub ellipses: usize,
    pub circles: usize,
    pub paths: usize,
}

impl FlattenReport {
    pub fn total(&self) -> usize {
        self.ellipses + self.circles + self.paths
    }
}

/// Attributes of one element, unescaped
type Attributes = HashMap<String, String>;

fn read_attributes(element: &BytesStart) -> Result<Attributes, quick_xml::Error> {
    let mut attrs = HashMap::new();
    for attr in element.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let raw = String::from_utf8_lossy(&attr.value);
        let value = quick_xml::escape::unescape(&raw)?.into_owned();
        attrs.insert(key, value);
    }
    Ok(attrs)
}

fn number(attrs: &Attributes, element: &str, name: &str) -> Result<f64, FlattenError> {
    match attrs.get(name).map(|s| s.trim()) {
        None | Some("") => Ok(0.0),
        Some(value) => value.parse().map_err(|_| FlattenError::InvalidNumber {
            element: element.to_string(),
            attribute: name.to_string(),
            value: value.to_string(),
        }),
    }
}

fn element_matrix(attrs: &Attributes, element: &str) -> Result<Matrix, FlattenError> {
    match attrs.get("transform") {
        Some(value) => parse_transform(value).map_err(|source| FlattenError::Transform {
            element: element.to_string(),
            source,
        }),
        None => Ok(Matrix::IDENTITY),
    }
}

/// New `d` for the element, or `None` when it is left untouched.
fn replacement_d(
    name: &str,
    attrs: &Attributes,
    options: &FlattenOptions,
    report: &mut FlattenReport,
) -> Result<Option<String>, FlattenError> {
    let geometry = match name {
        "ellipse" => {
            report.ellipses += 1;
            ellipse_path(
                number(attrs, name, "cx")?,
                number(attrs, name, "cy")?,
                number(attrs, name, "rx")?,
                number(attrs, name, "ry")?,
            )
        }
        "circle" => {
            report.circles += 1;
            let r = number(attrs, name, "r")?;
            ellipse_path(number(attrs, name, "cx")?, number(attrs, name, "cy")?, r, r)
        }
        "path" => {
            let has_transform = attrs.get("transform").is_some_and(|t| !t.trim().is_empty());
            let d = attrs.get("d").map(|d| d.trim()).unwrap_or("");
            if !has_transform || d.is_empty() {
                return Ok(None);
            }
            report.paths += 1;
            parse_path_data(d)?
        }
        _ => return Ok(None),
    };

    let matrix = element_matrix(attrs, name)?;
    Ok(Some(flatten_path(&geometry, &matrix, options.steps, options.precision)))
}

/// Build the `<path>` that replaces an element.
///
/// Keeps the original prefix so namespaced documents stay consistent.
fn replacement_element<'a>(original: &BytesStart, attrs: &Attributes, d: &str) -> BytesStart<'a> {
    let qualified = String::from_utf8_lossy(original.name().as_ref()).into_owned();
    let tag = match qualified.split_once(':') {
        Some((prefix, _)) => format!("{}:path", prefix),
        None => "path".to_string(),
    };

    let mut element = BytesStart::new(tag);
    for key in COPIED_ATTRIBUTES {
        if let Some(value) = attrs.get(key) {
            element.push_attribute((key, value.as_str()));
        }
    }
    element.push_attribute(("d", d));
    element
}

fn local_name(element: &BytesStart) -> String {
    String::from_utf8_lossy(element.local_name().as_ref()).into_owned()
}

/// Flatten every ellipse, circle and transformed path in `svg`.
///
/// Returns the rewritten document and what was replaced. An XML declaration
/// is added when the input has none.
pub fn flatten_svg_str(
    svg: &str,
    options: &FlattenOptions,
) -> Result<(String, FlattenReport), FlattenError> {
    let mut reader = Reader::from_str(svg);
    let mut writer = Writer::new(Vec::new());
    let mut report = FlattenReport::default();

    let xml_error = |reader: &Reader<&[u8]>, source: quick_xml::Error| FlattenError::Xml {
        position: reader.buffer_position() as u64,
        source,
    };

    if !svg.trim_start().starts_with("<?xml") {
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        writer.get_mut().push(b'\n');
    }

    loop {
        let event = reader.read_event().map_err(|e| xml_error(&reader, e))?;
        match event {
            Event::Eof => break,
            Event::Start(ref e) | Event::Empty(ref e) => {
                let name = local_name(e);
                let attrs = read_attributes(e).map_err(|err| xml_error(&reader, err))?;
                match replacement_d(&name, &attrs, options, &mut report)? {
                    Some(d) => {
                        log::debug!("flattening <{}>", name);
                        let replacement = replacement_element(e, &attrs, &d);
                        if matches!(event, Event::Start(_)) {
                            let end = e.to_end().into_owned();
                            reader.read_to_end(end.name()).map_err(|err| xml_error(&reader, err))?;
                        }
                        writer.write_event(Event::Empty(replacement))?;
                    }
                    None => writer.write_event(event.borrow())?,
                }
            }
            other => writer.write_event(other)?,
        }
    }

    let output = String::from_utf8(writer.into_inner())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    Ok((output, report))
}

/// Output path used when none is given: `art/leaf.svg` to `art/leaf_flat.svg`.
pub fn default_output_path(input: &Path, suffix: &str) -> PathBuf {
    with_stem_suffix(input, suffix)
}

/// Flatten the file at `input` and write the result to `output`.
pub fn flatten_svg_file(
    input: &Path,
    output: &Path,
    options: &FlattenOptions,
) -> Result<FlattenReport, FlattenError> {
    let svg = std::fs::read_to_string(input)?;
    let (flattened, report) = flatten_svg_str(&svg, options)?;

    ensure_parent_dir(output)?;
    std::fs::write(output, flattened)?;
    log::info!("flattened {} element(s) from {}", report.total(), input.display());
    Ok(report)
}
