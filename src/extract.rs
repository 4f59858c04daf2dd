//! Inline SVG extraction from HTML pages
//!
//! Every heading names the first `<svg>` that follows it in document order.
//! The SVG markup is written to a file named after the heading text.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

/// Heading selector used when none is configured
pub const DEFAULT_HEADING: &str = "h1";

/// Output directory used when none is configured
pub const DEFAULT_OUT_DIR: &str = "svgs";

/// Error type for extraction
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExtractError {
    /// Heading selector is not valid CSS
    #[error("invalid heading selector '{0}'")]
    Selector(String),
    /// Reading the page or writing an SVG failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A heading and the SVG that follows it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingSvg {
    /// Heading text with whitespace-only chunks dropped
    pub heading: String,
    /// Outer markup of the SVG, if one follows the heading
    pub svg: Option<String>,
}

/// What happened to one heading when writing files
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractOutcome {
    Saved { heading: String, path: PathBuf },
    NoSvg { heading: String },
    /// The heading text has no letters or digits to build a file name from
    EmptyName { heading: String },
}

fn unsafe_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9]+").expect("valid filename regex literal"))
}

/// Turn heading text into a file stem.
///
/// Runs of characters other than ASCII letters and digits become one `_`;
/// leading and trailing underscores are dropped and the result is lowercased.
///
/// # Examples
///
/// ```
/// use sprep::extract::sanitize_filename;
///
/// assert_eq!(sanitize_filename("Blue Flower #2!"), "blue_flower_2");
/// assert_eq!(sanitize_filename("***"), "");
/// ```
pub fn sanitize_filename(text: &str) -> String {
    unsafe_chars().replace_all(text, "_").trim_matches('_').to_lowercase()
}

/// Text of an element: every text chunk trimmed and concatenated.
fn heading_text(element: &ElementRef) -> String {
    element.text().map(str::trim).filter(|s| !s.is_empty()).collect()
}

/// Pair every non-empty heading matching `heading_selector` with the next SVG.
pub fn find_heading_svgs(
    html: &str,
    heading_selector: &str,
) -> Result<Vec<HeadingSvg>, ExtractError> {
    let document = Html::parse_document(html);
    let headings = Selector::parse(heading_selector)
        .map_err(|_| ExtractError::Selector(heading_selector.to_string()))?;
    let svg_selector =
        Selector::parse("svg").map_err(|_| ExtractError::Selector("svg".to_string()))?;

    // Preorder position of every node, so "after" includes the heading's own
    // descendants.
    let order: HashMap<_, usize> = document
        .tree
        .root()
        .descendants()
        .enumerate()
        .map(|(i, node)| (node.id(), i))
        .collect();
    let position = |element: &ElementRef| order.get(&element.id()).copied().unwrap_or(0);

    let svgs: Vec<(usize, ElementRef)> =
        document.select(&svg_selector).map(|svg| (position(&svg), svg)).collect();

    let mut found = Vec::new();
    for heading in document.select(&headings) {
        let text = heading_text(&heading);
        if text.is_empty() {
            continue;
        }
        let after = position(&heading);
        let svg = svgs.iter().find(|(pos, _)| *pos > after).map(|(_, svg)| svg.html());
        found.push(HeadingSvg { heading: text, svg });
    }

    Ok(found)
}

/// Extract every heading's SVG from `html` into `out_dir`.
///
/// Headings whose names collide overwrite the earlier file.
pub fn extract_to_dir(
    html: &str,
    heading_selector: &str,
    out_dir: &Path,
) -> Result<Vec<ExtractOutcome>, ExtractError> {
    std::fs::create_dir_all(out_dir)?;

    let mut written = HashSet::new();
    let mut outcomes = Vec::new();
    for HeadingSvg { heading, svg } in find_heading_svgs(html, heading_selector)? {
        let Some(svg) = svg else {
            outcomes.push(ExtractOutcome::NoSvg { heading });
            continue;
        };

        let stem = sanitize_filename(&heading);
        if stem.is_empty() {
            log::warn!("heading '{}' has no usable characters for a file name", heading);
            outcomes.push(ExtractOutcome::EmptyName { heading });
            continue;
        }

        let path = out_dir.join(format!("{}.svg", stem));
        if !written.insert(path.clone()) {
            log::warn!("'{}' overwrites {}", heading, path.display());
        }
        std::fs::write(&path, svg)?;
        outcomes.push(ExtractOutcome::Saved { heading, path });
    }

    Ok(outcomes)
}

/// Read the HTML page at `input` and extract its SVGs into `out_dir`.
pub fn extract_file(
    input: &Path,
    heading_selector: &str,
    out_dir: &Path,
) -> Result<Vec<ExtractOutcome>, ExtractError> {
    let html = std::fs::read_to_string(input)?;
    extract_to_dir(&html, heading_selector, out_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PAGE: &str = r#"<!DOCTYPE html>
<html><body>
  <h1>  Red   Rose </h1>
  <p>intro</p>
  <div><svg viewBox="0 0 10 10"><circle r="4"/></svg></div>
  <h1>Tulip <em>(yellow)</em></h1>
  <svg width="5"><rect width="5" height="5"/></svg>
  <h1>   </h1>
  <h1>Last</h1>
</body></html>"#;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("__Hello, World__"), "hello_world");
        assert_eq!(sanitize_filename("Été"), "t");
    }

    #[test]
    fn test_find_heading_svgs_pairs_in_order() {
        let found = find_heading_svgs(PAGE, "h1").unwrap();

        assert_eq!(found.len(), 3);
        assert_eq!(found[0].heading, "Red   Rose");
        assert!(found[0].svg.as_deref().unwrap().contains("viewBox=\"0 0 10 10\""));
        assert_eq!(found[1].heading, "Tulip(yellow)");
        assert!(found[1].svg.as_deref().unwrap().contains("<rect"));
        assert_eq!(found[2].heading, "Last");
        assert!(found[2].svg.is_none());
    }

    #[test]
    fn test_svg_inside_heading_counts() {
        let html = "<h2>Icon <svg id=\"inner\"></svg></h2><svg id=\"outer\"></svg>";
        let found = find_heading_svgs(html, "h2").unwrap();
        assert!(found[0].svg.as_deref().unwrap().contains("inner"));
    }

    #[test]
    fn test_invalid_selector() {
        assert!(matches!(find_heading_svgs(PAGE, "h1[["), Err(ExtractError::Selector(_))));
    }

    #[test]
    fn test_extract_to_dir_writes_files() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("svgs");

        let outcomes = extract_to_dir(PAGE, DEFAULT_HEADING, &out).unwrap();

        assert_eq!(outcomes.len(), 3);
        let rose = std::fs::read_to_string(out.join("red_rose.svg")).unwrap();
        assert!(rose.starts_with("<svg"));
        assert!(rose.contains("<circle"));
        assert!(out.join("tulip_yellow.svg").exists());
        assert_eq!(outcomes[2], ExtractOutcome::NoSvg { heading: "Last".to_string() });
    }

    #[test]
    fn test_extract_to_dir_empty_name_skipped() {
        let temp = TempDir::new().unwrap();
        let outcomes = extract_to_dir("<h1>!!!</h1><svg></svg>", "h1", temp.path()).unwrap();
        assert!(matches!(outcomes[0], ExtractOutcome::EmptyName { .. }));
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_extract_to_dir_duplicate_overwrites() {
        let temp = TempDir::new().unwrap();
        let html = "<h1>Leaf</h1><svg id=\"a\"></svg><h1>leaf!</h1><svg id=\"b\"></svg>";
        let outcomes = extract_to_dir(html, "h1", temp.path()).unwrap();

        assert_eq!(outcomes.len(), 2);
        let content = std::fs::read_to_string(temp.path().join("leaf.svg")).unwrap();
        assert!(content.contains("\"b\""));
    }
}
