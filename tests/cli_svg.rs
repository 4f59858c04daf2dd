//! CLI integration tests for the SVG and HTML tools

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn sprep(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sprep"))
        .args(args)
        .current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute sprep")
}

const LEAF: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
  <g id="leaf">
    <ellipse cx="50" cy="50" rx="20" ry="10" fill="green" transform="rotate(45 50 50)"/>
    <path d="M 0 0 L 10 0" stroke="black" transform="translate(5, 5)"/>
    <path d="M 1 1 L 2 2"/>
  </g>
</svg>
"#;

#[test]
fn test_flatten_default_output_name() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("leaf.svg"), LEAF).unwrap();

    let output = sprep(temp.path(), &["flatten", "leaf.svg"]);

    assert!(output.status.success(), "flatten failed: {}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).contains("leaf_flat.svg"));

    let flat = fs::read_to_string(temp.path().join("leaf_flat.svg")).unwrap();
    assert!(flat.starts_with("<?xml"));
    assert!(!flat.contains("<ellipse"));
    assert!(!flat.contains("transform="));
    assert!(flat.contains(r#"fill="green""#));
    assert!(flat.contains(r#"d="M 5,5 L "#));
    assert!(flat.contains(r#"<path d="M 1 1 L 2 2"/>"#));
    assert!(flat.contains(r#"<g id="leaf">"#));
}

#[test]
fn test_flatten_explicit_output_and_steps() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("line.svg"),
        r#"<svg><path d="M0 0 L 4 0" transform="scale(2)"/></svg>"#,
    )
    .unwrap();

    let output =
        sprep(temp.path(), &["flatten", "line.svg", "-o", "out/baked.svg", "--steps", "2"]);

    assert!(output.status.success());
    let baked = fs::read_to_string(temp.path().join("out/baked.svg")).unwrap();
    assert!(baked.contains(r#"d="M 0,0 L 4,0 L 8,0""#));
}

#[test]
fn test_flatten_malformed_xml_fails() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("bad.svg"), "<svg><g></svg>").unwrap();

    let output = sprep(temp.path(), &["flatten", "bad.svg"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_flatten_config_suffix() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("dot.svg"), r#"<svg><circle r="2"/></svg>"#).unwrap();
    fs::write(temp.path().join("sprep.toml"), "[flatten]\nsuffix = \"-baked\"\n").unwrap();

    let output = sprep(temp.path(), &["flatten", "dot.svg"]);

    assert!(output.status.success());
    assert!(temp.path().join("dot-baked.svg").exists());
}

const PAGE: &str = r#"<html><body>
<h1>Sun Flower</h1>
<svg viewBox="0 0 4 4"><circle r="2"/></svg>
<h1>Moon</h1>
</body></html>"#;

#[test]
fn test_extract_writes_named_files() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("flowers.html"), PAGE).unwrap();

    let output = sprep(temp.path(), &["extract", "flowers.html"]);

    assert!(output.status.success(), "extract failed: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Saved: sun_flower.svg"));
    assert!(stdout.contains("No <svg> found after heading: Moon"));

    let svg = fs::read_to_string(temp.path().join("svgs/sun_flower.svg")).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("<circle"));
}

#[test]
fn test_extract_custom_heading_and_dir() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("icons.html"),
        "<h2>Close Icon</h2><div><svg id=\"x\"></svg></div>",
    )
    .unwrap();

    let output = sprep(temp.path(), &["extract", "icons.html", "--heading", "h2", "-o", "icons"]);

    assert!(output.status.success());
    assert!(temp.path().join("icons/close_icon.svg").exists());
}

#[test]
fn test_extract_bad_selector() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("p.html"), PAGE).unwrap();

    let output = sprep(temp.path(), &["extract", "p.html", "--heading", "h1[["]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_explicit_config_flag() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("flowers.html"), PAGE).unwrap();
    fs::write(temp.path().join("custom.toml"), "[extract]\nout = \"art\"\n").unwrap();

    let output = sprep(temp.path(), &["--config", "custom.toml", "extract", "flowers.html"]);

    assert!(output.status.success());
    assert!(temp.path().join("art/sun_flower.svg").exists());
}
