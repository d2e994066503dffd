//! File-based placement and the command line front end.

use super::test_harness::{require_font, solid};
use image::{ColorType, DynamicImage, GenericImageView, Rgba, RgbaImage};
use serde_json::{json, Value};
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;
use textplace::placement::{place_text_on_image, Request, StyleOverrides};
use textplace::PlaceTextError;

fn centered_hello(font_name: &str) -> Request {
    let batch = json!([["Hello", [80, 20], font_name, 32, "#FF0000", "center"]]);
    Request::from_value(&batch, &StyleOverrides::default()).unwrap()
}

fn textplace(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_textplace"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run textplace binary")
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("temp paths are valid UTF-8")
}

#[test]
fn test_png_round_trip_keeps_rgba() {
    let Some(fixture) = require_font() else {
        return;
    };
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.png");
    let output = dir.path().join("out.png");
    let original = RgbaImage::from_pixel(160, 80, Rgba([255, 255, 255, 128]));
    original.save(&input).unwrap();

    let written = place_text_on_image(
        &input,
        &output,
        &fixture.compositor(),
        centered_hello(&fixture.font_name),
    )
    .unwrap();
    assert_eq!(written, output);

    let result = image::open(&output).unwrap();
    assert_eq!(result.color(), ColorType::Rgba8);
    assert_eq!(result.dimensions(), (160, 80));
    assert_ne!(result.to_rgba8(), original);
    // Corners are far from the text.
    assert_eq!(result.get_pixel(0, 0), Rgba([255, 255, 255, 128]));
    assert_eq!(result.get_pixel(159, 79), Rgba([255, 255, 255, 128]));
}

#[test]
fn test_jpeg_output_is_written() {
    let Some(fixture) = require_font() else {
        return;
    };
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.png");
    let output = dir.path().join("out.jpg");
    solid(160, 80, [255, 255, 255]).save(&input).unwrap();

    place_text_on_image(
        &input,
        &output,
        &fixture.compositor(),
        centered_hello(&fixture.font_name),
    )
    .unwrap();

    let result = image::open(&output).unwrap();
    assert_eq!(result.dimensions(), (160, 80));
    assert_eq!(result.color(), ColorType::Rgb8);
}

#[test]
fn test_unknown_output_extension_is_encode_error() {
    let Some(fixture) = require_font() else {
        return;
    };
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.png");
    solid(16, 16, [0, 0, 0]).save(&input).unwrap();

    let result = place_text_on_image(
        &input,
        dir.path().join("out.unknown"),
        &fixture.compositor(),
        Request::Batch(Vec::new()),
    );
    assert!(matches!(result, Err(PlaceTextError::Encode { .. })));
}

#[test]
fn test_in_memory_input_is_not_mutated() {
    let Some(fixture) = require_font() else {
        return;
    };
    let input = DynamicImage::ImageRgba8(RgbaImage::from_pixel(160, 80, Rgba([0, 0, 0, 255])));
    let snapshot = input.clone();

    let output = fixture
        .compositor()
        .place(&input, centered_hello(&fixture.font_name))
        .unwrap();
    assert_eq!(input, snapshot);
    assert_ne!(output, input);
}

#[test]
fn test_cli_records_prints_normalized_tuple() {
    let output = textplace(&["records", "--text", "Hi", "--size", "30", "--align", "center"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let printed: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        printed,
        json!([["Hi", [1397, -1180], "Mali-Bold.ttf", 30, "#3C4658", "center"]])
    );
}

#[test]
fn test_cli_records_reads_yaml_batch() {
    let dir = TempDir::new().unwrap();
    let batch = dir.path().join("batch.yaml");
    std::fs::write(&batch, "- [\"One\", [1, 2]]\n- [\"Two\", ~, ~, 20]\n").unwrap();

    let output = textplace(&["records", "--batch", path_str(&batch)]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let printed: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        printed,
        json!([
            ["One", [1, 2], "Mali-Bold.ttf", 12, "#3C4658", "left"],
            ["Two", [1397, -1180], "Mali-Bold.ttf", 20, "#3C4658", "left"]
        ])
    );
}

#[test]
fn test_cli_rejects_text_and_batch_together() {
    let output = textplace(&["records", "--text", "Hi", "--batch", "batch.json"]);
    assert!(!output.status.success());
}

#[test]
fn test_cli_fonts_lists_directory() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("Zeta.otf"), b"stub").unwrap();
    std::fs::write(dir.path().join("Alpha.ttf"), b"stub").unwrap();

    let output = textplace(&["--fonts-dir", path_str(dir.path()), "fonts"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Alpha.ttf\nZeta.otf\n");
}

#[test]
fn test_cli_fonts_falls_back_to_builtin_choices() {
    let dir = TempDir::new().unwrap();

    let output = textplace(&["--fonts-dir", path_str(dir.path()), "fonts"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Mali-Bold.ttf\nArial.ttf\nTimes.ttf\n"
    );
}

#[test]
fn test_cli_place_writes_output() {
    let Some(fixture) = require_font() else {
        return;
    };
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.png");
    let output = dir.path().join("out.png");
    solid(200, 100, [255, 255, 255]).save(&input).unwrap();

    let result = textplace(&[
        "--fonts-dir",
        path_str(fixture.dir.path()),
        "place",
        "-i",
        path_str(&input),
        "-o",
        path_str(&output),
        "--text",
        "CLI",
        "--position",
        "100,10",
        "--font",
        &fixture.font_name,
        "--size",
        "40",
        "--color",
        "navy",
        "--align",
        "center",
    ]);
    assert!(result.status.success(), "stderr: {}", String::from_utf8_lossy(&result.stderr));

    let written = image::open(&output).unwrap();
    assert_eq!(written.dimensions(), (200, 100));
    assert_ne!(written.to_rgb8(), image::open(&input).unwrap().to_rgb8());
}

#[test]
fn test_cli_place_invalid_color_fails_without_output() {
    let Some(fixture) = require_font() else {
        return;
    };
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.png");
    let output = dir.path().join("out.png");
    solid(50, 50, [255, 255, 255]).save(&input).unwrap();

    let result = textplace(&[
        "--fonts-dir",
        path_str(fixture.dir.path()),
        "place",
        "-i",
        path_str(&input),
        "-o",
        path_str(&output),
        "--text",
        "x",
        "--font",
        &fixture.font_name,
        "--color",
        "#12",
    ]);
    assert!(!result.status.success());
    assert!(!output.exists());
}
