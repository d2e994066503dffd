//! Ordering, repeatability and failure behaviour of batch compositing.

use super::test_harness::{changed_bounds, require_font, solid};
use image::{GenericImageView, Rgba};
use serde_json::json;
use textplace::placement::{Align, Request, StyleOverrides, StyleRecord};
use textplace::PlaceTextError;

const WHITE: [u8; 3] = [255, 255, 255];
const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

fn entry(font: &str, color: &str) -> StyleRecord {
    StyleRecord::new("Overlap")
        .with_position(150, 20)
        .with_font(font)
        .with_size(60)
        .with_color(color)
        .with_align(Align::Center)
}

#[test]
fn test_last_entry_wins_on_overlap() {
    let Some(fixture) = require_font() else {
        return;
    };
    let compositor = fixture.compositor();
    let input = solid(300, 120, WHITE);

    let blue_only = compositor
        .composite(&input, &[entry(&fixture.font_name, "#0000FF")])
        .unwrap();
    let red_then_blue = compositor
        .composite(
            &input,
            &[
                entry(&fixture.font_name, "#FF0000"),
                entry(&fixture.font_name, "#0000FF"),
            ],
        )
        .unwrap();

    let mut fully_covered = 0;
    for (x, y, pixel) in blue_only.pixels() {
        if pixel == BLUE {
            fully_covered += 1;
            assert_eq!(red_then_blue.get_pixel(x, y), BLUE, "at ({}, {})", x, y);
        }
    }
    assert!(fully_covered > 0, "expected solid glyph interiors");
}

#[test]
fn test_separate_entries_each_draw() {
    let Some(fixture) = require_font() else {
        return;
    };
    let input = solid(400, 200, WHITE);
    let batch = json!([
        ["Left", [10, 10], fixture.font_name, 30, "#000000"],
        ["Right", [390, 120], fixture.font_name, 30, "#000000", "right"]
    ]);
    let request = Request::from_value(&batch, &StyleOverrides::default()).unwrap();
    let output = fixture.compositor().place(&input, request).unwrap();

    let (min_x, min_y, max_x, max_y) = changed_bounds(&input, &output).unwrap();
    assert!(min_x <= 11 && min_y >= 10);
    assert!(max_x >= 388 && max_y > 120);

    // Nothing is drawn in the empty band between the two entries.
    for x in 0..400 {
        for y in 60..110 {
            assert_eq!(output.get_pixel(x, y), input.get_pixel(x, y));
        }
    }
}

#[test]
fn test_same_input_same_output() {
    let Some(fixture) = require_font() else {
        return;
    };
    let compositor = fixture.compositor();
    let input = solid(300, 120, WHITE);
    let records = vec![entry(&fixture.font_name, "#3C4658")];

    let first = compositor.composite(&input, &records).unwrap();
    let second = compositor.composite(&input, &records).unwrap();
    assert_eq!(first, second);

    // Drawing onto the output again is not idempotent.
    let twice = compositor.composite(&first, &records).unwrap();
    assert_ne!(twice, first);
}

#[test]
fn test_empty_batch_returns_identical_copy() {
    let Some(fixture) = require_font() else {
        return;
    };
    let input = solid(64, 48, [12, 34, 56]);
    let request = Request::from_value(&json!([]), &StyleOverrides::default()).unwrap();

    let output = fixture.compositor().place(&input, request).unwrap();
    assert_eq!(output, input);
}

#[test]
fn test_invalid_color_fails_whole_call() {
    let Some(fixture) = require_font() else {
        return;
    };
    let input = solid(64, 48, WHITE);
    let records = vec![
        entry(&fixture.font_name, "#000000"),
        entry(&fixture.font_name, "#ZZZ"),
    ];

    let err = fixture.compositor().composite(&input, &records).unwrap_err();
    assert!(matches!(err, PlaceTextError::InvalidColor { .. }));
}

#[test]
fn test_unknown_font_fails_whole_call() {
    let Some(fixture) = require_font() else {
        return;
    };
    let input = solid(64, 48, WHITE);
    let records = vec![
        entry(&fixture.font_name, "#000000"),
        entry("No-Such-Font.ttf", "#000000"),
    ];

    let err = fixture.compositor().composite(&input, &records).unwrap_err();
    match err {
        PlaceTextError::FontResolution { font, size, .. } => {
            assert_eq!(font, "No-Such-Font.ttf");
            assert_eq!(size, 60);
        }
        other => panic!("Expected FontResolution, got {:?}", other),
    }
}
