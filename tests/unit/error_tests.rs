// Error handling tests

use std::error::Error;
use std::path::PathBuf;
use textplace::PlaceTextError;

#[test]
fn test_error_variants_carry_context() {
    match PlaceTextError::invalid_color("#12", "too short") {
        PlaceTextError::InvalidColor { color, reason } => {
            assert_eq!(color, "#12");
            assert_eq!(reason, "too short");
        }
        _ => panic!("Expected InvalidColor variant"),
    }

    match PlaceTextError::font_resolution("Mali-Bold.ttf", 0, "bad size") {
        PlaceTextError::FontResolution { font, size, .. } => {
            assert_eq!(font, "Mali-Bold.ttf");
            assert_eq!(size, 0);
        }
        _ => panic!("Expected FontResolution variant"),
    }

    match PlaceTextError::malformed(4, "missing text") {
        PlaceTextError::MalformedRecord { index, .. } => assert_eq!(index, 4),
        _ => panic!("Expected MalformedRecord variant"),
    }
}

#[test]
fn test_decode_error_exposes_source() {
    let source = image::open("/definitely/not/here.png").unwrap_err();
    let err = PlaceTextError::Decode {
        path: PathBuf::from("/definitely/not/here.png"),
        source,
    };

    assert!(err
        .to_string()
        .starts_with("Failed to decode image '/definitely/not/here.png'"));
    assert!(err.source().is_some());
}

#[test]
fn test_error_converts_into_anyhow() {
    let err: anyhow::Error = PlaceTextError::Config("bad".to_string()).into();
    assert_eq!(err.to_string(), "Configuration error: bad");
}
