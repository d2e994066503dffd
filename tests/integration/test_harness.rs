//! Shared fixtures for integration tests.
//!
//! Real-glyph tests need a TrueType font. The harness looks for a common
//! one in the system font directories and copies it into a temporary
//! fonts directory, so every test resolves fonts through the fonts-dir
//! path with the system lookup switched off.

use image::{DynamicImage, GenericImageView, Rgb, RgbImage};
use tempfile::TempDir;
use textplace::placement::{Compositor, FontResolver};

const FONT_CANDIDATES: &[&str] = &[
    "DejaVuSans.ttf",
    "DejaVuSans-Bold.ttf",
    "LiberationSans-Regular.ttf",
    "NotoSans-Regular.ttf",
    "FreeSans.ttf",
    "Roboto-Regular.ttf",
    "Arial.ttf",
];

/// A temporary fonts directory holding one real font.
pub struct FontFixture {
    pub dir: TempDir,
    pub font_name: String,
}

impl FontFixture {
    /// Compositor that only sees this fixture's fonts directory.
    pub fn compositor(&self) -> Compositor {
        Compositor::with_resolver(
            FontResolver::new(self.dir.path()).with_system_font_dirs(Vec::new()),
        )
    }
}

/// Copy the first installed candidate font into a fresh fonts directory.
pub fn font_fixture() -> Option<FontFixture> {
    let system = FontResolver::new("/nonexistent-fonts-dir");

    FONT_CANDIDATES.iter().find_map(|name| {
        let path = system.locate(name)?;
        let dir = TempDir::new().ok()?;
        std::fs::copy(&path, dir.path().join(name)).ok()?;
        Some(FontFixture {
            dir,
            font_name: name.to_string(),
        })
    })
}

/// Like [`font_fixture`], logging why the calling test is skipped.
pub fn require_font() -> Option<FontFixture> {
    let fixture = font_fixture();
    if fixture.is_none() {
        eprintln!("skipping: no TrueType font found in system font directories");
    }
    fixture
}

pub fn solid(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)))
}

/// Inclusive (min_x, min_y, max_x, max_y) of pixels that differ.
pub fn changed_bounds(before: &DynamicImage, after: &DynamicImage) -> Option<(u32, u32, u32, u32)> {
    assert_eq!(before.dimensions(), after.dimensions());

    before
        .pixels()
        .zip(after.pixels())
        .filter(|((_, _, a), (_, _, b))| a != b)
        .map(|((x, y, _), _)| (x, y))
        .fold(None, |acc, (x, y)| match acc {
            None => Some((x, y, x, y)),
            Some((min_x, min_y, max_x, max_y)) => {
                Some((min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y)))
            }
        })
}
