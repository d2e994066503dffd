//! Font resolution and loading.
//!
//! Font names are file names. A name is first looked up in the fonts
//! directory; if no such file exists the name is passed through unchanged
//! and tried as a path, then as a file name inside the system font
//! directories.
//!
//! Loading goes through the [`FontLoader`] trait so the compositor can be
//! driven by any glyph source. [`FileFontLoader`] is the ab_glyph-backed
//! implementation used in production.

use super::metrics::TextBounds;
use crate::constants::{
    DEFAULT_FONTS_DIR, FALLBACK_FONT_CHOICES, FONT_EXTENSIONS, MAX_FONT_SIZE,
    SYSTEM_FONT_SEARCH_DEPTH,
};
use crate::error::PlaceTextError;
use ab_glyph::{point, Font, FontVec, GlyphId, OutlinedGlyph, PxScale, ScaleFont};
use std::path::{Path, PathBuf};

/// A font loaded at a fixed size, able to measure and rasterize text.
pub trait TextFace: Send + Sync {
    /// Ink bounds of `text` relative to the pen origin.
    fn measure(&self, text: &str) -> TextBounds;

    /// Call `plot(x, y, coverage)` for every pixel the glyphs of `text`
    /// touch, relative to the pen origin. Coverage is in `0.0..=1.0`.
    fn rasterize(&self, text: &str, plot: &mut dyn FnMut(i32, i32, f32));
}

/// Resolves a font name and size into a [`TextFace`].
pub trait FontLoader {
    fn load(&self, font_name: &str, font_size: u32) -> Result<Box<dyn TextFace>, PlaceTextError>;
}

/// Maps font names to files.
#[derive(Debug, Clone)]
pub struct FontResolver {
    fonts_dir: PathBuf,
    system_font_dirs: Vec<PathBuf>,
}

impl Default for FontResolver {
    fn default() -> Self {
        Self::new(DEFAULT_FONTS_DIR)
    }
}

impl FontResolver {
    /// Create a resolver for `fonts_dir` with the platform's system font
    /// directories.
    pub fn new(fonts_dir: impl Into<PathBuf>) -> Self {
        Self {
            fonts_dir: fonts_dir.into(),
            system_font_dirs: default_system_font_dirs(),
        }
    }

    pub fn with_system_font_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.system_font_dirs = dirs;
        self
    }

    pub fn fonts_dir(&self) -> &Path {
        &self.fonts_dir
    }

    pub fn system_font_dirs(&self) -> &[PathBuf] {
        &self.system_font_dirs
    }

    /// The single fallback lookup: the fonts directory entry if it exists,
    /// otherwise the name itself.
    pub fn resolve(&self, font_name: &str) -> PathBuf {
        let candidate = self.fonts_dir.join(font_name);
        if candidate.exists() {
            candidate
        } else {
            PathBuf::from(font_name)
        }
    }

    /// Find the file a font name refers to, if any.
    pub fn locate(&self, font_name: &str) -> Option<PathBuf> {
        let resolved = self.resolve(font_name);
        if resolved.is_file() {
            return Some(resolved);
        }

        // Only bare file names are treated as system font identifiers.
        let path = Path::new(font_name);
        if path.components().count() != 1 {
            return None;
        }
        let file_name = path.file_name()?;

        self.system_font_dirs
            .iter()
            .find_map(|dir| find_file(dir, file_name, SYSTEM_FONT_SEARCH_DEPTH))
    }

    /// Font files offered for selection: `.ttf`/`.otf` files in the fonts
    /// directory, sorted, or the built-in choices when there are none.
    pub fn available_fonts(&self) -> Vec<String> {
        let mut fonts: Vec<String> = std::fs::read_dir(&self.fonts_dir)
            .into_iter()
            .flatten()
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && has_font_extension(path))
            .filter_map(|path| path.file_name()?.to_str().map(str::to_string))
            .collect();

        if fonts.is_empty() {
            return FALLBACK_FONT_CHOICES.iter().map(|s| s.to_string()).collect();
        }

        fonts.sort();
        fonts
    }
}

fn default_system_font_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    if cfg!(target_os = "windows") {
        if let Some(windir) = std::env::var_os("WINDIR") {
            dirs.push(PathBuf::from(windir).join("Fonts"));
        }
    } else if cfg!(target_os = "macos") {
        dirs.push(PathBuf::from("/Library/Fonts"));
        dirs.push(PathBuf::from("/System/Library/Fonts"));
        if let Some(home) = std::env::var_os("HOME") {
            dirs.push(PathBuf::from(home).join("Library/Fonts"));
        }
    } else {
        if let Some(data_home) = std::env::var_os("XDG_DATA_HOME") {
            dirs.push(PathBuf::from(data_home).join("fonts"));
        } else if let Some(home) = std::env::var_os("HOME") {
            dirs.push(PathBuf::from(home).join(".local/share/fonts"));
        }
        dirs.push(PathBuf::from("/usr/local/share/fonts"));
        dirs.push(PathBuf::from("/usr/share/fonts"));
    }

    dirs
}

fn has_font_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            FONT_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

fn find_file(dir: &Path, file_name: &std::ffi::OsStr, depth: usize) -> Option<PathBuf> {
    let candidate = dir.join(file_name);
    if candidate.is_file() {
        return Some(candidate);
    }
    if depth == 0 {
        return None;
    }

    let mut subdirs: Vec<PathBuf> = std::fs::read_dir(dir)
        .ok()?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    subdirs.sort();

    subdirs
        .iter()
        .find_map(|sub| find_file(sub, file_name, depth - 1))
}

/// Sizes outside `1..=MAX_FONT_SIZE` are unsupported.
fn check_font_size(font_size: u32) -> Result<(), String> {
    match font_size {
        0 => Err("font size must be greater than zero".to_string()),
        size if size > MAX_FONT_SIZE => Err(format!(
            "font size exceeds the maximum of {}",
            MAX_FONT_SIZE
        )),
        _ => Ok(()),
    }
}

/// Loads TrueType/OpenType files through a [`FontResolver`].
#[derive(Debug, Clone, Default)]
pub struct FileFontLoader {
    resolver: FontResolver,
}

impl FileFontLoader {
    pub fn new(resolver: FontResolver) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &FontResolver {
        &self.resolver
    }
}

impl FontLoader for FileFontLoader {
    fn load(&self, font_name: &str, font_size: u32) -> Result<Box<dyn TextFace>, PlaceTextError> {
        check_font_size(font_size)
            .map_err(|reason| PlaceTextError::font_resolution(font_name, font_size, reason))?;

        let path = self.resolver.locate(font_name).ok_or_else(|| {
            PlaceTextError::font_resolution(
                font_name,
                font_size,
                format!(
                    "not found in '{}' or the system font directories",
                    self.resolver.fonts_dir().display()
                ),
            )
        })?;

        tracing::debug!(font = %font_name, path = %path.display(), size = font_size, "Loading font");

        let data = std::fs::read(&path).map_err(|e| {
            PlaceTextError::font_resolution(
                font_name,
                font_size,
                format!("failed to read '{}': {}", path.display(), e),
            )
        })?;

        let face = GlyphFace::from_data(data, font_size)
            .map_err(|reason| PlaceTextError::font_resolution(font_name, font_size, reason))?;

        Ok(Box::new(face))
    }
}

/// An ab_glyph font scaled to a pixel size.
pub struct GlyphFace {
    font: FontVec,
    scale: PxScale,
}

impl std::fmt::Debug for GlyphFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphFace")
            .field("scale", &self.scale)
            .finish_non_exhaustive()
    }
}

impl GlyphFace {
    /// Parse font data and scale it so one em spans `font_size` pixels.
    pub fn from_data(data: Vec<u8>, font_size: u32) -> Result<Self, String> {
        check_font_size(font_size)?;
        let font = FontVec::try_from_vec(data).map_err(|e| e.to_string())?;
        let units_per_em = font
            .units_per_em()
            .ok_or_else(|| "font has no units-per-em".to_string())?;

        // ab_glyph scales by line height (ascent - descent), not by em.
        let height = font_size as f32 * font.height_unscaled() / units_per_em;

        Ok(Self {
            font,
            scale: PxScale::from(height),
        })
    }

    pub fn ascent(&self) -> f32 {
        self.font.as_scaled(self.scale).ascent()
    }

    /// Position each glyph along the baseline, applying kerning, and
    /// outline the ones that have ink.
    fn layout(&self, text: &str) -> Vec<OutlinedGlyph> {
        let scaled = self.font.as_scaled(self.scale);
        let baseline = scaled.ascent();

        let mut cursor_x = 0.0f32;
        let mut prev_glyph: Option<GlyphId> = None;
        let mut outlined = Vec::new();

        for c in text.chars() {
            let glyph_id = scaled.glyph_id(c);
            if let Some(prev) = prev_glyph {
                cursor_x += scaled.kern(prev, glyph_id);
            }

            let glyph = glyph_id.with_scale_and_position(self.scale, point(cursor_x, baseline));
            if let Some(glyph) = self.font.outline_glyph(glyph) {
                outlined.push(glyph);
            }

            cursor_x += scaled.h_advance(glyph_id);
            prev_glyph = Some(glyph_id);
        }

        outlined
    }
}

impl TextFace for GlyphFace {
    fn measure(&self, text: &str) -> TextBounds {
        self.layout(text)
            .iter()
            .map(|glyph| {
                let bounds = glyph.px_bounds();
                TextBounds {
                    min_x: bounds.min.x.floor() as i32,
                    min_y: bounds.min.y.floor() as i32,
                    max_x: bounds.max.x.ceil() as i32,
                    max_y: bounds.max.y.ceil() as i32,
                }
            })
            .fold(TextBounds::default(), TextBounds::union)
    }

    fn rasterize(&self, text: &str, plot: &mut dyn FnMut(i32, i32, f32)) {
        for glyph in self.layout(text) {
            let bounds = glyph.px_bounds();
            let left = bounds.min.x.floor() as i32;
            let top = bounds.min.y.floor() as i32;

            glyph.draw(|px, py, coverage| {
                if coverage > 0.0 {
                    plot(left + px as i32, top + py as i32, coverage.min(1.0));
                }
            });
        }
    }
}
