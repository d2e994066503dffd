// Constants module - centralized default values for text placement
//
// These defaults are part of the placement contract: any entry that omits a
// style field is filled from here during normalization.

// =============================================================================
// Style defaults
// =============================================================================

/// Default anchor point (x, y) in image pixel coordinates
pub const DEFAULT_POSITION: (i32, i32) = (1397, -1180);

/// Default font file name, looked up in the fonts directory first
pub const DEFAULT_FONT_NAME: &str = "Mali-Bold.ttf";

/// Default font size in pixels per em
pub const DEFAULT_FONT_SIZE: u32 = 12;

/// Largest accepted font size. Glyph coverage buffers grow with the square
/// of the size, so anything above this is rejected before rasterizing.
pub const MAX_FONT_SIZE: u32 = 4096;

/// Default text color
pub const DEFAULT_FONT_COLOR: &str = "#3C4658";

// =============================================================================
// Font lookup defaults
// =============================================================================

/// Directory searched for font files, relative to the working directory
pub const DEFAULT_FONTS_DIR: &str = "fonts";

/// Font choices offered when the fonts directory has no font files
pub const FALLBACK_FONT_CHOICES: &[&str] = &["Mali-Bold.ttf", "Arial.ttf", "Times.ttf"];

/// File extensions recognised as loadable fonts
pub const FONT_EXTENSIONS: &[&str] = &["ttf", "otf"];

/// Maximum directory depth walked when looking up a system font
pub const SYSTEM_FONT_SEARCH_DEPTH: usize = 4;

// =============================================================================
// Logging defaults
// =============================================================================

/// Default log level when neither config nor RUST_LOG set one
pub const DEFAULT_LOG_LEVEL: &str = "info";
