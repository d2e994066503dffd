//! Text placement engine.
//!
//! Overlays styled text entries onto a copy of a raster image.
//!
//! # Features
//!
//! - **Two request shapes**: a single text with top-level style arguments,
//!   or a batch of positional tuples with per-entry optional fields
//! - **Font lookup** in a fonts directory with a system-font fallback
//! - **Colors** as `#RRGGBB` or named tokens
//! - **Alignment** (left, center, right) from measured ink bounds
//! - **Ordered compositing**: later entries draw over earlier ones
//!
//! # Batch Example
//!
//! ```json
//! [
//!   ["Hello", [400, 300], null, 50, "#FF0000", "center"],
//!   ["World", [400, 360]]
//! ]
//! ```
//!
//! Omitted or null fields take the defaults: position `(1397, -1180)`,
//! font `Mali-Bold.ttf`, size `12`, color `#3C4658`, align `left`.

pub mod color;
pub mod compositor;
pub mod font;
pub mod metrics;
pub mod processor;
pub mod request;
pub mod style;
pub mod surface;

// Re-export main types for convenience
pub use color::{named_color, parse_hex_color, Color, FillColor};
pub use compositor::Compositor;
pub use font::{FileFontLoader, FontLoader, FontResolver, GlyphFace, TextFace};
pub use metrics::{anchor_origin, TextBounds};
pub use processor::{place_text_on_image, place_text_on_image_object};
pub use request::{normalize, Request, StyleOverrides, TextEntry};
pub use style::{Align, Position, StyleRecord};
pub use surface::Surface;
