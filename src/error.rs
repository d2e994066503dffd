//! Error types for text placement.
//!
//! Every failure is fatal for the call that raised it: nothing is retried
//! and no default is substituted after normalization.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while normalizing or compositing text entries.
#[derive(Error, Debug)]
pub enum PlaceTextError {
    /// Color string is neither `#RRGGBB` nor a known color token
    #[error("Invalid color '{color}': {reason}")]
    InvalidColor { color: String, reason: String },

    /// Font could not be located or loaded at the requested size
    #[error("Failed to load font '{font}' at size {size}: {reason}")]
    FontResolution {
        font: String,
        size: u32,
        reason: String,
    },

    /// Request entry is missing its text or carries a field of the wrong shape
    #[error("Malformed record at index {index}: {reason}")]
    MalformedRecord { index: usize, reason: String },

    /// Input image could not be opened or decoded
    #[error("Failed to decode image '{}': {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Output image could not be encoded or written
    #[error("Failed to encode image '{}': {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PlaceTextError {
    /// Helper constructors for common error patterns
    pub fn invalid_color(color: impl Into<String>, reason: impl Into<String>) -> Self {
        PlaceTextError::InvalidColor {
            color: color.into(),
            reason: reason.into(),
        }
    }

    pub fn font_resolution(font: impl Into<String>, size: u32, reason: impl Into<String>) -> Self {
        PlaceTextError::FontResolution {
            font: font.into(),
            size,
            reason: reason.into(),
        }
    }

    pub fn malformed(index: usize, reason: impl Into<String>) -> Self {
        PlaceTextError::MalformedRecord {
            index,
            reason: reason.into(),
        }
    }
}
