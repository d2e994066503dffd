//! High-level placement entry points.
//!
//! [`place_text_on_image_object`] works on an already decoded image;
//! [`place_text_on_image`] wraps it with decoding from and encoding to
//! files. Output format follows the output path's extension.

use super::compositor::Compositor;
use super::font::FontLoader;
use super::request::Request;
use crate::error::PlaceTextError;
use image::DynamicImage;
use std::path::{Path, PathBuf};

/// Place text on an in-memory image using fonts from the default `fonts`
/// directory. The input image is left untouched.
pub fn place_text_on_image_object(
    image: &DynamicImage,
    request: Request,
) -> Result<DynamicImage, PlaceTextError> {
    Compositor::new().place(image, request)
}

/// Decode `input`, place text on it, and save the result to `output`.
///
/// Returns the output path. Nothing is written if any entry fails.
pub fn place_text_on_image<L: FontLoader>(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    compositor: &Compositor<L>,
    request: Request,
) -> Result<PathBuf, PlaceTextError> {
    let input = input.as_ref();
    let output = output.as_ref();

    let image = image::open(input).map_err(|source| PlaceTextError::Decode {
        path: input.to_path_buf(),
        source,
    })?;

    tracing::debug!(
        input = %input.display(),
        width = image.width(),
        height = image.height(),
        entries = request.len(),
        "Placing text on image file"
    );

    let result = compositor.place(&image, request)?;

    result.save(output).map_err(|source| PlaceTextError::Encode {
        path: output.to_path_buf(),
        source,
    })?;

    Ok(output.to_path_buf())
}
