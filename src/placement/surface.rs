//! Drawing surface.
//!
//! The surface owns a private copy of the caller's image and blends glyph
//! coverage onto it in place. Pixels outside the image are clipped. Pixels
//! that are never touched keep their original value and color type.

use super::color::Color;
use image::{DynamicImage, GenericImage, GenericImageView, Rgba};

/// A mutable copy of an image that text is drawn onto.
#[derive(Debug, Clone)]
pub struct Surface {
    image: DynamicImage,
}

impl Surface {
    /// Start a surface from a duplicate of `image`. The input is never
    /// touched.
    pub fn from_image(image: &DynamicImage) -> Self {
        Self {
            image: image.clone(),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Blend `color` at `coverage` onto the pixel at (x, y).
    pub fn blend_coverage(&mut self, x: i32, y: i32, color: Color, coverage: f32) {
        if x < 0 || y < 0 || x >= self.width() as i32 || y >= self.height() as i32 {
            return;
        }

        let alpha = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
        if alpha == 0 {
            return;
        }

        let (x, y) = (x as u32, y as u32);
        let background = self.image.get_pixel(x, y);
        let blended = blend_pixels(background, color.to_rgba(alpha));
        self.image.put_pixel(x, y, blended);
    }

    pub fn into_image(self) -> DynamicImage {
        self.image
    }
}

/// Porter-Duff "over": foreground + background * (1 - foreground.alpha)
fn blend_pixels(background: Rgba<u8>, foreground: Rgba<u8>) -> Rgba<u8> {
    if foreground[3] == 255 {
        return foreground;
    }

    let fg_alpha = foreground[3] as f32 / 255.0;
    let bg_alpha = background[3] as f32 / 255.0;
    let out_alpha = fg_alpha + bg_alpha * (1.0 - fg_alpha);

    if out_alpha < 0.001 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend_channel = |fg: u8, bg: u8| -> u8 {
        let fg_f = fg as f32 / 255.0;
        let bg_f = bg as f32 / 255.0;
        let result = (fg_f * fg_alpha + bg_f * bg_alpha * (1.0 - fg_alpha)) / out_alpha;
        (result * 255.0).round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        blend_channel(foreground[0], background[0]),
        blend_channel(foreground[1], background[1]),
        blend_channel(foreground[2], background[2]),
        (out_alpha * 255.0).round() as u8,
    ])
}
