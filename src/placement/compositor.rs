//! Text compositor.
//!
//! Draws a sequence of [`StyleRecord`]s onto a copy of an image. For each
//! record, in order:
//!
//! 1. load the font at the record's size
//! 2. parse the fill color
//! 3. measure the text's ink bounds
//! 4. shift the anchor horizontally for the record's alignment
//! 5. blend the glyph coverage onto the shared surface
//!
//! Later records draw over earlier ones. The first failing record aborts
//! the whole call and the partially drawn surface is dropped.
//!
//! # Example
//!
//! ```ignore
//! use textplace::placement::{Compositor, StyleRecord, Align};
//!
//! let compositor = Compositor::new();
//! let records = vec![StyleRecord::new("Hello")
//!     .with_position(400, 300)
//!     .with_size(50)
//!     .with_color("#FF0000")
//!     .with_align(Align::Center)];
//!
//! let output = compositor.composite(&image, &records)?;
//! ```

use super::color::FillColor;
use super::font::{FileFontLoader, FontLoader, FontResolver};
use super::metrics::anchor_origin;
use super::request::Request;
use super::style::StyleRecord;
use super::surface::Surface;
use crate::error::PlaceTextError;
use image::DynamicImage;

/// Draws style records onto images through a [`FontLoader`].
#[derive(Debug, Clone, Default)]
pub struct Compositor<L = FileFontLoader> {
    loader: L,
}

impl Compositor<FileFontLoader> {
    /// Compositor resolving fonts from the default `fonts` directory.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resolver(resolver: FontResolver) -> Self {
        Self::with_loader(FileFontLoader::new(resolver))
    }
}

impl<L: FontLoader> Compositor<L> {
    pub fn with_loader(loader: L) -> Self {
        Self { loader }
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Draw `records` in order onto a copy of `image` and return the copy.
    pub fn composite(
        &self,
        image: &DynamicImage,
        records: &[StyleRecord],
    ) -> Result<DynamicImage, PlaceTextError> {
        let mut surface = Surface::from_image(image);

        for (index, record) in records.iter().enumerate() {
            self.draw_record(&mut surface, index, record)?;
        }

        Ok(surface.into_image())
    }

    /// Normalize `request` and composite its records.
    pub fn place(
        &self,
        image: &DynamicImage,
        request: Request,
    ) -> Result<DynamicImage, PlaceTextError> {
        self.composite(image, &request.into_records())
    }

    fn draw_record(
        &self,
        surface: &mut Surface,
        index: usize,
        record: &StyleRecord,
    ) -> Result<(), PlaceTextError> {
        let face = self.loader.load(&record.font_name, record.font_size)?;
        let color = FillColor::parse(&record.font_color)?.to_color()?;

        let bounds = face.measure(&record.text);
        let origin = anchor_origin(record.position, bounds.width(), record.align);

        tracing::debug!(
            index,
            font = %record.font_name,
            size = record.font_size,
            align = %record.align,
            anchor_x = record.position.x,
            anchor_y = record.position.y,
            origin_x = origin.x,
            width = bounds.width(),
            height = bounds.height(),
            "Drawing text entry"
        );

        if bounds.is_empty() {
            return Ok(());
        }

        // The ink box's left edge lands on the origin; the line top on y.
        let dx = origin.x.saturating_sub(bounds.min_x);
        let dy = origin.y;
        face.rasterize(&record.text, &mut |x: i32, y: i32, coverage: f32| {
            surface.blend_coverage(dx.saturating_add(x), dy.saturating_add(y), color, coverage);
        });

        Ok(())
    }
}
