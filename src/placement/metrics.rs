//! Text metrics and alignment.

use super::style::{Align, Position};

/// Pixel-aligned ink bounds of a text run.
///
/// Coordinates are relative to the pen origin, with y = 0 at the top of the
/// line (the ascender) and the baseline at y = ascent. `max` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextBounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl TextBounds {
    pub fn width(&self) -> i32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> i32 {
        self.max_y - self.min_y
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Smallest bounds covering both `self` and `other`. Empty bounds are
    /// ignored.
    pub fn union(self, other: TextBounds) -> TextBounds {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        TextBounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

/// Shift an anchor horizontally so a run of `width` pixels aligns to it.
///
/// The vertical coordinate is never adjusted. Anchors near the ends of
/// the `i32` range saturate instead of wrapping.
pub fn anchor_origin(anchor: Position, width: i32, align: Align) -> Position {
    let x = match align {
        Align::Left => anchor.x,
        Align::Center => anchor.x.saturating_sub(width.div_euclid(2)),
        Align::Right => anchor.x.saturating_sub(width),
    };
    Position::new(x, anchor.y)
}
