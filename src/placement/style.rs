//! Per-entry style records.
//!
//! A [`StyleRecord`] is the fully-populated placement instruction the
//! compositor consumes. Records are built by the request normalizer and
//! never carry missing fields.

use crate::constants::{
    DEFAULT_FONT_COLOR, DEFAULT_FONT_NAME, DEFAULT_FONT_SIZE, DEFAULT_POSITION,
};
use crate::error::PlaceTextError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Anchor point in image pixel coordinates.
///
/// Coordinates may be negative or lie beyond the image; pixels that fall
/// off the canvas are clipped when drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Default for Position {
    fn default() -> Self {
        DEFAULT_POSITION.into()
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<Position> for (i32, i32) {
    fn from(p: Position) -> Self {
        (p.x, p.y)
    }
}

/// Parses `"x,y"`, e.g. `"400,300"` or `"-20,15"`.
impl FromStr for Position {
    type Err = PlaceTextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| PlaceTextError::malformed(0, format!("position '{}' is not x,y", s)))?;

        let parse = |v: &str| {
            v.trim().parse::<i32>().map_err(|_| {
                PlaceTextError::malformed(0, format!("position '{}' has a non-integer part", s))
            })
        };

        Ok(Self::new(parse(x)?, parse(y)?))
    }
}

/// Horizontal alignment of a text run relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Align {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Align {
    type Err = PlaceTextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "center" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            other => Err(PlaceTextError::malformed(
                0,
                format!("align must be left, center or right, got '{}'", other),
            )),
        }
    }
}

/// One fully-resolved text placement instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRecord {
    pub text: String,
    pub position: Position,
    pub font_name: String,
    pub font_size: u32,
    pub font_color: String,
    pub align: Align,
}

impl StyleRecord {
    /// Create a record for `text` with every style field at its default.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            position: Position::default(),
            font_name: DEFAULT_FONT_NAME.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            font_color: DEFAULT_FONT_COLOR.to_string(),
            align: Align::default(),
        }
    }

    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.position = Position::new(x, y);
        self
    }

    pub fn with_font(mut self, font_name: impl Into<String>) -> Self {
        self.font_name = font_name.into();
        self
    }

    pub fn with_size(mut self, font_size: u32) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_color(mut self, font_color: impl Into<String>) -> Self {
        self.font_color = font_color.into();
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Render as the positional tuple shape accepted by batch requests:
    /// `[text, [x, y], font_name, font_size, font_color, align]`.
    pub fn to_tuple_value(&self) -> serde_json::Value {
        serde_json::json!([
            self.text,
            [self.position.x, self.position.y],
            self.font_name,
            self.font_size,
            self.font_color,
            self.align.as_str(),
        ])
    }
}
