//! Request normalization.
//!
//! Callers hand in either one text value with top-level style arguments
//! (the legacy shape) or a batch of positional tuples:
//!
//! ```text
//! [(text, position?, font_name?, font_size?, font_color?, align?), ...]
//! ```
//!
//! Both shapes are resolved once into a [`Request`] and then flattened into
//! an ordered `Vec<StyleRecord>`. Missing fields take the global defaults;
//! in the batch shape the caller's top-level arguments are ignored.

use super::style::{Align, Position, StyleRecord};
use crate::constants::{DEFAULT_FONT_COLOR, DEFAULT_FONT_NAME, DEFAULT_FONT_SIZE};
use crate::error::PlaceTextError;
use serde_json::Value;

/// Optional per-field style values. `None` means "use the default".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleOverrides {
    pub position: Option<Position>,
    pub font_name: Option<String>,
    pub font_size: Option<u32>,
    pub font_color: Option<String>,
    pub align: Option<Align>,
}

impl StyleOverrides {
    /// Merge these overrides with the global defaults.
    ///
    /// This is the only place defaults are applied, for both request shapes.
    pub fn resolve(&self, text: impl Into<String>) -> StyleRecord {
        StyleRecord {
            text: text.into(),
            position: self.position.unwrap_or_default(),
            font_name: self
                .font_name
                .clone()
                .unwrap_or_else(|| DEFAULT_FONT_NAME.to_string()),
            font_size: self.font_size.unwrap_or(DEFAULT_FONT_SIZE),
            font_color: self
                .font_color
                .clone()
                .unwrap_or_else(|| DEFAULT_FONT_COLOR.to_string()),
            align: self.align.unwrap_or_default(),
        }
    }
}

/// A text value paired with its optional style fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEntry {
    pub text: String,
    pub overrides: StyleOverrides,
}

impl TextEntry {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            overrides: StyleOverrides::default(),
        }
    }

    pub fn with_overrides(mut self, overrides: StyleOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn resolve(&self) -> StyleRecord {
        self.overrides.resolve(self.text.clone())
    }
}

/// A placement request, resolved from its input shape at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Legacy shape: one text with top-level style arguments.
    Single(TextEntry),
    /// Ordered entries, each carrying its own optional fields.
    Batch(Vec<TextEntry>),
}

impl Request {
    /// Build a legacy single-text request.
    pub fn single(text: impl Into<String>, overrides: StyleOverrides) -> Self {
        Request::Single(TextEntry::new(text).with_overrides(overrides))
    }

    /// Resolve a dynamically shaped value into a request.
    ///
    /// A non-empty array whose first element is itself an array is a batch;
    /// the empty array is an empty batch. Anything else is the legacy shape,
    /// where `overrides` supplies the style and the value must be a string.
    pub fn from_value(
        text_or_batch: &Value,
        overrides: &StyleOverrides,
    ) -> Result<Self, PlaceTextError> {
        match text_or_batch {
            Value::Array(items) if items.is_empty() => Ok(Request::Batch(Vec::new())),
            Value::Array(items) if items[0].is_array() => items
                .iter()
                .enumerate()
                .map(|(index, item)| parse_batch_entry(index, item))
                .collect::<Result<Vec<_>, _>>()
                .map(Request::Batch),
            Value::String(text) => Ok(Request::single(text.clone(), overrides.clone())),
            other => Err(PlaceTextError::malformed(
                0,
                format!("text must be a string, got {}", value_kind(other)),
            )),
        }
    }

    /// Number of entries this request will draw.
    pub fn len(&self) -> usize {
        match self {
            Request::Single(_) => 1,
            Request::Batch(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flatten into fully-populated records, preserving entry order.
    pub fn into_records(self) -> Vec<StyleRecord> {
        match self {
            Request::Single(entry) => vec![entry.resolve()],
            Request::Batch(entries) => entries.iter().map(TextEntry::resolve).collect(),
        }
    }
}

/// Normalize a text-or-batch value and top-level arguments into records.
pub fn normalize(
    text_or_batch: &Value,
    overrides: &StyleOverrides,
) -> Result<Vec<StyleRecord>, PlaceTextError> {
    Request::from_value(text_or_batch, overrides).map(Request::into_records)
}

fn parse_batch_entry(index: usize, item: &Value) -> Result<TextEntry, PlaceTextError> {
    let fields = item.as_array().ok_or_else(|| {
        PlaceTextError::malformed(
            index,
            format!("batch entry must be a sequence, got {}", value_kind(item)),
        )
    })?;

    // Index 0 is required; 1..=5 are optional and null means default.
    let text = match fields.first() {
        Some(Value::String(text)) => text.clone(),
        Some(other) => {
            return Err(PlaceTextError::malformed(
                index,
                format!("text must be a string, got {}", value_kind(other)),
            ))
        }
        None => return Err(PlaceTextError::malformed(index, "missing text")),
    };
    let field = |i: usize| fields.get(i).filter(|v| !v.is_null());

    let overrides = StyleOverrides {
        position: field(1).map(|v| parse_position(index, v)).transpose()?,
        font_name: field(2)
            .map(|v| parse_string(index, "font_name", v))
            .transpose()?,
        font_size: field(3).map(|v| parse_font_size(index, v)).transpose()?,
        font_color: field(4)
            .map(|v| parse_string(index, "font_color", v))
            .transpose()?,
        align: field(5).map(|v| parse_align(index, v)).transpose()?,
    };

    Ok(TextEntry { text, overrides })
}

fn parse_position(index: usize, value: &Value) -> Result<Position, PlaceTextError> {
    let coord = |v: &Value| v.as_i64().and_then(|n| i32::try_from(n).ok());

    match value.as_array().map(Vec::as_slice) {
        Some([x, y]) => match (coord(x), coord(y)) {
            (Some(x), Some(y)) => Ok(Position::new(x, y)),
            _ => Err(PlaceTextError::malformed(
                index,
                format!("position coordinates must be integers, got {}", value),
            )),
        },
        _ => Err(PlaceTextError::malformed(
            index,
            format!("position must be an [x, y] pair, got {}", value),
        )),
    }
}

fn parse_string(index: usize, name: &str, value: &Value) -> Result<String, PlaceTextError> {
    value.as_str().map(str::to_string).ok_or_else(|| {
        PlaceTextError::malformed(
            index,
            format!("{} must be a string, got {}", name, value_kind(value)),
        )
    })
}

fn parse_font_size(index: usize, value: &Value) -> Result<u32, PlaceTextError> {
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| {
            PlaceTextError::malformed(
                index,
                format!("font_size must be a non-negative integer, got {}", value),
            )
        })
}

fn parse_align(index: usize, value: &Value) -> Result<Align, PlaceTextError> {
    let name = parse_string(index, "align", value)?;
    name.parse::<Align>()
        .map_err(|_| PlaceTextError::malformed(index, format!("unknown align '{}'", name)))
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
