//! Drag payload and its string transfer codec.
//!
//! Platforms whose drag sessions only carry strings move the payload as three
//! decimal fields; typed platforms hand `DragPayload` through directly.

use crate::model::note::{NoteId, Position};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Transfer key carrying the dragged note id.
pub const TRANSFER_KEY_NOTE_ID: &str = "text/plain";
/// Transfer key carrying the horizontal grab offset.
pub const TRANSFER_KEY_OFFSET_X: &str = "offset_x";
/// Transfer key carrying the vertical grab offset.
pub const TRANSFER_KEY_OFFSET_Y: &str = "offset_y";

/// Data captured at drag start and consumed at drop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragPayload {
    pub note_id: NoteId,
    /// Pointer x minus note left edge at drag start.
    pub grab_offset_x: f64,
    /// Pointer y minus note top edge at drag start.
    pub grab_offset_y: f64,
}

impl DragPayload {
    pub fn new(note_id: NoteId, grab_offset: Position) -> Self {
        Self {
            note_id,
            grab_offset_x: grab_offset.x,
            grab_offset_y: grab_offset.y,
        }
    }

    pub fn grab_offset(&self) -> Position {
        Position::new(self.grab_offset_x, self.grab_offset_y)
    }

    /// Encodes the payload as `(key, decimal text)` transfer fields.
    pub fn to_transfer_fields(&self) -> [(&'static str, String); 3] {
        [
            (TRANSFER_KEY_NOTE_ID, self.note_id.to_string()),
            (TRANSFER_KEY_OFFSET_X, self.grab_offset_x.to_string()),
            (TRANSFER_KEY_OFFSET_Y, self.grab_offset_y.to_string()),
        ]
    }

    /// Decodes a payload from a transfer lookup.
    ///
    /// `lookup` returns the stored string for a key, or `None` when absent.
    ///
    /// # Errors
    /// - `MissingField` when a key is absent or blank.
    /// - `InvalidNoteId` when the id is not a non-negative integer.
    /// - `InvalidOffset` when an offset is not a finite decimal number.
    pub fn from_transfer<F>(lookup: F) -> Result<Self, PayloadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_id = required_field(&lookup, TRANSFER_KEY_NOTE_ID)?;
        let note_id = raw_id
            .parse::<NoteId>()
            .map_err(|_| PayloadError::InvalidNoteId(raw_id.clone()))?;
        let grab_offset_x = parse_offset(&lookup, TRANSFER_KEY_OFFSET_X)?;
        let grab_offset_y = parse_offset(&lookup, TRANSFER_KEY_OFFSET_Y)?;
        Ok(Self {
            note_id,
            grab_offset_x,
            grab_offset_y,
        })
    }

    /// Checks that both grab offsets are finite.
    ///
    /// Payloads built in-process skip the string codec, so the typed drop
    /// path runs this instead of `parse_offset`.
    pub fn validate(&self) -> Result<(), PayloadError> {
        for (key, value) in [
            (TRANSFER_KEY_OFFSET_X, self.grab_offset_x),
            (TRANSFER_KEY_OFFSET_Y, self.grab_offset_y),
        ] {
            if !value.is_finite() {
                return Err(PayloadError::InvalidOffset {
                    key,
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Decodes a payload from raw field values in `id, x, y` order.
    pub fn from_transfer_values(
        note_id: &str,
        offset_x: &str,
        offset_y: &str,
    ) -> Result<Self, PayloadError> {
        Self::from_transfer(|key| match key {
            TRANSFER_KEY_NOTE_ID => Some(note_id.to_string()),
            TRANSFER_KEY_OFFSET_X => Some(offset_x.to_string()),
            TRANSFER_KEY_OFFSET_Y => Some(offset_y.to_string()),
            _ => None,
        })
    }
}

fn required_field<F>(lookup: &F, key: &'static str) -> Result<String, PayloadError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or(PayloadError::MissingField(key))
}

fn parse_offset<F>(lookup: &F, key: &'static str) -> Result<f64, PayloadError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = required_field(lookup, key)?;
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(PayloadError::InvalidOffset { key, value: raw }),
    }
}

/// Transfer payload decode errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    MissingField(&'static str),
    InvalidNoteId(String),
    InvalidOffset { key: &'static str, value: String },
}

impl Display for PayloadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(key) => write!(f, "drag payload field `{key}` is missing"),
            Self::InvalidNoteId(value) => write!(f, "drag payload note id is invalid: `{value}`"),
            Self::InvalidOffset { key, value } => {
                write!(f, "drag payload field `{key}` is not a finite number: `{value}`")
            }
        }
    }
}

impl Error for PayloadError {}
