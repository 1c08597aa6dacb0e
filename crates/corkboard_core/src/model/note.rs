//! Note domain model.
//!
//! # Responsibility
//! - Define the sticky-note record shared by layout, drag and editing paths.
//! - Define the fixed six-color palette.
//!
//! # Invariants
//! - `id` is assigned by creation order and never reused inside one list.
//! - `position` is the top-left corner of the note's bounding box.
//! - `position.y` never sits above the header floor (`minY`) once a note has
//!   been placed by the layout engine or a drop.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Stable identifier for one note inside a note list.
pub type NoteId = u32;

/// Immutable snapshot of the board's notes.
///
/// Untouched notes keep the same `Arc<Note>` across snapshots, so readers can
/// compare by pointer to find what changed.
pub type NoteList = Arc<Vec<Arc<Note>>>;

/// Point in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    pub fn offset_from(self, other: Position) -> Position {
        Position::new(self.x - other.x, self.y - other.y)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Fixed sticky-note palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteColor {
    Yellow,
    Pink,
    Blue,
    BrightYellow,
    LightSalmon,
    MintGreen,
}

impl NoteColor {
    /// Every palette entry, in display order.
    pub const PALETTE: [NoteColor; 6] = [
        NoteColor::Yellow,
        NoteColor::Pink,
        NoteColor::Blue,
        NoteColor::BrightYellow,
        NoteColor::LightSalmon,
        NoteColor::MintGreen,
    ];

    /// CSS hex value used by the presentation layer.
    pub fn hex(self) -> &'static str {
        match self {
            Self::Yellow => "#feff9c",
            Self::Pink => "#ff7eb9",
            Self::Blue => "#7afcff",
            Self::BrightYellow => "#fff740",
            Self::LightSalmon => "#ffa07a",
            Self::MintGreen => "#98ff98",
        }
    }
}

/// One sticky note on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    /// Quote content, replaced verbatim by text edits.
    pub text: String,
    pub color: NoteColor,
    /// Degrees; small magnitude for a hand-placed look.
    pub rotation: f64,
    pub position: Position,
    /// Set when a drop moved this note since the last scatter.
    #[serde(default)]
    pub manually_placed: bool,
}

impl Note {
    /// Returns a copy of this note moved to `position` by a drop.
    pub fn moved_to(&self, position: Position) -> Self {
        Self {
            position,
            manually_placed: true,
            ..self.clone()
        }
    }

    /// Returns a copy of this note with `text` replaced.
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Note, NoteColor, Position};

    fn sample() -> Note {
        Note {
            id: 3,
            text: "hello".to_string(),
            color: NoteColor::Pink,
            rotation: -2.5,
            position: Position::new(10.0, 220.0),
            manually_placed: false,
        }
    }

    #[test]
    fn palette_has_six_distinct_hex_values() {
        let mut hexes = NoteColor::PALETTE
            .iter()
            .map(|color| color.hex())
            .collect::<Vec<_>>();
        hexes.sort_unstable();
        hexes.dedup();
        assert_eq!(hexes.len(), 6);
    }

    #[test]
    fn moved_to_marks_note_as_manually_placed() {
        let moved = sample().moved_to(Position::new(1.0, 2.0));
        assert_eq!(moved.position, Position::new(1.0, 2.0));
        assert!(moved.manually_placed);
        assert_eq!(moved.text, "hello");
    }

    #[test]
    fn serialization_uses_snake_case_color_names() {
        let json = serde_json::to_value(sample()).expect("note should serialize");
        assert_eq!(json["color"], "pink");
        assert_eq!(json["position"]["y"], 220.0);
    }
}
