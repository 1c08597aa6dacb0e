//! Drag state machine and drop application.
//!
//! # Invariants
//! - `Idle -> Dragging` only through `begin`; `Dragging -> Idle` through
//!   `finish` or `cancel`.
//! - `apply_drop` never mutates the input list; it returns a new list that
//!   shares every untouched `Arc<Note>`.

use crate::drag::payload::{DragPayload, PayloadError};
use crate::model::note::{Note, NoteId, NoteList, Position};
use std::sync::Arc;

/// Drag gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        payload: DragPayload,
        /// Layout generation current when the drag started.
        generation: u64,
    },
}

/// Result of one drop gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// The note was moved to `position` (already clamped).
    Moved { note_id: NoteId, position: Position },
    /// No note with this id exists; nothing changed.
    UnknownNote(NoteId),
    /// The transfer payload could not be decoded; nothing changed.
    Rejected(PayloadError),
    /// The drop pointer was not a finite coordinate; nothing changed.
    InvalidPointer,
    /// A relayout happened after the drag started; nothing changed.
    Stale { note_id: NoteId },
}

impl DropOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

/// Tracks the single in-flight drag gesture.
#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Starts dragging `note` grabbed at `pointer`.
    ///
    /// A drag already in flight is replaced; the platform never runs two.
    pub fn begin(&mut self, note: &Note, pointer: Position, generation: u64) -> DragPayload {
        let payload = DragPayload::new(note.id, pointer.offset_from(note.position));
        self.state = DragState::Dragging {
            payload,
            generation,
        };
        payload
    }

    /// Answers a drag-over event: `true` tells the platform to suppress its
    /// default reject so the drop event fires.
    ///
    /// Accepted anywhere on the surface, even with no drag tracked here, so a
    /// drop carrying transfer fields from another session still arrives.
    pub fn drag_over(&self) -> bool {
        true
    }

    /// Ends the gesture and returns the layout generation it started in.
    pub fn finish(&mut self) -> Option<u64> {
        match std::mem::take(&mut self.state) {
            DragState::Idle => None,
            DragState::Dragging { generation, .. } => Some(generation),
        }
    }

    /// Abandons the gesture. Returns whether a drag was in flight.
    pub fn cancel(&mut self) -> bool {
        self.finish().is_some()
    }
}

/// Position a drop at `pointer` resolves to, clamped below `min_y`.
pub fn drop_position(payload: &DragPayload, pointer: Position, min_y: f64) -> Position {
    let raw = pointer.offset_from(payload.grab_offset());
    Position::new(raw.x, raw.y.max(min_y))
}

/// Applies a drop to `notes`.
///
/// Returns `None` when no note matches `payload.note_id`.
pub fn apply_drop(
    notes: &NoteList,
    payload: &DragPayload,
    pointer: Position,
    min_y: f64,
) -> Option<(NoteList, Position)> {
    let index = notes.iter().position(|note| note.id == payload.note_id)?;
    let position = drop_position(payload, pointer, min_y);
    let mut next = notes.as_ref().clone();
    next[index] = Arc::new(notes[index].moved_to(position));
    Some((Arc::new(next), position))
}

#[cfg(test)]
mod tests {
    use super::{apply_drop, drop_position, DragController, DragState};
    use crate::drag::payload::DragPayload;
    use crate::model::note::{Note, NoteColor, NoteList, Position};
    use std::sync::Arc;

    fn note(id: u32, x: f64, y: f64) -> Note {
        Note {
            id,
            text: format!("note {id}"),
            color: NoteColor::Blue,
            rotation: 1.0,
            position: Position::new(x, y),
            manually_placed: false,
        }
    }

    fn list() -> NoteList {
        Arc::new(vec![
            Arc::new(note(0, 10.0, 250.0)),
            Arc::new(note(1, 100.0, 300.0)),
            Arc::new(note(2, 500.0, 420.0)),
        ])
    }

    #[test]
    fn begin_captures_grab_offset_from_note_corner() {
        let mut controller = DragController::new();
        let payload = controller.begin(&note(1, 100.0, 300.0), Position::new(120.0, 320.0), 4);
        assert_eq!(payload.grab_offset(), Position::new(20.0, 20.0));
        assert_eq!(
            controller.state(),
            DragState::Dragging {
                payload,
                generation: 4
            }
        );
        assert!(controller.drag_over());
    }

    #[test]
    fn finish_and_cancel_return_to_idle() {
        let mut controller = DragController::new();
        assert!(!controller.cancel());
        controller.begin(&note(0, 0.0, 0.0), Position::new(1.0, 1.0), 2);
        assert_eq!(controller.finish(), Some(2));
        assert!(!controller.is_dragging());

        controller.begin(&note(0, 0.0, 0.0), Position::new(1.0, 1.0), 2);
        assert!(controller.cancel());
        assert_eq!(controller.state(), DragState::Idle);
    }

    #[test]
    fn drop_moves_only_the_matching_note() {
        let notes = list();
        let payload = DragPayload::new(1, Position::new(20.0, 20.0));
        let (next, position) =
            apply_drop(&notes, &payload, Position::new(400.0, 500.0), 200.0).expect("id exists");

        assert_eq!(position, Position::new(380.0, 480.0));
        assert_eq!(next[1].position, position);
        assert!(next[1].manually_placed);
        assert!(Arc::ptr_eq(&next[0], &notes[0]));
        assert!(Arc::ptr_eq(&next[2], &notes[2]));
        assert_eq!(notes[1].position, Position::new(100.0, 300.0));
    }

    #[test]
    fn drop_clamps_y_but_not_x() {
        let payload = DragPayload::new(0, Position::new(30.0, 40.0));
        let position = drop_position(&payload, Position::new(-500.0, 90.0), 200.0);
        assert_eq!(position, Position::new(-530.0, 200.0));
    }

    #[test]
    fn drop_with_unknown_id_returns_none() {
        let payload = DragPayload::new(42, Position::new(0.0, 0.0));
        assert!(apply_drop(&list(), &payload, Position::new(1.0, 1.0), 0.0).is_none());
    }
}
