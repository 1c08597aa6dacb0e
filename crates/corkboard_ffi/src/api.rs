//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level board functions to Dart via FRB.
//! - Keep error semantics simple: failures become response messages.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - One board instance per process; every call runs to completion under the
//!   board lock, so the UI never observes a half-applied update.
//! - Drag payloads cross the boundary as the platform's string transfer
//!   fields and are decoded by core on drop.

use corkboard_core::drag::payload::{
    TRANSFER_KEY_NOTE_ID, TRANSFER_KEY_OFFSET_X, TRANSFER_KEY_OFFSET_Y,
};
use corkboard_core::{
    core_version as core_version_inner, default_quotes, init_logging as init_logging_inner,
    BoardConfig, BoardService, DropOutcome, LayoutMode, Note, NoteList, Position,
    StaticEnvironment, Viewport,
};
use log::warn;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Mutex, MutexGuard};

type FfiBoard = BoardService<StaticEnvironment, StdRng>;

static BOARD: Mutex<Option<FfiBoard>> = Mutex::new(None);

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Render-ready note projection.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteView {
    pub id: u32,
    pub text: String,
    /// CSS hex color, e.g. `#feff9c`.
    pub color_hex: String,
    /// Degrees.
    pub rotation: f64,
    pub x: f64,
    pub y: f64,
}

/// Board snapshot envelope returned by state-changing calls.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardResponse {
    /// Whether the operation changed or produced a board state.
    pub ok: bool,
    /// Human-readable message for diagnostics.
    pub message: String,
    pub notes: Vec<NoteView>,
    /// Header floor in effect after the call.
    pub min_y: f64,
    pub compact: bool,
    pub header_title: String,
}

impl BoardResponse {
    fn from_board(board: &FfiBoard, ok: bool, message: impl Into<String>) -> Self {
        let metrics = board.metrics();
        Self {
            ok,
            message: message.into(),
            notes: to_note_views(&board.notes()),
            min_y: metrics.min_y,
            compact: metrics.mode == LayoutMode::Compact,
            header_title: board.header_title().to_string(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            notes: Vec::new(),
            min_y: 0.0,
            compact: false,
            header_title: String::new(),
        }
    }
}

/// Transfer fields to store on the platform drag session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragStartResponse {
    pub ok: bool,
    pub message: String,
    /// Value for the `text/plain` transfer key.
    pub note_id: String,
    /// Value for the `offset_x` transfer key.
    pub offset_x: String,
    /// Value for the `offset_y` transfer key.
    pub offset_y: String,
}

/// Creates (or recreates) the board and performs the initial scatter.
///
/// # FFI contract
/// - `header_height = None` means "not measured yet"; core uses its fallback.
/// - `seed = None` seeds from OS entropy.
/// - `quotes = None` uses the built-in quote list.
#[flutter_rust_bridge::frb(sync)]
pub fn board_mount(
    viewport_width: f64,
    viewport_height: f64,
    header_height: Option<f64>,
    seed: Option<u64>,
    quotes: Option<Vec<String>>,
) -> BoardResponse {
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let env = StaticEnvironment::new(Viewport::new(viewport_width, viewport_height), header_height);
    let mut board = BoardService::new(
        BoardConfig::default(),
        env,
        rng,
        quotes.unwrap_or_else(default_quotes),
    );
    board.mount();
    let response = BoardResponse::from_board(&board, true, "Board mounted.");
    *lock_board() = Some(board);
    response
}

/// Pushes new measurements and re-lays the board out.
#[flutter_rust_bridge::frb(sync)]
pub fn board_resize(
    viewport_width: f64,
    viewport_height: f64,
    header_height: Option<f64>,
) -> BoardResponse {
    with_board(|board| {
        board
            .environment_mut()
            .update(Viewport::new(viewport_width, viewport_height), header_height);
        board.handle_resize();
        BoardResponse::from_board(board, true, "Board re-laid out.")
    })
    .unwrap_or_else(BoardResponse::failure)
}

/// Returns the current note snapshot (empty before mount).
#[flutter_rust_bridge::frb(sync)]
pub fn board_notes() -> Vec<NoteView> {
    with_board(|board| to_note_views(&board.notes())).unwrap_or_default()
}

/// Starts dragging a note and returns the transfer fields to carry.
#[flutter_rust_bridge::frb(sync)]
pub fn board_drag_start(note_id: u32, pointer_x: f64, pointer_y: f64) -> DragStartResponse {
    let result = with_board(|board| {
        board
            .begin_drag(note_id, Position::new(pointer_x, pointer_y))
            .map_err(|err| err.to_string())
    })
    .and_then(|inner| inner);

    match result {
        Ok(payload) => {
            let [(_, id), (_, offset_x), (_, offset_y)] = payload.to_transfer_fields();
            DragStartResponse {
                ok: true,
                message: String::new(),
                note_id: id,
                offset_x,
                offset_y,
            }
        }
        Err(message) => DragStartResponse {
            ok: false,
            message: format!("board_drag_start failed: {message}"),
            note_id: String::new(),
            offset_x: String::new(),
            offset_y: String::new(),
        },
    }
}

/// Drag-over answer: `true` means the UI must accept (prevent default).
#[flutter_rust_bridge::frb(sync)]
pub fn board_drag_over() -> bool {
    with_board(|board| board.drag_over()).unwrap_or(false)
}

/// Applies a drop using the raw transfer strings read from the drag session.
///
/// Missing or malformed fields reject the drop; the board is unchanged.
#[flutter_rust_bridge::frb(sync)]
pub fn board_drop(
    note_id: String,
    offset_x: String,
    offset_y: String,
    pointer_x: f64,
    pointer_y: f64,
) -> BoardResponse {
    with_board(|board| {
        let outcome = board.drop_transfer(
            |key| match key {
                TRANSFER_KEY_NOTE_ID => Some(note_id.clone()),
                TRANSFER_KEY_OFFSET_X => Some(offset_x.clone()),
                TRANSFER_KEY_OFFSET_Y => Some(offset_y.clone()),
                _ => None,
            },
            Position::new(pointer_x, pointer_y),
        );
        let applied = outcome.is_applied();
        BoardResponse::from_board(board, applied, drop_message(&outcome))
    })
    .unwrap_or_else(BoardResponse::failure)
}

/// Cancels the in-flight drag. Returns whether one was active.
#[flutter_rust_bridge::frb(sync)]
pub fn board_drag_cancel() -> bool {
    with_board(|board| board.cancel_drag()).unwrap_or(false)
}

/// Applies a text-prompt result; `text = None` means the prompt was cancelled.
#[flutter_rust_bridge::frb(sync)]
pub fn board_edit_note(note_id: u32, text: Option<String>) -> BoardResponse {
    with_board(|board| match board.edit_text(note_id, text) {
        Ok(true) => BoardResponse::from_board(board, true, "Note updated."),
        Ok(false) => BoardResponse::from_board(board, false, "Edit cancelled."),
        Err(err) => {
            BoardResponse::from_board(board, false, format!("board_edit_note failed: {err}"))
        }
    })
    .unwrap_or_else(BoardResponse::failure)
}

/// Appends a placeholder note centered in the viewport.
#[flutter_rust_bridge::frb(sync)]
pub fn board_add_note() -> BoardResponse {
    with_board(|board| {
        let note = board.add_note();
        BoardResponse::from_board(board, true, format!("Note {} added.", note.id))
    })
    .unwrap_or_else(BoardResponse::failure)
}

fn lock_board() -> MutexGuard<'static, Option<FfiBoard>> {
    // A panic inside core never leaves the list half-written, so a poisoned
    // lock still guards a consistent board.
    BOARD.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn with_board<T>(f: impl FnOnce(&mut FfiBoard) -> T) -> Result<T, String> {
    let mut guard = lock_board();
    match guard.as_mut() {
        Some(board) => Ok(f(board)),
        None => {
            warn!("event=ffi_call module=ffi status=error reason=board_not_mounted");
            Err("board is not mounted; call board_mount first".to_string())
        }
    }
}

fn drop_message(outcome: &DropOutcome) -> String {
    match outcome {
        DropOutcome::Moved { note_id, .. } => format!("Note {note_id} moved."),
        DropOutcome::UnknownNote(id) => format!("No note with id {id}; drop ignored."),
        DropOutcome::Rejected(err) => format!("Drop rejected: {err}"),
        DropOutcome::InvalidPointer => "Drop rejected: pointer is not finite.".to_string(),
        DropOutcome::Stale { note_id } => {
            format!("Board was re-laid out during the drag of note {note_id}; drop ignored.")
        }
    }
}

fn to_note_views(notes: &NoteList) -> Vec<NoteView> {
    notes.iter().map(|note| to_note_view(note.as_ref())).collect()
}

fn to_note_view(note: &Note) -> NoteView {
    NoteView {
        id: note.id,
        text: note.text.clone(),
        color_hex: note.color.hex().to_string(),
        rotation: note.rotation,
        x: note.position.x,
        y: note.position.y,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        board_add_note, board_drag_cancel, board_drag_over, board_drag_start, board_drop,
        board_edit_note, board_mount, board_notes, board_resize, core_version, init_logging,
        to_note_view,
    };
    use corkboard_core::{Note, NoteColor, Position};

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn note_view_carries_hex_color() {
        let view = to_note_view(&Note {
            id: 7,
            text: "hi".to_string(),
            color: NoteColor::MintGreen,
            rotation: 2.0,
            position: Position::new(1.0, 2.0),
            manually_placed: false,
        });
        assert_eq!(view.color_hex, "#98ff98");
        assert_eq!((view.x, view.y), (1.0, 2.0));
    }

    // Board state is process-wide, so the lifecycle runs as one sequence.
    #[test]
    fn board_lifecycle_through_ffi() {
        let mounted = board_mount(
            1000.0,
            800.0,
            Some(150.0),
            Some(7),
            Some(vec!["a".to_string(), "b".to_string(), "c".to_string()]),
        );
        assert!(mounted.ok, "{}", mounted.message);
        assert_eq!(mounted.notes.len(), 3);
        assert_eq!(mounted.min_y, 200.0);
        assert!(!mounted.compact);
        assert!(mounted.notes.iter().all(|note| note.y >= 200.0));
        assert!(board_drag_over());

        let start = board_drag_start(1, 0.0, 0.0);
        assert!(start.ok, "{}", start.message);
        assert_eq!(start.note_id, "1");

        let rejected = board_drop(
            start.note_id.clone(),
            "x".to_string(),
            "0".to_string(),
            10.0,
            10.0,
        );
        assert!(!rejected.ok);
        assert!(rejected.message.contains("rejected"));

        let dropped = board_drop(
            "1".to_string(),
            "20".to_string(),
            "20".to_string(),
            400.0,
            500.0,
        );
        assert!(dropped.ok, "{}", dropped.message);
        let moved = dropped.notes.iter().find(|note| note.id == 1).expect("note 1");
        assert_eq!((moved.x, moved.y), (380.0, 480.0));

        let missing = board_drag_start(99, 0.0, 0.0);
        assert!(!missing.ok);
        assert!(!board_drag_cancel());

        let edited = board_edit_note(0, Some("edited".to_string()));
        assert!(edited.ok, "{}", edited.message);
        let cancelled = board_edit_note(0, None);
        assert!(!cancelled.ok);
        assert!(board_notes().iter().any(|note| note.text == "edited"));

        let added = board_add_note();
        assert!(added.ok);
        assert_eq!(added.notes.len(), 4);

        let resized = board_resize(500.0, 900.0, Some(60.0));
        assert!(resized.ok);
        assert!(resized.compact);
        assert_eq!(resized.min_y, 80.0);
        assert_eq!(resized.notes.len(), 3);
        assert!(resized.notes.iter().all(|note| note.y >= 80.0));
    }
}
