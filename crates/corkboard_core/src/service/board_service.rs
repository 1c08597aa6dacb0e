//! Board use-case service.
//!
//! # Responsibility
//! - Own the published note list, the injected environment and RNG.
//! - Orchestrate mount/resize relayout, drag-and-drop, editing and add-note.
//!
//! # Invariants
//! - The note list is replaced wholesale; readers holding an older snapshot
//!   never observe a partial update.
//! - Note ids stay unique: relayout reassigns `0..n`, add-note takes the next
//!   unused id.
//! - Every note published by this service satisfies `position.y >= min_y` for
//!   the metrics it was placed or dropped under.
//! - Under `ResizePolicy::Rescatter`, a drop whose drag started before the
//!   latest relayout is discarded.

use crate::config::{BoardConfig, ResizePolicy};
use crate::drag::controller::{apply_drop, DragController, DragState, DropOutcome};
use crate::drag::payload::DragPayload;
use crate::layout::engine::{LayoutEngine, LayoutMetrics};
use crate::layout::environment::EnvironmentProvider;
use crate::layout::shuffle::shuffled;
use crate::model::note::{Note, NoteId, NoteList, Position};
use log::{debug, info, warn};
use rand::Rng;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Instant;

/// Service error for board use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Target note does not exist in the current list.
    NoteNotFound(NoteId),
    /// Text editing is turned off by configuration.
    EditingDisabled,
    /// Drag start pointer is not a finite coordinate.
    InvalidPointer,
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::EditingDisabled => write!(f, "note editing is disabled"),
            Self::InvalidPointer => write!(f, "drag pointer is not a finite coordinate"),
        }
    }
}

impl Error for BoardError {}

/// Board facade over layout, drag and editing logic.
pub struct BoardService<E: EnvironmentProvider, R: Rng> {
    engine: LayoutEngine,
    env: E,
    rng: R,
    quotes: Vec<String>,
    notes: NoteList,
    drag: DragController,
    generation: u64,
    next_id: NoteId,
}

impl<E: EnvironmentProvider, R: Rng> BoardService<E, R> {
    /// Creates an unmounted board; call `mount` to publish the first layout.
    pub fn new(config: BoardConfig, env: E, rng: R, quotes: Vec<String>) -> Self {
        Self {
            engine: LayoutEngine::new(config),
            env,
            rng,
            quotes,
            notes: Arc::new(Vec::new()),
            drag: DragController::new(),
            generation: 0,
            next_id: 0,
        }
    }

    pub fn config(&self) -> &BoardConfig {
        self.engine.config()
    }

    pub fn header_title(&self) -> &str {
        &self.engine.config().header_title
    }

    pub fn quotes(&self) -> &[String] {
        &self.quotes
    }

    pub fn environment(&self) -> &E {
        &self.env
    }

    /// Mutable environment access for shells that push new measurements
    /// before calling `handle_resize`.
    pub fn environment_mut(&mut self) -> &mut E {
        &mut self.env
    }

    /// Current published snapshot.
    pub fn notes(&self) -> NoteList {
        Arc::clone(&self.notes)
    }

    pub fn note(&self, id: NoteId) -> Option<Arc<Note>> {
        self.notes.iter().find(|note| note.id == id).cloned()
    }

    /// Layout metrics for the current environment measurements.
    pub fn metrics(&self) -> LayoutMetrics {
        self.engine.metrics(&self.env)
    }

    /// Number of relayouts performed so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    /// Performs the initial scatter of all quotes.
    pub fn mount(&mut self) -> NoteList {
        self.scatter_all("mount")
    }

    /// Re-lays notes out after a viewport change, honoring `resize_policy`.
    pub fn handle_resize(&mut self) -> NoteList {
        let policy = self.config().resize_policy;
        match policy {
            ResizePolicy::Rescatter => self.scatter_all("resize"),
            ResizePolicy::PreserveManual if self.notes.is_empty() => self.scatter_all("resize"),
            ResizePolicy::PreserveManual => self.replace_unpinned(),
        }
    }

    /// Starts dragging note `id` grabbed at `pointer`.
    ///
    /// Returns the payload the platform must carry to the drop.
    ///
    /// # Errors
    /// - `InvalidPointer` when `pointer` has a NaN or infinite coordinate.
    /// - `NoteNotFound` when no note has this id.
    pub fn begin_drag(
        &mut self,
        id: NoteId,
        pointer: Position,
    ) -> Result<DragPayload, BoardError> {
        if !pointer.is_finite() {
            warn!(
                "event=drag_start module=board status=rejected reason=invalid_pointer note_id={}",
                id
            );
            return Err(BoardError::InvalidPointer);
        }
        let note = self.note(id).ok_or(BoardError::NoteNotFound(id))?;
        let payload = self.drag.begin(&note, pointer, self.generation);
        debug!(
            "event=drag_start module=board status=ok note_id={} generation={}",
            id, self.generation
        );
        Ok(payload)
    }

    /// Whether a drag-over on the board should accept the drop.
    pub fn drag_over(&self) -> bool {
        self.drag.drag_over()
    }

    /// Abandons the in-flight drag; positions are untouched.
    pub fn cancel_drag(&mut self) -> bool {
        let cancelled = self.drag.cancel();
        if cancelled {
            debug!("event=drag_cancel module=board status=ok");
        }
        cancelled
    }

    /// Applies a drop carrying a typed payload.
    pub fn drop_payload(&mut self, payload: DragPayload, pointer: Position) -> DropOutcome {
        let started_generation = self.drag.finish();

        if !pointer.is_finite() {
            warn!(
                "event=drop module=board status=rejected reason=invalid_pointer note_id={}",
                payload.note_id
            );
            return DropOutcome::InvalidPointer;
        }

        if let Err(err) = payload.validate() {
            warn!(
                "event=drop module=board status=rejected reason=invalid_payload error={}",
                err
            );
            return DropOutcome::Rejected(err);
        }

        if let Some(generation) = started_generation {
            if generation != self.generation
                && self.config().resize_policy == ResizePolicy::Rescatter
            {
                info!(
                    "event=drop module=board status=ignored reason=stale note_id={} drag_generation={} generation={}",
                    payload.note_id, generation, self.generation
                );
                return DropOutcome::Stale {
                    note_id: payload.note_id,
                };
            }
        }

        let min_y = self.metrics().min_y;
        match apply_drop(&self.notes, &payload, pointer, min_y) {
            Some((next, position)) => {
                self.notes = next;
                debug!(
                    "event=drop module=board status=ok note_id={} x={:.1} y={:.1}",
                    payload.note_id, position.x, position.y
                );
                DropOutcome::Moved {
                    note_id: payload.note_id,
                    position,
                }
            }
            None => {
                info!(
                    "event=drop module=board status=ignored reason=unknown_note note_id={}",
                    payload.note_id
                );
                DropOutcome::UnknownNote(payload.note_id)
            }
        }
    }

    /// Applies a drop whose payload arrives as string transfer fields.
    ///
    /// Malformed fields reject the drop and leave the list unchanged.
    pub fn drop_transfer<F>(&mut self, lookup: F, pointer: Position) -> DropOutcome
    where
        F: Fn(&str) -> Option<String>,
    {
        match DragPayload::from_transfer(lookup) {
            Ok(payload) => self.drop_payload(payload, pointer),
            Err(err) => {
                self.drag.finish();
                warn!(
                    "event=drop module=board status=rejected reason=invalid_payload error={}",
                    err
                );
                DropOutcome::Rejected(err)
            }
        }
    }

    /// Applies a text-prompt result to note `id`.
    ///
    /// `None` means the prompt was cancelled. Returns `Ok(false)` for a
    /// cancelled prompt and `Ok(true)` when the text was replaced.
    ///
    /// # Errors
    /// - `EditingDisabled` when configuration turns editing off.
    /// - `NoteNotFound` when no note has this id.
    pub fn edit_text(
        &mut self,
        id: NoteId,
        prompt_result: Option<String>,
    ) -> Result<bool, BoardError> {
        if !self.config().editing_enabled {
            return Err(BoardError::EditingDisabled);
        }
        let index = self
            .notes
            .iter()
            .position(|note| note.id == id)
            .ok_or(BoardError::NoteNotFound(id))?;
        let Some(text) = prompt_result else {
            return Ok(false);
        };

        let mut next = self.notes.as_ref().clone();
        next[index] = Arc::new(self.notes[index].with_text(text));
        self.notes = Arc::new(next);
        info!("event=note_edit module=board status=ok note_id={id}");
        Ok(true)
    }

    /// Appends a note with the configured placeholder text, centered in the
    /// viewport and clamped below the header.
    pub fn add_note(&mut self) -> Arc<Note> {
        let metrics = self.metrics();
        let id = self.next_id;
        let text = self.engine.config().new_note_text.clone();
        let note = Arc::new(self.engine.centered_note(id, text, &metrics, &mut self.rng));
        self.next_id += 1;

        let mut next = self.notes.as_ref().clone();
        next.push(Arc::clone(&note));
        self.notes = Arc::new(next);
        info!(
            "event=note_add module=board status=ok note_id={} count={}",
            id,
            self.notes.len()
        );
        note
    }

    fn scatter_all(&mut self, trigger: &str) -> NoteList {
        let started_at = Instant::now();
        let metrics = self.metrics();
        let order = shuffled(&self.quotes, &mut self.rng);
        let notes = self.engine.scatter(&order, &metrics, &mut self.rng);

        self.next_id = notes.len() as NoteId;
        self.publish_layout(notes.into_iter().map(Arc::new).collect());
        info!(
            "event=relayout module=board status=ok trigger={} mode={:?} count={} min_y={:.1} generation={} duration_us={}",
            trigger,
            metrics.mode,
            self.notes.len(),
            metrics.min_y,
            self.generation,
            started_at.elapsed().as_micros()
        );
        self.notes()
    }

    fn replace_unpinned(&mut self) -> NoteList {
        let metrics = self.metrics();
        let mut preserved = 0usize;
        let mut next = Vec::with_capacity(self.notes.len());
        for note in self.notes.iter() {
            if note.manually_placed {
                preserved += 1;
                let position = metrics.clamp_below_header(note.position);
                if position == note.position {
                    next.push(Arc::clone(note));
                } else {
                    next.push(Arc::new(Note {
                        position,
                        ..note.as_ref().clone()
                    }));
                }
            } else {
                let fresh = self.engine.scatter(
                    std::slice::from_ref(&note.text),
                    &metrics,
                    &mut self.rng,
                );
                let placed = fresh.into_iter().next().map(|placed| Note {
                    id: note.id,
                    ..placed
                });
                if let Some(placed) = placed {
                    next.push(Arc::new(placed));
                }
            }
        }

        self.publish_layout(next);
        info!(
            "event=relayout module=board status=ok trigger=resize policy=preserve_manual count={} preserved={} min_y={:.1} generation={}",
            self.notes.len(),
            preserved,
            metrics.min_y,
            self.generation
        );
        self.notes()
    }

    fn publish_layout(&mut self, notes: Vec<Arc<Note>>) {
        self.notes = Arc::new(notes);
        self.generation += 1;
    }
}
