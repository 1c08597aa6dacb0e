//! Corkboard domain model.
//!
//! # Responsibility
//! - Define the note record rendered by the presentation layer.
//! - Define the fixed color palette notes draw from.
//!
//! # Invariants
//! - Every note is identified by a `NoteId` unique within its note list.
//! - Note lists are immutable snapshots; mutations publish a new list.

pub mod note;
