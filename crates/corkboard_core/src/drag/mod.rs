//! Drag-and-drop repositioning.
//!
//! # Responsibility
//! - Model the drag payload carried across one drag gesture.
//! - Translate drop coordinates into a clamped note position.
//!
//! # Invariants
//! - At most one note is dragged at a time.
//! - A drop only ever replaces the note whose id matches the payload.
//! - Cancelled, rejected or unknown-id drops leave the note list unchanged.

pub mod controller;
pub mod payload;
