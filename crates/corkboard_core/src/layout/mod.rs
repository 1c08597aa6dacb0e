//! Note placement.
//!
//! # Responsibility
//! - Abstract viewport/header measurement behind `EnvironmentProvider`.
//! - Shuffle quote order and scatter notes below the header.
//!
//! # Invariants
//! - Layout code never reads global state; environment and RNG are injected.
//! - Every placed note satisfies `position.y >= min_y`.

pub mod engine;
pub mod environment;
pub mod shuffle;
