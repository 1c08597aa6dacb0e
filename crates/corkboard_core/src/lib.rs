//! Core domain logic for the corkboard.
//! This crate is the single source of truth for note placement invariants.

pub mod config;
pub mod drag;
pub mod header;
pub mod layout;
pub mod logging;
pub mod model;
pub mod quotes;
pub mod service;

pub use config::{load_config, BoardConfig, ConfigError, ResizePolicy};
pub use drag::controller::{DragController, DragState, DropOutcome};
pub use drag::payload::{DragPayload, PayloadError};
pub use header::{title_scripts, Script};
pub use layout::engine::{LayoutEngine, LayoutMetrics, LayoutMode};
pub use layout::environment::{EnvironmentProvider, StaticEnvironment, Viewport};
pub use layout::shuffle::shuffled;
pub use logging::{default_log_level, init_logging, LoggingError};
pub use model::note::{Note, NoteColor, NoteId, NoteList, Position};
pub use quotes::{default_quotes, load_quotes, parse_quotes, QuoteError};
pub use service::board_service::{BoardError, BoardService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
