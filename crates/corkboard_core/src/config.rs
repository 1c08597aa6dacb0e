//! Board configuration.
//!
//! # Responsibility
//! - Hold every layout/drag tunable in one serde-backed struct.
//! - Load and validate JSON configuration files.
//!
//! # Invariants
//! - `BoardConfig::default()` reproduces the built-in layout constants.
//! - A config returned by `load_config` / `BoardConfig::from_json_str` has
//!   passed `validate()`.

use log::{error, info};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub const DEFAULT_NOTE_WIDTH: f64 = 200.0;
pub const DEFAULT_COMPACT_NOTE_WIDTH: f64 = 150.0;
pub const DEFAULT_MARGIN: f64 = 50.0;
pub const DEFAULT_COMPACT_MARGIN: f64 = 10.0;
pub const DEFAULT_SAFE_MARGIN: f64 = 50.0;
pub const DEFAULT_COMPACT_SAFE_MARGIN: f64 = 20.0;
pub const DEFAULT_MAX_TILT: f64 = 5.0;
pub const DEFAULT_COMPACT_MAX_TILT: f64 = 3.0;
pub const DEFAULT_COMPACT_BREAKPOINT: f64 = 768.0;
pub const DEFAULT_FALLBACK_HEADER_HEIGHT: f64 = 120.0;
pub const DEFAULT_NEW_NOTE_TEXT: &str = "Double click to edit...";
/// Upper bound for widths, margins, breakpoint and header fallback.
pub const MAX_LENGTH: f64 = 1.0e6;
/// Upper bound for tilt settings, in degrees.
pub const MAX_TILT_DEGREES: f64 = 180.0;
pub const DEFAULT_HEADER_TITLE: &str = "Words to Live By · 座右の銘 · 좌우명 · Слова на память";

/// What a viewport resize does to notes moved by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizePolicy {
    /// Every note is re-scattered; manual drags are discarded.
    #[default]
    Rescatter,
    /// Notes moved by a drop keep their position (re-clamped to the new
    /// header floor); the rest are re-scattered.
    PreserveManual,
}

/// Layout and interaction tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoardConfig {
    pub note_width: f64,
    pub compact_note_width: f64,
    /// Horizontal/vertical breathing room around each note footprint.
    pub margin: f64,
    pub compact_margin: f64,
    /// Gap kept between the header's bottom edge and the first note row.
    pub safe_margin: f64,
    pub compact_safe_margin: f64,
    /// Maximum absolute rotation in degrees.
    pub max_tilt: f64,
    pub compact_max_tilt: f64,
    /// Viewports narrower than this use compact metrics.
    pub compact_breakpoint: f64,
    /// Used when the header has not been measured yet.
    pub fallback_header_height: f64,
    pub resize_policy: ResizePolicy,
    pub editing_enabled: bool,
    pub new_note_text: String,
    pub header_title: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            note_width: DEFAULT_NOTE_WIDTH,
            compact_note_width: DEFAULT_COMPACT_NOTE_WIDTH,
            margin: DEFAULT_MARGIN,
            compact_margin: DEFAULT_COMPACT_MARGIN,
            safe_margin: DEFAULT_SAFE_MARGIN,
            compact_safe_margin: DEFAULT_COMPACT_SAFE_MARGIN,
            max_tilt: DEFAULT_MAX_TILT,
            compact_max_tilt: DEFAULT_COMPACT_MAX_TILT,
            compact_breakpoint: DEFAULT_COMPACT_BREAKPOINT,
            fallback_header_height: DEFAULT_FALLBACK_HEADER_HEIGHT,
            resize_policy: ResizePolicy::default(),
            editing_enabled: true,
            new_note_text: DEFAULT_NEW_NOTE_TEXT.to_string(),
            header_title: DEFAULT_HEADER_TITLE.to_string(),
        }
    }
}

impl BoardConfig {
    /// Parses and validates a JSON config document.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: BoardConfig =
            serde_json::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every metric is finite, non-negative and within bounds.
    ///
    /// Lengths are capped at `MAX_LENGTH` and tilts at `MAX_TILT_DEGREES` so
    /// every layout range stays sampleable.
    ///
    /// # Errors
    /// - `ConfigError::InvalidValue` naming the first negative or non-finite field.
    /// - `ConfigError::OutOfRange` naming the first field above its bound.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let metrics = [
            ("note_width", self.note_width, MAX_LENGTH),
            ("compact_note_width", self.compact_note_width, MAX_LENGTH),
            ("margin", self.margin, MAX_LENGTH),
            ("compact_margin", self.compact_margin, MAX_LENGTH),
            ("safe_margin", self.safe_margin, MAX_LENGTH),
            ("compact_safe_margin", self.compact_safe_margin, MAX_LENGTH),
            ("max_tilt", self.max_tilt, MAX_TILT_DEGREES),
            ("compact_max_tilt", self.compact_max_tilt, MAX_TILT_DEGREES),
            ("compact_breakpoint", self.compact_breakpoint, MAX_LENGTH),
            ("fallback_header_height", self.fallback_header_height, MAX_LENGTH),
        ];
        for (field, value, max) in metrics {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue {
                    field,
                    value: value.to_string(),
                });
            }
            if value > max {
                return Err(ConfigError::OutOfRange { field, value, max });
            }
        }
        if self.note_width == 0.0 || self.compact_note_width == 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "note_width",
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

/// Loads a JSON config file from disk.
pub fn load_config(path: impl AsRef<Path>) -> Result<BoardConfig, ConfigError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|err| {
        error!(
            "event=config_load module=config status=error path={} error={}",
            path.display(),
            err
        );
        ConfigError::Io(err)
    })?;
    let config = BoardConfig::from_json_str(&raw)?;
    info!(
        "event=config_load module=config status=ok path={} resize_policy={:?}",
        path.display(),
        config.resize_policy
    );
    Ok(config)
}

/// Configuration load/validation errors.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(String),
    InvalidValue { field: &'static str, value: String },
    OutOfRange { field: &'static str, value: f64, max: f64 },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read config: {err}"),
            Self::Parse(details) => write!(f, "invalid config document: {details}"),
            Self::InvalidValue { field, value } => {
                write!(f, "config field `{field}` must be finite and >= 0, got {value}")
            }
            Self::OutOfRange { field, value, max } => {
                write!(f, "config field `{field}` must be <= {max}, got {value}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}
