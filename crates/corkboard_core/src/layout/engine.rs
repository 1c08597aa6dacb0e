//! Scatter layout engine.
//!
//! # Responsibility
//! - Derive per-viewport layout metrics (compact vs regular).
//! - Assign position, rotation and color to each quote.
//!
//! # Invariants
//! - `min_y = header_height + safe_margin`; every placed note has
//!   `position.y >= min_y`.
//! - Rotation lies in `[-max_tilt, max_tilt]`.
//! - Available ranges are floored at zero, so a viewport smaller than one
//!   footprint pins notes to `(margin, min_y)` instead of failing.
//! - Viewport extents are finite and within `[0, MAX_VIEWPORT_EXTENT]`
//!   before any range is sampled.

use crate::config::BoardConfig;
use crate::layout::environment::{EnvironmentProvider, Viewport};
use crate::model::note::{Note, NoteColor, NoteId, Position};
use rand::Rng;
use serde::Serialize;

/// Largest viewport width/height the engine samples over.
pub const MAX_VIEWPORT_EXTENT: f64 = 1.0e9;

/// Device class derived from viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    Regular,
    Compact,
}

/// Layout numbers for one viewport measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutMetrics {
    pub mode: LayoutMode,
    pub viewport: Viewport,
    pub header_height: f64,
    pub safe_margin: f64,
    /// Header floor; no note top edge may sit above it.
    pub min_y: f64,
    pub note_width: f64,
    pub margin: f64,
    pub available_width: f64,
    pub available_height: f64,
    pub max_tilt: f64,
}

impl LayoutMetrics {
    /// Computes metrics for a viewport and optional measured header height.
    ///
    /// NaN or negative viewport extents count as zero and infinite ones are
    /// capped at `MAX_VIEWPORT_EXTENT`.
    pub fn compute(config: &BoardConfig, viewport: Viewport, header_height: Option<f64>) -> Self {
        let viewport = Viewport::new(
            sanitize_extent(viewport.width),
            sanitize_extent(viewport.height),
        );
        let mode = if viewport.width < config.compact_breakpoint {
            LayoutMode::Compact
        } else {
            LayoutMode::Regular
        };
        let (safe_margin, note_width, margin, max_tilt) = match mode {
            LayoutMode::Regular => (
                config.safe_margin,
                config.note_width,
                config.margin,
                config.max_tilt,
            ),
            LayoutMode::Compact => (
                config.compact_safe_margin,
                config.compact_note_width,
                config.compact_margin,
                config.compact_max_tilt,
            ),
        };
        let header_height = header_height
            .filter(|value| value.is_finite() && *value >= 0.0)
            .unwrap_or(config.fallback_header_height);
        let min_y = header_height + safe_margin;
        let footprint = note_width + 2.0 * margin;

        Self {
            mode,
            viewport,
            header_height,
            safe_margin,
            min_y,
            note_width,
            margin,
            available_width: (viewport.width - footprint).max(0.0),
            available_height: (viewport.height - min_y - footprint).max(0.0),
            max_tilt,
        }
    }

    /// Note footprint including margins on both sides.
    pub fn footprint(&self) -> f64 {
        self.note_width + 2.0 * self.margin
    }

    /// Raises `position.y` to the header floor; `x` is left alone.
    pub fn clamp_below_header(&self, position: Position) -> Position {
        Position::new(position.x, position.y.max(self.min_y))
    }
}

/// Stateless scatter engine parameterized by `BoardConfig`.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    config: BoardConfig,
}

impl LayoutEngine {
    pub fn new(config: BoardConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Reads the environment and derives current metrics.
    pub fn metrics(&self, env: &impl EnvironmentProvider) -> LayoutMetrics {
        LayoutMetrics::compute(&self.config, env.viewport_size(), env.header_height())
    }

    /// Scatters `quotes` (already shuffled) with ids `0..n` in input order.
    pub fn scatter<R: Rng + ?Sized>(
        &self,
        quotes: &[String],
        metrics: &LayoutMetrics,
        rng: &mut R,
    ) -> Vec<Note> {
        quotes
            .iter()
            .enumerate()
            .map(|(index, quote)| Note {
                id: index as NoteId,
                text: quote.clone(),
                color: random_color(rng),
                rotation: random_rotation(metrics, rng),
                position: random_position(metrics, rng),
                manually_placed: false,
            })
            .collect()
    }

    /// Builds one note centered in the viewport, clamped below the header.
    pub fn centered_note<R: Rng + ?Sized>(
        &self,
        id: NoteId,
        text: impl Into<String>,
        metrics: &LayoutMetrics,
        rng: &mut R,
    ) -> Note {
        let half = metrics.note_width / 2.0;
        let center = Position::new(
            metrics.viewport.width / 2.0 - half,
            metrics.viewport.height / 2.0 - half,
        );
        Note {
            id,
            text: text.into(),
            color: random_color(rng),
            rotation: random_rotation(metrics, rng),
            position: metrics.clamp_below_header(center),
            manually_placed: false,
        }
    }
}

fn sanitize_extent(value: f64) -> f64 {
    if value.is_nan() || value < 0.0 {
        0.0
    } else {
        value.min(MAX_VIEWPORT_EXTENT)
    }
}

fn random_position<R: Rng + ?Sized>(metrics: &LayoutMetrics, rng: &mut R) -> Position {
    let x = metrics.margin + rng.gen_range(0.0..=metrics.available_width);
    let y = metrics.min_y + rng.gen_range(0.0..=metrics.available_height);
    Position::new(x, y)
}

fn random_rotation<R: Rng + ?Sized>(metrics: &LayoutMetrics, rng: &mut R) -> f64 {
    rng.gen_range(-metrics.max_tilt..=metrics.max_tilt)
}

fn random_color<R: Rng + ?Sized>(rng: &mut R) -> NoteColor {
    NoteColor::PALETTE[rng.gen_range(0..NoteColor::PALETTE.len())]
}

#[cfg(test)]
mod tests {
    use super::{LayoutEngine, LayoutMetrics, LayoutMode, MAX_VIEWPORT_EXTENT};
    use crate::config::BoardConfig;
    use crate::layout::environment::{StaticEnvironment, Viewport};
    use crate::model::note::Position;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn quotes(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("quote {i}")).collect()
    }

    #[test]
    fn regular_metrics_match_reference_scenario() {
        let metrics = LayoutMetrics::compute(
            &BoardConfig::default(),
            Viewport::new(1000.0, 800.0),
            Some(150.0),
        );
        assert_eq!(metrics.mode, LayoutMode::Regular);
        assert_eq!(metrics.min_y, 200.0);
        assert_eq!(metrics.footprint(), 300.0);
        assert_eq!(metrics.available_width, 700.0);
        assert_eq!(metrics.available_height, 300.0);
    }

    #[test]
    fn narrow_viewport_switches_to_compact_metrics() {
        let metrics = LayoutMetrics::compute(
            &BoardConfig::default(),
            Viewport::new(400.0, 900.0),
            Some(100.0),
        );
        assert_eq!(metrics.mode, LayoutMode::Compact);
        assert_eq!(metrics.min_y, 120.0);
        assert_eq!(metrics.max_tilt, 3.0);
        assert_eq!(metrics.footprint(), 170.0);
    }

    #[test]
    fn missing_or_invalid_header_height_uses_fallback() {
        let config = BoardConfig::default();
        let viewport = Viewport::new(1200.0, 900.0);
        let missing = LayoutMetrics::compute(&config, viewport, None);
        let nan = LayoutMetrics::compute(&config, viewport, Some(f64::NAN));
        assert_eq!(missing.header_height, 120.0);
        assert_eq!(nan.min_y, 170.0);
    }

    #[test]
    fn unbounded_or_invalid_viewport_is_sanitized_before_scatter() {
        let config = BoardConfig::default();
        let engine = LayoutEngine::new(config.clone());
        let mut rng = StdRng::seed_from_u64(8);

        let infinite = LayoutMetrics::compute(
            &config,
            Viewport::new(f64::INFINITY, f64::INFINITY),
            Some(100.0),
        );
        assert_eq!(infinite.viewport, Viewport::new(MAX_VIEWPORT_EXTENT, MAX_VIEWPORT_EXTENT));
        for note in engine.scatter(&quotes(20), &infinite, &mut rng) {
            assert!(note.position.is_finite());
            assert!(note.position.y >= infinite.min_y);
        }

        let broken = LayoutMetrics::compute(
            &config,
            Viewport::new(f64::NAN, f64::NEG_INFINITY),
            Some(100.0),
        );
        assert_eq!(broken.viewport, Viewport::new(0.0, 0.0));
        assert_eq!(broken.mode, LayoutMode::Compact);
        let note = engine.centered_note(0, "new", &broken, &mut rng);
        assert!(note.position.is_finite());
    }

    #[test]
    fn tiny_viewport_floors_available_space_at_zero() {
        let config = BoardConfig::default();
        let engine = LayoutEngine::new(config.clone());
        let metrics = LayoutMetrics::compute(&config, Viewport::new(100.0, 100.0), Some(80.0));
        assert_eq!(metrics.available_width, 0.0);
        assert_eq!(metrics.available_height, 0.0);

        let mut rng = StdRng::seed_from_u64(5);
        let notes = engine.scatter(&quotes(4), &metrics, &mut rng);
        for note in notes {
            assert_eq!(note.position, Position::new(metrics.margin, metrics.min_y));
        }
    }

    #[test]
    fn scatter_respects_bounds_tilt_and_ids() {
        let engine = LayoutEngine::new(BoardConfig::default());
        let env = StaticEnvironment::new(Viewport::new(1000.0, 800.0), Some(150.0));
        let metrics = engine.metrics(&env);
        let mut rng = StdRng::seed_from_u64(11);
        let notes = engine.scatter(&quotes(200), &metrics, &mut rng);

        for (index, note) in notes.iter().enumerate() {
            assert_eq!(note.id as usize, index);
            assert!(note.position.y >= 200.0 && note.position.y <= 500.0);
            assert!(note.position.x >= 50.0 && note.position.x <= 750.0);
            assert!(note.rotation.abs() <= 5.0);
            assert!(!note.manually_placed);
        }
    }

    #[test]
    fn centered_note_is_clamped_below_header() {
        let engine = LayoutEngine::new(BoardConfig::default());
        let env = StaticEnvironment::new(Viewport::new(1000.0, 400.0), Some(300.0));
        let metrics = engine.metrics(&env);
        let mut rng = StdRng::seed_from_u64(3);
        let note = engine.centered_note(9, "new", &metrics, &mut rng);
        assert_eq!(note.id, 9);
        assert_eq!(note.position, Position::new(400.0, 350.0));
    }
}
