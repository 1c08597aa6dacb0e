//! Environment measurement contracts.

use serde::{Deserialize, Serialize};

/// Viewport dimensions in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Source of display-surface measurements.
///
/// Implemented by UI shells over the real window, and by
/// `StaticEnvironment` for tests and headless use.
pub trait EnvironmentProvider {
    /// Current viewport size.
    fn viewport_size(&self) -> Viewport;
    /// Measured header height, or `None` when the header is not laid out yet.
    fn header_height(&self) -> Option<f64>;
}

/// Environment with caller-controlled measurements.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StaticEnvironment {
    viewport: Viewport,
    header_height: Option<f64>,
}

impl StaticEnvironment {
    pub fn new(viewport: Viewport, header_height: Option<f64>) -> Self {
        Self {
            viewport,
            header_height,
        }
    }

    /// Replaces measurements, e.g. after a window resize.
    pub fn update(&mut self, viewport: Viewport, header_height: Option<f64>) {
        self.viewport = viewport;
        self.header_height = header_height;
    }
}

impl EnvironmentProvider for StaticEnvironment {
    fn viewport_size(&self) -> Viewport {
        self.viewport
    }

    fn header_height(&self) -> Option<f64> {
        self.header_height
    }
}
