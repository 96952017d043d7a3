use serde::{Deserialize, Serialize};

/// Default target row height in pixels.
pub const DEFAULT_IDEAL_HEIGHT: f64 = 220.0;
/// Default spacing between items and between rows in pixels.
pub const DEFAULT_GAP: f64 = 2.0;
/// Default container width when the caller does not know its viewport.
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 1024.0;

/// Gallery layout configuration.
/// Key notes:
///   - `viewport_width` and `ideal_height` drive row breaking (cost model ignores `gap`)
///   - `gap` is only applied when placing items inside the chosen rows
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayoutConfig {
    /// Container width in pixels; every row is justified to exactly this width.
    #[serde(default = "default_viewport_width")]
    pub viewport_width: f64,
    /// Row height the packer tries to approach.
    #[serde(default = "default_ideal_height")]
    pub ideal_height: f64,
    /// Pixels between neighbouring items and between rows.
    #[serde(default = "default_gap")]
    pub gap: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            viewport_width: default_viewport_width(),
            ideal_height: default_ideal_height(),
            gap: default_gap(),
        }
    }
}

impl LayoutConfig {
    /// Validates the configuration parameters.
    ///
    /// Returns an error if:
    /// - `viewport_width` or `ideal_height` is not a positive finite number
    /// - `gap` is negative or not finite
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::LayoutError;

        if !(self.viewport_width.is_finite() && self.viewport_width > 0.0) {
            return Err(LayoutError::InvalidConfig(format!(
                "viewport_width must be positive, got {}",
                self.viewport_width
            )));
        }
        if !(self.ideal_height.is_finite() && self.ideal_height > 0.0) {
            return Err(LayoutError::InvalidConfig(format!(
                "ideal_height must be positive, got {}",
                self.ideal_height
            )));
        }
        if !(self.gap.is_finite() && self.gap >= 0.0) {
            return Err(LayoutError::InvalidConfig(format!(
                "gap must be zero or positive, got {}",
                self.gap
            )));
        }
        Ok(())
    }
}

fn default_viewport_width() -> f64 {
    DEFAULT_VIEWPORT_WIDTH
}
fn default_ideal_height() -> f64 {
    DEFAULT_IDEAL_HEIGHT
}
fn default_gap() -> f64 {
    DEFAULT_GAP
}

/// Builder for `LayoutConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct LayoutConfigBuilder {
    cfg: LayoutConfig,
}

impl LayoutConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: LayoutConfig::default(),
        }
    }
    pub fn viewport_width(mut self, v: f64) -> Self {
        self.cfg.viewport_width = v;
        self
    }
    pub fn ideal_height(mut self, v: f64) -> Self {
        self.cfg.ideal_height = v;
        self
    }
    pub fn gap(mut self, v: f64) -> Self {
        self.cfg.gap = v;
        self
    }
    pub fn build(self) -> LayoutConfig {
        self.cfg
    }
}

impl LayoutConfig {
    /// Create a fluent builder for `LayoutConfig`.
    pub fn builder() -> LayoutConfigBuilder {
        LayoutConfigBuilder::new()
    }
}
