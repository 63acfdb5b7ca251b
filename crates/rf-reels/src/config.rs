//! Reel bank configuration

use serde::{Deserialize, Serialize};

use crate::error::{ReelError, ReelResult};
use crate::speed::{BankTiming, SpeedProfile};
use crate::strip::{DEFAULT_CELL_SIZE, DEFAULT_ROWS, SpinDirection};

/// Complete reel bank configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReelBankConfig {
    /// Number of reels
    pub reel_count: usize,
    /// Cell size in pixels (cells are square)
    pub cell_size: f64,
    /// Visible rows per reel
    pub viewport_rows: usize,
    /// Horizontal distance between reel centers (cell width + gap)
    pub spacing: f64,
    /// Bank centerline X
    pub center_x: f64,
    /// Shared anchor Y of every reel
    pub anchor_y: f64,
    /// Symbols per spin strip
    pub strip_length: usize,
    /// Travel direction of every spin
    pub direction: SpinDirection,
    /// Base per-reel timing
    pub timing: BankTiming,
    /// Active speed profile
    pub speed: SpeedProfile,
}

impl Default for ReelBankConfig {
    /// Five 128px reels with no gap, centered on a 1280×768 canvas
    fn default() -> Self {
        Self {
            reel_count: 5,
            cell_size: DEFAULT_CELL_SIZE,
            viewport_rows: DEFAULT_ROWS,
            spacing: DEFAULT_CELL_SIZE,
            center_x: 640.0,
            anchor_y: 384.0,
            strip_length: 100,
            direction: SpinDirection::Descending,
            timing: BankTiming::default(),
            speed: SpeedProfile::Normal,
        }
    }
}

impl ReelBankConfig {
    /// Viewport height in pixels
    pub fn viewport_height(&self) -> f64 {
        self.viewport_rows as f64 * self.cell_size
    }

    /// Check values are usable
    pub fn validate(&self) -> ReelResult<()> {
        if self.reel_count == 0 {
            return Err(ReelError::InvalidParam("reel_count must be at least 1".into()));
        }
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(ReelError::InvalidParam(format!(
                "cell_size must be positive, got {}",
                self.cell_size
            )));
        }
        if self.viewport_rows == 0 {
            return Err(ReelError::InvalidParam("viewport_rows must be at least 1".into()));
        }
        if self.strip_length < self.viewport_rows {
            return Err(ReelError::InvalidParam(format!(
                "strip_length {} is shorter than the {}-row viewport",
                self.strip_length, self.viewport_rows
            )));
        }
        let t = &self.timing;
        if [t.base_duration_ms, t.duration_step_ms, t.delay_step_ms]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(ReelError::InvalidParam("timing values must be non-negative".into()));
        }
        Ok(())
    }

    /// Parse and validate JSON
    pub fn from_json(json: &str) -> ReelResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ReelError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate YAML
    pub fn from_yaml(yaml: &str) -> ReelResult<Self> {
        let config: Self =
            serde_yml::from_str(yaml).map_err(|e| ReelError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> ReelResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ReelError::Config(e.to_string()))
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> ReelResult<String> {
        serde_yml::to_string(self).map_err(|e| ReelError::Config(e.to_string()))
    }
}
