//! Speed profiles and per-reel spin timing

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ease::Ease;
use crate::error::ReelError;

/// Named speed profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SpeedProfile {
    /// Relaxed spin
    Slow,
    /// Normal gameplay speed
    #[default]
    Normal,
    /// Fast/Turbo mode
    Turbo,
}

impl SpeedProfile {
    /// Next profile in the speed toggle cycle (SLOW → NORMAL → TURBO → SLOW)
    pub fn next(self) -> Self {
        match self {
            SpeedProfile::Slow => SpeedProfile::Normal,
            SpeedProfile::Normal => SpeedProfile::Turbo,
            SpeedProfile::Turbo => SpeedProfile::Slow,
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            SpeedProfile::Slow => "SLOW",
            SpeedProfile::Normal => "NORMAL",
            SpeedProfile::Turbo => "TURBO",
        }
    }

    /// Preset settings for this profile
    pub fn settings(&self) -> SpeedSettings {
        match self {
            SpeedProfile::Slow => SpeedSettings::custom(1.5, 3),
            SpeedProfile::Normal => SpeedSettings::custom(1.0, 3),
            SpeedProfile::Turbo => SpeedSettings::custom(0.5, 2),
        }
    }
}

impl fmt::Display for SpeedProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SpeedProfile {
    type Err = ReelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SLOW" => Ok(SpeedProfile::Slow),
            "NORMAL" => Ok(SpeedProfile::Normal),
            "TURBO" => Ok(SpeedProfile::Turbo),
            other => Err(ReelError::InvalidParam(format!("unknown speed profile: {}", other))),
        }
    }
}

/// The two knobs a speed profile controls
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedSettings {
    /// Scales both duration and delay (< 1.0 = faster)
    pub duration_multiplier: f64,
    /// Baseline full rotations before per-reel escalation
    pub extra_spins: u32,
}

impl SpeedSettings {
    /// Arbitrary settings
    pub fn custom(duration_multiplier: f64, extra_spins: u32) -> Self {
        Self {
            duration_multiplier,
            extra_spins,
        }
    }
}

impl Default for SpeedSettings {
    fn default() -> Self {
        SpeedProfile::Normal.settings()
    }
}

impl From<SpeedProfile> for SpeedSettings {
    fn from(profile: SpeedProfile) -> Self {
        profile.settings()
    }
}

/// Base timing of a bank-wide spin, before the speed multiplier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankTiming {
    /// Spin duration of the first reel (ms)
    pub base_duration_ms: f64,
    /// Extra duration per reel to the right (ms)
    pub duration_step_ms: f64,
    /// Start delay per reel to the right (ms)
    pub delay_step_ms: f64,
    /// Easing curve for every reel
    pub ease: Ease,
}

impl Default for BankTiming {
    fn default() -> Self {
        Self {
            base_duration_ms: 1500.0,
            duration_step_ms: 300.0,
            delay_step_ms: 200.0,
            ease: Ease::CubicInOut,
        }
    }
}

/// Motion parameters for one spin of one strip
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinTiming {
    /// Animation duration (ms)
    pub duration_ms: f64,
    /// Delay before the animation starts (ms)
    pub delay_ms: f64,
    /// Full strip rotations beyond the landing position
    pub spin_count: u32,
    /// Easing curve
    pub ease: Ease,
}

impl SpinTiming {
    /// Create timing with the default ease
    pub fn new(duration_ms: f64, delay_ms: f64, spin_count: u32) -> Self {
        Self {
            duration_ms,
            delay_ms,
            spin_count,
            ease: Ease::default(),
        }
    }

    /// Override the ease
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Time from request to landing (ms)
    pub fn end_ms(&self) -> f64 {
        self.delay_ms + self.duration_ms
    }
}

impl Default for SpinTiming {
    /// A single quick spin
    fn default() -> Self {
        Self::new(500.0, 0.0, 1)
    }
}

impl BankTiming {
    /// Timing of reel `index` (0-based, left to right)
    ///
    /// Later reels run longer, start later and spin strictly more, so reels
    /// stop in sequence from left to right.
    pub fn for_reel(&self, index: usize, speed: SpeedSettings) -> SpinTiming {
        let i = index as f64;
        SpinTiming {
            duration_ms: (self.base_duration_ms + i * self.duration_step_ms)
                * speed.duration_multiplier,
            delay_ms: i * self.delay_step_ms * speed.duration_multiplier,
            spin_count: speed
                .extra_spins
                .saturating_add(u32::try_from(index).unwrap_or(u32::MAX)),
            ease: self.ease,
        }
    }

    /// Timing for every reel of a bank
    pub fn plan(&self, reel_count: usize, speed: SpeedSettings) -> Vec<SpinTiming> {
        (0..reel_count).map(|i| self.for_reel(i, speed)).collect()
    }

    /// Time until the slowest reel lands (ms)
    pub fn total_duration(&self, reel_count: usize, speed: SpeedSettings) -> f64 {
        self.plan(reel_count, speed)
            .iter()
            .map(SpinTiming::end_ms)
            .fold(0.0, f64::max)
    }
}
