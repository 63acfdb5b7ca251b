//! Easing Curves
//!
//! Named curves handed to the tween collaborator. Names follow the
//! `"Family.easeMode"` convention used by most tween engines.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::error::ReelError;

/// Easing curve for a spin animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Ease {
    /// Constant rate
    Linear = 0,
    /// Quadratic, slow start
    QuadIn = 1,
    /// Quadratic, slow end
    QuadOut = 2,
    /// Quadratic S
    QuadInOut = 3,
    /// Cubic, slow start
    CubicIn = 4,
    /// Cubic, slow end
    CubicOut = 5,
    /// Cubic S (slow at both edges)
    #[default]
    CubicInOut = 6,
    /// Sine S
    SineInOut = 7,
}

impl Ease {
    /// All curves, in index order
    pub const ALL: [Ease; 8] = [
        Ease::Linear,
        Ease::QuadIn,
        Ease::QuadOut,
        Ease::QuadInOut,
        Ease::CubicIn,
        Ease::CubicOut,
        Ease::CubicInOut,
        Ease::SineInOut,
    ];

    /// Tween engine name
    pub fn name(&self) -> &'static str {
        match self {
            Ease::Linear => "Linear",
            Ease::QuadIn => "Quad.easeIn",
            Ease::QuadOut => "Quad.easeOut",
            Ease::QuadInOut => "Quad.easeInOut",
            Ease::CubicIn => "Cubic.easeIn",
            Ease::CubicOut => "Cubic.easeOut",
            Ease::CubicInOut => "Cubic.easeInOut",
            Ease::SineInOut => "Sine.easeInOut",
        }
    }

    /// Evaluate curve at progress t (0.0 - 1.0)
    ///
    /// Endpoints are exact: `evaluate(0.0) == 0.0`, `evaluate(1.0) == 1.0`.
    #[inline]
    pub fn evaluate(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }

        match self {
            Ease::Linear => t,
            Ease::QuadIn => t * t,
            Ease::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Ease::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Ease::CubicIn => t * t * t,
            Ease::CubicOut => 1.0 - (1.0 - t).powi(3),
            Ease::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Ease::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
        }
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Ease {
    type Err = ReelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ease::ALL
            .iter()
            .copied()
            .find(|ease| ease.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ReelError::UnknownEase(s.to_string()))
    }
}
