//! Rendering and masking seams
//!
//! The crate draws nothing. A surface owns one visual per sequence slot and
//! moves them together with the strip; a mask clips them to the viewport.

use serde::{Deserialize, Serialize};

use crate::symbols::Symbol;
use crate::tween::ReelId;

/// Where one sequence slot sits on its strip
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellPlacement {
    pub index: usize,
    pub symbol: Symbol,
    /// Vertical offset from the strip's Y
    pub offset: f64,
}

/// Axis-aligned rectangle in parent coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewportRect {
    /// Center point
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether a point lies inside (edges included)
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// Rendering collaborator
pub trait SymbolSurface {
    /// Discard a reel's visuals and build one per cell, strip placed at (`x`, `y`)
    fn rebuild_strip(&mut self, reel: ReelId, x: f64, y: f64, cells: &[CellPlacement]);

    /// Move a reel's visuals to strip Y `y`
    fn move_strip(&mut self, reel: ReelId, y: f64);
}

/// Masking collaborator
pub trait ViewportMask {
    /// Clip a reel's visuals to `rect`
    fn apply(&mut self, reel: ReelId, rect: ViewportRect);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_center_and_contains() {
        let rect = ViewportRect {
            x: 576.0,
            y: 192.0,
            width: 128.0,
            height: 384.0,
        };
        assert_eq!(rect.center(), (640.0, 384.0));
        assert!(rect.contains(640.0, 384.0));
        assert!(rect.contains(576.0, 192.0));
        assert!(!rect.contains(575.0, 384.0));
        assert!(!rect.contains(640.0, 577.0));
    }
}
