//! Reel Strip
//!
//! One reel's cyclic symbol sequence and its scroll position.
//!
//! ## Geometry
//!
//! ```text
//!            anchor (rest_y)
//!   ┌──────────┐ ── rest_y - viewport_height / 2
//!   │ index 0  │    origin_offset = -viewport_height / 2 + cell_size / 2
//!   │ index 1  │ ── rest_y   (centered cell)
//!   │ index 2  │
//!   └──────────┘ ── rest_y + viewport_height / 2
//!     index 3 ...  (masked off, loops back to 0 after L - 1)
//! ```
//!
//! Sequence index `i` sits at `origin_offset + i * cell_size` relative to the
//! strip's own Y. Moving the strip by whole `strip_height`s is invisible,
//! which is what lets a finite strip spin forever.

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::error::{ReelError, ReelResult};
use crate::speed::SpinTiming;
use crate::surface::{CellPlacement, ViewportRect};
use crate::symbols::Symbol;
use crate::tween::{ReelId, TweenRequest};
use crate::wrap::reduce_to_band;

/// Visible rows of a classic reel window
pub const DEFAULT_ROWS: usize = 3;

/// Default cell size in pixels
pub const DEFAULT_CELL_SIZE: f64 = 128.0;

/// Direction a strip travels while spinning
///
/// Both spin kinds use the same direction; wrap and snap don't care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SpinDirection {
    /// Y decreases (symbols scroll up the window)
    #[default]
    Descending,
    /// Y increases (symbols scroll down the window)
    Ascending,
}

impl SpinDirection {
    /// Sign applied to the extra rotation distance
    #[inline]
    pub fn sign(&self) -> f64 {
        match self {
            SpinDirection::Descending => -1.0,
            SpinDirection::Ascending => 1.0,
        }
    }
}

/// What a motion is aiming for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionKind {
    /// Whole rotations ending back at rest
    Continuous,
    /// Ends with `final_index` centered in the viewport
    Targeted { final_index: usize },
}

/// An in-flight spin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    pub kind: MotionKind,
    /// Y when the spin was requested
    pub from: f64,
    /// Raw animation target (includes the extra rotations)
    pub to: f64,
    /// Exact Y the strip snaps to on completion
    pub settle_y: f64,
    pub timing: SpinTiming,
}

impl Motion {
    /// Tween request driving this motion for reel `reel`
    pub fn request(&self, reel: ReelId) -> TweenRequest {
        TweenRequest {
            reel,
            from: self.from,
            to: self.to,
            duration_ms: self.timing.duration_ms,
            delay_ms: self.timing.delay_ms,
            ease: self.timing.ease,
        }
    }

    /// Landing index, for targeted spins
    pub fn final_index(&self) -> Option<usize> {
        match self.kind {
            MotionKind::Targeted { final_index } => Some(final_index),
            MotionKind::Continuous => None,
        }
    }
}

/// Strip state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum StripState {
    /// At rest, accepts spin requests
    #[default]
    Idle,
    /// A motion is in flight; spin requests are ignored
    Spinning(Motion),
}

/// One reel's symbol strip
#[derive(Debug, Clone)]
pub struct ReelStrip {
    sequence: Vec<Symbol>,
    cell_size: f64,
    viewport_height: f64,
    origin_offset: f64,
    rest_y: f64,
    current_y: f64,
    direction: SpinDirection,
    state: StripState,
}

impl ReelStrip {
    /// Create an empty strip anchored at `rest_y`
    pub fn new(rest_y: f64, viewport_height: f64) -> Self {
        let cell_size = DEFAULT_CELL_SIZE;
        Self {
            sequence: Vec::new(),
            cell_size,
            viewport_height,
            origin_offset: origin_offset(viewport_height, cell_size),
            rest_y,
            current_y: rest_y,
            direction: SpinDirection::default(),
            state: StripState::Idle,
        }
    }

    /// Create a strip and install `symbols`
    pub fn with_sequence(
        rest_y: f64,
        viewport_height: f64,
        symbols: Vec<Symbol>,
        cell_size: f64,
    ) -> ReelResult<Self> {
        let mut strip = Self::new(rest_y, viewport_height);
        strip.set_sequence(symbols, cell_size)?;
        Ok(strip)
    }

    /// Set spin direction
    pub fn with_direction(mut self, direction: SpinDirection) -> Self {
        self.direction = direction;
        self
    }

    // ═══════════════════════════════════════════════════════════════════════
    // CONTENT
    // ═══════════════════════════════════════════════════════════════════════

    /// Replace the strip's symbols and cell size
    ///
    /// Resets the strip to rest. Rejected while a motion is in flight.
    /// An empty sequence is accepted (the strip then ignores spins); a
    /// non-empty one must fill the viewport.
    pub fn set_sequence(&mut self, symbols: Vec<Symbol>, cell_size: f64) -> ReelResult<()> {
        if self.is_busy() {
            return Err(ReelError::InvalidState(
                "cannot replace sequence while strip is spinning".into(),
            ));
        }
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(ReelError::InvalidParam(format!(
                "cell size must be positive, got {}",
                cell_size
            )));
        }
        if !whole_cells(self.viewport_height, cell_size) {
            return Err(ReelError::InvalidParam(format!(
                "viewport height {} is not a whole number of {}px cells",
                self.viewport_height, cell_size
            )));
        }
        let capacity = capacity(self.viewport_height, cell_size);
        if !symbols.is_empty() && symbols.len() < capacity {
            return Err(ReelError::InvalidParam(format!(
                "strip of {} symbols cannot fill a {}-cell viewport",
                symbols.len(),
                capacity
            )));
        }

        self.sequence = symbols;
        self.cell_size = cell_size;
        self.origin_offset = origin_offset(self.viewport_height, cell_size);
        self.current_y = self.rest_y;
        Ok(())
    }

    /// Symbols in order
    pub fn sequence(&self) -> &[Symbol] {
        &self.sequence
    }

    /// Sequence length L
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Symbol at a cyclic index
    pub fn symbol_at(&self, index: i64) -> Option<Symbol> {
        if self.sequence.is_empty() {
            return None;
        }
        let i = index.rem_euclid(self.sequence.len() as i64) as usize;
        Some(self.sequence[i])
    }

    // ═══════════════════════════════════════════════════════════════════════
    // GEOMETRY
    // ═══════════════════════════════════════════════════════════════════════

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    pub fn origin_offset(&self) -> f64 {
        self.origin_offset
    }

    pub fn rest_y(&self) -> f64 {
        self.rest_y
    }

    pub fn current_y(&self) -> f64 {
        self.current_y
    }

    pub fn direction(&self) -> SpinDirection {
        self.direction
    }

    /// Whole cells visible in the viewport
    pub fn capacity(&self) -> usize {
        capacity(self.viewport_height, self.cell_size)
    }

    /// Height of one full loop of the strip
    pub fn strip_height(&self) -> f64 {
        self.sequence.len() as f64 * self.cell_size
    }

    /// Offset of sequence index `index` relative to the strip's Y
    ///
    /// Linear in `index`; any integer is valid arithmetic.
    #[inline]
    pub fn position_of(&self, index: i64) -> f64 {
        self.origin_offset + index as f64 * self.cell_size
    }

    /// Strip Y that centers `index` on the anchor
    #[inline]
    pub fn target_y(&self, index: i64) -> f64 {
        self.rest_y - self.position_of(index)
    }

    /// One placement per sequence slot, for the rendering surface
    pub fn cells(&self) -> Vec<CellPlacement> {
        self.sequence
            .iter()
            .enumerate()
            .map(|(index, &symbol)| CellPlacement {
                index,
                symbol,
                offset: self.position_of(index as i64),
            })
            .collect()
    }

    /// Viewport rectangle for a reel whose center is at `x`
    pub fn viewport_rect(&self, x: f64) -> ViewportRect {
        ViewportRect {
            x: x - self.cell_size / 2.0,
            y: self.rest_y - self.viewport_height / 2.0,
            width: self.cell_size,
            height: self.viewport_height,
        }
    }

    /// Index currently centered on the anchor
    pub fn landed_index(&self) -> Option<usize> {
        self.index_at(self.rest_y - self.current_y - self.origin_offset)
    }

    /// Symbols in the viewport, top to bottom
    ///
    /// The landed symbol is always in row `(capacity - 1) / 2`.
    pub fn visible_symbols(&self) -> Vec<Symbol> {
        let Some(center) = self.landed_index() else {
            return Vec::new();
        };
        let capacity = self.capacity() as i64;
        let top = center as i64 - (capacity - 1) / 2;
        (0..capacity)
            .filter_map(|row| self.symbol_at(top + row))
            .collect()
    }

    fn index_at(&self, distance: f64) -> Option<usize> {
        if self.sequence.is_empty() {
            return None;
        }
        // Halves round up regardless of sign
        let cells = (distance / self.cell_size + 0.5).floor() as i64;
        Some(cells.rem_euclid(self.sequence.len() as i64) as usize)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // MOTION
    // ═══════════════════════════════════════════════════════════════════════

    pub fn state(&self) -> &StripState {
        &self.state
    }

    /// True while a motion is in flight
    pub fn is_busy(&self) -> bool {
        matches!(self.state, StripState::Spinning(_))
    }

    /// Current motion, if spinning
    pub fn motion(&self) -> Option<&Motion> {
        match &self.state {
            StripState::Spinning(motion) => Some(motion),
            StripState::Idle => None,
        }
    }

    /// Spin `spin_count` whole loops and settle back at rest
    ///
    /// Returns the motion to hand to the tween engine, or `None` if the
    /// strip is busy or empty.
    pub fn begin_continuous_spin(&mut self, timing: SpinTiming) -> Option<Motion> {
        if !self.accepts_spin() {
            return None;
        }

        let distance = timing.spin_count as f64 * self.strip_height();
        let motion = Motion {
            kind: MotionKind::Continuous,
            from: self.current_y,
            to: self.rest_y + self.direction.sign() * distance,
            settle_y: self.rest_y,
            timing,
        };
        self.start(motion)
    }

    /// Spin so that `final_index` ends centered in the viewport
    ///
    /// The strip passes `spin_count` extra loops before landing; zero gives
    /// a direct approach. Returns `None` if busy or empty.
    pub fn begin_targeted_spin(&mut self, final_index: usize, timing: SpinTiming) -> Option<Motion> {
        if !self.accepts_spin() {
            return None;
        }

        let target_y = self.target_y(final_index as i64);
        let distance = timing.spin_count as f64 * self.strip_height();
        let motion = Motion {
            kind: MotionKind::Targeted { final_index },
            from: self.current_y,
            to: target_y + self.direction.sign() * distance,
            settle_y: target_y,
            timing,
        };
        self.start(motion)
    }

    /// Animation step: store the raw value reduced into the wrap band
    ///
    /// Ignored (returns `None`) when no motion is in flight.
    pub fn apply_step(&mut self, raw_y: f64) -> Option<f64> {
        if !self.is_busy() {
            return None;
        }

        let y = reduce_to_band(raw_y, self.rest_y, self.strip_height());
        if y != raw_y {
            trace!("wrap {:.1} -> {:.1}", raw_y, y);
        }
        self.current_y = y;
        Some(y)
    }

    /// Animation finished: snap to the exact settle position and go idle
    ///
    /// Returns the finished motion, or `None` if nothing was in flight.
    pub fn complete(&mut self) -> Option<Motion> {
        let StripState::Spinning(motion) = self.state else {
            return None;
        };

        self.current_y = motion.settle_y;
        self.state = StripState::Idle;
        debug!(
            "strip settled at y={} (index {:?})",
            self.current_y,
            self.landed_index()
        );
        Some(motion)
    }

    fn accepts_spin(&self) -> bool {
        if self.is_busy() {
            warn!("spin ignored: strip is busy");
            return false;
        }
        if self.sequence.is_empty() {
            warn!("spin ignored: strip is empty");
            return false;
        }
        true
    }

    fn start(&mut self, motion: Motion) -> Option<Motion> {
        debug!(
            "strip spin {:?}: {} -> {} over {}ms (+{}ms delay)",
            motion.kind, motion.from, motion.to, motion.timing.duration_ms, motion.timing.delay_ms
        );
        self.state = StripState::Spinning(motion);
        Some(motion)
    }
}

#[inline]
fn origin_offset(viewport_height: f64, cell_size: f64) -> f64 {
    -viewport_height / 2.0 + cell_size / 2.0
}

#[inline]
fn whole_cells(viewport_height: f64, cell_size: f64) -> bool {
    let ratio = viewport_height / cell_size;
    ratio.is_finite() && ratio > 0.0 && (ratio - ratio.round()).abs() < 1e-9
}

#[inline]
fn capacity(viewport_height: f64, cell_size: f64) -> usize {
    if cell_size <= 0.0 {
        return 0;
    }
    (viewport_height / cell_size + 1e-9).floor().max(0.0) as usize
}
