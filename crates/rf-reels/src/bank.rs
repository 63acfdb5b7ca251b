//! Reel Bank — staggered multi-reel spin orchestration
//!
//! Owns N strips laid out left to right, turns a spin request into per-reel
//! timing and landing indices, and tracks when the whole bank has stopped.
//!
//! ```text
//!   trigger_spin ──▶ plan (duration, delay, spins per reel)
//!        │           picker.pick(len) per reel
//!        ▼
//!   ReelStrip::begin_targeted_spin ──▶ Motion ──▶ Tweener::start
//!                                                    │
//!   handle(TweenEvent) ◀─────────── Step / Complete ─┘
//!        │
//!        └─ pending latch hits zero ──▶ BankEvent::SpinFinished
//! ```

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::ReelBankConfig;
use crate::error::{ReelError, ReelResult};
use crate::picker::IndexPicker;
use crate::speed::{SpeedProfile, SpeedSettings, SpinTiming};
use crate::strip::ReelStrip;
use crate::surface::{SymbolSurface, ViewportMask};
use crate::symbols::{ReelSet, Symbol};
use crate::tween::{ReelId, TweenEvent, Tweener};

/// A strip and its horizontal slot
#[derive(Debug, Clone)]
pub struct Reel {
    /// Center X in parent coordinates
    pub x: f64,
    pub strip: ReelStrip,
}

/// What a bank-wide spin was dispatched with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankSpin {
    /// Landing index per reel (`None` where the reel refused the spin)
    pub stops: Vec<Option<usize>>,
    /// Timing per reel
    pub timings: Vec<SpinTiming>,
}

impl BankSpin {
    /// Time until the last reel lands (ms)
    pub fn total_ms(&self) -> f64 {
        self.stops
            .iter()
            .zip(&self.timings)
            .filter(|(stop, _)| stop.is_some())
            .map(|(_, t)| t.end_ms())
            .fold(0.0, f64::max)
    }
}

/// Notifications produced while handling tween events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BankEvent {
    /// A reel settled on `index`
    ReelStopped { reel: ReelId, index: Option<usize> },
    /// Every dispatched reel has settled
    SpinFinished {
        /// Centered index per reel
        stops: Vec<Option<usize>>,
        /// Centered symbol per reel
        symbols: Vec<Option<Symbol>>,
    },
}

/// Reel bank
pub struct ReelBank {
    config: ReelBankConfig,
    reels: Vec<Reel>,
    picker: Box<dyn IndexPicker>,
    /// Rendering collaborator kept in step with the strips
    surface: Option<Box<dyn SymbolSurface>>,
    profile: SpeedProfile,
    speed: SpeedSettings,
    spinning: bool,
    /// Dispatched reels that haven't completed yet
    pending: usize,
}

impl ReelBank {
    /// Create a bank of empty reels laid out per `config`
    pub fn new(config: ReelBankConfig, picker: impl IndexPicker + 'static) -> ReelResult<Self> {
        config.validate()?;

        let mut bank = Self {
            profile: config.speed,
            speed: config.speed.settings(),
            config,
            reels: Vec::new(),
            picker: Box::new(picker),
            surface: None,
            spinning: false,
            pending: 0,
        };
        bank.layout(bank.config.reel_count, bank.config.spacing, bank.config.anchor_y)?;
        Ok(bank)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // SETUP
    // ═══════════════════════════════════════════════════════════════════════

    /// Place `count` reels `spacing` apart, centered on the bank centerline,
    /// all anchored at `anchor_y`
    ///
    /// Reels that already exist keep their symbols.
    pub fn layout(&mut self, count: usize, spacing: f64, anchor_y: f64) -> ReelResult<()> {
        if self.spinning {
            return Err(ReelError::InvalidState("cannot lay out reels while spinning".into()));
        }

        let viewport_height = self.config.viewport_height();
        let mut reels = Vec::with_capacity(count);
        for i in 0..count {
            let mut strip = ReelStrip::new(anchor_y, viewport_height)
                .with_direction(self.config.direction);
            if let Some(old) = self.reels.get(i) {
                strip.set_sequence(old.strip.sequence().to_vec(), old.strip.cell_size())?;
            }
            reels.push(Reel {
                x: slot_x(self.config.center_x, i, count, spacing),
                strip,
            });
        }

        self.reels = reels;
        if let Some(surface) = self.surface.as_deref_mut() {
            rebuild_all(&self.reels, surface);
        }
        self.config.reel_count = count;
        self.config.spacing = spacing;
        self.config.anchor_y = anchor_y;
        debug!("laid out {} reels, spacing {}, anchor y {}", count, spacing, anchor_y);
        Ok(())
    }

    /// Install a spin strip on every reel, cut from `set` at a picked start
    pub fn populate(&mut self, set: &ReelSet) -> ReelResult<()> {
        if set.len() < self.reels.len() {
            return Err(ReelError::InvalidParam(format!(
                "reel set has {} strips for {} reels",
                set.len(),
                self.reels.len()
            )));
        }

        for i in 0..self.reels.len() {
            let base_len = set.base(i).map_or(0, <[Symbol]>::len);
            let start = if base_len > 0 { self.picker.pick(base_len) } else { 0 };
            let symbols = set.spin_strip(i, self.config.strip_length, start)?;
            self.set_sequence(i, symbols)?;
        }
        info!(
            "populated {} reels with {}-symbol strips",
            self.reels.len(),
            self.config.strip_length
        );
        Ok(())
    }

    /// Replace one reel's symbols
    ///
    /// An attached surface rebuilds that reel's visuals.
    pub fn set_sequence(&mut self, reel: ReelId, symbols: Vec<Symbol>) -> ReelResult<()> {
        let cell_size = self.config.cell_size;
        self.reel_mut(reel)?.strip.set_sequence(symbols, cell_size)?;

        if let (Some(surface), Some(slot)) = (self.surface.as_deref_mut(), self.reels.get(reel)) {
            surface.rebuild_strip(reel, slot.x, slot.strip.current_y(), &slot.strip.cells());
        }
        Ok(())
    }

    /// Attach a rendering surface and build every reel's visuals on it
    ///
    /// From then on the bank rebuilds a reel on `set_sequence`/`populate`/
    /// `layout` and moves it on every step and snap.
    pub fn attach_surface(&mut self, surface: impl SymbolSurface + 'static) {
        let mut surface: Box<dyn SymbolSurface> = Box::new(surface);
        rebuild_all(&self.reels, surface.as_mut());
        self.surface = Some(surface);
    }

    /// Detach the rendering surface
    pub fn detach_surface(&mut self) -> Option<Box<dyn SymbolSurface>> {
        self.surface.take()
    }

    /// Select a speed profile for the next spin
    pub fn set_speed(&mut self, profile: SpeedProfile) {
        self.profile = profile;
        self.speed = profile.settings();
        self.config.speed = profile;
        debug!("speed profile -> {}", profile);
    }

    /// Use custom speed settings for the next spin
    pub fn set_speed_settings(&mut self, settings: SpeedSettings) {
        self.speed = settings;
    }

    /// Advance to the next speed profile and return it
    pub fn cycle_speed(&mut self) -> SpeedProfile {
        let next = self.profile.next();
        self.set_speed(next);
        next
    }

    // ═══════════════════════════════════════════════════════════════════════
    // QUERIES
    // ═══════════════════════════════════════════════════════════════════════

    pub fn config(&self) -> &ReelBankConfig {
        &self.config
    }

    pub fn reels(&self) -> &[Reel] {
        &self.reels
    }

    pub fn reel(&self, reel: ReelId) -> Option<&Reel> {
        self.reels.get(reel)
    }

    /// Number of reels
    pub fn len(&self) -> usize {
        self.reels.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.reels.is_empty()
    }

    /// True while any dispatched reel is still moving
    pub fn is_spinning(&self) -> bool {
        self.spinning
    }

    /// Reels still to complete in the current spin
    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn speed_profile(&self) -> SpeedProfile {
        self.profile
    }

    pub fn speed_settings(&self) -> SpeedSettings {
        self.speed
    }

    /// Per-reel timing the next spin would use
    pub fn spin_plan(&self) -> Vec<SpinTiming> {
        self.config.timing.plan(self.reels.len(), self.speed)
    }

    /// Centered index per reel
    pub fn landed_indices(&self) -> Vec<Option<usize>> {
        self.reels.iter().map(|r| r.strip.landed_index()).collect()
    }

    /// Centered symbol per reel
    pub fn center_line(&self) -> Vec<Option<Symbol>> {
        self.reels
            .iter()
            .map(|r| r.strip.landed_index().and_then(|i| r.strip.symbol_at(i as i64)))
            .collect()
    }

    /// Visible window, one column per reel, top to bottom
    pub fn window(&self) -> Vec<Vec<Symbol>> {
        self.reels.iter().map(|r| r.strip.visible_symbols()).collect()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // SPIN
    // ═══════════════════════════════════════════════════════════════════════

    /// Spin every reel to a picked landing index
    ///
    /// Returns `None` while a spin is outstanding or if no reel accepted.
    pub fn trigger_spin(&mut self, tweener: &mut dyn Tweener) -> Option<BankSpin> {
        if self.spinning {
            warn!("spin ignored: bank is already spinning");
            return None;
        }

        let stops: Vec<usize> = self
            .reels
            .iter()
            .map(|r| match r.strip.len() {
                0 => 0,
                len => self.picker.pick(len) % len,
            })
            .collect();
        self.dispatch(&stops, tweener)
    }

    /// Spin every reel to caller-chosen landing indices, one per reel
    pub fn trigger_directed_spin(
        &mut self,
        stops: &[usize],
        tweener: &mut dyn Tweener,
    ) -> ReelResult<Option<BankSpin>> {
        if stops.len() != self.reels.len() {
            return Err(ReelError::InvalidParam(format!(
                "expected {} stops, got {}",
                self.reels.len(),
                stops.len()
            )));
        }
        for (i, (&stop, reel)) in stops.iter().zip(&self.reels).enumerate() {
            if !reel.strip.is_empty() && stop >= reel.strip.len() {
                return Err(ReelError::InvalidParam(format!(
                    "stop {} out of range for reel {} (length {})",
                    stop,
                    i,
                    reel.strip.len()
                )));
            }
        }
        if self.spinning {
            warn!("spin ignored: bank is already spinning");
            return Ok(None);
        }
        Ok(self.dispatch(stops, tweener))
    }

    fn dispatch(&mut self, stops: &[usize], tweener: &mut dyn Tweener) -> Option<BankSpin> {
        let timings = self.spin_plan();
        let mut landed = Vec::with_capacity(self.reels.len());

        for (i, reel) in self.reels.iter_mut().enumerate() {
            match reel.strip.begin_targeted_spin(stops[i], timings[i]) {
                Some(motion) => {
                    tweener.start(motion.request(i));
                    self.pending += 1;
                    landed.push(Some(stops[i]));
                }
                None => landed.push(None),
            }
        }

        if self.pending == 0 {
            warn!("spin ignored: no reel accepted");
            return None;
        }

        self.spinning = true;
        let spin = BankSpin {
            stops: landed,
            timings,
        };
        info!(
            "spin dispatched ({}): stops {:?}, lands in {}ms",
            self.profile,
            spin.stops,
            spin.total_ms()
        );
        Some(spin)
    }

    /// Route a tween callback to its strip
    pub fn handle(&mut self, event: TweenEvent) -> Vec<BankEvent> {
        let reel = event.reel();
        let Some(slot) = self.reels.get_mut(reel) else {
            warn!("tween event for unknown reel {}", reel);
            return Vec::new();
        };

        match event {
            TweenEvent::Step { value, .. } => {
                if let (Some(y), Some(surface)) =
                    (slot.strip.apply_step(value), self.surface.as_deref_mut())
                {
                    surface.move_strip(reel, y);
                }
                Vec::new()
            }
            TweenEvent::Complete { .. } => {
                if slot.strip.complete().is_none() {
                    return Vec::new();
                }
                if let Some(surface) = self.surface.as_deref_mut() {
                    surface.move_strip(reel, slot.strip.current_y());
                }
                let mut events = vec![BankEvent::ReelStopped {
                    reel,
                    index: slot.strip.landed_index(),
                }];

                self.pending = self.pending.saturating_sub(1);
                if self.pending == 0 && self.spinning {
                    self.spinning = false;
                    let stops = self.landed_indices();
                    let symbols = self.center_line();
                    info!("spin finished: {:?}", symbols);
                    events.push(BankEvent::SpinFinished { stops, symbols });
                }
                events
            }
        }
    }

    /// Route a batch of tween callbacks, in order
    pub fn handle_all(&mut self, events: impl IntoIterator<Item = TweenEvent>) -> Vec<BankEvent> {
        events.into_iter().flat_map(|e| self.handle(e)).collect()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // COLLABORATORS
    // ═══════════════════════════════════════════════════════════════════════

    /// Rebuild every reel's visuals on a surface the bank doesn't own
    pub fn rebuild_surface(&self, surface: &mut dyn SymbolSurface) {
        rebuild_all(&self.reels, surface);
    }

    /// Push every reel's current Y to the surface
    pub fn sync_surface(&self, surface: &mut dyn SymbolSurface) {
        for (i, reel) in self.reels.iter().enumerate() {
            surface.move_strip(i, reel.strip.current_y());
        }
    }

    /// Clip every reel to its viewport
    pub fn apply_masks(&self, mask: &mut dyn ViewportMask) {
        for (i, reel) in self.reels.iter().enumerate() {
            mask.apply(i, reel.strip.viewport_rect(reel.x));
        }
    }

    fn reel_mut(&mut self, reel: ReelId) -> ReelResult<&mut Reel> {
        let count = self.reels.len();
        self.reels
            .get_mut(reel)
            .ok_or_else(|| ReelError::InvalidParam(format!("reel {} out of range ({})", reel, count)))
    }
}

impl fmt::Debug for ReelBank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReelBank")
            .field("reels", &self.reels.len())
            .field("profile", &self.profile)
            .field("speed", &self.speed)
            .field("spinning", &self.spinning)
            .field("pending", &self.pending)
            .field("surface", &self.surface.is_some())
            .finish_non_exhaustive()
    }
}

fn rebuild_all(reels: &[Reel], surface: &mut dyn SymbolSurface) {
    for (i, reel) in reels.iter().enumerate() {
        surface.rebuild_strip(i, reel.x, reel.strip.current_y(), &reel.strip.cells());
    }
}

/// Center X of slot `index` out of `count`
#[inline]
pub fn slot_x(center_x: f64, index: usize, count: usize, spacing: f64) -> f64 {
    let offset = index as f64 - (count as f64 - 1.0) / 2.0;
    center_x + offset * spacing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::ScriptedPicker;
    use crate::surface::CellPlacement;
    use crate::tween::{TweenClock, TweenRequest};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct SurfaceLog {
        rebuilds: Vec<(ReelId, usize)>,
        moves: Vec<(ReelId, f64)>,
    }

    struct SharedSurface(Rc<RefCell<SurfaceLog>>);

    impl SymbolSurface for SharedSurface {
        fn rebuild_strip(&mut self, reel: ReelId, _x: f64, _y: f64, cells: &[CellPlacement]) {
            self.0.borrow_mut().rebuilds.push((reel, cells.len()));
        }

        fn move_strip(&mut self, reel: ReelId, y: f64) {
            self.0.borrow_mut().moves.push((reel, y));
        }
    }

    fn bank(stops: Vec<usize>) -> ReelBank {
        let mut bank = ReelBank::new(ReelBankConfig::default(), ScriptedPicker::new(stops)).unwrap();
        let set = ReelSet::classic();
        for i in 0..bank.len() {
            bank.set_sequence(i, set.reels[i].clone()).unwrap();
        }
        bank
    }

    #[test]
    fn test_layout_centers_reels() {
        let bank = bank(vec![0]);
        let xs: Vec<f64> = bank.reels().iter().map(|r| r.x).collect();
        assert_eq!(xs, vec![384.0, 512.0, 640.0, 768.0, 896.0]);
        assert!(bank.reels().iter().all(|r| r.strip.rest_y() == 384.0));
    }

    #[test]
    fn test_layout_even_count() {
        assert_eq!(slot_x(0.0, 0, 4, 100.0), -150.0);
        assert_eq!(slot_x(0.0, 3, 4, 100.0), 150.0);
        assert_eq!(slot_x(10.0, 0, 1, 100.0), 10.0);
    }

    #[test]
    fn test_relayout_keeps_symbols() {
        let mut bank = bank(vec![0]);
        bank.layout(3, 200.0, 100.0).unwrap();
        assert_eq!(bank.len(), 3);
        assert_eq!(bank.reel(1).unwrap().strip.sequence(), ReelSet::classic().reels[1].as_slice());
        assert_eq!(bank.reel(0).unwrap().x, 440.0);
        assert_eq!(bank.reel(0).unwrap().strip.rest_y(), 100.0);
    }

    #[test]
    fn test_spin_counts_escalate() {
        let mut bank = bank(vec![1, 2, 3, 4, 5]);
        let mut sink: Vec<TweenRequest> = Vec::new();
        let spin = bank.trigger_spin(&mut sink).unwrap();

        assert_eq!(spin.stops, vec![Some(1), Some(2), Some(3), Some(4), Some(5)]);
        for (i, t) in spin.timings.iter().enumerate() {
            assert_eq!(t.spin_count, 3 + i as u32);
        }
        assert_eq!(sink.len(), 5);
        assert_eq!(bank.pending(), 5);
        assert!(bank.is_spinning());
    }

    #[test]
    fn test_spin_while_spinning_is_noop() {
        let mut bank = bank(vec![0]);
        let mut sink: Vec<TweenRequest> = Vec::new();
        bank.trigger_spin(&mut sink).unwrap();
        assert!(bank.trigger_spin(&mut sink).is_none());
        assert_eq!(sink.len(), 5);
    }

    #[test]
    fn test_latch_clears_on_last_completion_in_any_order() {
        let mut bank = bank(vec![0]);
        let mut sink: Vec<TweenRequest> = Vec::new();
        bank.trigger_spin(&mut sink).unwrap();

        for reel in [4, 0, 3, 1] {
            let events = bank.handle(TweenEvent::Complete { reel });
            assert_eq!(events.len(), 1);
            assert!(bank.is_spinning());
        }
        let events = bank.handle(TweenEvent::Complete { reel: 2 });
        assert!(matches!(events.last(), Some(BankEvent::SpinFinished { .. })));
        assert!(!bank.is_spinning());
    }

    #[test]
    fn test_duplicate_completion_ignored() {
        let mut bank = bank(vec![0]);
        let mut sink: Vec<TweenRequest> = Vec::new();
        bank.trigger_spin(&mut sink).unwrap();

        bank.handle(TweenEvent::Complete { reel: 0 });
        assert!(bank.handle(TweenEvent::Complete { reel: 0 }).is_empty());
        assert_eq!(bank.pending(), 4);
    }

    #[test]
    fn test_empty_reels_are_skipped() {
        let mut bank = ReelBank::new(ReelBankConfig::default(), ScriptedPicker::new(vec![2])).unwrap();
        bank.set_sequence(1, ReelSet::classic().reels[1].clone()).unwrap();

        let mut sink: Vec<TweenRequest> = Vec::new();
        let spin = bank.trigger_spin(&mut sink).unwrap();
        assert_eq!(spin.stops, vec![None, Some(2), None, None, None]);
        assert_eq!(bank.pending(), 1);

        let events = bank.handle(TweenEvent::Complete { reel: 1 });
        assert!(matches!(events.last(), Some(BankEvent::SpinFinished { .. })));
    }

    #[test]
    fn test_all_empty_bank_never_spins() {
        let mut bank = ReelBank::new(ReelBankConfig::default(), ScriptedPicker::default()).unwrap();
        let mut sink: Vec<TweenRequest> = Vec::new();
        assert!(bank.trigger_spin(&mut sink).is_none());
        assert!(!bank.is_spinning());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_directed_spin_validation() {
        let mut bank = bank(vec![0]);
        let mut sink: Vec<TweenRequest> = Vec::new();
        assert!(bank.trigger_directed_spin(&[0, 1], &mut sink).is_err());
        assert!(bank.trigger_directed_spin(&[0, 1, 2, 3, 8], &mut sink).is_err());
        assert!(!bank.is_spinning());

        let spin = bank
            .trigger_directed_spin(&[0, 1, 2, 3, 7], &mut sink)
            .unwrap()
            .unwrap();
        assert_eq!(spin.stops[4], Some(7));
        assert!(bank.trigger_directed_spin(&[0, 0, 0, 0, 0], &mut sink).unwrap().is_none());
    }

    #[test]
    fn test_speed_change_applies_to_next_spin() {
        let mut bank = bank(vec![0]);
        let mut sink: Vec<TweenRequest> = Vec::new();
        bank.trigger_spin(&mut sink).unwrap();
        let in_flight = sink[4];

        bank.set_speed(SpeedProfile::Turbo);
        assert_eq!(bank.reel(4).unwrap().strip.motion().unwrap().timing.duration_ms, 2700.0);
        assert_eq!(in_flight.duration_ms, 2700.0);
        assert_eq!(bank.spin_plan()[4].duration_ms, 1350.0);
        assert_eq!(bank.spin_plan()[4].spin_count, 6);
    }

    #[test]
    fn test_cycle_speed() {
        let mut bank = bank(vec![0]);
        assert_eq!(bank.speed_profile(), SpeedProfile::Normal);
        assert_eq!(bank.cycle_speed(), SpeedProfile::Turbo);
        assert_eq!(bank.cycle_speed(), SpeedProfile::Slow);
        assert_eq!(bank.speed_settings().duration_multiplier, 1.5);
    }

    #[test]
    fn test_set_sequence_rejected_while_spinning() {
        let mut bank = bank(vec![0]);
        let mut sink: Vec<TweenRequest> = Vec::new();
        bank.trigger_spin(&mut sink).unwrap();
        assert!(matches!(
            bank.set_sequence(0, vec![Symbol::Wild; 8]),
            Err(ReelError::InvalidState(_))
        ));
        assert!(bank.layout(5, 128.0, 384.0).is_err());
        assert!(bank.set_sequence(9, vec![Symbol::Wild; 8]).is_err());
    }

    #[test]
    fn test_clock_driven_spin_lands_on_stops() {
        let mut bank = bank(vec![6, 0, 8, 3, 1]);
        let mut clock = TweenClock::new();
        bank.trigger_spin(&mut clock).unwrap();

        let events = bank.handle_all(clock.run_to_end(16.0, 10_000));
        assert!(!bank.is_spinning());
        assert_eq!(
            bank.landed_indices(),
            vec![Some(6), Some(0), Some(8), Some(3), Some(1)]
        );

        let stopped: Vec<ReelId> = events
            .iter()
            .filter_map(|e| match e {
                BankEvent::ReelStopped { reel, .. } => Some(*reel),
                _ => None,
            })
            .collect();
        assert_eq!(stopped, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_attached_surface_follows_bank() {
        let log = Rc::new(RefCell::new(SurfaceLog::default()));
        let mut bank = bank(vec![5, 1, 6, 2, 0]);
        bank.attach_surface(SharedSurface(log.clone()));
        assert_eq!(log.borrow().rebuilds.len(), 5);

        bank.set_sequence(1, vec![Symbol::Scatter; 12]).unwrap();
        assert_eq!(log.borrow().rebuilds.last(), Some(&(1, 12)));

        let mut clock = TweenClock::new();
        bank.trigger_spin(&mut clock).unwrap();
        let events = clock.run_to_end(16.0, 10_000);
        let steps = events
            .iter()
            .filter(|e| matches!(e, TweenEvent::Step { .. }))
            .count();
        bank.handle_all(events);

        let log = log.borrow();
        // One move per step plus one snap per reel
        assert_eq!(log.moves.len(), steps + 5);
        for reel in 0..5 {
            let last = log.moves.iter().rev().find(|(r, _)| *r == reel).unwrap();
            assert_eq!(last.1, bank.reel(reel).unwrap().strip.current_y());
        }
    }

    #[test]
    fn test_detached_surface_is_silent() {
        let log = Rc::new(RefCell::new(SurfaceLog::default()));
        let mut bank = bank(vec![0]);
        bank.attach_surface(SharedSurface(log.clone()));
        assert!(bank.detach_surface().is_some());

        bank.set_sequence(0, vec![Symbol::Wild; 8]).unwrap();
        assert_eq!(log.borrow().rebuilds.len(), 5);
    }

    #[test]
    fn test_spin_finished_reports_stops() {
        let mut bank = bank(vec![3, 4, 5, 6, 7]);
        let mut clock = TweenClock::new();
        bank.trigger_spin(&mut clock).unwrap();
        let events = bank.handle_all(clock.run_to_end(16.0, 10_000));

        match events.last() {
            Some(BankEvent::SpinFinished { stops, symbols }) => {
                assert_eq!(*stops, vec![Some(3), Some(4), Some(5), Some(6), Some(7)]);
                assert_eq!(*symbols, bank.center_line());
            }
            other => panic!("expected SpinFinished, got {:?}", other),
        }
    }

    #[test]
    fn test_out_of_range_pick_is_reduced() {
        let mut bank = ReelBank::new(ReelBankConfig::default(), |len: usize| len + 4).unwrap();
        let set = ReelSet::classic();
        for i in 0..bank.len() {
            bank.set_sequence(i, set.reels[i].clone()).unwrap();
        }

        let mut clock = TweenClock::new();
        let spin = bank.trigger_spin(&mut clock).unwrap();
        assert_eq!(spin.stops, vec![Some(4); 5]);

        bank.handle_all(clock.run_to_end(16.0, 10_000));
        assert_eq!(bank.landed_indices(), spin.stops);
    }
}
