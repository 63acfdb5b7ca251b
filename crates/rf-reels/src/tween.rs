//! Tween Collaborator
//!
//! Reels never animate themselves. A spin becomes a [`TweenRequest`]; some
//! tween engine drives the value toward its target and reports back through
//! [`TweenEvent`]s, which the bank routes to the owning strip.
//!
//! [`TweenClock`] is a small deterministic engine for headless use: advance
//! it by a frame delta and feed the returned events to
//! [`ReelBank::handle`](crate::bank::ReelBank::handle).

use serde::{Deserialize, Serialize};

use crate::ease::Ease;

/// Reel index inside a bank
pub type ReelId = usize;

/// One animation request: drive a reel's Y from `from` to `to`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TweenRequest {
    pub reel: ReelId,
    pub from: f64,
    pub to: f64,
    pub duration_ms: f64,
    pub delay_ms: f64,
    pub ease: Ease,
}

impl TweenRequest {
    /// Interpolated value at `elapsed_ms` since the request was made
    pub fn value_at(&self, elapsed_ms: f64) -> f64 {
        let progress = self.progress_at(elapsed_ms);
        self.from + (self.to - self.from) * self.ease.evaluate(progress)
    }

    /// Linear progress (0.0 - 1.0) at `elapsed_ms`
    pub fn progress_at(&self, elapsed_ms: f64) -> f64 {
        let running = elapsed_ms - self.delay_ms;
        if running <= 0.0 {
            return 0.0;
        }
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (running / self.duration_ms).min(1.0)
    }
}

/// Callback from the tween engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TweenEvent {
    /// Animation step with the raw interpolated value
    Step { reel: ReelId, value: f64 },
    /// Animation finished. Fires exactly once, after the last step.
    Complete { reel: ReelId },
}

impl TweenEvent {
    /// Reel this event belongs to
    pub fn reel(&self) -> ReelId {
        match self {
            TweenEvent::Step { reel, .. } | TweenEvent::Complete { reel } => *reel,
        }
    }
}

/// Something that can run tween requests
pub trait Tweener {
    fn start(&mut self, request: TweenRequest);
}

/// Collects requests without running them
impl Tweener for Vec<TweenRequest> {
    fn start(&mut self, request: TweenRequest) {
        self.push(request);
    }
}

#[derive(Debug, Clone)]
struct ActiveTween {
    request: TweenRequest,
    elapsed_ms: f64,
}

/// Deterministic frame-driven tween engine
#[derive(Debug, Clone, Default)]
pub struct TweenClock {
    active: Vec<ActiveTween>,
    now_ms: f64,
}

impl TweenClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds advanced so far
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Number of tweens still running (including delayed ones)
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Whether nothing is running
    pub fn is_idle(&self) -> bool {
        self.active.is_empty()
    }

    /// Advance time by `dt_ms` and return the resulting events
    ///
    /// Each running tween emits one `Step`. A tween that reached its end
    /// also emits `Complete` right after that step and is dropped. Tweens
    /// still inside their delay emit nothing.
    pub fn advance(&mut self, dt_ms: f64) -> Vec<TweenEvent> {
        let dt_ms = dt_ms.max(0.0);
        self.now_ms += dt_ms;

        let mut events = Vec::with_capacity(self.active.len());
        self.active.retain_mut(|tween| {
            tween.elapsed_ms += dt_ms;
            let request = &tween.request;

            if tween.elapsed_ms < request.delay_ms {
                return true;
            }

            events.push(TweenEvent::Step {
                reel: request.reel,
                value: request.value_at(tween.elapsed_ms),
            });

            if request.progress_at(tween.elapsed_ms) >= 1.0 {
                events.push(TweenEvent::Complete { reel: request.reel });
                return false;
            }
            true
        });
        events
    }

    /// Advance in `tick_ms` steps until every tween has completed
    ///
    /// Returns all events in order. Gives up after `max_ticks` ticks.
    pub fn run_to_end(&mut self, tick_ms: f64, max_ticks: usize) -> Vec<TweenEvent> {
        let mut events = Vec::new();
        for _ in 0..max_ticks {
            if self.is_idle() {
                break;
            }
            events.extend(self.advance(tick_ms));
        }
        events
    }
}

impl Tweener for TweenClock {
    fn start(&mut self, request: TweenRequest) {
        self.active.push(ActiveTween {
            request,
            elapsed_ms: 0.0,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn request(reel: ReelId, duration_ms: f64, delay_ms: f64) -> TweenRequest {
        TweenRequest {
            reel,
            from: 0.0,
            to: 100.0,
            duration_ms,
            delay_ms,
            ease: Ease::Linear,
        }
    }

    #[test]
    fn test_value_at() {
        let r = request(0, 100.0, 50.0);
        assert_eq!(r.value_at(0.0), 0.0);
        assert_eq!(r.value_at(50.0), 0.0);
        assert_relative_eq!(r.value_at(100.0), 50.0);
        assert_eq!(r.value_at(150.0), 100.0);
        assert_eq!(r.value_at(1000.0), 100.0);
    }

    #[test]
    fn test_complete_fires_once_after_steps() {
        let mut clock = TweenClock::new();
        clock.start(request(3, 100.0, 0.0));

        let events = clock.run_to_end(16.0, 100);
        let completes: Vec<usize> = events
            .iter()
            .enumerate()
            .filter(|(_, e)| matches!(e, TweenEvent::Complete { .. }))
            .map(|(i, _)| i)
            .collect();

        assert_eq!(completes, vec![events.len() - 1]);
        assert!(events.len() > 2);
        assert!(clock.is_idle());
        assert!(events.iter().all(|e| e.reel() == 3));
    }

    #[test]
    fn test_delay_holds_steps() {
        let mut clock = TweenClock::new();
        clock.start(request(0, 100.0, 40.0));
        assert!(clock.advance(16.0).is_empty());
        assert!(clock.advance(16.0).is_empty());
        assert_eq!(clock.advance(16.0).len(), 1);
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let mut clock = TweenClock::new();
        clock.start(request(1, 0.0, 0.0));
        let events = clock.advance(16.0);
        assert_eq!(
            events,
            vec![
                TweenEvent::Step { reel: 1, value: 100.0 },
                TweenEvent::Complete { reel: 1 },
            ]
        );
    }

    #[test]
    fn test_last_step_hits_target() {
        let mut clock = TweenClock::new();
        clock.start(TweenRequest {
            ease: Ease::CubicInOut,
            ..request(0, 95.0, 0.0)
        });
        let events = clock.run_to_end(10.0, 100);
        let last_step = events
            .iter()
            .rev()
            .find_map(|e| match e {
                TweenEvent::Step { value, .. } => Some(*value),
                _ => None,
            })
            .unwrap();
        assert_eq!(last_step, 100.0);
    }

    #[test]
    fn test_vec_collects_requests() {
        let mut sink: Vec<TweenRequest> = Vec::new();
        sink.start(request(0, 1.0, 0.0));
        assert_eq!(sink.len(), 1);
    }
}
