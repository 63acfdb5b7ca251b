//! # rf-reels — Slot reel strips and spin orchestration
//!
//! Geometry and scheduling for an animated slot reel bank: long cyclic symbol
//! strips scrolling behind fixed viewports, spinning a configurable number of
//! loops and landing exactly on a chosen symbol, staggered across reels so
//! they stop in sequence.
//!
//! Drawing, masking and tween interpolation belong to the host; this crate
//! talks to them through [`SymbolSurface`], [`ViewportMask`] and [`Tweener`].
//! [`TweenClock`] is a deterministic tween engine for headless runs.
//!
//! ## Architecture
//!
//! ```text
//! ReelBank
//!     │
//!     ├── ReelBankConfig (layout, BankTiming, SpeedProfile)
//!     ├── IndexPicker (landing index per reel)
//!     └── Vec<Reel> ── ReelStrip (sequence, position math, Idle/Spinning)
//!           │
//!           v
//!     Motion → TweenRequest → Tweener
//!                               │
//!     ReelBank::handle ◀── TweenEvent (Step / Complete)
//! ```

pub mod bank;
pub mod config;
pub mod ease;
pub mod error;
pub mod picker;
pub mod speed;
pub mod strip;
pub mod surface;
pub mod symbols;
pub mod tween;
pub mod wrap;

pub use bank::*;
pub use config::*;
pub use ease::*;
pub use error::*;
pub use picker::*;
pub use speed::*;
pub use strip::*;
pub use surface::*;
pub use symbols::*;
pub use tween::*;
pub use wrap::*;
