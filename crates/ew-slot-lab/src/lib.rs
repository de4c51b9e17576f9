//! # ew-slot-lab — Spin Engine for Edgewise
//!
//! A three-reel, three-symbol slot simulator used to demonstrate how house
//! edge, near misses and intermittent rewards play out over a session.
//!
//! ## Architecture
//!
//! ```text
//! SlotEngine ──(SpinRng, Clock, SpinSink)
//!     │
//!     │ spin(&mut GameState, bet)
//!     v
//! GameState.history ← SpinResult ──> SpinSnapshot ──> SpinSink (best effort)
//! ```
//!
//! Win and near-miss are decided only by matching symbols on the line. The
//! configured house edge is reported, never used to gate outcomes.

pub mod config;
pub mod engine;
pub mod flicker;
pub mod rng;
pub mod sink;
pub mod spin;
pub mod state;
pub mod symbols;

pub use config::*;
pub use engine::*;
pub use flicker::*;
pub use rng::*;
pub use sink::*;
pub use spin::*;
pub use state::*;
pub use symbols::*;
