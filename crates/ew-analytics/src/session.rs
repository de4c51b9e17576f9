//! Session facade
//!
//! Bundles one [`SlotEngine`] with the [`GameState`] it drives and exposes the
//! full contract a UI or persistence layer consumes: spin, reset and the loss
//! queries.

use ew_core::Chips;
use ew_slot_lab::{EngineError, GameState, SlotEngine, SpinResult};

use crate::loss::{self, SpinCounts};
use crate::stats::SessionStats;
use crate::summary::SessionSummary;

/// One simulation session
pub struct Session {
    engine: SlotEngine,
    state: GameState,
}

impl Session {
    pub fn new(engine: SlotEngine) -> Self {
        let state = engine.new_state();
        log::debug!("Session started with balance {}", state.balance());
        Self { engine, state }
    }

    pub fn spin(&mut self, bet: Chips) -> Result<SpinResult, EngineError> {
        self.engine.spin(&mut self.state, bet)
    }

    pub fn reset(&mut self) {
        self.engine.reset(&mut self.state);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn engine(&self) -> &SlotEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut SlotEngine {
        &mut self.engine
    }

    pub fn balance(&self) -> Chips {
        self.state.balance()
    }

    pub fn history(&self) -> &[SpinResult] {
        self.state.history()
    }

    pub fn total_loss(&self) -> Chips {
        loss::total_loss(self.history())
    }

    pub fn cumulative_loss_series(&self) -> Vec<Chips> {
        loss::cumulative_loss_series(self.history())
    }

    pub fn counts(&self) -> SpinCounts {
        loss::counts(self.history())
    }

    pub fn loss_ratio(&self, cap: f64) -> f64 {
        loss::loss_ratio(self.history(), cap)
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats::from_history(self.history())
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary::from_state(&self.state)
    }

    /// Status line: balance, reported edge and dynamic win probability
    pub fn status_line(&self) -> String {
        format!(
            "Balance: {} • House edge: {:.0}% • Base win prob: {:.0}% (effective {:.1}%)",
            self.state.balance(),
            self.engine.effective_edge(&self.state) * 100.0,
            self.state.base_win_probability() * 100.0,
            self.engine.dynamic_win_probability(&self.state) * 100.0,
        )
    }
}
