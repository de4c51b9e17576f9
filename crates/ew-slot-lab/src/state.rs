//! Per-session game state

use ew_core::Chips;
use serde::{Deserialize, Serialize};

use crate::config::SlotConfig;
use crate::spin::SpinResult;
use crate::symbols::{REEL_COUNT, Symbol};

/// Mutable state of one simulation session.
///
/// Owned by the caller and handed to [`crate::engine::SlotEngine`] by `&mut`.
/// Only the engine mutates it; everything else reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) initial_balance: Chips,
    pub(crate) balance: Chips,
    pub(crate) house_edge: f64,
    pub(crate) base_win_probability: f64,
    pub(crate) spin_counter: u64,
    pub(crate) history: Vec<SpinResult>,
}

impl GameState {
    /// Fresh session state for a config
    pub fn new(config: &SlotConfig) -> Self {
        Self {
            initial_balance: config.initial_balance,
            balance: config.initial_balance,
            house_edge: config.house_edge,
            base_win_probability: config.base_win_probability,
            spin_counter: 0,
            history: Vec::new(),
        }
    }

    pub fn initial_balance(&self) -> Chips {
        self.initial_balance
    }

    pub fn balance(&self) -> Chips {
        self.balance
    }

    pub fn house_edge(&self) -> f64 {
        self.house_edge
    }

    pub fn base_win_probability(&self) -> f64 {
        self.base_win_probability
    }

    pub fn spin_counter(&self) -> u64 {
        self.spin_counter
    }

    /// Chronological spin history
    pub fn history(&self) -> &[SpinResult] {
        &self.history
    }

    pub fn last_spin(&self) -> Option<&SpinResult> {
        self.history.last()
    }

    /// Symbols currently showing on the reels
    pub fn current_symbols(&self) -> [Symbol; REEL_COUNT] {
        self.last_spin()
            .map(|s| s.symbols)
            .unwrap_or([Symbol::Cherry; REEL_COUNT])
    }

    /// Net change in balance since the session started
    pub fn net_change(&self) -> Chips {
        self.balance - self.initial_balance
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(&SlotConfig::default())
    }
}
