//! Spin results and sink snapshots

use ew_core::Chips;
use serde::{Deserialize, Serialize};

use crate::symbols::{LineOutcome, REEL_COUNT, Symbol, render_line};

/// Outcome of a single spin. Immutable once appended to the history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinResult {
    /// Spin counter value at creation (1-based)
    pub id: u64,
    /// Bet amount
    pub bet: Chips,
    /// Payout (0 unless `is_win`)
    pub win: Chips,
    /// All three symbols matched
    pub is_win: bool,
    /// Exactly two symbols matched
    pub near_miss: bool,
    /// Creation time, ms since the Unix epoch
    pub timestamp: i64,
    /// Drawn line
    pub symbols: [Symbol; REEL_COUNT],
    /// Balance once this spin settled
    pub balance_after: Chips,
}

impl SpinResult {
    /// Bet minus payout; positive when the player lost chips
    pub fn net_loss(&self) -> Chips {
        self.bet - self.win
    }

    pub fn outcome(&self) -> LineOutcome {
        if self.is_win {
            LineOutcome::Win
        } else if self.near_miss {
            LineOutcome::NearMiss
        } else {
            LineOutcome::Loss
        }
    }

    /// One-line description used by history lists
    pub fn describe(&self) -> String {
        let tag = match self.outcome() {
            LineOutcome::Win => "WIN",
            LineOutcome::NearMiss => "near-miss",
            LineOutcome::Loss => "loss",
        };
        format!(
            "Spin #{} • {} • Bet {} • Win {} • {}",
            self.id,
            render_line(&self.symbols),
            self.bet,
            self.win,
            tag
        )
    }
}

/// Serializable record forwarded to a [`crate::sink::SpinSink`] after every spin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinSnapshot {
    pub id: u64,
    pub bet: Chips,
    pub win: Chips,
    pub is_win: bool,
    pub near_miss: bool,
    pub timestamp: i64,
    /// Symbol indices, reel order
    pub symbols: [u8; REEL_COUNT],
    pub balance: Chips,
    /// Reported house edge at the time of the spin
    pub effective_edge: f64,
}

impl SpinSnapshot {
    pub fn from_result(result: &SpinResult, effective_edge: f64) -> Self {
        Self {
            id: result.id,
            bet: result.bet,
            win: result.win,
            is_win: result.is_win,
            near_miss: result.near_miss,
            timestamp: result.timestamp,
            symbols: result.symbols.map(|s| s as u8),
            balance: result.balance_after,
            effective_edge,
        }
    }
}
