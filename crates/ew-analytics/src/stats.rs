//! Session statistics

use ew_core::Chips;
use ew_slot_lab::SpinResult;
use serde::{Deserialize, Serialize};

/// Aggregate statistics over a spin history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub total_spins: u64,
    pub total_bet: Chips,
    pub total_win: Chips,
    pub wins: u64,
    pub near_misses: u64,
    pub losses: u64,
    pub biggest_win: Chips,
    pub longest_losing_streak: u64,
}

impl SessionStats {
    pub fn from_history(history: &[SpinResult]) -> Self {
        let mut stats = Self::default();
        let mut streak = 0u64;

        for spin in history {
            stats.total_spins += 1;
            stats.total_bet = stats.total_bet.saturating_add(spin.bet);
            stats.total_win = stats.total_win.saturating_add(spin.win);

            if spin.is_win {
                stats.wins += 1;
                stats.biggest_win = stats.biggest_win.max(spin.win);
                streak = 0;
            } else {
                stats.losses += 1;
                if spin.near_miss {
                    stats.near_misses += 1;
                }
                streak += 1;
                stats.longest_losing_streak = stats.longest_losing_streak.max(streak);
            }
        }
        stats
    }

    /// Calculate RTP (%)
    pub fn rtp(&self) -> f64 {
        if self.total_bet > 0 {
            (self.total_win as f64 / self.total_bet as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Realized house edge (%), i.e. 100 − RTP
    pub fn realized_edge(&self) -> f64 {
        if self.total_bet > 0 {
            100.0 - self.rtp()
        } else {
            0.0
        }
    }

    /// Calculate hit rate (%)
    pub fn hit_rate(&self) -> f64 {
        self.rate(self.wins)
    }

    /// Share of spins that were near misses (%)
    pub fn near_miss_rate(&self) -> f64 {
        self.rate(self.near_misses)
    }

    fn rate(&self, count: u64) -> f64 {
        if self.total_spins > 0 {
            (count as f64 / self.total_spins as f64) * 100.0
        } else {
            0.0
        }
    }
}
