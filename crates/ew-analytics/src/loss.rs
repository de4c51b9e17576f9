//! Loss aggregates derived from spin history
//!
//! Every function here is pure and recomputes from the history slice alone.

use ew_core::Chips;
use ew_slot_lab::SpinResult;
use serde::{Deserialize, Serialize};

/// Outcome tallies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinCounts {
    pub wins: usize,
    pub near_misses: usize,
    pub total: usize,
}

impl SpinCounts {
    /// Spins that were neither a win nor a near miss
    pub fn plain_losses(&self) -> usize {
        self.total - self.wins - self.near_misses
    }
}

/// Σbet − Σwin. Negative when the player is ahead. Saturates at the
/// [`Chips`] bounds.
pub fn total_loss(history: &[SpinResult]) -> Chips {
    history
        .iter()
        .map(SpinResult::net_loss)
        .fold(0, Chips::saturating_add)
}

/// Running total of (bet − win), one value per spin
pub fn cumulative_loss_series(history: &[SpinResult]) -> Vec<Chips> {
    history
        .iter()
        .scan(0, |acc, spin| {
            *acc = Chips::saturating_add(*acc, spin.net_loss());
            Some(*acc)
        })
        .collect()
}

pub fn counts(history: &[SpinResult]) -> SpinCounts {
    history.iter().fold(
        SpinCounts {
            total: history.len(),
            ..Default::default()
        },
        |mut c, spin| {
            if spin.is_win {
                c.wins += 1;
            } else if spin.near_miss {
                c.near_misses += 1;
            }
            c
        },
    )
}

/// Total loss normalized by `cap`, clamped to `[0, 1]`.
///
/// A non-positive or non-finite `cap` gives `0.0`.
pub fn loss_ratio(history: &[SpinResult], cap: f64) -> f64 {
    if !(cap.is_finite() && cap > 0.0) {
        return 0.0;
    }
    (total_loss(history) as f64 / cap).clamp(0.0, 1.0)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use ew_core::Chips;
    use ew_slot_lab::{LineOutcome, SpinResult, Symbol};

    /// History with the given bets and wins. Winning spins show a triple,
    /// losing spins alternate between a pair and a distinct line.
    pub fn history(bets: &[Chips], wins: &[Chips]) -> Vec<SpinResult> {
        let mut balance: Chips = 1000;
        bets.iter()
            .zip(wins)
            .enumerate()
            .map(|(i, (&bet, &win))| {
                let symbols = if win > 0 {
                    [Symbol::Bell; 3]
                } else if i % 2 == 0 {
                    [Symbol::Cherry, Symbol::Cherry, Symbol::Lemon]
                } else {
                    [Symbol::Cherry, Symbol::Lemon, Symbol::Bell]
                };
                let outcome = LineOutcome::classify(&symbols);
                balance = Chips::saturating_add(balance, win).saturating_sub(bet);
                SpinResult {
                    id: i as u64 + 1,
                    bet,
                    win,
                    is_win: outcome.is_win(),
                    near_miss: outcome.is_near_miss(),
                    timestamp: 1_700_000_000_000 + i as i64 * 1000,
                    symbols,
                    balance_after: balance,
                }
            })
            .collect()
    }
}
