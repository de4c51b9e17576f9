//! Parallel batch runner
//!
//! Every session owns its engine, seeded ChaCha8 RNG and manual clock, so the
//! per-session results depend only on `seed + index`. Results are collected in
//! index order and folded sequentially, which keeps the report identical
//! across thread counts.

use ew_analytics::{SessionStats, total_loss};
use ew_core::{Chips, ManualClock};
use ew_slot_lab::SlotEngine;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{SimConfig, SimError};

/// Clock start for simulated sessions (ms)
const SIM_EPOCH_MS: i64 = 1_700_000_000_000;

/// Simulated time between spins (ms)
const SPIN_INTERVAL_MS: i64 = 1_500;

// ═══════════════════════════════════════════════════════════════════════════
// SESSION OUTCOME
// ═══════════════════════════════════════════════════════════════════════════

/// Result of one simulated session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionOutcome {
    pub index: usize,
    pub final_balance: Chips,
    /// Σbet − Σwin, i.e. `initial - final`; negative when the session ended ahead
    pub net_loss: Chips,
    pub stats: SessionStats,
}

// ═══════════════════════════════════════════════════════════════════════════
// REPORT
// ═══════════════════════════════════════════════════════════════════════════

/// Aggregate over all sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimReport {
    pub sessions: usize,
    pub spins_per_session: usize,
    pub bet: Chips,
    pub seed: u64,
    pub total_spins: u64,
    pub total_bet: Chips,
    pub total_win: Chips,
    pub mean_net_loss: f64,
    pub min_net_loss: Chips,
    pub max_net_loss: Chips,
    /// Fraction of sessions that ended below the starting balance
    pub losing_share: f64,
    pub rtp: f64,
    pub hit_rate: f64,
    pub near_miss_rate: f64,
    pub configured_house_edge: f64,
}

impl SimReport {
    fn from_outcomes(config: &SimConfig, outcomes: &[SessionOutcome]) -> Self {
        let mut total_spins = 0u64;
        let mut total_bet: Chips = 0;
        let mut total_win: Chips = 0;
        let mut wins = 0u64;
        let mut near_misses = 0u64;
        let mut losing = 0usize;
        let mut net_sum: i128 = 0;
        let mut min_net_loss = Chips::MAX;
        let mut max_net_loss = Chips::MIN;

        for o in outcomes {
            total_spins += o.stats.total_spins;
            total_bet += o.stats.total_bet;
            total_win += o.stats.total_win;
            wins += o.stats.wins;
            near_misses += o.stats.near_misses;
            net_sum += i128::from(o.net_loss);
            min_net_loss = min_net_loss.min(o.net_loss);
            max_net_loss = max_net_loss.max(o.net_loss);
            if o.net_loss > 0 {
                losing += 1;
            }
        }

        let n = outcomes.len().max(1) as f64;
        let ratio = |num: u64| {
            if total_spins == 0 {
                0.0
            } else {
                num as f64 / total_spins as f64
            }
        };

        Self {
            sessions: outcomes.len(),
            spins_per_session: config.spins_per_session,
            bet: config.bet,
            seed: config.seed,
            total_spins,
            total_bet,
            total_win,
            mean_net_loss: net_sum as f64 / n,
            min_net_loss: if outcomes.is_empty() { 0 } else { min_net_loss },
            max_net_loss: if outcomes.is_empty() { 0 } else { max_net_loss },
            losing_share: losing as f64 / n,
            rtp: if total_bet > 0 {
                total_win as f64 / total_bet as f64
            } else {
                0.0
            },
            hit_rate: ratio(wins),
            near_miss_rate: ratio(near_misses),
            configured_house_edge: config.slot.house_edge,
        }
    }

    /// Edge actually realized over the batch
    pub fn realized_edge(&self) -> f64 {
        1.0 - self.rtp
    }

    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Human-readable report
    pub fn render(&self) -> String {
        format!(
            "Sessions: {} × {} spins at bet {} (seed {})\n\
             Total wagered: {} • Total paid: {}\n\
             RTP: {:.1}% • Realized edge: {:.1}% (configured {:.0}%)\n\
             Hit rate: {:.1}% • Near-miss rate: {:.1}%\n\
             Net loss per session: mean {:.1}, min {}, max {}\n\
             Sessions ending in loss: {:.1}%",
            self.sessions,
            self.spins_per_session,
            self.bet,
            self.seed,
            self.total_bet,
            self.total_win,
            self.rtp * 100.0,
            self.realized_edge() * 100.0,
            self.configured_house_edge * 100.0,
            self.hit_rate * 100.0,
            self.near_miss_rate * 100.0,
            self.mean_net_loss,
            self.min_net_loss,
            self.max_net_loss,
            self.losing_share * 100.0,
        )
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// SIMULATOR
// ═══════════════════════════════════════════════════════════════════════════

/// Runs many independent sessions on a rayon pool
pub struct BatchSimulator {
    config: SimConfig,
}

impl BatchSimulator {
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Play one session; pure function of `(config, index)`
    pub fn run_session(&self, index: usize) -> Result<SessionOutcome, SimError> {
        let seed = self.config.seed.wrapping_add(index as u64);
        let clock = ManualClock::new(SIM_EPOCH_MS);
        let mut engine =
            SlotEngine::with_rng(self.config.slot.clone(), ChaCha8Rng::seed_from_u64(seed))?
                .with_clock(clock.clone());
        let mut state = engine.new_state();

        for _ in 0..self.config.spins_per_session {
            engine.spin(&mut state, self.config.bet)?;
            clock.advance(SPIN_INTERVAL_MS);
        }

        Ok(SessionOutcome {
            index,
            final_balance: state.balance(),
            net_loss: total_loss(state.history()),
            stats: SessionStats::from_history(state.history()),
        })
    }

    /// Run every session and fold the outcomes
    pub fn run(&self) -> Result<SimReport, SimError> {
        let outcomes = self.run_sessions()?;
        let report = SimReport::from_outcomes(&self.config, &outcomes);
        log::info!(
            "Batch done: {} sessions, RTP {:.4}, losing share {:.3}",
            report.sessions,
            report.rtp,
            report.losing_share
        );
        Ok(report)
    }

    /// Per-session outcomes in index order
    pub fn run_sessions(&self) -> Result<Vec<SessionOutcome>, SimError> {
        let threads = self.config.effective_threads();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("ew-sim-{i}"))
            .build()
            .map_err(|e| SimError::ThreadPool(e.to_string()))?;

        log::info!(
            "Simulating {} sessions × {} spins on {} threads",
            self.config.sessions,
            self.config.spins_per_session,
            threads
        );

        pool.install(|| {
            (0..self.config.sessions)
                .into_par_iter()
                .map(|i| self.run_session(i))
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> SimConfig {
        SimConfig::default()
            .with_sessions(8)
            .with_spins(50)
            .with_seed(7)
            .with_threads(2)
    }

    #[test]
    fn test_session_is_reproducible() {
        let sim = BatchSimulator::new(small()).unwrap();
        assert_eq!(sim.run_session(3).unwrap(), sim.run_session(3).unwrap());
        assert_ne!(
            sim.run_session(3).unwrap().stats,
            sim.run_session(4).unwrap().stats
        );
    }

    #[test]
    fn test_outcome_identity() {
        let sim = BatchSimulator::new(small()).unwrap();
        let o = sim.run_session(0).unwrap();
        assert_eq!(o.stats.total_spins, 50);
        assert_eq!(o.stats.total_bet, 500);
        assert_eq!(o.net_loss, o.stats.total_bet - o.stats.total_win);
        assert_eq!(o.net_loss, 1000 - o.final_balance);
        assert_eq!(o.final_balance, 1000 - o.net_loss);
    }

    #[test]
    fn test_report_totals() {
        let sim = BatchSimulator::new(small()).unwrap();
        let report = sim.run().unwrap();
        assert_eq!(report.sessions, 8);
        assert_eq!(report.total_spins, 400);
        assert_eq!(report.total_bet, 4000);
        assert!(report.min_net_loss <= report.max_net_loss);
        assert!((0.0..=1.0).contains(&report.losing_share));
    }

    #[test]
    fn test_render_mentions_edge() {
        let report = BatchSimulator::new(small()).unwrap().run().unwrap();
        let text = report.render();
        assert!(text.contains("Realized edge"));
        assert!(text.contains("configured 12%"));
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(BatchSimulator::new(small().with_bet(-1)).is_err());
    }
}
