//! Spin Engine — core simulation logic

use std::sync::Arc;

use ew_core::{Chips, Clock, CoreError, SystemClock};
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;

use crate::config::SlotConfig;
use crate::rng::SpinRng;
use crate::sink::{NoopSink, SpinSink};
use crate::spin::{SpinResult, SpinSnapshot};
use crate::state::GameState;
use crate::symbols::{LineOutcome, REEL_COUNT, Symbol};

/// Largest value a unit draw is clamped to, keeping the multiplier range half-open
const UNIT_MAX: f64 = 1.0 - f64::EPSILON;

/// Engine errors
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Entropy source unavailable: {0}")]
    EntropyUnavailable(String),

    #[error("Config error: {0}")]
    Config(#[from] CoreError),
}

/// Three-reel spin engine.
///
/// Holds the configuration and the injected collaborators (random source,
/// clock, persistence sink). Session state lives in [`GameState`] and is
/// passed in by the caller.
pub struct SlotEngine {
    config: SlotConfig,
    rng: Box<dyn SpinRng + Send>,
    clock: Box<dyn Clock>,
    sink: Arc<dyn SpinSink>,
}

impl SlotEngine {
    /// Engine seeded from the operating system's entropy source
    pub fn from_entropy(config: SlotConfig) -> Result<Self, EngineError> {
        let rng =
            StdRng::try_from_os_rng().map_err(|e| EngineError::EntropyUnavailable(e.to_string()))?;
        Self::with_rng(config, rng)
    }

    /// Engine with a reproducible seed
    pub fn seeded(config: SlotConfig, seed: u64) -> Result<Self, EngineError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Engine with any random source, system clock and no sink
    pub fn with_rng(
        config: SlotConfig,
        rng: impl SpinRng + Send + 'static,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            config,
            rng: Box::new(rng),
            clock: Box::new(SystemClock),
            sink: Arc::new(NoopSink),
        })
    }

    /// Builder: replace the clock
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Builder: replace the persistence sink
    pub fn with_sink(mut self, sink: Arc<dyn SpinSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Replace the random source, e.g. to re-seed mid-session
    pub fn set_rng(&mut self, rng: impl SpinRng + Send + 'static) {
        self.rng = Box::new(rng);
    }

    /// Re-seed with a fixed seed
    pub fn seed(&mut self, seed: u64) {
        self.set_rng(StdRng::seed_from_u64(seed));
    }

    pub fn config(&self) -> &SlotConfig {
        &self.config
    }

    /// Fresh session state for this engine's config
    pub fn new_state(&self) -> GameState {
        GameState::new(&self.config)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // SPIN EXECUTION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Execute one spin against `state`.
    ///
    /// Fails on a non-positive bet, a bet whose largest payout does not fit in
    /// [`Chips`], or a spin that would overflow the balance. On failure `state`
    /// is untouched.
    pub fn spin(&mut self, state: &mut GameState, bet: Chips) -> Result<SpinResult, EngineError> {
        if bet <= 0 {
            return Err(EngineError::InvalidArgument(format!(
                "bet must be positive, got {bet}"
            )));
        }
        if bet as f64 * self.config.multiplier_max >= Chips::MAX as f64 {
            return Err(EngineError::InvalidArgument(format!(
                "bet {bet} too large: payout would overflow"
            )));
        }

        let symbols = self.draw_line();
        let outcome = LineOutcome::classify(&symbols);
        let win = if outcome.is_win() {
            self.payout(bet)
        } else {
            0
        };

        let balance = state
            .balance
            .checked_sub(bet)
            .and_then(|b| b.checked_add(win))
            .ok_or_else(|| {
                EngineError::InvalidArgument(format!(
                    "bet {bet} would overflow balance {}",
                    state.balance
                ))
            })?;

        state.spin_counter += 1;
        state.balance = balance;

        let previous = state.history.last().map_or(i64::MIN, |s| s.timestamp);
        let timestamp = self.clock.now_millis().max(previous);

        let result = SpinResult {
            id: state.spin_counter,
            bet,
            win,
            is_win: outcome.is_win(),
            near_miss: outcome.is_near_miss(),
            timestamp,
            symbols,
            balance_after: state.balance,
        };
        state.history.push(result.clone());

        log::trace!("{} → balance {}", result.describe(), state.balance);

        let snapshot = SpinSnapshot::from_result(&result, self.effective_edge(state));
        if let Err(e) = self.sink.record(&snapshot) {
            log::warn!("Spin {} not persisted: {}", result.id, e);
        }

        Ok(result)
    }

    /// Restore `state` to the start of a session
    pub fn reset(&self, state: &mut GameState) {
        state.balance = state.initial_balance;
        state.history.clear();
        state.spin_counter = 0;
        log::debug!("Session reset to balance {}", state.balance);
    }

    fn draw_line(&mut self) -> [Symbol; REEL_COUNT] {
        std::array::from_fn(|_| Symbol::from_index(self.rng.symbol_index(Symbol::COUNT)))
    }

    fn payout(&mut self, bet: Chips) -> Chips {
        let u = self.rng.unit();
        // NaN slips through clamp
        let u = if u.is_finite() { u.clamp(0.0, UNIT_MAX) } else { 0.0 };
        let multiplier =
            self.config.multiplier_min + u * (self.config.multiplier_max - self.config.multiplier_min);
        (bet as f64 * multiplier).floor() as Chips
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // REPORTED EDGE
    // ═══════════════════════════════════════════════════════════════════════════

    /// House edge after drift for the current spin count. Reporting only.
    pub fn effective_edge(&self, state: &GameState) -> f64 {
        self.config
            .edge_drift
            .apply(state.house_edge, state.spin_counter)
    }

    /// Base win probability scaled down by the drifted edge. Reporting only.
    pub fn dynamic_win_probability(&self, state: &GameState) -> f64 {
        state.base_win_probability * (1.0 - self.effective_edge(state))
    }
}
