//! Batch simulation configuration

use ew_core::Chips;
use ew_slot_lab::SlotConfig;
use serde::{Deserialize, Serialize};

use crate::SimError;

/// Batch run parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Independent sessions to play
    pub sessions: usize,
    pub spins_per_session: usize,
    /// Constant bet for every spin
    pub bet: Chips,
    /// Session `i` is seeded with `seed + i`
    pub seed: u64,
    /// Worker threads (0 = one per CPU)
    pub threads: usize,
    #[serde(default)]
    pub slot: SlotConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            sessions: 1_000,
            spins_per_session: 100,
            bet: 10,
            seed: 42,
            threads: 0,
            slot: SlotConfig::default(),
        }
    }
}

impl SimConfig {
    pub fn with_sessions(mut self, sessions: usize) -> Self {
        self.sessions = sessions;
        self
    }

    pub fn with_spins(mut self, spins: usize) -> Self {
        self.spins_per_session = spins;
        self
    }

    pub fn with_bet(mut self, bet: Chips) -> Self {
        self.bet = bet;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_slot(mut self, slot: SlotConfig) -> Self {
        self.slot = slot;
        self
    }

    /// Threads actually used
    pub fn effective_threads(&self) -> usize {
        if self.threads == 0 {
            num_cpus::get()
        } else {
            self.threads
        }
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if self.sessions == 0 {
            return Err(SimError::InvalidConfig("sessions must be > 0".into()));
        }
        if self.spins_per_session == 0 {
            return Err(SimError::InvalidConfig("spins_per_session must be > 0".into()));
        }
        if self.bet <= 0 {
            return Err(SimError::InvalidConfig(format!("bet must be > 0, got {}", self.bet)));
        }
        self.slot.validate()?;
        Ok(())
    }
}
