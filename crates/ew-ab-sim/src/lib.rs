//! ew-ab-sim: Batch session simulator
//!
//! Plays thousands of seeded sessions in parallel to show what the house edge
//! does to a bankroll over time. Output is deterministic for a given seed.

pub mod config;
pub mod simulator;

pub use config::*;
pub use simulator::*;

use ew_core::CoreError;
use ew_slot_lab::EngineError;
use thiserror::Error;

/// Simulation errors
#[derive(Debug, Error)]
pub enum SimError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Config error: {0}")]
    Config(#[from] CoreError),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
