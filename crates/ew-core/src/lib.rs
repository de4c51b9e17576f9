//! ew-core: Shared types, traits, and utilities for Edgewise
//!
//! This crate provides the foundational types used across all Edgewise crates.

mod error;
mod time;

pub use error::*;
pub use time::*;

/// Chip amount. Signed because a session balance is allowed to go negative.
pub type Chips = i64;

/// Chip balance every new session starts with
pub const DEFAULT_INITIAL_BALANCE: Chips = 1000;
