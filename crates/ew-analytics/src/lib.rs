//! # ew-analytics — Loss analytics for Edgewise
//!
//! Derives aggregates from a session's spin history: total loss, the
//! cumulative-loss series used for trend charts, outcome counts and a clamped
//! loss ratio for progress-bar style displays. Nothing here keeps hidden
//! state; every query is recomputed from the history slice.

pub mod loss;
pub mod session;
pub mod stats;
pub mod summary;

pub use loss::{SpinCounts, counts, cumulative_loss_series, loss_ratio, total_loss};
pub use session::Session;
pub use stats::SessionStats;
pub use summary::SessionSummary;
