//! Cosmetic pre-spin reel flicker
//!
//! Purely presentational: random frames shown while the reels "spin", before
//! the engine settles the real outcome. The flicker has its own random source,
//! reads [`GameState`] only for the starting frame, and never writes to it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::rng::SpinRng;
use crate::state::GameState;
use crate::symbols::{REEL_COUNT, Symbol};

/// Flicker timing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlickerConfig {
    /// Number of random frames
    pub frames: u32,
    /// Pause after each frame (ms)
    pub frame_interval_ms: u64,
}

impl Default for FlickerConfig {
    fn default() -> Self {
        Self {
            frames: 15,
            frame_interval_ms: 100,
        }
    }
}

impl FlickerConfig {
    /// No pauses, for tests and headless runs
    pub fn instant() -> Self {
        Self {
            frame_interval_ms: 0,
            ..Default::default()
        }
    }

    /// Total animation length
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.frames as u64 * self.frame_interval_ms)
    }
}

/// Shared cancellation flag
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// How a flicker run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlickerOutcome {
    /// All frames shown
    Completed { frames: u32 },
    /// Stopped early by the cancel token
    Cancelled { frames: u32 },
}

/// Frame generator for the reel flicker
pub struct SpinFlicker {
    config: FlickerConfig,
    rng: Box<dyn SpinRng + Send>,
}

impl SpinFlicker {
    pub fn new(config: FlickerConfig) -> Self {
        Self::with_rng(config, SmallRng::from_os_rng())
    }

    pub fn with_rng(config: FlickerConfig, rng: impl SpinRng + Send + 'static) -> Self {
        Self {
            config,
            rng: Box::new(rng),
        }
    }

    pub fn config(&self) -> &FlickerConfig {
        &self.config
    }

    /// Show the frames, calling `on_frame` for each.
    ///
    /// The first call receives the symbols currently showing in `state`; the
    /// following `frames` calls receive random lines. Checked for cancellation
    /// before every frame.
    pub fn run<F>(&mut self, state: &GameState, cancel: &CancelToken, mut on_frame: F) -> FlickerOutcome
    where
        F: FnMut([Symbol; REEL_COUNT]),
    {
        on_frame(state.current_symbols());

        let interval = Duration::from_millis(self.config.frame_interval_ms);
        for shown in 0..self.config.frames {
            if cancel.is_cancelled() {
                return FlickerOutcome::Cancelled { frames: shown };
            }
            on_frame(self.next_frame());
            if !interval.is_zero() {
                std::thread::sleep(interval);
            }
        }
        FlickerOutcome::Completed {
            frames: self.config.frames,
        }
    }

    fn next_frame(&mut self) -> [Symbol; REEL_COUNT] {
        std::array::from_fn(|_| Symbol::from_index(self.rng.symbol_index(Symbol::COUNT)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;

    #[test]
    fn test_runs_all_frames() {
        let state = GameState::default();
        let mut flicker = SpinFlicker::with_rng(FlickerConfig::instant(), ScriptedRng::new([2]));
        let mut frames = Vec::new();

        let outcome = flicker.run(&state, &CancelToken::new(), |f| frames.push(f));

        assert_eq!(outcome, FlickerOutcome::Completed { frames: 15 });
        assert_eq!(frames.len(), 16);
        assert_eq!(frames[0], [Symbol::Cherry; 3]);
        assert!(frames[1..].iter().all(|f| *f == [Symbol::Bell; 3]));
    }

    #[test]
    fn test_cancel_stops_early() {
        let state = GameState::default();
        let mut flicker = SpinFlicker::with_rng(FlickerConfig::instant(), ScriptedRng::new([0]));
        let cancel = CancelToken::new();
        let mut count = 0;

        let outcome = flicker.run(&state, &cancel, |_| {
            count += 1;
            if count == 4 {
                cancel.cancel();
            }
        });

        assert_eq!(outcome, FlickerOutcome::Cancelled { frames: 3 });
        assert_eq!(count, 4);
    }

    #[test]
    fn test_duration() {
        assert_eq!(FlickerConfig::default().duration(), Duration::from_millis(1500));
    }
}
