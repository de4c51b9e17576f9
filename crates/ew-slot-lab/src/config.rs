//! Slot engine configuration

use std::path::Path;

use ew_core::{Chips, CoreError, CoreResult, DEFAULT_INITIAL_BALANCE};
use serde::{Deserialize, Serialize};

/// Slow upward drift of the reported house edge over a session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeDrift {
    /// Number of spins between edge increments
    pub interval_spins: u64,
    /// Edge added per elapsed interval
    pub step: f64,
    /// Upper bound for the drifted edge (must stay below 1.0)
    pub ceiling: f64,
}

impl Default for EdgeDrift {
    fn default() -> Self {
        Self {
            interval_spins: 50,
            step: 0.01,
            ceiling: 0.95,
        }
    }
}

impl EdgeDrift {
    /// No drift at all
    pub fn none() -> Self {
        Self {
            step: 0.0,
            ..Default::default()
        }
    }

    /// Edge after `spin_counter` spins, starting from `base`
    pub fn apply(&self, base: f64, spin_counter: u64) -> f64 {
        let steps = if self.interval_spins == 0 {
            0
        } else {
            spin_counter / self.interval_spins
        };
        (base + steps as f64 * self.step).min(self.ceiling)
    }
}

/// Complete slot configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotConfig {
    /// Balance a session starts with and returns to on reset
    pub initial_balance: Chips,

    /// Configured house edge, in [0, 1)
    pub house_edge: f64,

    /// Nominal chance of winning before the edge is applied, in [0, 1)
    pub base_win_probability: f64,

    /// Edge drift over the session (reported only)
    #[serde(default)]
    pub edge_drift: EdgeDrift,

    /// Lowest payout multiplier on a win (inclusive)
    pub multiplier_min: f64,

    /// Highest payout multiplier on a win (exclusive)
    pub multiplier_max: f64,

    /// Bet sizes offered to the player
    pub bet_presets: Vec<Chips>,
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self {
            initial_balance: DEFAULT_INITIAL_BALANCE,
            house_edge: 0.12,
            base_win_probability: 0.15,
            edge_drift: EdgeDrift::default(),
            multiplier_min: 2.0,
            multiplier_max: 5.0,
            bet_presets: vec![10, 50],
        }
    }
}

impl SlotConfig {
    /// Builder: set initial balance
    pub fn with_initial_balance(mut self, balance: Chips) -> Self {
        self.initial_balance = balance;
        self
    }

    /// Builder: set house edge
    pub fn with_house_edge(mut self, edge: f64) -> Self {
        self.house_edge = edge;
        self
    }

    /// Builder: set base win probability
    pub fn with_base_win_probability(mut self, p: f64) -> Self {
        self.base_win_probability = p;
        self
    }

    /// Builder: set edge drift
    pub fn with_edge_drift(mut self, drift: EdgeDrift) -> Self {
        self.edge_drift = drift;
        self
    }

    /// Builder: set payout multiplier range `[min, max)`
    pub fn with_multiplier_range(mut self, min: f64, max: f64) -> Self {
        self.multiplier_min = min;
        self.multiplier_max = max;
        self
    }

    /// Check every field is within its allowed range
    pub fn validate(&self) -> CoreResult<()> {
        let unit = |name: &str, v: f64| {
            if (0.0..1.0).contains(&v) {
                Ok(())
            } else {
                Err(CoreError::InvalidParam(format!(
                    "{name} must be in [0, 1), got {v}"
                )))
            }
        };

        unit("house_edge", self.house_edge)?;
        unit("base_win_probability", self.base_win_probability)?;
        unit("edge_drift.ceiling", self.edge_drift.ceiling)?;

        if !(self.edge_drift.step >= 0.0) {
            return Err(CoreError::InvalidParam(format!(
                "edge_drift.step must be non-negative, got {}",
                self.edge_drift.step
            )));
        }
        if !(self.multiplier_min >= 0.0 && self.multiplier_min < self.multiplier_max) {
            return Err(CoreError::InvalidParam(format!(
                "multiplier range [{}, {}) is empty or negative",
                self.multiplier_min, self.multiplier_max
            )));
        }
        if let Some(bad) = self.bet_presets.iter().find(|&&b| b <= 0) {
            return Err(CoreError::InvalidParam(format!(
                "bet presets must be positive, got {bad}"
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let config: SlotConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Export as pretty JSON
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a JSON config file
    pub fn load(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::debug!("Loaded slot config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SlotConfig::default();
        assert_eq!(config.initial_balance, 1000);
        assert_eq!(config.bet_presets, vec![10, 50]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = SlotConfig::default()
            .with_initial_balance(500)
            .with_house_edge(0.2)
            .with_multiplier_range(1.5, 3.0);

        assert_eq!(config.initial_balance, 500);
        assert_eq!(config.house_edge, 0.2);
        assert_eq!(config.multiplier_min, 1.5);
        assert_eq!(config.multiplier_max, 3.0);
    }

    #[test]
    fn test_validate_rejects_edge_of_one() {
        let config = SlotConfig::default().with_house_edge(1.0);
        assert!(matches!(config.validate(), Err(CoreError::InvalidParam(_))));
    }

    #[test]
    fn test_validate_rejects_empty_multiplier_range() {
        let config = SlotConfig::default().with_multiplier_range(3.0, 3.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_positive_preset() {
        let mut config = SlotConfig::default();
        config.bet_presets.push(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_roundtrip_keeps_values() {
        let config = SlotConfig::default().with_house_edge(0.3);
        let json = config.to_json().unwrap();
        assert_eq!(SlotConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_edge_drift_steps_every_interval() {
        let drift = EdgeDrift::default();
        assert_eq!(drift.apply(0.12, 0), 0.12);
        assert_eq!(drift.apply(0.12, 49), 0.12);
        assert!((drift.apply(0.12, 50) - 0.13).abs() < 1e-12);
        assert!((drift.apply(0.12, 149) - 0.14).abs() < 1e-12);
    }

    #[test]
    fn test_edge_drift_capped_at_ceiling() {
        let drift = EdgeDrift::default();
        assert_eq!(drift.apply(0.12, 1_000_000), 0.95);
    }

    #[test]
    fn test_missing_drift_uses_default() {
        let json = r#"{
            "initial_balance": 1000,
            "house_edge": 0.12,
            "base_win_probability": 0.15,
            "multiplier_min": 2.0,
            "multiplier_max": 5.0,
            "bet_presets": [10, 50]
        }"#;
        let config = SlotConfig::from_json(json).unwrap();
        assert_eq!(config.edge_drift, EdgeDrift::default());
    }
}
