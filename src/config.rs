//! Tunable dashboard parameters.
//!
//! `DashboardConfig::default()` reproduces the stock page. With the `serde`
//! feature the config derives `Deserialize`; missing sections fall back to their
//! defaults so a host page can override a single value.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct DashboardConfig {
    pub reaction: ReactionConfig,
    pub challenge: ChallengeConfig,
    pub steps: StepsConfig,
    pub market: MarketConfig,
    pub wealth: WealthConfig,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ReactionConfig {
    pub goal: u32,
    pub countdown_secs: u32,
    pub lives: u32,
    pub points_per_transaction: u64,
    pub phase_min_ms: u32,
    pub phase_max_ms: u32,
}

impl Default for ReactionConfig {
    fn default() -> Self {
        Self {
            goal: 5,
            countdown_secs: 30,
            lives: 3,
            points_per_transaction: 100,
            phase_min_ms: 2_000,
            phase_max_ms: 4_000,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ChallengeConfig {
    pub max_attempts: u32,
    pub rapid_clicks: u32,
    pub rapid_click_ms: u32,
    pub double_clicks: u32,
    pub double_click_ms: u32,
    pub hold_ms: u32,
    pub hold_limit_ms: u32,
    pub hover_ms: u32,
    pub hover_limit_ms: u32,
    pub points_per_challenge: u64,
    pub points_per_spare_attempt: u64,
}

impl Default for ChallengeConfig {
    fn default() -> Self {
        Self {
            max_attempts: 6,
            rapid_clicks: 10,
            rapid_click_ms: 5_000,
            double_clicks: 3,
            double_click_ms: 5_000,
            hold_ms: 3_000,
            hold_limit_ms: 6_000,
            hover_ms: 3_000,
            hover_limit_ms: 6_000,
            points_per_challenge: 250,
            points_per_spare_attempt: 50,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct StepsConfig {
    /// Probability that a single savings step succeeds.
    pub success_probability: f64,
}

impl Default for StepsConfig {
    fn default() -> Self {
        Self { success_probability: 0.7 }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct MarketConfig {
    pub interval_ms: u32,
    /// Chance that a given return label moves on one interval.
    pub change_chance: f64,
    /// Largest absolute change, in percentage points.
    pub max_delta: f64,
    /// How long a moved label keeps its rising/falling colour.
    pub flash_ms: u32,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self { interval_ms: 5_000, change_chance: 0.1, max_delta: 0.2, flash_ms: 2_000 }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct WealthConfig {
    /// Balance shown before any winnings.
    pub base_amount: f64,
    pub masked: String,
    pub pulse_ms: u32,
}

impl Default for WealthConfig {
    fn default() -> Self {
        Self { base_amount: 456.0, masked: "•••••".to_string(), pulse_ms: 150 }
    }
}

impl DashboardConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let r = &self.reaction;
        if r.goal == 0 {
            return Err(ConfigError::Zero("reaction.goal"));
        }
        if r.countdown_secs == 0 {
            return Err(ConfigError::Zero("reaction.countdown_secs"));
        }
        if r.lives == 0 {
            return Err(ConfigError::Zero("reaction.lives"));
        }
        if r.phase_min_ms == 0 {
            return Err(ConfigError::Zero("reaction.phase_min_ms"));
        }
        if r.phase_min_ms > r.phase_max_ms {
            return Err(ConfigError::InvertedRange {
                field: "reaction.phase_ms",
                min: r.phase_min_ms as f64,
                max: r.phase_max_ms as f64,
            });
        }
        let c = &self.challenge;
        if c.max_attempts == 0 {
            return Err(ConfigError::Zero("challenge.max_attempts"));
        }
        if c.hold_ms > c.hold_limit_ms {
            return Err(ConfigError::InvertedRange {
                field: "challenge.hold_ms",
                min: c.hold_ms as f64,
                max: c.hold_limit_ms as f64,
            });
        }
        if c.hover_ms > c.hover_limit_ms {
            return Err(ConfigError::InvertedRange {
                field: "challenge.hover_ms",
                min: c.hover_ms as f64,
                max: c.hover_limit_ms as f64,
            });
        }
        probability("steps.success_probability", self.steps.success_probability)?;
        probability("market.change_chance", self.market.change_chance)?;
        if self.market.interval_ms == 0 {
            return Err(ConfigError::Zero("market.interval_ms"));
        }
        if !(self.market.max_delta >= 0.0) {
            return Err(ConfigError::Negative("market.max_delta"));
        }
        if !(self.wealth.base_amount >= 0.0) {
            return Err(ConfigError::Negative("wealth.base_amount"));
        }
        Ok(())
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

fn probability(field: &'static str, p: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(ConfigError::Probability { field, value: p })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(DashboardConfig::default().validate(), Ok(()));
    }

    #[test]
    fn inverted_phase_interval_is_rejected() {
        let mut cfg = DashboardConfig::default();
        cfg.reaction.phase_min_ms = 5_000;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvertedRange { field: "reaction.phase_ms", .. })
        ));
    }

    #[test]
    fn probability_outside_unit_range_is_rejected() {
        let mut cfg = DashboardConfig::default();
        cfg.steps.success_probability = 1.5;
        assert!(matches!(cfg.validate(), Err(ConfigError::Probability { .. })));
        cfg.steps.success_probability = f64::NAN;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_goal_is_rejected() {
        let mut cfg = DashboardConfig::default();
        cfg.reaction.goal = 0;
        assert_eq!(cfg.validate(), Err(ConfigError::Zero("reaction.goal")));
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = DashboardConfig::from_json(r#"{ "reaction": { "goal": 8 } }"#).unwrap();
        assert_eq!(cfg.reaction.goal, 8);
        assert_eq!(cfg.reaction.countdown_secs, 30);
        assert_eq!(cfg.steps, StepsConfig::default());
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(DashboardConfig::from_json("{"), Err(ConfigError::Parse(_))));
    }
}
