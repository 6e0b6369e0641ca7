//! Tuning constants, loadable from YAML.

use crate::{check_amount, CostMap, LoadError, ResourceType, ValidationError};
use serde::{Deserialize, Serialize};

/// Version string stamped into every save.
pub const GAME_VERSION: &str = "1.0.0";

/// Game tuning parameters. Missing YAML keys fall back to the defaults below.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Scheduler period in milliseconds.
    pub update_interval_ms: u64,
    /// Auto-save period in milliseconds.
    pub save_interval_ms: u64,
    /// Each owned unit raises the next unit's cost by this factor.
    pub building_cost_multiplier: f64,
    /// Each efficiency level raises the next upgrade's cost by this factor.
    pub upgrade_cost_multiplier: f64,
    /// Efficiency gained per building upgrade (multiplicative).
    pub upgrade_efficiency_bonus: f64,
    /// Ledger contents of a fresh game.
    pub starting_resources: CostMap,
    /// Production bonus per held research point, before research multipliers.
    pub research_rate: f64,
    /// Lifetime production needed for the first research point.
    pub reset_cost_base: f64,
    pub production_token_bonus: f64,
    pub innovation_point_bonus: f64,
    pub automation_credit_bonus: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            update_interval_ms: 100,
            save_interval_ms: 30_000,
            building_cost_multiplier: 1.15,
            upgrade_cost_multiplier: 1.5,
            upgrade_efficiency_bonus: 1.25,
            starting_resources: [(ResourceType::IronOre, 50.0), (ResourceType::Stone, 20.0)]
                .into_iter()
                .collect(),
            research_rate: 0.01,
            reset_cost_base: 1_000_000.0,
            production_token_bonus: 0.005,
            innovation_point_bonus: 0.003,
            automation_credit_bonus: 0.002,
        }
    }
}

impl GameConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(text: &str) -> Result<GameConfig, LoadError> {
        let cfg: GameConfig = serde_yaml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.update_interval_ms == 0 {
            return Err(ValidationError::InvalidConfig(
                "update_interval_ms must be > 0".into(),
            ));
        }
        for (name, v) in [
            ("building_cost_multiplier", self.building_cost_multiplier),
            ("upgrade_cost_multiplier", self.upgrade_cost_multiplier),
            ("upgrade_efficiency_bonus", self.upgrade_efficiency_bonus),
        ] {
            if !v.is_finite() || v < 1.0 {
                return Err(ValidationError::InvalidConfig(format!("{name} must be >= 1")));
            }
        }
        if !self.reset_cost_base.is_finite() || self.reset_cost_base <= 0.0 {
            return Err(ValidationError::InvalidConfig(
                "reset_cost_base must be > 0".into(),
            ));
        }
        for (name, v) in [
            ("research_rate", self.research_rate),
            ("production_token_bonus", self.production_token_bonus),
            ("innovation_point_bonus", self.innovation_point_bonus),
            ("automation_credit_bonus", self.automation_credit_bonus),
        ] {
            check_amount(|| format!("config.{name}"), v)?;
        }
        for (r, v) in &self.starting_resources {
            check_amount(|| format!("config.starting_resources.{r}"), *v)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = GameConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.starting_resources[&ResourceType::IronOre], 50.0);
        assert_eq!(cfg.starting_resources[&ResourceType::Stone], 20.0);
    }

    #[test]
    fn partial_yaml_takes_defaults() {
        let cfg = GameConfig::from_yaml_str("update_interval_ms: 250\nresearch_rate: 0.02\n")
            .unwrap();
        assert_eq!(cfg.update_interval_ms, 250);
        assert_eq!(cfg.research_rate, 0.02);
        assert_eq!(cfg.building_cost_multiplier, 1.15);
        assert_eq!(cfg.save_interval_ms, 30_000);
    }

    #[test]
    fn unknown_keys_rejected() {
        let err = GameConfig::from_yaml_str("tick_days: 30\n").unwrap_err();
        assert!(matches!(err, LoadError::Yaml(_)));
    }

    #[test]
    fn out_of_range_values_rejected() {
        let err = GameConfig::from_yaml_str("building_cost_multiplier: 0.9\n").unwrap_err();
        assert!(matches!(err, LoadError::Invalid(ValidationError::InvalidConfig(_))));
        let err = GameConfig::from_yaml_str("starting_resources:\n  coal: -1\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "config.starting_resources.coal: negative value"
        );
    }
}
