//! Game tuning: wager pool ranges, odds bounds and the starting balance.
//! Loaded from YAML; every field falls back to the default game's values.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Env var naming the YAML config file read by the binary.
pub const CONFIG_ENV_VAR: &str = "CHICKEN_FIGHT_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "chicken_fight.yaml";

/// Inclusive integer range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub min: u32,
    pub max: u32,
}

impl Range {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    /// Number of simulated bettors, guaranteed entries included.
    pub size: Range,
    /// Stake range for the two seeded entries (one per side).
    pub guaranteed_stake: Range,
    /// Stake range for the remaining entries.
    pub stake: Range,
    /// Seed one entry per side before filling the rest.
    pub guarantee_both_sides: bool,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            size: Range::new(5, 20),
            guaranteed_stake: Range::new(50, 1000),
            stake: Range::new(20, 5000),
            guarantee_both_sides: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OddsConfig {
    /// Per-side total floor applied before dividing.
    pub min_side_total: u64,
    /// Cap on each side's payout ratio. `None` leaves ratios uncapped.
    pub max_odds: Option<f64>,
}

impl Default for OddsConfig {
    fn default() -> Self {
        Self {
            min_side_total: 1,
            max_odds: Some(10.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub population: PopulationConfig,
    pub odds: OddsConfig,
    pub starting_balance: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            population: PopulationConfig::default(),
            odds: OddsConfig::default(),
            starting_balance: 100,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pop = &self.population;
        for (name, range) in [
            ("population.size", pop.size),
            ("population.guaranteed_stake", pop.guaranteed_stake),
            ("population.stake", pop.stake),
        ] {
            if range.min > range.max {
                return Err(ConfigError::Invalid(format!(
                    "{name}: min {} exceeds max {}",
                    range.min, range.max
                )));
            }
        }
        if pop.guarantee_both_sides && pop.size.min < 2 {
            return Err(ConfigError::Invalid(
                "population.size.min must be at least 2 when both sides are guaranteed".to_string(),
            ));
        }
        if pop.stake.min == 0 || (pop.guarantee_both_sides && pop.guaranteed_stake.min == 0) {
            return Err(ConfigError::Invalid("wager stakes must be positive".to_string()));
        }
        if self.odds.min_side_total == 0 {
            return Err(ConfigError::Invalid("odds.min_side_total must be positive".to_string()));
        }
        if let Some(cap) = self.odds.max_odds {
            if !cap.is_finite() || cap < 1.0 {
                return Err(ConfigError::Invalid(format!(
                    "odds.max_odds must be finite and at least 1.0, got {cap}"
                )));
            }
        }
        Ok(())
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_yaml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }
}

/// Load and validate a YAML config file.
pub fn load_config(path: impl AsRef<Path>) -> Result<GameConfig, ConfigError> {
    let raw = fs::read_to_string(path)?;
    GameConfig::from_yaml_str(&raw)
}

/// Resolve the config the binary runs with: the file named by
/// [CONFIG_ENV_VAR], else [DEFAULT_CONFIG_PATH] if present, else defaults.
/// A file that exists but fails to parse or validate is an error.
pub fn load_config_from_env() -> Result<GameConfig, ConfigError> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return load_config(path);
    }
    let path = Path::new(DEFAULT_CONFIG_PATH);
    if !path.exists() {
        return Ok(GameConfig::default());
    }
    load_config(path)
}
