//! Configuration file parsing for the market
//!
//! Loads settings from TOML: period length, posting fee, activity
//! threshold, the annual rate band, participation clamp, and the bounds on
//! graph traversal and score recursion.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use verisphere_domain::SCALE;
use verisphere_graph::GraphConfig;
use verisphere_ledger::LedgerConfig;
use verisphere_score::ScoreConfig;

/// Market configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A value or combination of values is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Market configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct MarketConfig {
    /// Wall-clock seconds per settlement period
    #[serde(default = "default_period_secs")]
    pub period_secs: u64,

    /// Settlement periods per year (for annual-rate proration)
    #[serde(default = "default_periods_per_year")]
    pub periods_per_year: u64,

    /// Posting fee charged at claim/link creation, in asset units
    #[serde(default = "default_posting_fee")]
    pub posting_fee: u64,

    /// Minimum combined stake for a post to participate
    #[serde(default = "default_activity_threshold")]
    pub activity_threshold: u64,

    /// Floor of the annual rate band, SCALE-scaled
    #[serde(default = "default_min_annual_rate")]
    pub min_annual_rate: u64,

    /// Ceiling of the annual rate band, SCALE-scaled
    #[serde(default = "default_max_annual_rate")]
    pub max_annual_rate: u64,

    /// Floor of the participation factor, SCALE-scaled
    #[serde(default = "default_participation_floor")]
    pub participation_floor: u64,

    /// Ceiling of the participation factor, SCALE-scaled
    #[serde(default = "default_participation_ceiling")]
    pub participation_ceiling: u64,

    /// Visitation budget for the graph's cycle search
    #[serde(default = "default_max_graph_visits")]
    pub max_graph_visits: usize,

    /// Recursion depth cap for effective-score propagation
    #[serde(default = "default_max_score_depth")]
    pub max_score_depth: u32,
}

fn default_period_secs() -> u64 {
    86_400
}

fn default_periods_per_year() -> u64 {
    365
}

fn default_posting_fee() -> u64 {
    50
}

fn default_activity_threshold() -> u64 {
    100
}

/// Default rate floor: 5% annual
fn default_min_annual_rate() -> u64 {
    SCALE as u64 / 20
}

/// Default rate ceiling: 50% annual
fn default_max_annual_rate() -> u64 {
    SCALE as u64 / 2
}

/// Default participation floor: 1%
fn default_participation_floor() -> u64 {
    SCALE as u64 / 100
}

fn default_participation_ceiling() -> u64 {
    SCALE as u64
}

fn default_max_graph_visits() -> usize {
    4096
}

fn default_max_score_depth() -> u32 {
    32
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            period_secs: default_period_secs(),
            periods_per_year: default_periods_per_year(),
            posting_fee: default_posting_fee(),
            activity_threshold: default_activity_threshold(),
            min_annual_rate: default_min_annual_rate(),
            max_annual_rate: default_max_annual_rate(),
            participation_floor: default_participation_floor(),
            participation_ceiling: default_participation_ceiling(),
            max_graph_visits: default_max_graph_visits(),
            max_score_depth: default_max_score_depth(),
        }
    }
}

impl MarketConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: MarketConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.period_secs == 0 {
            return Err(ConfigError::Invalid("period_secs must be non-zero".into()));
        }
        if self.periods_per_year == 0 {
            return Err(ConfigError::Invalid(
                "periods_per_year must be non-zero".into(),
            ));
        }
        if self.min_annual_rate > self.max_annual_rate {
            return Err(ConfigError::Invalid(format!(
                "rate band inverted: min {} > max {}",
                self.min_annual_rate, self.max_annual_rate
            )));
        }
        if self.participation_floor > self.participation_ceiling {
            return Err(ConfigError::Invalid(format!(
                "participation clamp inverted: floor {} > ceiling {}",
                self.participation_floor, self.participation_ceiling
            )));
        }
        Ok(())
    }

    /// A configuration suited to fast deterministic tests
    pub fn default_test_config() -> Self {
        Self {
            period_secs: 1,
            posting_fee: 50,
            activity_threshold: 100,
            // 10% .. 100% annual so a few periods move visibly
            min_annual_rate: SCALE as u64 / 10,
            max_annual_rate: SCALE as u64,
            ..Self::default()
        }
    }

    /// The ledger view of this configuration
    pub fn ledger_config(&self) -> LedgerConfig {
        LedgerConfig {
            periods_per_year: self.periods_per_year,
            participation_floor: self.participation_floor,
            participation_ceiling: self.participation_ceiling,
        }
    }

    /// The graph view of this configuration
    pub fn graph_config(&self) -> GraphConfig {
        GraphConfig {
            max_visited: self.max_graph_visits,
        }
    }

    /// The score-engine view of this configuration
    pub fn score_config(&self) -> ScoreConfig {
        ScoreConfig {
            max_depth: self.max_score_depth,
        }
    }
}
