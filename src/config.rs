// config.rs

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::ledger::ledger::{DEFAULT_INITIAL_CASH, DEFAULT_PORTFOLIO_NAME};
use crate::ledger::{default_catalog, Ledger, Stock, StockSeed};
use crate::stock_updater::{RandomWalk, DEFAULT_MAX_MOVE, DEFAULT_PRICE_FLOOR};

/// Settings for one trading session. Every field is optional in the JSON
/// file and falls back to its default.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    pub portfolio_name: String,
    pub initial_cash: f64,
    pub price_floor: f64,
    pub max_move: f64,
    /// Simulated days of price history generated before trading starts.
    pub warmup_days: u32,
    /// Period of the background market ticker; 0 disables it.
    pub tick_interval_ms: u64,
    pub rng_seed: Option<u64>,
    pub catalog: Vec<StockSeed>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            portfolio_name: DEFAULT_PORTFOLIO_NAME.to_string(),
            initial_cash: DEFAULT_INITIAL_CASH,
            price_floor: DEFAULT_PRICE_FLOOR,
            max_move: DEFAULT_MAX_MOVE,
            warmup_days: 30,
            tick_interval_ms: 0,
            rng_seed: None,
            catalog: default_catalog(),
        }
    }
}

impl SessionConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config: SessionConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        log::info!(
            "Loaded config from {} ({} stocks)",
            path.display(),
            config.catalog.len()
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.initial_cash.is_finite() || self.initial_cash < 0.0 {
            return invalid(format!(
                "initial_cash must be a non-negative number, got {}",
                self.initial_cash
            ));
        }
        if !self.price_floor.is_finite() || self.price_floor <= 0.0 {
            return invalid(format!(
                "price_floor must be positive, got {}",
                self.price_floor
            ));
        }
        if !(0.0..1.0).contains(&self.max_move) {
            return invalid(format!(
                "max_move must be in [0, 1), got {}",
                self.max_move
            ));
        }
        if self.catalog.is_empty() {
            return invalid("catalog must contain at least one stock".to_string());
        }

        let mut seen = HashSet::new();
        for seed in &self.catalog {
            if seed.symbol.trim().is_empty() {
                return invalid("catalog symbols cannot be empty".to_string());
            }
            if !seen.insert(seed.symbol.as_str()) {
                return invalid(format!("duplicate symbol '{}' in catalog", seed.symbol));
            }
            if !seed.price.is_finite() || seed.price <= 0.0 {
                return invalid(format!(
                    "price for '{}' must be positive, got {}",
                    seed.symbol, seed.price
                ));
            }
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Option<Duration> {
        (self.tick_interval_ms > 0).then(|| Duration::from_millis(self.tick_interval_ms))
    }

    pub fn price_model(&self) -> RandomWalk {
        RandomWalk::new(self.max_move, self.price_floor)
    }

    /// Build a fresh ledger over the configured catalog, without warm-up.
    pub fn build_ledger(&self) -> Result<Ledger, ConfigError> {
        self.validate()?;
        let stocks = self
            .catalog
            .iter()
            .map(|seed| Stock::new(&seed.symbol, &seed.name, seed.price, &seed.sector))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ConfigError::Invalid {
                reason: e.to_string(),
            })?;
        Ok(Ledger::new(&self.portfolio_name, self.initial_cash, stocks))
    }
}

fn invalid(reason: String) -> Result<(), ConfigError> {
    Err(ConfigError::Invalid { reason })
}
