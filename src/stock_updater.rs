// stock_updater.rs

use std::collections::{HashMap, VecDeque};

use rand::{Rng, RngCore};

use crate::ledger::stock::Stock;

/// Smallest price the reference random walk will produce.
pub const DEFAULT_PRICE_FLOOR: f64 = 1.0;
/// Largest relative move per step of the reference random walk.
pub const DEFAULT_MAX_MOVE: f64 = 0.05;

/// Decides the next price of an instrument for one market step.
pub trait PriceModel {
    fn next_price(&mut self, stock: &Stock, rng: &mut dyn RngCore) -> f64;
}

/// Uniform relative move in `[-max_move, +max_move]`, clamped at `price_floor`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomWalk {
    pub max_move: f64,
    pub price_floor: f64,
}

impl RandomWalk {
    pub fn new(max_move: f64, price_floor: f64) -> Self {
        Self {
            max_move,
            price_floor,
        }
    }
}

impl Default for RandomWalk {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_MOVE, DEFAULT_PRICE_FLOOR)
    }
}

impl PriceModel for RandomWalk {
    fn next_price(&mut self, stock: &Stock, rng: &mut dyn RngCore) -> f64 {
        if !self.max_move.is_finite() {
            // the ledger rejects this as an invalid price
            return f64::NAN;
        }
        let change = if self.max_move > 0.0 {
            rng.gen_range(-self.max_move..=self.max_move)
        } else {
            0.0
        };
        (stock.current_price() * (1.0 + change)).max(self.price_floor) // Avoid negative prices
    }
}

/// Replays fixed prices per symbol; once a symbol's script runs out its
/// price stays where it is.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrices {
    scripts: HashMap<String, VecDeque<f64>>,
}

impl ScriptedPrices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prices(mut self, symbol: &str, prices: &[f64]) -> Self {
        self.scripts
            .entry(symbol.to_string())
            .or_default()
            .extend(prices.iter().copied());
        self
    }
}

impl PriceModel for ScriptedPrices {
    fn next_price(&mut self, stock: &Stock, _rng: &mut dyn RngCore) -> f64 {
        self.scripts
            .get_mut(stock.symbol())
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| stock.current_price())
    }
}
