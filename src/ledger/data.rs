// ledger/data.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ledger::ledger::Ledger;
use crate::models::Transaction;

/// One `(symbol, name, price, sector)` row of the seed catalog.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StockSeed {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub sector: String,
}

impl StockSeed {
    pub fn new(symbol: &str, name: &str, price: f64, sector: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            price,
            sector: sector.to_string(),
        }
    }
}

/// The market every new session starts with.
pub fn default_catalog() -> Vec<StockSeed> {
    vec![
        StockSeed::new("AAPL", "Apple Inc.", 175.50, "Technology"),
        StockSeed::new("GOOGL", "Alphabet Inc.", 142.30, "Technology"),
        StockSeed::new("MSFT", "Microsoft Corp.", 378.85, "Technology"),
        StockSeed::new("TSLA", "Tesla Inc.", 248.50, "Automotive"),
        StockSeed::new("AMZN", "Amazon.com Inc.", 155.20, "E-commerce"),
        StockSeed::new("NVDA", "NVIDIA Corp.", 875.30, "Technology"),
        StockSeed::new("META", "Meta Platforms", 485.50, "Technology"),
        StockSeed::new("NFLX", "Netflix Inc.", 445.75, "Entertainment"),
        StockSeed::new("JPM", "JPMorgan Chase", 185.40, "Finance"),
        StockSeed::new("JNJ", "Johnson & Johnson", 162.80, "Healthcare"),
    ]
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct HoldingData {
    symbol: String,
    quantity: u32,
    price: f64,
    value: f64,
    performance: f64,
}

/// Point-in-time view of a ledger, suitable for JSON output.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LedgerSnapshot {
    pub name: String,
    pub taken_at: DateTime<Utc>,
    pub cash_balance: f64,
    pub total_value: f64,
    pub total_gain_loss: f64,
    holdings: Vec<HoldingData>,
    pub transactions: Vec<Transaction>,
}

impl LedgerSnapshot {
    pub fn holding_symbols(&self) -> Vec<&str> {
        self.holdings.iter().map(|h| h.symbol.as_str()).collect()
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Ledger {
    pub fn snapshot(&self) -> LedgerSnapshot {
        let holdings = self
            .owned_stocks()
            .into_iter()
            .map(|holding| HoldingData {
                symbol: holding.stock.symbol().to_string(),
                quantity: holding.quantity,
                price: holding.stock.current_price(),
                value: holding.market_value(),
                performance: holding.stock.performance(),
            })
            .collect();

        LedgerSnapshot {
            name: self.name().to_string(),
            taken_at: Utc::now(),
            cash_balance: self.cash_balance(),
            total_value: self.total_value(),
            total_gain_loss: self.total_gain_loss(),
            holdings,
            transactions: self.transactions().to_vec(),
        }
    }
}
