// models.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::ledger::stock::Stock;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PriceUpdate {
    pub symbol: String,
    pub price: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Buy,
    Sell,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Buy => f.write_str("BUY"),
            TransactionType::Sell => f.write_str("SELL"),
        }
    }
}

/// An executed trade. Records are never modified after the ledger appends them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub symbol: String,
    pub quantity: u32,
    pub price: f64,
    pub timestamp: DateTime<Utc>,
    pub total: f64,
}

impl Transaction {
    pub fn new(kind: TransactionType, symbol: &str, quantity: u32, price: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            symbol: symbol.to_string(),
            quantity,
            price,
            timestamp: Utc::now(),
            total: quantity as f64 * price,
        }
    }
}

/// A held position joined with its catalog entry.
#[derive(Debug, Clone, Copy)]
pub struct Holding<'a> {
    pub stock: &'a Stock,
    pub quantity: u32,
}

impl Holding<'_> {
    pub fn market_value(&self) -> f64 {
        self.quantity as f64 * self.stock.current_price()
    }
}
