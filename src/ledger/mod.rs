// ledger/mod.rs

pub mod data;
pub mod ledger;
pub mod portfolio;
pub mod stock;

pub use data::{default_catalog, LedgerSnapshot, StockSeed};
pub use ledger::Ledger;
pub use stock::Stock;
