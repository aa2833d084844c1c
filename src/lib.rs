//! Simulated stock portfolio: an in-memory ledger of cash, holdings and
//! trades over a fixed catalog of instruments, with pluggable market
//! simulation.

pub mod commands;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod performance;
pub mod session;
pub mod stock_updater;

pub use config::SessionConfig;
pub use error::{CommandError, ConfigError, LedgerError};
pub use ledger::{Ledger, LedgerSnapshot, Stock, StockSeed};
pub use models::{Holding, PriceUpdate, Transaction, TransactionType};
pub use session::Session;
pub use stock_updater::{PriceModel, RandomWalk, ScriptedPrices};
