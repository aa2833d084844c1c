// error.rs

use thiserror::Error;

/// Failures a ledger operation can report to its caller.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LedgerError {
    #[error("stock '{symbol}' not found")]
    NotFound { symbol: String },
    #[error("insufficient funds: need ${required:.2}, but only have ${available:.2}")]
    InsufficientFunds { required: f64, available: f64 },
    #[error("cannot sell {requested} shares of {symbol}, only own {held}")]
    InsufficientShares {
        symbol: String,
        requested: u32,
        held: u32,
    },
    #[error("quantity must be a positive whole number")]
    InvalidQuantity,
    #[error("invalid price {price} for {symbol}")]
    InvalidPrice { symbol: String, price: f64 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {reason}")]
    Invalid { reason: String },
}

/// Errors raised while turning typed input into ledger calls.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CommandError {
    #[error("no command given")]
    Empty,
    #[error("unknown command '{0}', type 'help' for a list")]
    Unknown(String),
    #[error("'{command}' needs a {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("invalid quantity '{value}'")]
    InvalidQuantity { value: String },
    #[error("invalid count '{value}'")]
    InvalidCount { value: String },
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
