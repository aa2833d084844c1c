// ledger/portfolio.rs

use std::collections::HashMap;

use crate::error::LedgerError;

/// Share counts per symbol. A symbol that is not present is held at zero;
/// a zero count is never stored.
#[derive(Debug, Default, Clone)]
pub struct Portfolio {
    holdings: HashMap<String, u32>, // stock_symbol -> quantity
}

impl Portfolio {
    pub fn new() -> Self {
        Self {
            holdings: HashMap::new(),
        }
    }

    pub fn get_quantity(&self, stock_symbol: &str) -> u32 {
        self.holdings.get(stock_symbol).copied().unwrap_or(0)
    }

    /// Add bought shares, creating the entry if needed.
    pub fn add_shares(&mut self, stock_symbol: &str, quantity: u32) -> Result<(), LedgerError> {
        if quantity == 0 {
            return Err(LedgerError::InvalidQuantity);
        }
        let entry = self.holdings.entry(stock_symbol.to_string()).or_insert(0);
        *entry = entry
            .checked_add(quantity)
            .ok_or(LedgerError::InvalidQuantity)?;
        Ok(())
    }

    /// Remove sold shares; the entry is dropped when it reaches zero.
    pub fn remove_shares(&mut self, stock_symbol: &str, quantity: u32) -> Result<(), LedgerError> {
        if quantity == 0 {
            return Err(LedgerError::InvalidQuantity);
        }
        let held = self.get_quantity(stock_symbol);
        if held < quantity {
            return Err(LedgerError::InsufficientShares {
                symbol: stock_symbol.to_string(),
                requested: quantity,
                held,
            });
        }
        if held == quantity {
            self.holdings.remove(stock_symbol);
        } else {
            self.holdings.insert(stock_symbol.to_string(), held - quantity);
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.holdings.iter().map(|(symbol, &qty)| (symbol.as_str(), qty))
    }

    /// Held symbols in ascending order.
    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.holdings.keys().map(String::as_str).collect();
        symbols.sort_unstable();
        symbols
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selling_everything_removes_the_entry() {
        let mut portfolio = Portfolio::new();
        portfolio.add_shares("AAPL", 5).unwrap();
        portfolio.remove_shares("AAPL", 5).unwrap();

        assert_eq!(portfolio.len(), 0);
        assert_eq!(portfolio.get_quantity("AAPL"), 0);
        assert!(portfolio.is_empty());
    }

    #[test]
    fn partial_sell_keeps_remainder() {
        let mut portfolio = Portfolio::new();
        portfolio.add_shares("MSFT", 3).unwrap();
        portfolio.add_shares("MSFT", 4).unwrap();
        portfolio.remove_shares("MSFT", 2).unwrap();

        assert_eq!(portfolio.get_quantity("MSFT"), 5);
        assert_eq!(portfolio.len(), 1);
    }

    #[test]
    fn overselling_leaves_holdings_untouched() {
        let mut portfolio = Portfolio::new();
        portfolio.add_shares("TSLA", 2).unwrap();

        let err = portfolio.remove_shares("TSLA", 3).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientShares {
                symbol: "TSLA".into(),
                requested: 3,
                held: 2
            }
        );
        assert_eq!(portfolio.get_quantity("TSLA"), 2);
        assert!(portfolio.remove_shares("NFLX", 1).is_err());
        assert_eq!(portfolio.symbols(), vec!["TSLA"]);
    }

    #[test]
    fn zero_quantities_are_rejected() {
        let mut portfolio = Portfolio::new();
        assert_eq!(portfolio.add_shares("AAPL", 0), Err(LedgerError::InvalidQuantity));
        assert_eq!(portfolio.remove_shares("AAPL", 0), Err(LedgerError::InvalidQuantity));
        assert!(portfolio.is_empty());
    }

    #[test]
    fn symbols_are_sorted() {
        let mut portfolio = Portfolio::new();
        for symbol in ["TSLA", "AAPL", "GOOGL"] {
            portfolio.add_shares(symbol, 1).unwrap();
        }
        assert_eq!(portfolio.symbols(), vec!["AAPL", "GOOGL", "TSLA"]);
    }
}
