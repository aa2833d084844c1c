// ledger/stock.rs

use crate::error::LedgerError;

/// One tradable instrument and every price it has been observed at.
///
/// `price_history` always holds at least the initial price and its last
/// element is the current price.
#[derive(Debug, Clone, PartialEq)]
pub struct Stock {
    symbol: String,
    name: String,
    sector: String,
    current_price: f64,
    initial_price: f64,
    price_history: Vec<f64>,
}

impl Stock {
    pub fn new(symbol: &str, name: &str, price: f64, sector: &str) -> Result<Self, LedgerError> {
        if !is_valid_price(price) {
            return Err(LedgerError::InvalidPrice {
                symbol: symbol.to_string(),
                price,
            });
        }
        Ok(Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            sector: sector.to_string(),
            current_price: price,
            initial_price: price,
            price_history: vec![price],
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sector(&self) -> &str {
        &self.sector
    }

    pub fn current_price(&self) -> f64 {
        self.current_price
    }

    pub fn initial_price(&self) -> f64 {
        self.initial_price
    }

    pub fn price_history(&self) -> &[f64] {
        &self.price_history
    }

    /// Record a new observed price. Clamping to a floor is up to the caller.
    pub fn update_price(&mut self, new_price: f64) -> Result<(), LedgerError> {
        if !is_valid_price(new_price) {
            return Err(LedgerError::InvalidPrice {
                symbol: self.symbol.clone(),
                price: new_price,
            });
        }
        self.price_history.push(new_price);
        self.current_price = new_price;
        Ok(())
    }

    /// Percentage change of the current price against the initial price.
    pub fn performance(&self) -> f64 {
        (self.current_price - self.initial_price) / self.initial_price * 100.0
    }

    pub fn average_price(&self) -> f64 {
        let sum: f64 = self.price_history.iter().sum();
        sum / self.price_history.len() as f64
    }

    /// Population standard deviation of the price history.
    pub fn volatility(&self) -> f64 {
        if self.price_history.len() < 2 {
            return 0.0;
        }
        let avg = self.average_price();
        let variance = self
            .price_history
            .iter()
            .map(|price| (price - avg).powi(2))
            .sum::<f64>()
            / self.price_history.len() as f64;
        variance.sqrt()
    }
}

pub(crate) fn is_valid_price(price: f64) -> bool {
    price.is_finite() && price > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apple() -> Stock {
        Stock::new("AAPL", "Apple Inc.", 100.0, "Technology").unwrap()
    }

    #[test]
    fn new_stock_starts_with_single_price() {
        let stock = apple();
        assert_eq!(stock.price_history(), &[100.0]);
        assert_eq!(stock.current_price(), 100.0);
        assert_eq!(stock.performance(), 0.0);
        assert_eq!(stock.volatility(), 0.0);
    }

    #[test]
    fn update_price_appends_history() {
        let mut stock = apple();
        stock.update_price(110.0).unwrap();
        stock.update_price(120.0).unwrap();

        assert_eq!(stock.price_history(), &[100.0, 110.0, 120.0]);
        assert_eq!(stock.current_price(), 120.0);
        assert_eq!(stock.initial_price(), 100.0);
        assert!((stock.performance() - 20.0).abs() < 1e-9);
        assert!((stock.average_price() - 110.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_non_positive_prices() {
        let mut stock = apple();
        assert!(matches!(
            stock.update_price(0.0),
            Err(LedgerError::InvalidPrice { .. })
        ));
        assert!(stock.update_price(-3.0).is_err());
        assert!(stock.update_price(f64::NAN).is_err());
        assert_eq!(stock.price_history().len(), 1);

        assert!(Stock::new("BAD", "Bad", 0.0, "None").is_err());
    }

    #[test]
    fn volatility_is_population_std_dev() {
        let mut stock = apple();
        stock.update_price(120.0).unwrap();
        // mean 110, deviations of 10
        assert!((stock.volatility() - 10.0).abs() < 1e-9);
    }
}
