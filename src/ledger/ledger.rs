// ledger/ledger.rs

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use rand::RngCore;

use crate::error::LedgerError;
use crate::ledger::portfolio::Portfolio;
use crate::ledger::stock::{is_valid_price, Stock};
use crate::models::{Holding, PriceUpdate, Transaction, TransactionType};
use crate::stock_updater::PriceModel;

pub const DEFAULT_INITIAL_CASH: f64 = 10_000.0;
pub const DEFAULT_PORTFOLIO_NAME: &str = "My Investment Portfolio";

/// Cash, holdings, the instrument catalog and the trade log of one portfolio.
///
/// Every mutating operation either applies completely or returns an error
/// without touching any state.
#[derive(Debug, Clone)]
pub struct Ledger {
    name: String,
    initial_cash: f64,
    cash_balance: f64,
    stocks: HashMap<String, Stock>,
    listing: Vec<String>, // seed order of `stocks`
    portfolio: Portfolio,
    transactions: Vec<Transaction>,
}

impl Ledger {
    /// Build a ledger over a fixed catalog. A later stock with an already
    /// seen symbol replaces the earlier one.
    pub fn new(name: &str, initial_cash: f64, catalog: impl IntoIterator<Item = Stock>) -> Self {
        // negative or NaN opening balances become zero
        let initial_cash = initial_cash.max(0.0);
        let mut stocks = HashMap::new();
        let mut listing = Vec::new();
        for stock in catalog {
            let symbol = stock.symbol().to_string();
            if stocks.insert(symbol.clone(), stock).is_none() {
                listing.push(symbol);
            }
        }

        Self {
            name: name.to_string(),
            initial_cash,
            cash_balance: initial_cash,
            stocks,
            listing,
            portfolio: Portfolio::new(),
            transactions: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cash_balance(&self) -> f64 {
        self.cash_balance
    }

    pub fn initial_cash(&self) -> f64 {
        self.initial_cash
    }

    /// Number of instruments in the catalog.
    pub fn stock_count(&self) -> usize {
        self.stocks.len()
    }

    /// Number of distinct symbols currently held.
    pub fn holdings_count(&self) -> usize {
        self.portfolio.len()
    }

    pub fn holding(&self, symbol: &str) -> u32 {
        self.portfolio.get_quantity(symbol)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn find_stock(&self, symbol: &str) -> Option<&Stock> {
        self.stocks.get(symbol)
    }

    pub fn buy(&mut self, symbol: &str, quantity: u32) -> Result<Transaction, LedgerError> {
        if quantity == 0 {
            return Err(LedgerError::InvalidQuantity);
        }
        let price = self.require_stock(symbol)?.current_price();

        let total_cost = quantity as f64 * price;
        if total_cost > self.cash_balance {
            return Err(LedgerError::InsufficientFunds {
                required: total_cost,
                available: self.cash_balance,
            });
        }

        self.portfolio.add_shares(symbol, quantity)?;
        self.cash_balance -= total_cost;

        let transaction = Transaction::new(TransactionType::Buy, symbol, quantity, price);
        self.transactions.push(transaction.clone());
        Ok(transaction)
    }

    pub fn sell(&mut self, symbol: &str, quantity: u32) -> Result<Transaction, LedgerError> {
        if quantity == 0 {
            return Err(LedgerError::InvalidQuantity);
        }
        let price = self.require_stock(symbol)?.current_price();

        self.portfolio.remove_shares(symbol, quantity)?;
        self.cash_balance += quantity as f64 * price;

        let transaction = Transaction::new(TransactionType::Sell, symbol, quantity, price);
        self.transactions.push(transaction.clone());
        Ok(transaction)
    }

    /// Cash plus the market value of every holding.
    pub fn total_value(&self) -> f64 {
        self.cash_balance + self.holdings_value()
    }

    /// Market value of the holdings alone. Held symbols missing from the
    /// catalog are skipped.
    pub fn holdings_value(&self) -> f64 {
        self.portfolio
            .iter()
            .filter_map(|(symbol, qty)| {
                self.stocks
                    .get(symbol)
                    .map(|stock| qty as f64 * stock.current_price())
            })
            .sum()
    }

    /// Holdings value minus the net amount spent buying them.
    pub fn total_gain_loss(&self) -> f64 {
        let net_invested: f64 = self
            .transactions
            .iter()
            .map(|t| match t.kind {
                TransactionType::Buy => t.total,
                TransactionType::Sell => -t.total,
            })
            .sum();
        self.holdings_value() - net_invested
    }

    /// Change of the total value relative to the opening cash, in percent.
    pub fn performance_percentage(&self) -> f64 {
        if self.initial_cash == 0.0 {
            return 0.0;
        }
        (self.total_value() - self.initial_cash) / self.initial_cash * 100.0
    }

    /// Best performing held stocks first. Equal performance orders by symbol.
    pub fn top_performers(&self, count: usize) -> Vec<&Stock> {
        self.ranked_holdings(|a, b| b.performance().total_cmp(&a.performance()), count)
    }

    /// Worst performing held stocks first. Equal performance orders by symbol.
    pub fn worst_performers(&self, count: usize) -> Vec<&Stock> {
        self.ranked_holdings(|a, b| a.performance().total_cmp(&b.performance()), count)
    }

    fn ranked_holdings<F>(&self, by_performance: F, count: usize) -> Vec<&Stock>
    where
        F: Fn(&Stock, &Stock) -> Ordering,
    {
        let mut owned: Vec<&Stock> = self.held_stocks().collect();
        owned.sort_by(|a, b| by_performance(a, b).then_with(|| a.symbol().cmp(b.symbol())));
        owned.truncate(count);
        owned
    }

    fn held_stocks(&self) -> impl Iterator<Item = &Stock> {
        self.portfolio
            .iter()
            .filter_map(|(symbol, _)| self.stocks.get(symbol))
    }

    /// Held stocks in `sector`, ordered by symbol.
    pub fn stocks_by_sector(&self, sector: &str) -> Vec<&Stock> {
        let mut owned: Vec<&Stock> = self
            .held_stocks()
            .filter(|stock| stock.sector() == sector)
            .collect();
        owned.sort_by(|a, b| a.symbol().cmp(b.symbol()));
        owned
    }

    /// Share of the holdings value per sector, in percent.
    pub fn sector_allocation(&self) -> BTreeMap<String, f64> {
        let mut allocation = BTreeMap::new();
        let holdings_value = self.holdings_value();
        if self.portfolio.is_empty() || holdings_value <= 0.0 {
            return allocation;
        }
        for holding in self.owned_stocks() {
            *allocation
                .entry(holding.stock.sector().to_string())
                .or_insert(0.0) += holding.market_value() / holdings_value * 100.0;
        }
        allocation
    }

    /// Holdings joined with their catalog entries, ordered by symbol.
    pub fn owned_stocks(&self) -> Vec<Holding<'_>> {
        self.portfolio
            .symbols()
            .into_iter()
            .filter_map(|symbol| {
                self.stocks.get(symbol).map(|stock| Holding {
                    stock,
                    quantity: self.portfolio.get_quantity(symbol),
                })
            })
            .collect()
    }

    /// The whole catalog in the order it was seeded.
    pub fn all_stocks(&self) -> Vec<&Stock> {
        self.listing
            .iter()
            .filter_map(|symbol| self.stocks.get(symbol))
            .collect()
    }

    /// Most recent transactions first.
    pub fn recent_transactions(&self, count: usize) -> Vec<&Transaction> {
        self.transactions.iter().rev().take(count).collect()
    }

    pub fn update_price(&mut self, symbol: &str, price: f64) -> Result<(), LedgerError> {
        self.stocks
            .get_mut(symbol)
            .ok_or_else(|| LedgerError::NotFound {
                symbol: symbol.to_string(),
            })?
            .update_price(price)
    }

    /// Move every catalog price one step with `model`.
    ///
    /// All new prices are computed before any is applied; if the model
    /// produces an invalid price no instrument changes.
    pub fn simulate_market_movement(
        &mut self,
        model: &mut dyn PriceModel,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<PriceUpdate>, LedgerError> {
        let mut updates = Vec::with_capacity(self.listing.len());
        for symbol in &self.listing {
            let Some(stock) = self.stocks.get(symbol) else {
                continue;
            };
            let price = model.next_price(stock, rng);
            if !is_valid_price(price) {
                return Err(LedgerError::InvalidPrice {
                    symbol: symbol.clone(),
                    price,
                });
            }
            updates.push(PriceUpdate {
                symbol: symbol.clone(),
                price,
            });
        }

        for update in &updates {
            self.update_price(&update.symbol, update.price)?;
        }
        Ok(updates)
    }

    /// Give the catalog `days` steps of price history before trading.
    pub fn warm_up(
        &mut self,
        days: u32,
        model: &mut dyn PriceModel,
        rng: &mut dyn RngCore,
    ) -> Result<(), LedgerError> {
        for _ in 0..days {
            self.simulate_market_movement(model, rng)?;
        }
        Ok(())
    }

    fn require_stock(&self, symbol: &str) -> Result<&Stock, LedgerError> {
        self.find_stock(symbol).ok_or_else(|| LedgerError::NotFound {
            symbol: symbol.to_string(),
        })
    }
}
