// session.rs

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::{broadcast, Mutex};
use tokio_stream::wrappers::IntervalStream;
use tokio_stream::StreamExt;

use crate::config::SessionConfig;
use crate::error::{ConfigError, LedgerError};
use crate::ledger::Ledger;
use crate::models::{PriceUpdate, Transaction};
use crate::stock_updater::PriceModel;

const PRICE_CHANNEL_SIZE: usize = 64;

struct SessionState {
    ledger: Ledger,
    model: Box<dyn PriceModel + Send>,
    rng: StdRng,
}

/// A ledger shared between the user's commands and the market ticker.
///
/// All access goes through one mutex, so trades and market moves never
/// interleave. Cloning a session yields another handle to the same ledger.
#[derive(Clone)]
pub struct Session {
    state: Arc<Mutex<SessionState>>,
    price_tx: broadcast::Sender<Vec<PriceUpdate>>,
}

impl Session {
    pub fn new(ledger: Ledger, model: impl PriceModel + Send + 'static, rng: StdRng) -> Self {
        let (price_tx, _) = broadcast::channel(PRICE_CHANNEL_SIZE);
        Self {
            state: Arc::new(Mutex::new(SessionState {
                ledger,
                model: Box::new(model),
                rng,
            })),
            price_tx,
        }
    }

    /// Build the ledger described by `config` and run its warm-up days.
    pub fn from_config(config: &SessionConfig) -> Result<Self, ConfigError> {
        let mut ledger = config.build_ledger()?;
        let mut model = config.price_model();
        let mut rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        ledger
            .warm_up(config.warmup_days, &mut model, &mut rng)
            .map_err(|e| ConfigError::Invalid {
                reason: format!("warm-up failed: {e}"),
            })?;
        log::info!(
            "Session '{}' ready: {} stocks, {} warm-up days, cash ${:.2}",
            ledger.name(),
            ledger.stock_count(),
            config.warmup_days,
            ledger.cash_balance()
        );

        Ok(Self::new(ledger, model, rng))
    }

    /// Receive every batch of prices applied by a market move.
    pub fn subscribe(&self) -> broadcast::Receiver<Vec<PriceUpdate>> {
        self.price_tx.subscribe()
    }

    /// Run `f` against the ledger while holding the session lock.
    pub async fn read<T>(&self, f: impl FnOnce(&Ledger) -> T) -> T {
        let state = self.state.lock().await;
        f(&state.ledger)
    }

    pub async fn buy(&self, symbol: &str, quantity: u32) -> Result<Transaction, LedgerError> {
        let mut state = self.state.lock().await;
        let result = state.ledger.buy(symbol, quantity);
        match &result {
            Ok(tx) => log::info!(
                "Bought {} shares of {} at ${:.2} (total ${:.2})",
                tx.quantity,
                tx.symbol,
                tx.price,
                tx.total
            ),
            Err(e) => log::debug!("Buy {quantity} {symbol} rejected: {e}"),
        }
        result
    }

    pub async fn sell(&self, symbol: &str, quantity: u32) -> Result<Transaction, LedgerError> {
        let mut state = self.state.lock().await;
        let result = state.ledger.sell(symbol, quantity);
        match &result {
            Ok(tx) => log::info!(
                "Sold {} shares of {} at ${:.2} (total ${:.2})",
                tx.quantity,
                tx.symbol,
                tx.price,
                tx.total
            ),
            Err(e) => log::debug!("Sell {quantity} {symbol} rejected: {e}"),
        }
        result
    }

    /// Move every price one step and broadcast the new prices.
    pub async fn simulate_market_movement(&self) -> Result<Vec<PriceUpdate>, LedgerError> {
        let updates = {
            let mut state = self.state.lock().await;
            let SessionState { ledger, model, rng } = &mut *state;
            ledger.simulate_market_movement(model.as_mut(), rng)?
        };

        if self.price_tx.send(updates.clone()).is_err() {
            log::trace!("No subscribers for price updates");
        }
        Ok(updates)
    }

    /// Simulate a market move every `period`, at most `ticks` times.
    /// Returns the number of moves that were applied.
    pub async fn run_market_ticker(&self, period: Duration, ticks: usize) -> usize {
        if period.is_zero() {
            log::warn!("Market ticker not started: period must be non-zero");
            return 0;
        }
        let mut interval = IntervalStream::new(tokio::time::interval(period)).take(ticks);
        let mut applied = 0;

        while interval.next().await.is_some() {
            match self.simulate_market_movement().await {
                Ok(updates) => {
                    applied += 1;
                    log::debug!("Market tick {}: {} prices updated", applied, updates.len());
                }
                Err(e) => log::warn!("Market tick skipped: {e}"),
            }
        }
        applied
    }
}
