//! Behavior tests for the portfolio ledger: trades, invariants and market
//! simulation as seen by a caller.

use portfolio_tracker::{
    Ledger, LedgerError, RandomWalk, ScriptedPrices, SessionConfig, Stock, TransactionType,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn default_ledger() -> Ledger {
    SessionConfig::default().build_ledger().expect("default config is valid")
}

// =============================================================================
// Trading scenarios
// =============================================================================

#[test]
fn when_user_buys_affordable_shares_cash_and_holdings_update() {
    // Given: 10000 cash and AAPL at 175.50
    let mut ledger = default_ledger();

    // When: buying 5 shares
    ledger.buy("AAPL", 5).expect("buy should succeed");

    // Then
    assert_eq!(ledger.cash_balance(), 9122.50);
    assert_eq!(ledger.holding("AAPL"), 5);
}

#[test]
fn when_user_sells_everything_holding_disappears_and_cash_returns() {
    let mut ledger = default_ledger();
    ledger.buy("AAPL", 5).expect("buy");

    ledger.sell("AAPL", 5).expect("sell should succeed");

    assert_eq!(ledger.cash_balance(), 10_000.0);
    assert_eq!(ledger.holding("AAPL"), 0);
    assert!(ledger.owned_stocks().is_empty());
    let kinds: Vec<TransactionType> = ledger.transactions().iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![TransactionType::Buy, TransactionType::Sell]);
}

#[test]
fn when_user_cannot_afford_purchase_nothing_changes() {
    let mut ledger = default_ledger();

    let err = ledger.buy("AAPL", 1000).expect_err("should be rejected");

    assert!(matches!(err, LedgerError::InsufficientFunds { required, available }
        if required == 175_500.0 && available == 10_000.0));
    assert_eq!(ledger.cash_balance(), 10_000.0);
    assert_eq!(ledger.holdings_count(), 0);
    assert!(ledger.transactions().is_empty());
}

#[test]
fn when_user_sells_unheld_stock_insufficient_shares_is_reported() {
    let mut ledger = default_ledger();

    let err = ledger.sell("AAPL", 1).expect_err("should be rejected");

    assert_eq!(
        err,
        LedgerError::InsufficientShares {
            symbol: "AAPL".into(),
            requested: 1,
            held: 0
        }
    );
}

#[test]
fn when_symbol_is_unknown_lookup_returns_none() {
    let ledger = default_ledger();

    assert!(ledger.find_stock("ZZZZ").is_none());
    assert_eq!(ledger.find_stock("AAPL"), ledger.find_stock("AAPL"));
}

#[test]
fn top_performers_returns_only_held_stocks_in_descending_order() {
    let mut ledger = default_ledger();
    let mut rng = StdRng::seed_from_u64(0);
    ledger.buy("AAPL", 1).expect("buy");
    ledger.buy("JPM", 1).expect("buy");

    let mut model = ScriptedPrices::new()
        .with_prices("AAPL", &[140.40]) // -20%
        .with_prices("JPM", &[203.94]); // +10%
    ledger
        .simulate_market_movement(&mut model, &mut rng)
        .expect("valid prices");

    let top = ledger.top_performers(5);
    let symbols: Vec<&str> = top.iter().map(|s| s.symbol()).collect();
    assert_eq!(symbols, vec!["JPM", "AAPL"]);
    assert!(top[0].performance() > top[1].performance());
}

// =============================================================================
// Invariants under random trading
// =============================================================================

#[test]
fn random_trading_never_breaks_ledger_invariants() {
    let mut ledger = default_ledger();
    let mut rng = StdRng::seed_from_u64(2024);
    let mut model = RandomWalk::default();
    let symbols: Vec<String> = ledger
        .all_stocks()
        .iter()
        .map(|s| s.symbol().to_string())
        .collect();

    for step in 0..2_000 {
        let symbol = &symbols[rng.gen_range(0..symbols.len())];
        let quantity = rng.gen_range(0..8);
        let before = ledger.cash_balance();
        let result = if rng.gen_bool(0.5) {
            ledger.buy(symbol, quantity)
        } else {
            ledger.sell(symbol, quantity)
        };
        if result.is_err() {
            assert_eq!(ledger.cash_balance(), before, "failed trade changed cash");
        }
        if step % 50 == 0 {
            ledger
                .simulate_market_movement(&mut model, &mut rng)
                .expect("random walk prices are valid");
        }

        assert!(ledger.cash_balance() >= 0.0);
        for holding in ledger.owned_stocks() {
            assert!(holding.quantity > 0);
        }
        let expected: f64 = ledger.cash_balance()
            + ledger
                .owned_stocks()
                .iter()
                .map(|h| h.quantity as f64 * h.stock.current_price())
                .sum::<f64>();
        assert!((ledger.total_value() - expected).abs() < 1e-6);
    }
}

#[test]
fn round_trip_at_constant_price_conserves_cash() {
    let mut ledger = default_ledger();
    for (symbol, qty) in [("NVDA", 3), ("GOOGL", 7), ("JNJ", 11)] {
        let before = ledger.cash_balance();
        ledger.buy(symbol, qty).expect("buy");
        ledger.sell(symbol, qty).expect("sell");
        assert!((ledger.cash_balance() - before).abs() < 1e-9);
    }
}

// =============================================================================
// Market simulation
// =============================================================================

#[test]
fn simulated_prices_stay_above_floor_and_history_tracks_current() {
    let mut ledger = Ledger::new(
        "floor",
        0.0,
        vec![Stock::new("PENNY", "Penny Corp.", 1.02, "Misc").expect("valid")],
    );
    let mut rng = StdRng::seed_from_u64(11);
    let mut model = RandomWalk::new(0.05, 1.0);

    ledger.warm_up(1_000, &mut model, &mut rng).expect("valid walk");

    let stock = ledger.find_stock("PENNY").expect("present");
    assert_eq!(stock.price_history().len(), 1_001);
    assert!(stock.price_history().iter().all(|&p| p >= 1.0));
    assert_eq!(stock.price_history().last(), Some(&stock.current_price()));
}

#[test]
fn seeded_simulations_are_reproducible() {
    let run = || {
        let mut ledger = default_ledger();
        let mut rng = StdRng::seed_from_u64(99);
        ledger
            .warm_up(10, &mut RandomWalk::default(), &mut rng)
            .expect("valid walk");
        ledger
            .all_stocks()
            .iter()
            .map(|s| s.current_price())
            .collect::<Vec<f64>>()
    };

    assert_eq!(run(), run());
}
