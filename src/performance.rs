// performance.rs

use colored::*; // Use colored crate for text colors

use crate::ledger::{Ledger, Stock};

const RULE_WIDTH: usize = 50;

fn signed_percent(value: f64) -> ColoredString {
    padded_percent(value, 0)
}

/// Right-aligns the plain text to `width` before colouring it, so escape
/// codes do not count towards the column width.
fn padded_percent(value: f64, width: usize) -> ColoredString {
    let text = if value >= 0.0 {
        format!("+{:.2}%", value)
    } else {
        format!("{:.2}%", value)
    };
    let padded = format!("{:>width$}", text);
    if value >= 0.0 {
        padded.green()
    } else {
        padded.red()
    }
}

fn signed_amount(value: f64) -> ColoredString {
    if value >= 0.0 {
        format!("+${:.2}", value).green()
    } else {
        format!("-${:.2}", value.abs()).red()
    }
}

fn heading(out: &mut String, title: &str) {
    out.push_str(&format!("\n=== {} ===\n", title.bold()));
}

/// Cash, totals and every holding with its value and performance.
pub fn portfolio_report(ledger: &Ledger) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "=".repeat(RULE_WIDTH)));
    out.push_str(&format!("PORTFOLIO: {}\n", ledger.name().bold()));
    out.push_str(&format!("{}\n", "=".repeat(RULE_WIDTH)));
    out.push_str(&format!("Cash Balance: ${:.2}\n", ledger.cash_balance()));
    out.push_str(&format!("Total Portfolio Value: ${:.2}\n", ledger.total_value()));
    out.push_str(&format!(
        "Total Gain/Loss: {}\n",
        signed_amount(ledger.total_gain_loss())
    ));
    out.push_str(&format!(
        "Performance: {}\n",
        signed_percent(ledger.performance_percentage())
    ));
    out.push_str(&format!("\nHOLDINGS ({} stocks):\n", ledger.holdings_count()));
    out.push_str(&format!("{}\n", "-".repeat(RULE_WIDTH)));

    let owned = ledger.owned_stocks();
    if owned.is_empty() {
        out.push_str("No stocks owned. Buy some stocks to get started!\n");
    }
    for holding in owned {
        let stock = holding.stock;
        out.push_str(&format!("{} ({})\n", stock.symbol().bold(), stock.name()));
        out.push_str(&format!("  Shares: {} | Sector: {}\n", holding.quantity, stock.sector()));
        out.push_str(&format!("  Price: ${:.2}\n", stock.current_price()));
        out.push_str(&format!("  Value: ${:.2}\n", holding.market_value()));
        out.push_str(&format!("  Performance: {}\n", signed_percent(stock.performance())));
    }
    out
}

/// Every catalog stock in seed order.
pub fn market_overview(ledger: &Ledger) -> String {
    let mut out = String::new();
    heading(&mut out, "MARKET OVERVIEW");
    out.push_str(&format!(
        "{:<8}{:<20}{:>10}  {:>10}  {}\n",
        "Symbol", "Company", "Price", "Perf", "Sector"
    ));
    out.push_str(&format!("{}\n", "-".repeat(70)));
    for stock in ledger.all_stocks() {
        let name: String = stock.name().chars().take(18).collect();
        out.push_str(&format!(
            "{:<8}{:<20}{:>10.2}  {}  {}\n",
            stock.symbol(),
            name,
            stock.current_price(),
            padded_percent(stock.performance(), 10),
            stock.sector()
        ));
    }
    out
}

/// Top and worst `count` performers among the holdings.
pub fn performance_analysis(ledger: &Ledger, count: usize) -> String {
    let mut out = String::new();
    heading(&mut out, "PERFORMANCE ANALYSIS");
    out.push_str("\nTOP PERFORMERS:\n");
    push_ranking(&mut out, &ledger.top_performers(count));
    out.push_str("\nWORST PERFORMERS:\n");
    push_ranking(&mut out, &ledger.worst_performers(count));
    out
}

fn push_ranking(out: &mut String, stocks: &[&Stock]) {
    if stocks.is_empty() {
        out.push_str("  (no holdings)\n");
    }
    for (rank, stock) in stocks.iter().enumerate() {
        out.push_str(&format!(
            "{}. {}: {}\n",
            rank + 1,
            stock.symbol(),
            signed_percent(stock.performance())
        ));
    }
}

pub fn sector_report(ledger: &Ledger) -> String {
    let mut out = String::new();
    heading(&mut out, "SECTOR DIVERSIFICATION");
    let allocation = ledger.sector_allocation();
    if allocation.is_empty() {
        out.push_str("  (no holdings)\n");
    }
    for (sector, percent) in allocation {
        out.push_str(&format!("{}: {:.1}%\n", sector, percent));
    }
    out
}

pub fn transaction_history(ledger: &Ledger, count: usize) -> String {
    let mut out = String::new();
    heading(&mut out, "RECENT TRANSACTIONS");
    let recent = ledger.recent_transactions(count);
    if recent.is_empty() {
        out.push_str("  (no transactions)\n");
    }
    for tx in recent {
        out.push_str(&format!(
            "Transaction: {} {} shares of {} at ${:.2} (Total: ${:.2})\n",
            tx.kind, tx.quantity, tx.symbol, tx.price, tx.total
        ));
        out.push_str(&format!("Date: {}\n", tx.timestamp.format("%Y-%m-%d %H:%M:%S")));
        out.push_str("------------------------\n");
    }
    out
}

/// Details of one stock, as shown by a symbol search.
pub fn stock_info(stock: &Stock) -> String {
    let mut out = String::new();
    out.push_str(&format!("Symbol: {}\n", stock.symbol()));
    out.push_str(&format!("Company: {}\n", stock.name()));
    out.push_str(&format!("Current Price: ${:.2}\n", stock.current_price()));
    out.push_str(&format!("Performance: {}\n", signed_percent(stock.performance())));
    out.push_str(&format!("Sector: {}\n", stock.sector()));
    out.push_str(&format!(
        "Price History Size: {} entries\n",
        stock.price_history().len()
    ));
    out.push_str(&format!("Average Price: ${:.2}\n", stock.average_price()));
    out.push_str(&format!("Volatility: ${:.2}\n", stock.volatility()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger() -> Ledger {
        Ledger::new(
            "Report",
            10_000.0,
            vec![
                Stock::new("AAPL", "Apple Inc.", 175.50, "Technology").unwrap(),
                Stock::new("JNJ", "Johnson & Johnson", 162.80, "Healthcare").unwrap(),
            ],
        )
    }

    #[test]
    fn empty_portfolio_report_says_so() {
        let report = portfolio_report(&ledger());
        assert!(report.contains("Cash Balance: $10000.00"));
        assert!(report.contains("No stocks owned"));
    }

    #[test]
    fn portfolio_report_lists_holdings() {
        let mut ledger = ledger();
        ledger.buy("JNJ", 3).unwrap();

        let report = portfolio_report(&ledger);
        assert!(report.contains("Shares: 3 | Sector: Healthcare"));
        assert!(report.contains("Value: $488.40"));
        assert!(!report.contains("No stocks owned"));
    }

    #[test]
    fn market_overview_keeps_catalog_order() {
        let overview = market_overview(&ledger());
        let aapl = overview.find("AAPL").unwrap();
        let jnj = overview.find("JNJ").unwrap();
        assert!(aapl < jnj);
    }

    #[test]
    fn perf_column_is_padded_before_colouring() {
        // the padding lives inside the coloured text, not around its escapes
        assert_eq!(&*padded_percent(0.0, 10), "    +0.00%");
        assert_eq!(&*padded_percent(-1.5, 10), "    -1.50%");

        let overview = market_overview(&ledger());
        let row = overview
            .lines()
            .find(|line| line.starts_with("AAPL"))
            .unwrap();
        assert!(row.contains(&format!("{:>10}", "+0.00%")));
    }

    #[test]
    fn history_and_sectors() {
        let mut ledger = ledger();
        ledger.buy("AAPL", 1).unwrap();

        let history = transaction_history(&ledger, 10);
        assert!(history.contains("BUY 1 shares of AAPL at $175.50"));
        assert!(sector_report(&ledger).contains("Technology: 100.0%"));
        assert!(performance_analysis(&ledger, 3).contains("1. AAPL"));
    }

    #[test]
    fn stock_info_shows_statistics() {
        let ledger = ledger();
        let info = stock_info(ledger.find_stock("AAPL").unwrap());
        assert!(info.contains("Price History Size: 1 entries"));
        assert!(info.contains("Average Price: $175.50"));
    }
}
