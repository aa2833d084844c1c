// Prints a simulated price path for the default catalog, one JSON batch per step.

use rand::rngs::StdRng;
use rand::SeedableRng;

use portfolio_tracker::{RandomWalk, SessionConfig};

const DEFAULT_DAYS: u32 = 30;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let days = match std::env::args().nth(1) {
        Some(raw) => match raw.parse::<u32>() {
            Ok(days) => days,
            Err(_) => {
                eprintln!("Usage: price_feed [DAYS]");
                std::process::exit(2);
            }
        },
        None => DEFAULT_DAYS,
    };

    let config = SessionConfig::default();
    let mut ledger = match config.build_ledger() {
        Ok(ledger) => ledger,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    let mut model = RandomWalk::default();
    let mut rng = StdRng::from_entropy();

    for day in 1..=days {
        let updates = match ledger.simulate_market_movement(&mut model, &mut rng) {
            Ok(updates) => updates,
            Err(e) => {
                log::warn!("Day {day} skipped: {e}");
                continue;
            }
        };

        // Serialize all updates into a JSON array
        match serde_json::to_string(&updates) {
            Ok(payload) => println!("{payload}"),
            Err(e) => log::error!("Failed to serialize price updates: {e}"),
        }
    }
    log::info!("Sent {} days of prices for {} stocks", days, ledger.stock_count());
}
