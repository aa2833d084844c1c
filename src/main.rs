// main.rs

use colored::*;
use tokio::io::{AsyncBufReadExt, BufReader};

use portfolio_tracker::commands::{self, Command, Reply, HELP};
use portfolio_tracker::{Session, SessionConfig};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 1. Load the session config, falling back to defaults
    let config = match std::env::args().nth(1) {
        Some(path) => match SessionConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}", format!("Error: {e}").red());
                std::process::exit(1);
            }
        },
        None => SessionConfig::default(),
    };

    // 2. Build the ledger and warm up the market
    let session = match Session::from_config(&config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("{}", format!("Error: {e}").red());
            std::process::exit(1);
        }
    };

    // 3. Start the background market ticker if configured
    if let Some(period) = config.tick_interval() {
        let ticker = session.clone();
        tokio::spawn(async move {
            ticker.run_market_ticker(period, usize::MAX).await;
        });
        log::info!("Market ticker running every {:?}", period);
    }

    println!("{}", "Welcome to the Stock Portfolio Tracker!".bold());
    println!(
        "Starting with ${:.2} cash. Type 'help' for commands.",
        session.read(|ledger| ledger.cash_balance()).await
    );

    // 4. Read commands until quit or end of input
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                log::warn!("Failed to read input: {e}");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let outcome = match Command::parse(&line) {
            Ok(command) => commands::execute(&session, command).await,
            Err(e) => Err(e),
        };
        match outcome {
            Ok(Reply::Text(text)) => println!("{text}"),
            Ok(Reply::Quit) => break,
            Err(e) => {
                println!("{}", format!("Error: {e}").red());
                if matches!(e, portfolio_tracker::CommandError::Unknown(_)) {
                    println!("{HELP}");
                }
            }
        }
    }

    println!("Thank you for using Stock Portfolio Tracker!");
}
