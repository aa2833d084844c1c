// commands.rs

use colored::*;

use crate::error::CommandError;
use crate::performance;
use crate::session::Session;

const DEFAULT_RANKING: usize = 3;
const DEFAULT_HISTORY: usize = 10;

pub const HELP: &str = "\
Commands:
  buy SYMBOL QTY     buy shares at the current price
  sell SYMBOL QTY    sell shares at the current price
  sim [N]            simulate N market moves (default 1)
  portfolio          show cash, value and holdings
  market             show every stock in the market
  analysis [N]       top and worst N performers (default 3)
  search SYMBOL      look up one stock
  sector NAME        holdings in one sector
  sectors            sector diversification
  history [N]        last N transactions (default 10)
  json               portfolio snapshot as JSON
  help               this list
  quit               leave";

/// One line of user input, already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Buy { symbol: String, quantity: u32 },
    Sell { symbol: String, quantity: u32 },
    Simulate { steps: usize },
    Portfolio,
    Market,
    Analysis { count: usize },
    Search { symbol: String },
    Sector { name: String },
    Sectors,
    History { count: usize },
    Json,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(CommandError::Empty);
        };
        let args: Vec<&str> = words.collect();

        match verb.to_ascii_lowercase().as_str() {
            "buy" => {
                let (symbol, quantity) = trade_args("buy", &args)?;
                Ok(Command::Buy { symbol, quantity })
            }
            "sell" => {
                let (symbol, quantity) = trade_args("sell", &args)?;
                Ok(Command::Sell { symbol, quantity })
            }
            "sim" | "simulate" => Ok(Command::Simulate {
                steps: count_arg(&args, 1)?,
            }),
            "portfolio" | "p" => Ok(Command::Portfolio),
            "market" => Ok(Command::Market),
            "analysis" | "top" => Ok(Command::Analysis {
                count: count_arg(&args, DEFAULT_RANKING)?,
            }),
            "search" | "find" => Ok(Command::Search {
                symbol: symbol_arg("search", &args)?,
            }),
            "sector" => {
                if args.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "sector",
                        argument: "sector name",
                    });
                }
                Ok(Command::Sector {
                    name: args.join(" "),
                })
            }
            "sectors" => Ok(Command::Sectors),
            "history" => Ok(Command::History {
                count: count_arg(&args, DEFAULT_HISTORY)?,
            }),
            "json" => Ok(Command::Json),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn symbol_arg(command: &'static str, args: &[&str]) -> Result<String, CommandError> {
    args.first()
        .map(|s| s.to_ascii_uppercase())
        .ok_or(CommandError::MissingArgument {
            command,
            argument: "symbol",
        })
}

fn trade_args(command: &'static str, args: &[&str]) -> Result<(String, u32), CommandError> {
    let symbol = symbol_arg(command, args)?;
    let raw = args.get(1).ok_or(CommandError::MissingArgument {
        command,
        argument: "quantity",
    })?;
    let quantity = match raw.parse::<u32>() {
        Ok(qty) if qty > 0 => qty,
        _ => {
            return Err(CommandError::InvalidQuantity {
                value: raw.to_string(),
            })
        }
    };
    Ok((symbol, quantity))
}

fn count_arg(args: &[&str], default: usize) -> Result<usize, CommandError> {
    match args.first() {
        None => Ok(default),
        Some(raw) => match raw.parse::<usize>() {
            Ok(count) if count > 0 => Ok(count),
            _ => Err(CommandError::InvalidCount {
                value: raw.to_string(),
            }),
        },
    }
}

/// Run `command` against the session and describe the outcome.
pub async fn execute(session: &Session, command: Command) -> Result<Reply, CommandError> {
    let text = match command {
        Command::Buy { symbol, quantity } => {
            let tx = session.buy(&symbol, quantity).await?;
            format!(
                "{} {} shares of {} at ${:.2} each (total ${:.2})",
                "Successfully bought".green(),
                tx.quantity,
                tx.symbol,
                tx.price,
                tx.total
            )
        }
        Command::Sell { symbol, quantity } => {
            let tx = session.sell(&symbol, quantity).await?;
            format!(
                "{} {} shares of {} at ${:.2} each (total ${:.2})",
                "Successfully sold".green(),
                tx.quantity,
                tx.symbol,
                tx.price,
                tx.total
            )
        }
        Command::Simulate { steps } => {
            for _ in 0..steps {
                session.simulate_market_movement().await?;
            }
            format!("Market prices updated ({steps} moves). Check your portfolio performance.")
        }
        Command::Portfolio => session.read(performance::portfolio_report).await,
        Command::Market => session.read(performance::market_overview).await,
        Command::Analysis { count } => {
            session
                .read(|ledger| performance::performance_analysis(ledger, count))
                .await
        }
        Command::Search { symbol } => {
            session
                .read(|ledger| match ledger.find_stock(&symbol) {
                    Some(stock) => performance::stock_info(stock),
                    None => {
                        let available: Vec<&str> =
                            ledger.all_stocks().iter().map(|s| s.symbol()).collect();
                        format!(
                            "Stock '{}' not found! Available stocks: {}",
                            symbol,
                            available.join(", ")
                        )
                    }
                })
                .await
        }
        Command::Sector { name } => {
            session
                .read(|ledger| {
                    let held: Vec<String> = ledger
                        .stocks_by_sector(&name)
                        .iter()
                        .map(|s| format!("{} ({} shares)", s.symbol(), ledger.holding(s.symbol())))
                        .collect();
                    if held.is_empty() {
                        format!("No holdings in sector '{name}'")
                    } else {
                        format!("{name}: {}", held.join(", "))
                    }
                })
                .await
        }
        Command::Sectors => session.read(performance::sector_report).await,
        Command::History { count } => {
            session
                .read(|ledger| performance::transaction_history(ledger, count))
                .await
        }
        Command::Json => {
            let snapshot = session.read(|ledger| ledger.snapshot()).await;
            match snapshot.to_json_pretty() {
                Ok(json) => json,
                Err(e) => format!("Error serializing snapshot: {e}"),
            }
        }
        Command::Help => HELP.to_string(),
        Command::Quit => return Ok(Reply::Quit),
    };
    Ok(Reply::Text(text))
}
