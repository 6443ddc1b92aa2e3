//! CLI argument definitions for stockdrop.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `quote` | Resolve the latest quote for a symbol through the fallback chain |
//! | `history` | Fetch the daily close-price history for a symbol |
//! | `movers` | Scan the screener and pick the extreme daily mover |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--timeout-ms` | per-endpoint | Override the request timeout in ms |
//!
//! # Examples
//!
//! ```bash
//! # Resolve a quote, falling back through historical data if needed
//! stockdrop quote GCUSD
//!
//! # Offline demo quote, no API key required
//! stockdrop quote GCUSD --demo
//!
//! # Biggest decliner among basic-materials stocks
//! stockdrop movers --sector "Basic Materials" --direction decliner
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Quote aggregation CLI with ordered endpoint fallback.
///
/// Resolves quotes and price history from the upstream market-data API,
/// trying richer endpoints first and degrading to historical closes when
/// they fail. Reads the API key from `STOCKDROP_FMP_API_KEY` or
/// `FMP_API_KEY`.
#[derive(Debug, Parser)]
#[command(
    name = "stockdrop",
    author,
    version,
    about = "Quote aggregation CLI with ordered endpoint fallback"
)]
pub struct Cli {
    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Override the per-request timeout in milliseconds.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// 💰 Resolve the latest quote for a symbol.
    ///
    /// Tries the quote endpoint first, then falls back to deriving a
    /// quote from recent daily closes.
    ///
    /// # Examples
    ///
    ///   stockdrop quote GCUSD
    ///   stockdrop quote AAPL --pretty
    ///   stockdrop quote GCUSD --demo
    Quote(QuoteArgs),

    /// 📊 Fetch daily close-price history for a symbol.
    ///
    /// # Examples
    ///
    ///   stockdrop history GCUSD
    ///   stockdrop history AAPL --pretty
    History(HistoryArgs),

    /// 📈 Pick the extreme daily mover from a screener scan.
    ///
    /// # Examples
    ///
    ///   stockdrop movers
    ///   stockdrop movers --sector "Basic Materials" --direction decliner
    Movers(MoversArgs),
}

/// Arguments for the `quote` command.
#[derive(Debug, Args)]
pub struct QuoteArgs {
    /// Market symbol (e.g., GCUSD, AAPL).
    pub symbol: String,

    /// Append the offline placeholder endpoint to the fallback chain.
    ///
    /// With no API key configured, `--demo` resolves entirely offline.
    #[arg(long, default_value_t = false)]
    pub demo: bool,
}

/// Arguments for the `history` command.
#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Market symbol to fetch history for.
    pub symbol: String,
}

/// Arguments for the `movers` command.
#[derive(Debug, Args)]
pub struct MoversArgs {
    /// Restrict the scan to one sector (e.g., "Basic Materials").
    #[arg(long)]
    pub sector: Option<String>,

    /// Number of screener rows to scan.
    #[arg(long, default_value_t = 50)]
    pub limit: usize,

    /// Which extreme to report.
    #[arg(long, value_enum, default_value_t = MoverDirection::Gainer)]
    pub direction: MoverDirection,
}

/// Ranking direction for the `movers` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MoverDirection {
    /// Largest signed percent gain.
    Gainer,
    /// Largest signed percent decline.
    Decliner,
}
