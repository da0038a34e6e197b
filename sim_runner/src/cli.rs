use clap::Parser;
use orderbook_sim::{BookConfig, DisplayConfig, DEFAULT_MAX_ROWS};
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Order book table
    Text,
    /// One JSON snapshot per line
    Json,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "orderbook-sim")]
#[command(about = "Simulated prediction market order book")]
pub struct Args {
    /// Seed price in cents
    #[arg(long)]
    pub base_price: Option<Decimal>,

    /// Levels per side
    #[arg(long)]
    pub levels: Option<usize>,

    /// Milliseconds between ticks
    #[arg(long)]
    pub tick_ms: Option<u64>,

    /// Minimum distance from the opposite best price, in cents
    #[arg(long)]
    pub min_spread: Option<Decimal>,

    /// Price distance between seeded levels, in cents
    #[arg(long)]
    pub step: Option<Decimal>,

    /// RNG seed (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stop after this many snapshots (runs until Ctrl-C when omitted)
    #[arg(long)]
    pub ticks: Option<u64>,

    /// Rows shown per side in text output
    #[arg(long, default_value_t = DEFAULT_MAX_ROWS)]
    pub max_rows: usize,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Click a random visible level this often
    #[arg(long)]
    pub click_interval_ms: Option<u64>,

    #[arg(long, default_value = "¢")]
    pub price_unit: String,
}

impl Args {
    /// Applies command line overrides on top of `base`.
    pub fn book_config(&self, base: BookConfig) -> BookConfig {
        BookConfig {
            base_price: self.base_price.unwrap_or(base.base_price),
            fixed_order_count: self.levels.unwrap_or(base.fixed_order_count),
            tick_interval_ms: self.tick_ms.unwrap_or(base.tick_interval_ms),
            min_spread: self.min_spread.unwrap_or(base.min_spread),
            step_size: self.step.unwrap_or(base.step_size),
            ..base
        }
    }

    pub fn display_config(&self) -> DisplayConfig {
        DisplayConfig {
            price_unit: self.price_unit.clone(),
            ..DisplayConfig::default()
        }
    }
}
