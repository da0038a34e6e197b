use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::fmt;

use crate::book::{BookSnapshot, PriceDirection};
use crate::level::{round_price, Price, PriceLevel, Quantity, Side};

pub const DEFAULT_MAX_ROWS: usize = 4;

const BAR_WIDTH: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    pub title: String,
    pub price_unit: String,
    pub quantity_label: String,
    pub total_label: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: "Order Book".to_string(),
            price_unit: "¢".to_string(),
            quantity_label: "Shares".to_string(),
            total_label: "Total".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelRow {
    pub side: Side,
    pub price: Price,
    pub quantity: Quantity,
    pub total: Decimal,
    /// Share of the largest visible total on the same side, 0-100.
    pub depth_pct: Decimal,
}

/// What a book widget shows: the top rows of each side with depth bars,
/// asks stacked above bids (highest ask first), and a price summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookView {
    pub asks: Vec<LevelRow>,
    pub bids: Vec<LevelRow>,
    pub last_price: Price,
    pub spread: Price,
    pub direction: PriceDirection,
    pub display: DisplayConfig,
}

impl BookView {
    pub fn from_snapshot(snapshot: &BookSnapshot, max_rows: usize, display: DisplayConfig) -> Self {
        let mut asks = rows(&snapshot.asks, Side::Ask, max_rows);
        asks.reverse();

        Self {
            asks,
            bids: rows(&snapshot.bids, Side::Bid, max_rows),
            last_price: snapshot.last_price,
            spread: snapshot.spread,
            direction: snapshot.price_direction,
            display,
        }
    }
}

fn rows(levels: &[PriceLevel], side: Side, max_rows: usize) -> Vec<LevelRow> {
    let visible = &levels[..levels.len().min(max_rows)];
    let max_total = visible
        .iter()
        .map(|level| level.total)
        .max()
        .unwrap_or(Decimal::ZERO);

    visible
        .iter()
        .map(|level| LevelRow {
            side,
            price: level.price,
            quantity: level.quantity,
            total: level.total,
            depth_pct: depth_pct(level.total, max_total),
        })
        .collect()
}

/// `total / max_total` as a percentage; zero when there is nothing to scale by.
pub fn depth_pct(total: Decimal, max_total: Decimal) -> Decimal {
    if max_total <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    round_price(total / max_total * Decimal::ONE_HUNDRED)
}

/// Formats with thousands separators and no trailing zeros, e.g. `12,345.5`.
pub fn group_thousands(value: Decimal) -> String {
    let text = value.normalize().to_string();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

fn bar(depth_pct: Decimal) -> String {
    let filled = (depth_pct * Decimal::from(BAR_WIDTH) / Decimal::ONE_HUNDRED)
        .round()
        .to_usize()
        .unwrap_or(0)
        .min(BAR_WIDTH);
    "█".repeat(filled)
}

impl BookView {
    fn write_row(&self, f: &mut fmt::Formatter<'_>, row: &LevelRow) -> fmt::Result {
        let marker = match row.side {
            Side::Ask => 'A',
            Side::Bid => 'B',
        };
        writeln!(
            f,
            "{} {:>9} {:>10} {:>12}  {}",
            marker,
            format!("{:.2}{}", row.price, self.display.price_unit),
            group_thousands(row.quantity),
            group_thousands(row.total),
            bar(row.depth_pct),
        )
    }

    fn write_summary(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = &self.display.price_unit;
        writeln!(
            f,
            "Last: {:.2}{} {}   Spread: {:.2}{}",
            self.last_price,
            unit,
            self.direction.arrow(),
            self.spread,
            unit
        )
    }
}

impl fmt::Display for BookView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.display.title)?;
        self.write_summary(f)?;
        writeln!(
            f,
            "  {:>9} {:>10} {:>12}",
            "Price", self.display.quantity_label, self.display.total_label
        )?;
        for row in &self.asks {
            self.write_row(f, row)?;
        }
        writeln!(f, "{}", "-".repeat(46))?;
        for row in &self.bids {
            self.write_row(f, row)?;
        }
        Ok(())
    }
}
