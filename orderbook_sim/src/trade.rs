//! User clicks on a resting level, simulated as a partial fill.

use rand::Rng;
use rust_decimal::Decimal;
use tracing::debug;

use crate::book::BookState;
use crate::config::BookConfig;
use crate::level::{synthesize, Price, PriceLevel, Quantity, Side};
use crate::side::OrderSide;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The level traded and still has size left.
    Filled {
        side: Side,
        price: Price,
        filled: Quantity,
        remaining: Quantity,
    },
    /// The level traded out and was replaced at the far end of the side.
    Depleted {
        side: Side,
        price: Price,
        filled: Quantity,
        replacement: Option<PriceLevel>,
    },
    /// No level at that price on that side; nothing changed.
    Missed { side: Side, price: Price },
}

/// Fills `click_fill_ratio` of the level at `price` on `side`.
///
/// The last price moves to the clicked price. A level that runs out of size is
/// dropped and the side is topped back up one step beyond its worst level.
/// The opposite side is left alone: removing size can only widen the spread.
pub fn on_order_click<R: Rng + ?Sized>(
    state: &mut BookState,
    config: &BookConfig,
    rng: &mut R,
    side: Side,
    price: Price,
) -> ClickOutcome {
    let Some(level) = state.side(side).get(price).cloned() else {
        debug!(?side, %price, "click on missing level");
        return ClickOutcome::Missed { side, price };
    };

    state.move_last_price(level.price);

    let remaining = (level.quantity * (Decimal::ONE - config.click_fill_ratio))
        .floor()
        .max(Decimal::ZERO);
    let filled = level.quantity - remaining;

    let mut levels: Vec<PriceLevel> = state
        .side(side)
        .levels()
        .iter()
        .map(|l| if l.price == price { l.with_quantity(remaining) } else { l.clone() })
        .filter(|l| !l.is_depleted())
        .collect();

    let mut replacement = None;
    while levels.len() < config.fixed_order_count {
        let extremum = levels.last().map_or(level.price, |worst| worst.price);
        let fresh = synthesize(extremum, 1, side, config, rng);
        replacement = Some(fresh.clone());
        levels.push(fresh);
    }

    *state.side_mut(side) = OrderSide::new(side, levels);

    debug!(?side, %price, %filled, %remaining, "click filled");

    if remaining.is_zero() {
        ClickOutcome::Depleted {
            side,
            price,
            filled,
            replacement,
        }
    } else {
        ClickOutcome::Filled {
            side,
            price,
            filled,
            remaining,
        }
    }
}
