use rust_decimal::Decimal;

use crate::level::{Price, PriceLevel, Side, PRICE_TICK};
use crate::side::sort_levels;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enforced {
    pub levels: Vec<PriceLevel>,
    /// Levels whose price had to move.
    pub clamped: usize,
}

/// Keeps `levels` on the correct side of `opposite_best`.
///
/// Levels are sorted best-first, then level `i` is pushed to at least
/// `min_spread * (i + 1)` away from the opposite best price (up for asks,
/// down for bids). Prices that collide after clamping are separated by one
/// [`PRICE_TICK`] so the side stays strictly monotonic.
pub fn enforce(
    levels: Vec<PriceLevel>,
    side: Side,
    opposite_best: Price,
    min_spread: Price,
) -> Enforced {
    let outward = side.outward();
    clamp(levels, side, |i| {
        Some(opposite_best + outward * min_spread * Decimal::from(i + 1))
    })
}

/// Sorts `levels` and separates colliding prices by one [`PRICE_TICK`].
/// Used when there is no opposite side to bound against.
pub fn separate(levels: Vec<PriceLevel>, side: Side) -> Enforced {
    clamp(levels, side, |_| None)
}

fn clamp<F>(mut levels: Vec<PriceLevel>, side: Side, bound: F) -> Enforced
where
    F: Fn(usize) -> Option<Price>,
{
    sort_levels(&mut levels, side);

    let outward = side.outward();
    let mut clamped = 0;
    let mut previous: Option<Price> = None;

    let levels = levels
        .into_iter()
        .enumerate()
        .map(|(i, level)| {
            let mut price = match bound(i) {
                Some(bound) => worse_of(side, level.price, bound),
                None => level.price,
            };
            if let Some(prev) = previous {
                price = worse_of(side, price, prev + outward * PRICE_TICK);
            }
            previous = Some(price);

            if price != level.price {
                clamped += 1;
                level.with_price(price)
            } else {
                level
            }
        })
        .collect();

    Enforced { levels, clamped }
}

/// The price further from the touch.
fn worse_of(side: Side, a: Price, b: Price) -> Price {
    match side {
        Side::Ask => a.max(b),
        Side::Bid => a.min(b),
    }
}
