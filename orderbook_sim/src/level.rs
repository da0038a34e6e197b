use rand::Rng;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::config::BookConfig;

// Prices are quoted in cents, totals in dollars
pub type Price = Decimal;
pub type Quantity = Decimal;

/// Smallest price increment the book quotes in.
pub const PRICE_TICK: Price = dec!(0.01);

const CENTS_PER_DOLLAR: Decimal = dec!(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Bid,
    Ask,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Bid => Side::Ask,
            Side::Ask => Side::Bid,
        }
    }

    /// Direction a price moves when walking away from the touch on this side.
    pub(crate) fn outward(self) -> Decimal {
        match self {
            Side::Ask => Decimal::ONE,
            Side::Bid => Decimal::NEGATIVE_ONE,
        }
    }
}

/// Rounds to two decimal places, halves away from zero.
pub fn round_price(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Dollar value of `quantity` shares at `price` cents.
pub fn level_total(price: Price, quantity: Quantity) -> Decimal {
    round_price(price * quantity / CENTS_PER_DOLLAR)
}

/// Aggregated size resting at one price. Levels are replaced, never edited in
/// place, so `total` always matches `price` and `quantity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceLevel {
    pub price: Price,
    pub quantity: Quantity,
    pub total: Decimal,
}

impl PriceLevel {
    pub fn new(price: Price, quantity: Quantity) -> Self {
        let price = round_price(price);
        Self {
            price,
            quantity,
            total: level_total(price, quantity),
        }
    }

    pub fn with_price(&self, price: Price) -> Self {
        Self::new(price, self.quantity)
    }

    pub fn with_quantity(&self, quantity: Quantity) -> Self {
        Self::new(self.price, quantity)
    }

    pub fn is_depleted(&self) -> bool {
        self.quantity <= Decimal::ZERO
    }
}

/// Builds the level `index` steps away from `base_price` on `side`, with a
/// random quantity drawn from the configured range.
pub fn synthesize<R: Rng + ?Sized>(
    base_price: Price,
    index: usize,
    side: Side,
    config: &BookConfig,
    rng: &mut R,
) -> PriceLevel {
    let offset = side.outward() * Decimal::from(index) * config.step_size;
    let drawn = rng.gen_range(0..config.quantity_range);
    let quantity = u64::from(config.min_quantity) + u64::from(drawn);
    PriceLevel::new(base_price + offset, Decimal::from(quantity))
}
