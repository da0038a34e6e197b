use serde::Serialize;
use std::cmp::Ordering;

use crate::level::{Price, PriceLevel, Side};

/// One side of the book, best price first: asks ascending, bids descending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OrderSide {
    #[serde(skip)]
    side: Side,
    levels: Vec<PriceLevel>,
}

impl OrderSide {
    pub fn new(side: Side, mut levels: Vec<PriceLevel>) -> Self {
        sort_levels(&mut levels, side);
        Self { side, levels }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn levels(&self) -> &[PriceLevel] {
        &self.levels
    }

    pub fn into_levels(self) -> Vec<PriceLevel> {
        self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn best(&self) -> Option<&PriceLevel> {
        self.levels.first()
    }

    pub fn best_price(&self) -> Option<Price> {
        self.best().map(|level| level.price)
    }

    /// Level furthest from the touch.
    pub fn worst(&self) -> Option<&PriceLevel> {
        self.levels.last()
    }

    pub fn get(&self, price: Price) -> Option<&PriceLevel> {
        self.levels.iter().find(|level| level.price == price)
    }

    /// True when every price is strictly better than the one after it.
    pub fn is_strictly_sorted(&self) -> bool {
        self.levels.windows(2).all(|pair| match self.side {
            Side::Ask => pair[0].price < pair[1].price,
            Side::Bid => pair[0].price > pair[1].price,
        })
    }
}

/// Best-first ordering for `side`.
pub fn compare_prices(side: Side, a: Price, b: Price) -> Ordering {
    match side {
        Side::Ask => a.cmp(&b),
        Side::Bid => b.cmp(&a),
    }
}

pub(crate) fn sort_levels(levels: &mut [PriceLevel], side: Side) {
    levels.sort_by(|a, b| compare_prices(side, a.price, b.price));
}
