use rand::Rng;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::BookConfig;
use crate::enforcer::enforce;
use crate::level::{round_price, synthesize, Price, PriceLevel, Side};
use crate::side::OrderSide;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceDirection {
    Up,
    Down,
    Neutral,
}

impl PriceDirection {
    pub fn between(previous: Price, last: Price) -> Self {
        if last > previous {
            PriceDirection::Up
        } else if last < previous {
            PriceDirection::Down
        } else {
            PriceDirection::Neutral
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            PriceDirection::Up => "↑",
            PriceDirection::Down => "↓",
            PriceDirection::Neutral => "→",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookState {
    pub asks: OrderSide,
    pub bids: OrderSide,
    pub last_price: Price,
    pub previous_price: Price,
}

impl BookState {
    /// Seeds `fixed_order_count` levels per side around `base_price`, one
    /// `step_size` apart, with asks lifted clear of the best bid.
    pub fn seed<R: Rng + ?Sized>(config: &BookConfig, rng: &mut R) -> Self {
        let base = config.base_price;
        let count = config.fixed_order_count;

        let bids: Vec<PriceLevel> = (0..count)
            .map(|i| synthesize(base, i, Side::Bid, config, rng))
            .collect();
        let asks: Vec<PriceLevel> = (0..count)
            .map(|i| synthesize(base, i, Side::Ask, config, rng))
            .collect();

        let bids = OrderSide::new(Side::Bid, bids);
        let best_bid = bids.best_price().unwrap_or(base);
        let asks = enforce(asks, Side::Ask, best_bid, config.min_spread).levels;

        Self {
            asks: OrderSide::new(Side::Ask, asks),
            bids,
            last_price: base,
            previous_price: base,
        }
    }

    pub fn side(&self, side: Side) -> &OrderSide {
        match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        }
    }

    pub(crate) fn side_mut(&mut self, side: Side) -> &mut OrderSide {
        match side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        }
    }

    pub fn best_bid(&self) -> Option<Price> {
        self.bids.best_price()
    }

    pub fn best_ask(&self) -> Option<Price> {
        self.asks.best_price()
    }

    /// Best ask minus best bid. `None` while either side is empty.
    pub fn spread(&self) -> Option<Price> {
        match (self.best_ask(), self.best_bid()) {
            (Some(ask), Some(bid)) => Some(round_price(ask - bid)),
            _ => None,
        }
    }

    pub fn is_crossed(&self) -> bool {
        matches!(
            (self.best_bid(), self.best_ask()),
            (Some(bid), Some(ask)) if bid >= ask
        )
    }

    pub fn price_direction(&self) -> PriceDirection {
        PriceDirection::between(self.previous_price, self.last_price)
    }

    pub(crate) fn move_last_price(&mut self, price: Price) {
        self.previous_price = self.last_price;
        self.last_price = price;
    }

    pub fn snapshot(&self, sequence: u64) -> BookSnapshot {
        BookSnapshot {
            sequence,
            asks: self.asks.levels().to_vec(),
            bids: self.bids.levels().to_vec(),
            last_price: self.last_price,
            previous_price: self.previous_price,
            spread: self.spread().unwrap_or(Decimal::ZERO),
            price_direction: self.price_direction(),
        }
    }
}

/// Immutable copy of the book handed to renderers and subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookSnapshot {
    pub sequence: u64,
    pub asks: Vec<PriceLevel>,
    pub bids: Vec<PriceLevel>,
    pub last_price: Price,
    pub previous_price: Price,
    pub spread: Price,
    pub price_direction: PriceDirection,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rust_decimal_macros::dec;

    fn prices(side: &OrderSide) -> Vec<Decimal> {
        side.levels().iter().map(|l| l.price).collect()
    }

    #[test]
    fn test_seed_around_base_price() {
        let config = BookConfig {
            base_price: dec!(29),
            ..BookConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(1);

        let book = BookState::seed(&config, &mut rng);

        let expected_bids: Vec<Decimal> = (0..10).map(|i| dec!(29) - Decimal::from(i)).collect();
        let expected_asks: Vec<Decimal> = (0..10).map(|i| dec!(30) + Decimal::from(i)).collect();

        assert_eq!(prices(&book.bids), expected_bids);
        assert_eq!(prices(&book.asks), expected_asks);
        assert_eq!(book.spread(), Some(dec!(1)));
        assert_eq!(book.last_price, dec!(29));
        assert_eq!(book.price_direction(), PriceDirection::Neutral);
        assert!(!book.is_crossed());
    }

    #[test]
    fn test_seed_with_fine_spread() {
        let config = BookConfig {
            base_price: dec!(75),
            step_size: dec!(0.5),
            min_spread: dec!(0.01),
            fixed_order_count: 4,
            ..BookConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(2);

        let book = BookState::seed(&config, &mut rng);

        assert_eq!(prices(&book.bids), vec![dec!(75), dec!(74.5), dec!(74), dec!(73.5)]);
        assert_eq!(prices(&book.asks), vec![dec!(75.01), dec!(75.5), dec!(76), dec!(76.5)]);
        assert_eq!(book.spread(), Some(dec!(0.01)));
    }

    #[test]
    fn test_spread_none_when_side_empty() {
        let book = BookState {
            asks: OrderSide::new(Side::Ask, Vec::new()),
            bids: OrderSide::new(Side::Bid, vec![PriceLevel::new(dec!(40), dec!(1000))]),
            last_price: dec!(40),
            previous_price: dec!(40),
        };

        assert_eq!(book.spread(), None);
        assert!(!book.is_crossed());
        assert_eq!(book.snapshot(0).spread, Decimal::ZERO);
    }

    #[test]
    fn test_price_direction() {
        assert_eq!(PriceDirection::between(dec!(30), dec!(31)), PriceDirection::Up);
        assert_eq!(PriceDirection::between(dec!(30), dec!(29.99)), PriceDirection::Down);
        assert_eq!(PriceDirection::between(dec!(30), dec!(30)), PriceDirection::Neutral);
        assert_eq!(PriceDirection::Down.arrow(), "↓");
    }

    #[test]
    fn test_snapshot_serializes() {
        let config = BookConfig {
            fixed_order_count: 2,
            ..BookConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        let book = BookState::seed(&config, &mut rng);

        let json = serde_json::to_value(book.snapshot(5)).unwrap();

        assert_eq!(json["sequence"], 5);
        assert_eq!(json["price_direction"], "neutral");
        assert_eq!(json["asks"].as_array().map(|a| a.len()), Some(2));
    }
}
