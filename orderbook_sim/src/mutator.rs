//! Periodic book mutation.
//!
//! Each tick perturbs resting levels, refills each side to its fixed depth,
//! re-applies the no-cross bounds against the opposite side's pre-tick best
//! price and sometimes moves the last traded price. A crossed book is repaired
//! on the same tick it is detected.

use rand::Rng;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::book::BookState;
use crate::config::BookConfig;
use crate::enforcer::{enforce, separate};
use crate::level::{round_price, synthesize, Price, PriceLevel, Side, PRICE_TICK};
use crate::side::{sort_levels, OrderSide};

const PERCENT: Decimal = Decimal::ONE_HUNDRED;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub perturbed: usize,
    pub clamped: usize,
    pub replenished: usize,
    pub trimmed: usize,
    pub price_moved: bool,
    pub crossed_repaired: bool,
}

/// Advances the book by one tick.
pub fn tick<R: Rng + ?Sized>(state: &mut BookState, config: &BookConfig, rng: &mut R) -> TickReport {
    let mut report = TickReport::default();

    let best_bid = state.best_bid();
    let best_ask = state.best_ask();

    let asks = update_side(&state.asks, best_bid, state.last_price, config, rng, &mut report);
    let bids = update_side(&state.bids, best_ask, state.last_price, config, rng, &mut report);
    state.asks = asks;
    state.bids = bids;

    if state.is_crossed() {
        repair_crossed(state, config);
        report.crossed_repaired = true;
        report.price_moved = true;
    } else if rng.gen_bool(config.price_move_probability) {
        report.price_moved = move_price(state, rng);
    }

    debug!(
        perturbed = report.perturbed,
        clamped = report.clamped,
        replenished = report.replenished,
        trimmed = report.trimmed,
        last_price = %state.last_price,
        "tick applied"
    );

    report
}

fn update_side<R: Rng + ?Sized>(
    current: &OrderSide,
    opposite_best: Option<Price>,
    last_price: Price,
    config: &BookConfig,
    rng: &mut R,
    report: &mut TickReport,
) -> OrderSide {
    let side = current.side();

    let mut levels: Vec<PriceLevel> = current
        .levels()
        .iter()
        .map(|level| {
            if rng.gen_bool(config.perturb_probability) {
                report.perturbed += 1;
                perturb(level, config, rng)
            } else {
                level.clone()
            }
        })
        .filter(|level| !level.is_depleted())
        .collect();
    sort_levels(&mut levels, side);

    // Empty sides restart one min spread off the opposite touch
    let anchor = opposite_best
        .map(|price| price + side.outward() * config.min_spread)
        .unwrap_or(last_price);

    while levels.len() < config.fixed_order_count {
        let level = match levels.last() {
            Some(worst) => synthesize(worst.price, 1, side, config, rng),
            None => synthesize(anchor, 0, side, config, rng),
        };
        levels.push(level);
        report.replenished += 1;
    }

    if levels.len() > config.fixed_order_count {
        report.trimmed += levels.len() - config.fixed_order_count;
        levels.truncate(config.fixed_order_count);
    }

    let enforced = match opposite_best {
        Some(best) => enforce(levels, side, best, config.min_spread),
        None => separate(levels, side),
    };
    report.clamped += enforced.clamped;

    OrderSide::new(side, enforced.levels)
}

/// Jitters quantity by up to `quantity_jitter_pct` percent (never below the
/// floor) and price by up to `price_jitter` in whole ticks.
fn perturb<R: Rng + ?Sized>(level: &PriceLevel, config: &BookConfig, rng: &mut R) -> PriceLevel {
    let pct = i64::from(config.quantity_jitter_pct);
    let factor = (PERCENT + Decimal::from(rng.gen_range(-pct..=pct))) / PERCENT;
    let quantity = (level.quantity * factor).floor().max(config.quantity_floor);

    let max_ticks = (config.price_jitter / PRICE_TICK).trunc().to_i64().unwrap_or(0);
    let offset = Decimal::from(rng.gen_range(-max_ticks..=max_ticks)) * PRICE_TICK;

    PriceLevel::new(level.price + offset, quantity)
}

/// Re-homes the asks just above the best bid and parks the last price inside
/// the restored spread.
fn repair_crossed(state: &mut BookState, config: &BookConfig) {
    let Some(best_bid) = state.best_bid() else {
        return;
    };

    warn!(
        best_bid = %best_bid,
        best_ask = ?state.best_ask(),
        "crossed book, re-homing asks"
    );

    let asks = state
        .asks
        .levels()
        .iter()
        .enumerate()
        .map(|(i, level)| {
            level.with_price(best_bid + config.min_spread + Decimal::from(i) * PRICE_TICK)
        })
        .collect();
    state.asks = OrderSide::new(Side::Ask, asks);

    state.move_last_price(round_price(best_bid + config.min_spread / Decimal::TWO));
}

/// Picks a new last price uniformly inside the spread, on the tick grid.
fn move_price<R: Rng + ?Sized>(state: &mut BookState, rng: &mut R) -> bool {
    let (Some(bid), Some(ask)) = (state.best_bid(), state.best_ask()) else {
        return false;
    };
    let (Some(low), Some(high)) = (
        (bid / PRICE_TICK).round().to_i64(),
        (ask / PRICE_TICK).round().to_i64(),
    ) else {
        return false;
    };

    let price = Decimal::from(rng.gen_range(low..=high)) * PRICE_TICK;
    state.move_last_price(price);
    true
}
