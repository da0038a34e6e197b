use orderbook_sim::{
    level_total, BookConfig, BookState, ClickOutcome, OrderBookSimulator, Side,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn assert_book_invariants(book: &BookState, config: &BookConfig, context: &str) {
    assert!(book.asks.is_strictly_sorted(), "{}: asks not ascending", context);
    assert!(book.bids.is_strictly_sorted(), "{}: bids not descending", context);

    assert_eq!(book.asks.len(), config.fixed_order_count, "{}: ask depth", context);
    assert_eq!(book.bids.len(), config.fixed_order_count, "{}: bid depth", context);

    let bid = book.best_bid().unwrap();
    let ask = book.best_ask().unwrap();
    assert!(bid < ask, "{}: crossed book {} >= {}", context, bid, ask);

    for level in book.asks.levels().iter().chain(book.bids.levels()) {
        assert_eq!(
            level.total,
            level_total(level.price, level.quantity),
            "{}: stale total at {}",
            context,
            level.price
        );
        assert_eq!(level.price, level.price.round_dp(2), "{}: off-grid price", context);
    }
}

fn run_ticks(config: BookConfig, seed: u64, ticks: usize) {
    let mut sim = OrderBookSimulator::seeded(config.clone(), seed).unwrap();
    assert_book_invariants(sim.state(), &config, "seed");

    for i in 0..ticks {
        sim.tick();
        assert_book_invariants(sim.state(), &config, &format!("seed {} tick {}", seed, i));
    }
}

#[test]
fn test_hundred_ticks_default_config() {
    for seed in 0..50 {
        run_ticks(BookConfig::default(), seed, 100);
    }
}

#[test]
fn test_hundred_ticks_tight_spread() {
    let config = BookConfig {
        base_price: dec!(29),
        min_spread: dec!(0.01),
        step_size: dec!(0.5),
        ..BookConfig::default()
    };
    for seed in 0..50 {
        run_ticks(config.clone(), seed, 100);
    }
}

#[test]
fn test_hundred_ticks_aggressive_jitter() {
    let config = BookConfig {
        base_price: dec!(60),
        fixed_order_count: 5,
        min_spread: dec!(0.05),
        step_size: dec!(0.1),
        perturb_probability: 1.0,
        price_jitter: dec!(2),
        price_move_probability: 1.0,
        ..BookConfig::default()
    };
    for seed in 0..50 {
        run_ticks(config.clone(), seed, 100);
    }
}

#[test]
fn test_last_price_stays_inside_spread_after_moves() {
    let config = BookConfig {
        price_move_probability: 1.0,
        ..BookConfig::default()
    };
    let mut sim = OrderBookSimulator::seeded(config, 123).unwrap();

    for _ in 0..100 {
        let report = sim.tick();
        assert!(report.price_moved);

        let state = sim.state();
        let bid = state.best_bid().unwrap();
        let ask = state.best_ask().unwrap();
        assert!(state.last_price >= bid && state.last_price <= ask);
    }
}

#[test]
fn test_clicks_interleaved_with_ticks() {
    let config = BookConfig {
        base_price: dec!(29),
        ..BookConfig::default()
    };
    let mut sim = OrderBookSimulator::seeded(config.clone(), 2024).unwrap();
    let mut chooser = StdRng::seed_from_u64(7);

    for i in 0..200 {
        if chooser.gen_bool(0.5) {
            let side = if chooser.gen_bool(0.5) { Side::Ask } else { Side::Bid };
            let levels = sim.state().side(side).levels().to_vec();
            let target = &levels[chooser.gen_range(0..levels.len())];

            let outcome = sim.click(side, target.price);

            // Quantity after a click is at most 70% of what it was, or gone
            match outcome {
                ClickOutcome::Filled { remaining, .. } => {
                    assert!(remaining <= target.quantity * dec!(0.7));
                    let after = sim.state().side(side).get(target.price).unwrap();
                    assert_eq!(after.quantity, remaining);
                }
                ClickOutcome::Depleted { replacement, .. } => {
                    // Only the replacement may reuse the traded-out price
                    if let Some(level) = sim.state().side(side).get(target.price) {
                        assert_eq!(Some(level), replacement.as_ref());
                    }
                }
                ClickOutcome::Missed { .. } => panic!("clicked a resting level but missed"),
            }
            assert_eq!(sim.state().last_price, target.price);

            let book = sim.state();
            assert!(book.asks.is_strictly_sorted() && book.bids.is_strictly_sorted());
            assert_eq!(book.side(side).len(), config.fixed_order_count);
            assert!(!book.is_crossed(), "click {} crossed the book", i);
        } else {
            sim.tick();
            assert_book_invariants(sim.state(), &config, &format!("step {}", i));
        }
    }
}

#[test]
fn test_spread_matches_touch() {
    let mut sim = OrderBookSimulator::seeded(BookConfig::default(), 5).unwrap();

    for _ in 0..30 {
        sim.tick();
        let snapshot = sim.snapshot();
        let expected = snapshot.asks[0].price - snapshot.bids[0].price;
        assert_eq!(snapshot.spread, expected.round_dp(2));
        assert!(snapshot.spread > Decimal::ZERO);
    }
}
