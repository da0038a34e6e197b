use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use orderbook_sim::{BookConfig, OrderBookSimulator, Side};

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    for levels in [10usize, 50, 200] {
        let config = BookConfig {
            base_price: rust_decimal::Decimal::from(levels as u64 + 50),
            fixed_order_count: levels,
            ..BookConfig::default()
        };

        group.bench_function(format!("{}_levels", levels), |b| {
            let mut sim = OrderBookSimulator::seeded(config.clone(), 1).unwrap();
            b.iter(|| black_box(sim.tick()));
        });
    }

    group.finish();
}

fn bench_click(c: &mut Criterion) {
    let mut group = c.benchmark_group("click");

    group.bench_function("click_best_ask", |b| {
        b.iter_batched(
            || OrderBookSimulator::seeded(BookConfig::default(), 2).unwrap(),
            |mut sim| {
                let price = sim.state().best_ask().unwrap();
                black_box(sim.click(Side::Ask, price));
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("drain_best_bid", |b| {
        b.iter_batched(
            || OrderBookSimulator::seeded(BookConfig::default(), 3).unwrap(),
            |mut sim| {
                // Click the touch until it trades out
                let price = sim.state().best_bid().unwrap();
                while sim.state().bids.get(price).is_some() {
                    sim.click(Side::Bid, price);
                }
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
    let mut sim = OrderBookSimulator::seeded(BookConfig::default(), 4).unwrap();
    for _ in 0..10 {
        sim.tick();
    }

    c.bench_function("snapshot", |b| {
        b.iter(|| black_box(sim.snapshot()));
    });
}

criterion_group!(benches, bench_tick, bench_click, bench_snapshot);
criterion_main!(benches);
