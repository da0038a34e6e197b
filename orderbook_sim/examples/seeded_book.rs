use orderbook_sim::{BookConfig, BookView, DisplayConfig, OrderBookSimulator};
use rust_decimal::Decimal;

fn main() {
    let config = BookConfig {
        base_price: Decimal::from(29),
        ..BookConfig::default()
    };
    let sim = OrderBookSimulator::seeded(config, 1).unwrap();
    let snapshot = sim.snapshot();

    println!("Best bid: {:?}", sim.state().best_bid());
    println!("Best ask: {:?}", sim.state().best_ask());
    println!("Spread: {}", snapshot.spread);
    println!();
    println!("{}", BookView::from_snapshot(&snapshot, 10, DisplayConfig::default()));

    assert_eq!(sim.state().best_bid(), Some(Decimal::from(29)));
    assert_eq!(sim.state().best_ask(), Some(Decimal::from(30)));
}
