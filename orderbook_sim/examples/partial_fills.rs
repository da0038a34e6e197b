use orderbook_sim::{BookConfig, ClickOutcome, OrderBookSimulator, Side};

fn main() {
    let mut sim = OrderBookSimulator::seeded(BookConfig::default(), 7).unwrap();
    let price = sim.state().best_ask().unwrap();

    let mut clicks = 0;
    loop {
        clicks += 1;
        match sim.click(Side::Ask, price) {
            ClickOutcome::Filled { filled, remaining, .. } => {
                println!("Click {}: filled {} @ {}, {} left", clicks, filled, price, remaining);
            }
            ClickOutcome::Depleted { filled, replacement, .. } => {
                println!("Click {}: filled {} @ {}, level traded out", clicks, filled, price);
                if let Some(level) = replacement {
                    println!("Replenished {} shares @ {}", level.quantity, level.price);
                }
                break;
            }
            ClickOutcome::Missed { .. } => unreachable!("best ask is resting"),
        }
    }

    println!("New best ask: {:?}", sim.state().best_ask());
    assert_eq!(sim.state().asks.len(), sim.config().fixed_order_count);
}
