use orderbook_sim::{BookConfig, OrderBookSimulator, SimulationSession};

#[tokio::main]
async fn main() {
    let config = BookConfig {
        tick_interval_ms: 100,
        ..BookConfig::default()
    };
    let session = SimulationSession::start(OrderBookSimulator::seeded(config, 42).unwrap());
    let mut rx = session.subscribe();

    for _ in 0..20 {
        let snapshot = rx.recv().await.unwrap();
        println!(
            "#{:<3} bid {} ask {} last {} {} spread {}",
            snapshot.sequence,
            snapshot.bids[0].price,
            snapshot.asks[0].price,
            snapshot.last_price,
            snapshot.price_direction.arrow(),
            snapshot.spread,
        );
    }

    session.shutdown().await;
}
