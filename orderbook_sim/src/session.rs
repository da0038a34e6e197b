use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::book::BookSnapshot;
use crate::level::{Price, Side};
use crate::simulator::OrderBookSimulator;
use crate::trade::ClickOutcome;

const SNAPSHOT_CHANNEL_CAPACITY: usize = 256;

/// A running simulation: the book ticks on its own timer until shut down, and
/// clicks are applied between ticks. Every mutation publishes a snapshot.
///
/// Must be started from within a tokio runtime. Dropping the session aborts
/// the timer task.
pub struct SimulationSession {
    simulator: Arc<Mutex<OrderBookSimulator>>,
    snapshots: broadcast::Sender<BookSnapshot>,
    shutdown_tx: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl SimulationSession {
    pub fn start(simulator: OrderBookSimulator) -> Self {
        let tick_ms = simulator.config().tick_interval_ms;
        let period = simulator.config().tick_interval();
        let simulator = Arc::new(Mutex::new(simulator));
        let (snapshots, _) = broadcast::channel(SNAPSHOT_CHANNEL_CAPACITY);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(run_ticker(
            Arc::clone(&simulator),
            snapshots.clone(),
            shutdown_rx,
            period,
        ));

        info!(tick_ms, "Simulation session started");

        Self {
            simulator,
            snapshots,
            shutdown_tx,
            task: Some(task),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BookSnapshot> {
        self.snapshots.subscribe()
    }

    pub fn snapshot(&self) -> BookSnapshot {
        self.simulator.lock().snapshot()
    }

    pub fn click(&self, side: Side, price: Price) -> ClickOutcome {
        let mut sim = self.simulator.lock();
        let outcome = sim.click(side, price);

        // Publish under the lock so subscribers see sequences in order
        if !matches!(outcome, ClickOutcome::Missed { .. }) {
            let _ = self.snapshots.send(sim.snapshot());
        }
        outcome
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stops the timer and waits for the tick task to exit.
    pub async fn shutdown(mut self) {
        let _ = self.shutdown_tx.send(true);
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
        info!(sequence = self.simulator.lock().sequence(), "Simulation session stopped");
    }
}

impl Drop for SimulationSession {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn run_ticker(
    simulator: Arc<Mutex<OrderBookSimulator>>,
    snapshots: broadcast::Sender<BookSnapshot>,
    mut shutdown_rx: watch::Receiver<bool>,
    period: Duration,
) {
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Burst);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let mut sim = simulator.lock();
                let report = sim.tick();
                if report.crossed_repaired {
                    debug!(sequence = sim.sequence(), "crossed book repaired");
                }
                // No subscribers is fine
                let _ = snapshots.send(sim.snapshot());
            }
            changed = shutdown_rx.changed() => {
                if changed.is_err() || *shutdown_rx.borrow() {
                    break;
                }
            }
        }
    }
}
