use orderbook_sim::{BookConfig, ClickOutcome, OrderBookSimulator, SimulationSession};
use std::io::Write;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tokio::time::{interval, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::cli::Args;
use crate::clicker::RandomClicker;
use crate::output::render;

/// Runs one session until `--ticks` snapshots were written, the user hits
/// Ctrl-C, or the snapshot stream closes. The session is always shut down
/// before returning.
pub async fn run<W: Write>(args: Args, base: BookConfig, out: &mut W) -> anyhow::Result<u64> {
    let config = args.book_config(base);
    let seed = args.seed.unwrap_or_else(rand::random);

    info!(
        seed,
        base_price = %config.base_price,
        levels = config.fixed_order_count,
        tick_ms = config.tick_interval_ms,
        "Starting order book simulation"
    );

    let simulator = OrderBookSimulator::seeded(config, seed)?;
    let session = SimulationSession::start(simulator);
    let result = drive(&args, seed, &session, out).await;
    session.shutdown().await;

    result
}

async fn drive<W: Write>(
    args: &Args,
    seed: u64,
    session: &SimulationSession,
    out: &mut W,
) -> anyhow::Result<u64> {
    let display = args.display_config();
    let mut rx = session.subscribe();

    writeln!(out, "{}", render(&session.snapshot(), args.format, args.max_rows, &display)?)?;

    let mut clicks = args.click_interval_ms.map(|ms| {
        let mut timer = interval(Duration::from_millis(ms.max(1)));
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        (timer, RandomClicker::new(seed.wrapping_add(1), args.max_rows))
    });

    let mut written = 0u64;
    if args.ticks == Some(0) {
        return Ok(written);
    }

    loop {
        tokio::select! {
            received = rx.recv() => match received {
                Ok(snapshot) => {
                    writeln!(out, "{}", render(&snapshot, args.format, args.max_rows, &display)?)?;
                    written += 1;
                    if args.ticks.is_some_and(|limit| written >= limit) {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Output fell behind, dropped snapshots");
                }
                Err(RecvError::Closed) => break,
            },
            _ = next_click(clicks.as_mut().map(|(timer, _)| timer)) => {
                if let Some((_, clicker)) = clicks.as_mut() {
                    click_once(session, clicker);
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping");
                break;
            }
        }
    }

    Ok(written)
}

async fn next_click(timer: Option<&mut Interval>) {
    match timer {
        Some(timer) => {
            timer.tick().await;
        }
        None => std::future::pending().await,
    }
}

fn click_once(session: &SimulationSession, clicker: &mut RandomClicker) {
    let Some((side, price)) = clicker.pick(&session.snapshot()) else {
        return;
    };

    match session.click(side, price) {
        ClickOutcome::Filled { filled, remaining, .. } => {
            debug!(?side, %price, %filled, %remaining, "Simulated click");
        }
        ClickOutcome::Depleted { filled, .. } => {
            info!(?side, %price, %filled, "Simulated click traded out level");
        }
        ClickOutcome::Missed { .. } => {
            debug!(?side, %price, "Simulated click missed");
        }
    }
}
