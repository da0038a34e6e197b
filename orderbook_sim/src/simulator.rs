use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::book::{BookSnapshot, BookState};
use crate::config::BookConfig;
use crate::error::Result;
use crate::level::{Price, Side};
use crate::mutator::{self, TickReport};
use crate::trade::{self, ClickOutcome};

/// Owns one simulated book and the randomness that drives it.
pub struct OrderBookSimulator<R = StdRng> {
    config: BookConfig,
    state: BookState,
    rng: R,
    sequence: u64,
}

impl OrderBookSimulator<StdRng> {
    pub fn seeded(config: BookConfig, seed: u64) -> Result<Self> {
        Self::new(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> OrderBookSimulator<R> {
    pub fn new(config: BookConfig, mut rng: R) -> Result<Self> {
        config.validate()?;
        let state = BookState::seed(&config, &mut rng);

        Ok(Self {
            config,
            state,
            rng,
            sequence: 0,
        })
    }

    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    pub fn state(&self) -> &BookState {
        &self.state
    }

    /// Number of mutations applied since seeding.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn tick(&mut self) -> TickReport {
        self.sequence += 1;
        mutator::tick(&mut self.state, &self.config, &mut self.rng)
    }

    pub fn click(&mut self, side: Side, price: Price) -> ClickOutcome {
        let outcome = trade::on_order_click(&mut self.state, &self.config, &mut self.rng, side, price);
        if !matches!(outcome, ClickOutcome::Missed { .. }) {
            self.sequence += 1;
        }
        outcome
    }

    pub fn snapshot(&self) -> BookSnapshot {
        self.state.snapshot(self.sequence)
    }
}
