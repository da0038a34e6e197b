use orderbook_sim::{BookSnapshot, Price, Side};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Stands in for a user clicking rows of the book widget: picks a side at
/// random, then one of the rows visible on that side.
pub struct RandomClicker {
    rng: StdRng,
    max_rows: usize,
}

impl RandomClicker {
    pub fn new(seed: u64, max_rows: usize) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            max_rows: max_rows.max(1),
        }
    }

    pub fn pick(&mut self, snapshot: &BookSnapshot) -> Option<(Side, Price)> {
        let side = if self.rng.gen_bool(0.5) { Side::Ask } else { Side::Bid };
        let levels = match side {
            Side::Ask => &snapshot.asks,
            Side::Bid => &snapshot.bids,
        };

        let visible = levels.len().min(self.max_rows);
        if visible == 0 {
            return None;
        }

        let level = &levels[self.rng.gen_range(0..visible)];
        Some((side, level.price))
    }
}
