use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::types::Cell;

pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn random_cell(&mut self, cols: std::ops::Range<usize>, rows: std::ops::Range<usize>) -> Cell {
        let col = self.rng.random_range(cols);
        let row = self.rng.random_range(rows);
        Cell::new(col, row)
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..items.len());
        items.get(idx)
    }
}
