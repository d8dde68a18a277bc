use std::f64::consts::PI;
use std::time::Duration;

use serde::Serialize;

use super::types::Cell;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StaticObstacle {
    pub cells: Vec<Cell>,
}

impl StaticObstacle {
    pub fn run(start: Cell, length: usize) -> Self {
        Self {
            cells: (0..length)
                .map(|i| Cell::new(start.col + i, start.row))
                .collect(),
        }
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        self.cells.contains(cell)
    }
}

/// Single-cell patrol moving `span` cells to the right of `origin` and back,
/// one leg per `leg` of elapsed time, eased in and out like a sine tween.
#[derive(Clone, Debug, PartialEq)]
pub struct MovingObstacle {
    origin: Cell,
    span: usize,
    leg: Duration,
    phase: Duration,
}

impl MovingObstacle {
    pub fn new(origin: Cell, span: usize, leg: Duration) -> Self {
        Self {
            origin,
            span,
            leg,
            phase: Duration::ZERO,
        }
    }

    pub fn path(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..=self.span).map(move |i| Cell::new(self.origin.col + i, self.origin.row))
    }

    pub fn on_path(&self, cell: &Cell) -> bool {
        cell.row == self.origin.row
            && cell.col >= self.origin.col
            && cell.col <= self.origin.col + self.span
    }

    pub fn advance(&mut self, dt: Duration) {
        let cycle = self.leg.as_nanos() * 2;
        if cycle == 0 {
            return;
        }
        let phase = (self.phase.as_nanos() + dt.as_nanos()) % cycle;
        self.phase = Duration::from_nanos(phase as u64);
    }

    pub fn current_cell(&self) -> Cell {
        let leg = self.leg.as_secs_f64();
        if leg <= 0.0 {
            return self.origin;
        }
        let t = self.phase.as_secs_f64() / leg;
        let progress = if t <= 1.0 { t } else { 2.0 - t };
        let eased = (1.0 - (PI * progress).cos()) / 2.0;
        let offset = (eased * self.span as f64).round() as usize;
        Cell::new(self.origin.col + offset.min(self.span), self.origin.row)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Obstacles {
    pub statics: Vec<StaticObstacle>,
    pub movers: Vec<MovingObstacle>,
}

impl Obstacles {
    pub fn blocks(&self, cell: &Cell) -> bool {
        self.statics.iter().any(|o| o.contains(cell))
            || self.movers.iter().any(|o| o.current_cell() == *cell)
    }

    /// Cells that may become deadly, used to keep spawns off patrol paths.
    pub fn reserves(&self, cell: &Cell) -> bool {
        self.statics.iter().any(|o| o.contains(cell)) || self.movers.iter().any(|o| o.on_path(cell))
    }

    pub fn advance(&mut self, dt: Duration) {
        for mover in &mut self.movers {
            mover.advance(dt);
        }
    }

    pub fn clear(&mut self) {
        self.statics.clear();
        self.movers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patrol() -> MovingObstacle {
        MovingObstacle::new(Cell::new(10, 4), 6, Duration::from_millis(800))
    }

    #[test]
    fn test_static_run_is_horizontal() {
        let wall = StaticObstacle::run(Cell::new(5, 7), 3);
        assert_eq!(wall.cells, vec![Cell::new(5, 7), Cell::new(6, 7), Cell::new(7, 7)]);
    }

    #[test]
    fn test_patrol_reaches_both_ends() {
        let mut mover = patrol();
        assert_eq!(mover.current_cell(), Cell::new(10, 4));
        mover.advance(Duration::from_millis(800));
        assert_eq!(mover.current_cell(), Cell::new(16, 4));
        mover.advance(Duration::from_millis(800));
        assert_eq!(mover.current_cell(), Cell::new(10, 4));
    }

    #[test]
    fn test_patrol_passes_midpoint_halfway_through_leg() {
        let mut mover = patrol();
        mover.advance(Duration::from_millis(400));
        assert_eq!(mover.current_cell(), Cell::new(13, 4));
        mover.advance(Duration::from_millis(800));
        assert_eq!(mover.current_cell(), Cell::new(13, 4));
    }

    #[test]
    fn test_patrol_stays_on_path() {
        let mut mover = patrol();
        for _ in 0..100 {
            mover.advance(Duration::from_millis(37));
            assert!(mover.on_path(&mover.current_cell()));
        }
    }

    #[test]
    fn test_zero_advance_keeps_position() {
        let mut mover = patrol();
        mover.advance(Duration::from_millis(300));
        let before = mover.clone();
        mover.advance(Duration::ZERO);
        assert_eq!(mover, before);
    }

    #[test]
    fn test_blocks_vs_reserves() {
        let mut obstacles = Obstacles::default();
        obstacles.movers.push(patrol());
        assert!(obstacles.blocks(&Cell::new(10, 4)));
        assert!(!obstacles.blocks(&Cell::new(14, 4)));
        assert!(obstacles.reserves(&Cell::new(14, 4)));
        assert!(!obstacles.reserves(&Cell::new(17, 4)));
    }
}
