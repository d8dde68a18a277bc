use serde::Serialize;

use super::bonus::BonusView;
use super::placement::Food;
use super::types::{Cell, Direction, FieldSize};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ArcadeSnapshot {
    pub tick: u64,
    pub field_size: FieldSize,
    pub snake: Vec<Cell>,
    pub direction: Direction,
    pub food: Option<Food>,
    pub bonuses: Vec<BonusView>,
    pub static_obstacles: Vec<Cell>,
    pub moving_obstacles: Vec<Cell>,
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub theme: String,
    pub background: String,
    pub interval_ms: u64,
}

impl ArcadeSnapshot {
    pub fn summary(&self) -> String {
        let head = self.snake.first().copied().unwrap_or(Cell::new(0, 0));
        let food = self
            .food
            .as_ref()
            .map(|f| format!("({}, {})x{}", f.cell.col, f.cell.row, f.points))
            .unwrap_or_else(|| "none".to_string());
        format!(
            "tick {} head ({}, {}) len {} food {} bonuses {} obstacles {} score {} lives {} level {} [{}] {}ms",
            self.tick,
            head.col,
            head.row,
            self.snake.len(),
            food,
            self.bonuses.len(),
            self.static_obstacles.len() + self.moving_obstacles.len(),
            self.score,
            self.lives,
            self.level,
            self.theme,
            self.interval_ms
        )
    }
}
