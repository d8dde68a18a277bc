use std::time::Duration;

use crate::log;
use super::board::Board;
use super::bonus::Bonus;
use super::events::GameEvent;
use super::obstacle::{MovingObstacle, StaticObstacle};
use super::placement::{place_food, place_free_cell, SpawnArea};
use super::session_rng::SessionRng;
use super::settings::{ArcadeSettings, BonusRule, FoodTier, ObstacleSettings};
use super::threshold_table::ThresholdTable;
use super::types::Cell;

#[derive(Clone, Debug)]
pub struct Spawner {
    food_tiers: ThresholdTable<FoodTier>,
    bonus_rules: Vec<BonusRule>,
    obstacles: ObstacleSettings,
    item_area: SpawnArea,
    obstacle_margin: usize,
}

impl Spawner {
    pub fn new(settings: &ArcadeSettings) -> Self {
        let field = settings.field.size();
        Self {
            food_tiers: settings.food_tiers.clone(),
            bonus_rules: settings.bonuses.clone(),
            obstacles: settings.obstacles.clone(),
            item_area: SpawnArea::with_margin(field, settings.field.spawn_margin),
            obstacle_margin: settings.field.obstacle_margin,
        }
    }

    /// Replaces the board's food with a fresh one whose tier matches `score`.
    /// Leaves the board without food when no free cell exists.
    pub fn place_food(&self, board: &mut Board, score: u32, rng: &mut SessionRng) {
        board.food = None;
        let food = place_food(score, &self.food_tiers, &self.item_area, rng, |cell| {
            board.is_occupied(cell)
        });
        match &food {
            Some(food) => log!(
                "Food spawned at ({}, {}) worth {}",
                food.cell.col,
                food.cell.row,
                food.points
            ),
            None => log!("No free cell left for food"),
        }
        board.food = food;
    }

    pub fn maybe_spawn_bonuses(&self, board: &mut Board, score: u32, rng: &mut SessionRng) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for rule in &self.bonus_rules {
            if !rule.triggers_at(score) || board.has_bonus(rule.kind) {
                continue;
            }
            let Some(cell) = place_free_cell(&self.item_area, rng, |cell| board.is_occupied(cell)) else {
                continue;
            };
            log!("{:?} bonus spawned at ({}, {})", rule.kind, cell.col, cell.row);
            board.bonuses.push(Bonus::spawn(rule, cell));
            events.push(GameEvent::BonusSpawned {
                kind: rule.kind,
                cell,
            });
        }
        events
    }

    pub fn maybe_spawn_obstacles(&self, board: &mut Board, score: u32, rng: &mut SessionRng) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if score == 0 {
            return events;
        }

        if self.obstacles.static_every.is_some_and(|every| score % every == 0)
            && let Some(wall) = self.spawn_static(board, rng)
        {
            log!("Static obstacle spawned at ({}, {})", wall.cells[0].col, wall.cells[0].row);
            events.push(GameEvent::ObstacleSpawned {
                cells: wall.cells.clone(),
                moving: false,
            });
            board.obstacles.statics.push(wall);
        }

        if self.obstacles.moving_every.is_some_and(|every| score % every == 0)
            && let Some(mover) = self.spawn_mover(board, rng)
        {
            let cells: Vec<Cell> = mover.path().collect();
            log!("Moving obstacle spawned at ({}, {})", cells[0].col, cells[0].row);
            events.push(GameEvent::ObstacleSpawned {
                cells,
                moving: true,
            });
            board.obstacles.movers.push(mover);
        }

        events
    }

    pub fn relocate_bonus(&self, board: &mut Board, index: usize, rng: &mut SessionRng) -> Option<GameEvent> {
        board.bonuses.get(index)?;
        // The bonus's own cell counts as occupied, so it always moves.
        let cell = place_free_cell(&self.item_area, rng, |cell| board.is_occupied(cell))?;
        let bonus = board.bonuses.get_mut(index)?;
        bonus.cell = cell;
        Some(GameEvent::BonusRelocated {
            kind: bonus.kind,
            cell,
        })
    }

    fn run_is_free(board: &Board, start: Cell, length: usize, ahead: Option<Cell>) -> bool {
        (0..length).all(|i| {
            let cell = Cell::new(start.col + i, start.row);
            !board.is_occupied(&cell) && Some(cell) != ahead
        })
    }

    fn run_area(&self, board: &Board, length: usize) -> SpawnArea {
        let field = board.field_size;
        let margin = self.obstacle_margin;
        SpawnArea {
            cols: margin..(field.width - margin).saturating_sub(length - 1),
            rows: margin..field.height - margin,
        }
    }

    fn spawn_static(&self, board: &Board, rng: &mut SessionRng) -> Option<StaticObstacle> {
        let length = self.obstacles.static_length;
        let area = self.run_area(board, length);
        let ahead = board.next_head(board.snake.direction);
        let start = place_free_cell(&area, rng, |cell| !Self::run_is_free(board, *cell, length, ahead))?;
        Some(StaticObstacle::run(start, length))
    }

    fn spawn_mover(&self, board: &Board, rng: &mut SessionRng) -> Option<MovingObstacle> {
        let span = self.obstacles.patrol_span;
        let area = self.run_area(board, span + 1);
        let ahead = board.next_head(board.snake.direction);
        let start = place_free_cell(&area, rng, |cell| !Self::run_is_free(board, *cell, span + 1, ahead))?;
        Some(MovingObstacle::new(
            start,
            span,
            Duration::from_millis(self.obstacles.patrol_leg_ms),
        ))
    }
}
