use std::time::Duration;

use super::bonus::{Bonus, BonusTimerUpdate};
use super::obstacle::Obstacles;
use super::placement::Food;
use super::settings::BonusKind;
use super::snake::Snake;
use super::types::{BoundaryMode, Cell, Direction, FatalCause, FieldSize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollectedBonus {
    pub kind: BonusKind,
    pub value: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TickResult {
    Moved {
        head: Cell,
        food_eaten: Option<Food>,
        bonus_collected: Option<CollectedBonus>,
    },
    Fatal(FatalCause),
}

impl TickResult {
    pub fn is_fatal(&self) -> bool {
        matches!(self, TickResult::Fatal(_))
    }
}

#[derive(Clone, Debug)]
pub struct Board {
    pub field_size: FieldSize,
    pub boundary_mode: BoundaryMode,
    pub snake: Snake,
    pub food: Option<Food>,
    pub bonuses: Vec<Bonus>,
    pub obstacles: Obstacles,
}

impl Board {
    pub fn new(field_size: FieldSize, boundary_mode: BoundaryMode, snake: Snake) -> Self {
        Self {
            field_size,
            boundary_mode,
            snake,
            food: None,
            bonuses: Vec::new(),
            obstacles: Obstacles::default(),
        }
    }

    pub fn resolve_direction(&self, requested: Option<Direction>) -> Direction {
        match requested {
            Some(direction) if !direction.is_opposite(&self.snake.direction) => direction,
            _ => self.snake.direction,
        }
    }

    pub fn next_head(&self, direction: Direction) -> Option<Cell> {
        self.field_size
            .step(self.snake.head(), direction, self.boundary_mode)
    }

    pub fn step(&mut self, requested: Option<Direction>) -> TickResult {
        let direction = self.resolve_direction(requested);

        let Some(new_head) = self.next_head(direction) else {
            return TickResult::Fatal(FatalCause::Wall);
        };

        let growing = self.food.as_ref().is_some_and(|food| food.cell == new_head);

        if self.snake.collides_with(&new_head, growing) {
            return TickResult::Fatal(FatalCause::SelfCollision);
        }

        if self.obstacles.blocks(&new_head) {
            return TickResult::Fatal(FatalCause::Obstacle);
        }

        self.snake.direction = direction;
        self.snake.advance(new_head, growing);

        let food_eaten = if growing { self.food.take() } else { None };

        let bonus_collected = self
            .bonuses
            .iter()
            .position(|bonus| bonus.cell == new_head)
            .map(|index| {
                let bonus = self.bonuses.remove(index);
                CollectedBonus {
                    kind: bonus.kind,
                    value: bonus.value,
                }
            });

        TickResult::Moved {
            head: new_head,
            food_eaten,
            bonus_collected,
        }
    }

    pub fn has_bonus(&self, kind: BonusKind) -> bool {
        self.bonuses.iter().any(|bonus| bonus.kind == kind)
    }

    pub fn is_occupied(&self, cell: &Cell) -> bool {
        self.snake.contains(cell)
            || self.food.as_ref().is_some_and(|food| food.cell == *cell)
            || self.bonuses.iter().any(|bonus| bonus.cell == *cell)
            || self.obstacles.reserves(cell)
    }

    /// Advances bonus and obstacle timers, removing expired bonuses. Returns
    /// the kinds that expired and, per surviving bonus index, the relocations
    /// owed.
    pub fn advance_timers(&mut self, dt: Duration) -> (Vec<BonusKind>, Vec<(usize, u32)>) {
        self.obstacles.advance(dt);

        let mut expired = Vec::new();
        let mut relocations = Vec::new();
        let mut index = 0;
        self.bonuses.retain_mut(|bonus| {
            let BonusTimerUpdate {
                expired: is_expired,
                relocations: count,
            } = bonus.advance(dt);
            if is_expired {
                expired.push(bonus.kind);
                return false;
            }
            if count > 0 {
                relocations.push((index, count));
            }
            index += 1;
            true
        });

        (expired, relocations)
    }

    pub fn clear_round(&mut self, snake: Snake) {
        self.snake = snake;
        self.food = None;
        self.bonuses.clear();
        self.obstacles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arcade::obstacle::{MovingObstacle, StaticObstacle};
    use crate::arcade::settings::BonusRule;

    fn food_at(cell: Cell) -> Food {
        Food {
            cell,
            points: 1,
            color: "#ff0000".to_string(),
            tier: 0,
        }
    }

    fn board_with(cells: &[Cell], direction: Direction, field: FieldSize) -> Board {
        Board::new(field, BoundaryMode::Death, Snake::from_cells(cells, direction))
    }

    fn cells(board: &Board) -> Vec<Cell> {
        board.snake.cells().copied().collect()
    }

    #[test]
    fn test_length_one_snake_grows_on_food() {
        let mut board = board_with(&[Cell::new(8, 8)], Direction::Right, FieldSize::new(40, 30));
        board.food = Some(food_at(Cell::new(9, 8)));

        let result = board.step(None);

        assert!(matches!(result, TickResult::Moved { food_eaten: Some(_), .. }));
        assert_eq!(cells(&board), vec![Cell::new(9, 8), Cell::new(8, 8)]);
        assert!(board.food.is_none());
    }

    #[test]
    fn test_plain_move_keeps_length() {
        let mut board = board_with(
            &[Cell::new(5, 5), Cell::new(4, 5), Cell::new(3, 5)],
            Direction::Right,
            FieldSize::new(20, 20),
        );
        board.food = Some(food_at(Cell::new(15, 15)));
        let result = board.step(Some(Direction::Down));
        assert_eq!(
            result,
            TickResult::Moved {
                head: Cell::new(5, 6),
                food_eaten: None,
                bonus_collected: None
            }
        );
        assert_eq!(board.snake.len(), 3);
        assert_eq!(board.snake.direction, Direction::Down);
    }

    #[test]
    fn test_wall_collision_leaves_snake_unchanged() {
        let start = [Cell::new(10, 5), Cell::new(9, 5), Cell::new(8, 5)];
        let mut board = board_with(&start, Direction::Right, FieldSize::new(11, 11));

        let result = board.step(None);

        assert_eq!(result, TickResult::Fatal(FatalCause::Wall));
        assert_eq!(cells(&board), start.to_vec());
    }

    #[test]
    fn test_wrap_around_reenters_left_edge() {
        let mut board = board_with(
            &[Cell::new(10, 5), Cell::new(9, 5)],
            Direction::Right,
            FieldSize::new(11, 11),
        );
        board.boundary_mode = BoundaryMode::WrapAround;
        let result = board.step(None);
        assert!(!result.is_fatal());
        assert_eq!(board.snake.head(), Cell::new(0, 5));
    }

    #[test]
    fn test_reverse_request_is_ignored() {
        let mut board = board_with(
            &[Cell::new(5, 5), Cell::new(4, 5)],
            Direction::Right,
            FieldSize::new(20, 20),
        );
        board.step(Some(Direction::Left));
        assert_eq!(board.snake.head(), Cell::new(6, 5));
        assert_eq!(board.snake.direction, Direction::Right);
    }

    #[test]
    fn test_self_collision_is_fatal() {
        // Head at (2,1) turning down into its own body at (2,2).
        let mut board = board_with(
            &[
                Cell::new(2, 1),
                Cell::new(3, 1),
                Cell::new(3, 2),
                Cell::new(2, 2),
                Cell::new(1, 2),
            ],
            Direction::Left,
            FieldSize::new(10, 10),
        );
        assert_eq!(board.step(Some(Direction::Down)), TickResult::Fatal(FatalCause::SelfCollision));
    }

    #[test]
    fn test_moving_into_vacated_tail_is_allowed() {
        let mut board = board_with(
            &[Cell::new(1, 1), Cell::new(2, 1), Cell::new(2, 2), Cell::new(1, 2)],
            Direction::Left,
            FieldSize::new(10, 10),
        );
        let result = board.step(Some(Direction::Down));
        assert!(!result.is_fatal());
        assert_eq!(board.snake.head(), Cell::new(1, 2));
        assert_eq!(board.snake.len(), 4);
    }

    #[test]
    fn test_static_obstacle_is_fatal() {
        let mut board = board_with(&[Cell::new(5, 5)], Direction::Right, FieldSize::new(20, 20));
        board.obstacles.statics.push(StaticObstacle::run(Cell::new(6, 5), 3));
        assert_eq!(board.step(None), TickResult::Fatal(FatalCause::Obstacle));
        assert_eq!(board.snake.head(), Cell::new(5, 5));
    }

    #[test]
    fn test_moving_obstacle_only_blocks_current_cell() {
        let mut board = board_with(&[Cell::new(5, 5)], Direction::Right, FieldSize::new(20, 20));
        board
            .obstacles
            .movers
            .push(MovingObstacle::new(Cell::new(6, 5), 6, Duration::from_millis(800)));
        board.advance_timers(Duration::from_millis(800));
        assert!(!board.step(None).is_fatal());
    }

    #[test]
    fn test_bonus_collected_without_growth() {
        let mut board = board_with(&[Cell::new(5, 5), Cell::new(4, 5)], Direction::Right, FieldSize::new(20, 20));
        let rule = BonusRule {
            kind: BonusKind::Coin,
            every: 30,
            value: 15,
            lifespan_ms: 20_000,
            relocate_every_ms: Some(1_000),
        };
        board.bonuses.push(Bonus::spawn(&rule, Cell::new(6, 5)));

        let result = board.step(None);

        assert_eq!(
            result,
            TickResult::Moved {
                head: Cell::new(6, 5),
                food_eaten: None,
                bonus_collected: Some(CollectedBonus { kind: BonusKind::Coin, value: 15 }),
            }
        );
        assert_eq!(board.snake.len(), 2);
        assert!(board.bonuses.is_empty());
    }

    #[test]
    fn test_advance_timers_reports_expiry() {
        let mut board = board_with(&[Cell::new(5, 5)], Direction::Right, FieldSize::new(20, 20));
        let rule = BonusRule {
            kind: BonusKind::ExtraLife,
            every: 100,
            value: 1,
            lifespan_ms: 3_000,
            relocate_every_ms: None,
        };
        board.bonuses.push(Bonus::spawn(&rule, Cell::new(9, 9)));
        let (expired, _) = board.advance_timers(Duration::from_millis(3_000));
        assert_eq!(expired, vec![BonusKind::ExtraLife]);
        assert!(!board.has_bonus(BonusKind::ExtraLife));
    }
}
