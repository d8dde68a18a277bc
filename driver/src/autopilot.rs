use snake_arcade_common::arcade::{
    ArcadeGameState, Board, BoundaryMode, Cell, Direction, InputSource, SessionRng,
};

/// Heads for the food along the shortest safe step, falling back to any safe
/// step and finally to the current direction.
pub struct Autopilot {
    rng: SessionRng,
}

impl Autopilot {
    pub fn new(rng: SessionRng) -> Self {
        Self { rng }
    }

    pub fn calculate_move(&mut self, board: &Board) -> Direction {
        let current = board.snake.direction;
        let safe: Vec<Direction> = Self::valid_directions(current)
            .into_iter()
            .filter(|&dir| Self::is_safe(board, dir))
            .collect();

        if let Some(food) = board.food.as_ref().map(|f| f.cell)
            && let Some(best) = safe
                .iter()
                .copied()
                .filter_map(|dir| board.next_head(dir).map(|cell| (dir, cell)))
                .min_by_key(|(_, cell)| Self::distance(board, *cell, food))
                .map(|(dir, _)| dir)
        {
            return best;
        }

        self.rng.pick(&safe).copied().unwrap_or(current)
    }

    fn valid_directions(current: Direction) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|d| !d.is_opposite(&current))
            .collect()
    }

    fn is_safe(board: &Board, direction: Direction) -> bool {
        let Some(next) = board.next_head(direction) else {
            return false;
        };
        let growing = board.food.as_ref().is_some_and(|f| f.cell == next);
        !board.snake.collides_with(&next, growing) && !board.obstacles.reserves(&next)
    }

    fn distance(board: &Board, a: Cell, b: Cell) -> usize {
        let dx = a.col.abs_diff(b.col);
        let dy = a.row.abs_diff(b.row);

        match board.boundary_mode {
            BoundaryMode::Death => dx + dy,
            BoundaryMode::WrapAround => {
                let width = board.field_size.width;
                let height = board.field_size.height;
                dx.min(width - dx) + dy.min(height - dy)
            }
        }
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, state: &ArcadeGameState) -> Option<Direction> {
        Some(self.calculate_move(state.board()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_arcade_common::arcade::{FieldSize, Food, Snake, StaticObstacle};

    fn board(cells: &[Cell], direction: Direction, mode: BoundaryMode) -> Board {
        Board::new(FieldSize::new(20, 20), mode, Snake::from_cells(cells, direction))
    }

    fn food_at(cell: Cell) -> Food {
        Food {
            cell,
            points: 1,
            color: "#ff0000".to_string(),
            tier: 0,
        }
    }

    #[test]
    fn test_turns_towards_food() {
        let mut board = board(&[Cell::new(5, 5), Cell::new(4, 5)], Direction::Right, BoundaryMode::Death);
        board.food = Some(food_at(Cell::new(5, 12)));
        let mut autopilot = Autopilot::new(SessionRng::new(42));
        assert_eq!(autopilot.calculate_move(&board), Direction::Down);
    }

    #[test]
    fn test_avoids_wall() {
        let mut board = board(&[Cell::new(19, 5), Cell::new(18, 5)], Direction::Right, BoundaryMode::Death);
        board.food = Some(food_at(Cell::new(19, 0)));
        let mut autopilot = Autopilot::new(SessionRng::new(42));
        assert_eq!(autopilot.calculate_move(&board), Direction::Up);
    }

    #[test]
    fn test_wraps_when_shorter() {
        let mut board = board(&[Cell::new(1, 5), Cell::new(1, 6)], Direction::Up, BoundaryMode::WrapAround);
        board.food = Some(food_at(Cell::new(18, 5)));
        let mut autopilot = Autopilot::new(SessionRng::new(42));
        assert_eq!(autopilot.calculate_move(&board), Direction::Left);
    }

    #[test]
    fn test_avoids_obstacles() {
        let mut board = board(&[Cell::new(5, 5), Cell::new(4, 5)], Direction::Right, BoundaryMode::Death);
        board.food = Some(food_at(Cell::new(10, 5)));
        board.obstacles.statics.push(StaticObstacle::run(Cell::new(6, 5), 1));
        let mut autopilot = Autopilot::new(SessionRng::new(42));
        let choice = autopilot.calculate_move(&board);
        assert!(choice == Direction::Up || choice == Direction::Down);
    }

    #[test]
    fn test_boxed_in_keeps_direction() {
        let mut board = board(&[Cell::new(0, 0), Cell::new(1, 0)], Direction::Left, BoundaryMode::Death);
        board.obstacles.statics.push(StaticObstacle::run(Cell::new(0, 1), 1));
        let mut autopilot = Autopilot::new(SessionRng::new(42));
        assert_eq!(autopilot.calculate_move(&board), Direction::Left);
    }
}
