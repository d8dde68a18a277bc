use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub col: usize,
    pub row: usize,
}

impl Cell {
    pub fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn unit_vector(&self) -> (i64, i64) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn is_opposite(&self, other: &Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
                | (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
        )
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn from_char(c: char) -> Option<Direction> {
        match c.to_ascii_uppercase() {
            'U' => Some(Direction::Up),
            'D' => Some(Direction::Down),
            'L' => Some(Direction::Left),
            'R' => Some(Direction::Right),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoundaryMode {
    #[default]
    Death,
    WrapAround,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FatalCause {
    Wall,
    SelfCollision,
    Obstacle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSize {
    pub width: usize,
    pub height: usize,
}

impl FieldSize {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        cell.col < self.width && cell.row < self.height
    }

    pub fn step(&self, from: Cell, direction: Direction, mode: BoundaryMode) -> Option<Cell> {
        let (dx, dy) = direction.unit_vector();
        let col = from.col as i64 + dx;
        let row = from.row as i64 + dy;
        let width = self.width as i64;
        let height = self.height as i64;

        match mode {
            BoundaryMode::Death => {
                if col < 0 || row < 0 || col >= width || row >= height {
                    None
                } else {
                    Some(Cell::new(col as usize, row as usize))
                }
            }
            BoundaryMode::WrapAround => Some(Cell::new(
                col.rem_euclid(width) as usize,
                row.rem_euclid(height) as usize,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_opposite() {
        assert!(Direction::Left.is_opposite(&Direction::Right));
        assert!(Direction::Up.is_opposite(&Direction::Down));
        assert!(!Direction::Up.is_opposite(&Direction::Left));
        assert!(!Direction::Up.is_opposite(&Direction::Up));
    }

    #[test]
    fn test_step_death_mode_stops_at_edges() {
        let field = FieldSize::new(5, 4);
        assert_eq!(field.step(Cell::new(0, 2), Direction::Left, BoundaryMode::Death), None);
        assert_eq!(field.step(Cell::new(4, 2), Direction::Right, BoundaryMode::Death), None);
        assert_eq!(field.step(Cell::new(2, 0), Direction::Up, BoundaryMode::Death), None);
        assert_eq!(field.step(Cell::new(2, 3), Direction::Down, BoundaryMode::Death), None);
        assert_eq!(
            field.step(Cell::new(2, 2), Direction::Right, BoundaryMode::Death),
            Some(Cell::new(3, 2))
        );
    }

    #[test]
    fn test_step_wrap_mode_reenters_opposite_edge() {
        let field = FieldSize::new(5, 4);
        let mode = BoundaryMode::WrapAround;
        assert_eq!(field.step(Cell::new(0, 2), Direction::Left, mode), Some(Cell::new(4, 2)));
        assert_eq!(field.step(Cell::new(4, 2), Direction::Right, mode), Some(Cell::new(0, 2)));
        assert_eq!(field.step(Cell::new(2, 0), Direction::Up, mode), Some(Cell::new(2, 3)));
        assert_eq!(field.step(Cell::new(2, 3), Direction::Down, mode), Some(Cell::new(2, 0)));
    }

    #[test]
    fn test_from_char() {
        assert_eq!(Direction::from_char('u'), Some(Direction::Up));
        assert_eq!(Direction::from_char('R'), Some(Direction::Right));
        assert_eq!(Direction::from_char('x'), None);
    }
}
