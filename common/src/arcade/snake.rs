use std::collections::{HashSet, VecDeque};

use super::types::{Cell, Direction};

#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Cell>,
    body_set: HashSet<Cell>,
    pub direction: Direction,
}

impl Snake {
    pub fn new(head: Cell, direction: Direction, length: usize) -> Self {
        let (dx, dy) = direction.opposite().unit_vector();
        let mut body = VecDeque::with_capacity(length.max(1));
        let mut body_set = HashSet::with_capacity(length.max(1));

        for i in 0..length.max(1) as i64 {
            let cell = Cell::new(
                (head.col as i64 + dx * i) as usize,
                (head.row as i64 + dy * i) as usize,
            );
            body.push_back(cell);
            body_set.insert(cell);
        }

        Self {
            body,
            body_set,
            direction,
        }
    }

    pub fn from_cells(cells: &[Cell], direction: Direction) -> Self {
        debug_assert!(!cells.is_empty(), "Snake needs at least one cell");
        Self {
            body: cells.iter().copied().collect(),
            body_set: cells.iter().copied().collect(),
            direction,
        }
    }

    pub fn head(&self) -> Cell {
        *self.body.front().expect("Snake body should never be empty")
    }

    pub fn tail(&self) -> Cell {
        *self.body.back().expect("Snake body should never be empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        self.body_set.contains(cell)
    }

    /// True when moving the head onto `cell` would hit the body. The tail is
    /// exempt unless the snake is about to grow, since it is vacated this tick.
    pub fn collides_with(&self, cell: &Cell, growing: bool) -> bool {
        self.body_set.contains(cell) && (growing || *cell != self.tail())
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }

    pub fn advance(&mut self, new_head: Cell, grow: bool) {
        if !grow {
            let tail = self
                .body
                .pop_back()
                .expect("Snake body should never be empty");
            self.body_set.remove(&tail);
        }
        self.body.push_front(new_head);
        self.body_set.insert(new_head);
    }
}
