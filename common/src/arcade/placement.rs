use std::ops::Range;

use serde::Serialize;

use super::session_rng::SessionRng;
use super::settings::FoodTier;
use super::threshold_table::ThresholdTable;
use super::types::{Cell, FieldSize};

/// Rejected random samples tolerated before scanning for free cells.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 100;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Food {
    pub cell: Cell,
    pub points: u32,
    pub color: String,
    pub tier: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpawnArea {
    pub cols: Range<usize>,
    pub rows: Range<usize>,
}

impl SpawnArea {
    pub fn with_margin(field: FieldSize, margin: usize) -> Self {
        Self {
            cols: margin..field.width.saturating_sub(margin),
            rows: margin..field.height.saturating_sub(margin),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cols.is_empty() || self.rows.is_empty()
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        self.cols.contains(&cell.col) && self.rows.contains(&cell.row)
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.rows
            .clone()
            .flat_map(move |row| self.cols.clone().map(move |col| Cell::new(col, row)))
    }
}

/// Uniform free cell in `area`. Resamples on collision, then falls back to an
/// exhaustive scan so a crowded board cannot loop forever. `None` only when
/// every cell of the area is occupied.
pub fn place_free_cell(
    area: &SpawnArea,
    rng: &mut SessionRng,
    occupied: impl Fn(&Cell) -> bool,
) -> Option<Cell> {
    if area.is_empty() {
        return None;
    }

    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let cell = rng.random_cell(area.cols.clone(), area.rows.clone());
        if !occupied(&cell) {
            return Some(cell);
        }
    }

    let free: Vec<Cell> = area.cells().filter(|cell| !occupied(cell)).collect();
    rng.pick(&free).copied()
}

pub fn food_tier_for(score: u32, tiers: &ThresholdTable<FoodTier>) -> (usize, &FoodTier) {
    let index = tiers.index_of(score);
    (index, tiers.lookup(score))
}

pub fn place_food(
    score: u32,
    tiers: &ThresholdTable<FoodTier>,
    area: &SpawnArea,
    rng: &mut SessionRng,
    occupied: impl Fn(&Cell) -> bool,
) -> Option<Food> {
    let (tier, food_tier) = food_tier_for(score, tiers);
    let cell = place_free_cell(area, rng, occupied)?;
    Some(Food {
        cell,
        points: food_tier.points,
        color: food_tier.color.clone(),
        tier,
    })
}
