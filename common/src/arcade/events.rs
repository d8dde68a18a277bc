use serde::Serialize;

use super::settings::BonusKind;
use super::types::{Cell, FatalCause};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum GameEvent {
    FoodEaten { cell: Cell, points: u32, score: u32 },
    BonusSpawned { kind: BonusKind, cell: Cell },
    BonusRelocated { kind: BonusKind, cell: Cell },
    BonusCollected { kind: BonusKind, value: u32 },
    BonusExpired { kind: BonusKind },
    ObstacleSpawned { cells: Vec<Cell>, moving: bool },
    SpeedIncreased { tier: u32, interval_ms: u64 },
    TierIncreased { tier: usize, points: u32 },
    LevelChanged { level: u32, theme: String, background: String },
    Fatal { cause: FatalCause },
    LifeLost { lives_remaining: u32, score: u32 },
    GameReset { final_score: u32 },
}
