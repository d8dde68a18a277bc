use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::Validate;
use super::threshold_table::ThresholdTable;
use super::types::{BoundaryMode, Cell, Direction, FieldSize};

pub const MIN_FIELD_SIDE: usize = 5;
pub const MAX_FIELD_SIDE: usize = 500;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldSettings {
    pub width: usize,
    pub height: usize,
    pub boundary_mode: BoundaryMode,
    /// Cells kept clear along every edge when spawning food and bonuses.
    pub spawn_margin: usize,
    /// Cells kept clear along every edge when spawning obstacles.
    pub obstacle_margin: usize,
}

impl FieldSettings {
    pub fn size(&self) -> FieldSize {
        FieldSize::new(self.width, self.height)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnakeSettings {
    pub start_col: usize,
    pub start_row: usize,
    pub start_length: usize,
    pub start_direction: Direction,
}

impl SnakeSettings {
    pub fn start_cell(&self) -> Cell {
        Cell::new(self.start_col, self.start_row)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeedSettings {
    pub base_interval_ms: u64,
    pub floor_interval_ms: u64,
    pub step_ms: u64,
    pub points_per_tier: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FoodTier {
    pub points: u32,
    pub color: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelTheme {
    pub level: u32,
    pub name: String,
    pub background: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusKind {
    Coin,
    ExtraLife,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BonusRule {
    pub kind: BonusKind,
    pub every: u32,
    pub value: u32,
    pub lifespan_ms: u64,
    pub relocate_every_ms: Option<u64>,
}

impl BonusRule {
    pub fn lifespan(&self) -> Duration {
        Duration::from_millis(self.lifespan_ms)
    }

    pub fn relocate_every(&self) -> Option<Duration> {
        self.relocate_every_ms.map(Duration::from_millis)
    }

    pub fn triggers_at(&self, score: u32) -> bool {
        score > 0 && score % self.every == 0
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSettings {
    pub static_every: Option<u32>,
    pub static_length: usize,
    pub moving_every: Option<u32>,
    pub patrol_span: usize,
    pub patrol_leg_ms: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SoftResetPolicy {
    #[default]
    KeepProgress,
    ReplayNotifications,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LivesSettings {
    pub initial: u32,
    pub soft_reset_policy: SoftResetPolicy,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArcadeSettings {
    pub field: FieldSettings,
    pub snake: SnakeSettings,
    pub speed: SpeedSettings,
    pub food_tiers: ThresholdTable<FoodTier>,
    pub levels: ThresholdTable<LevelTheme>,
    pub bonuses: Vec<BonusRule>,
    pub obstacles: ObstacleSettings,
    pub lives: LivesSettings,
    pub seed: Option<u64>,
}

fn food_tier(points: u32, color: &str) -> FoodTier {
    FoodTier {
        points,
        color: color.to_string(),
    }
}

fn theme(level: u32, name: &str, background: &str) -> LevelTheme {
    LevelTheme {
        level,
        name: name.to_string(),
        background: background.to_string(),
    }
}

pub fn default_food_tiers() -> ThresholdTable<FoodTier> {
    ThresholdTable::from_pairs([
        (29, food_tier(1, "#ff0000")),
        (59, food_tier(2, "#ffa500")),
        (89, food_tier(3, "#ffff00")),
        (119, food_tier(4, "#00ff00")),
        (149, food_tier(5, "#0000ff")),
        (179, food_tier(6, "#800080")),
        (209, food_tier(7, "#ff69b4")),
        (239, food_tier(10, "#ffffff")),
    ])
    .expect("Default food tiers should be valid")
}

pub fn default_levels() -> ThresholdTable<LevelTheme> {
    ThresholdTable::from_pairs([
        (99, theme(1, "Bubbles", "#001f3f")),
        (249, theme(2, "Flowers", "#2ecc40")),
        (449, theme(3, "Cacti", "#f1c40f")),
        (699, theme(4, "Street Lights", "#7f8c8d")),
        (999, theme(5, "Stars", "#000000")),
        (1000, theme(6, "Fire", "#8B0000")),
    ])
    .expect("Default levels should be valid")
}

impl Default for ArcadeSettings {
    fn default() -> Self {
        Self {
            field: FieldSettings {
                width: 50,
                height: 37,
                boundary_mode: BoundaryMode::Death,
                spawn_margin: 1,
                obstacle_margin: 2,
            },
            snake: SnakeSettings {
                start_col: 10,
                start_row: 18,
                start_length: 3,
                start_direction: Direction::Right,
            },
            speed: SpeedSettings {
                base_interval_ms: 150,
                floor_interval_ms: 55,
                step_ms: 10,
                points_per_tier: 10,
            },
            food_tiers: default_food_tiers(),
            levels: default_levels(),
            bonuses: vec![
                BonusRule {
                    kind: BonusKind::Coin,
                    every: 30,
                    value: 15,
                    lifespan_ms: 20_000,
                    relocate_every_ms: Some(1_000),
                },
                BonusRule {
                    kind: BonusKind::ExtraLife,
                    every: 100,
                    value: 1,
                    lifespan_ms: 3_000,
                    relocate_every_ms: None,
                },
            ],
            obstacles: ObstacleSettings {
                static_every: Some(30),
                static_length: 3,
                moving_every: Some(60),
                patrol_span: 6,
                patrol_leg_ms: 800,
            },
            lives: LivesSettings {
                initial: 1,
                soft_reset_policy: SoftResetPolicy::KeepProgress,
            },
            seed: None,
        }
    }
}

impl ArcadeSettings {
    pub fn bonus_rule(&self, kind: BonusKind) -> Option<&BonusRule> {
        self.bonuses.iter().find(|rule| rule.kind == kind)
    }

    fn validate_field(&self) -> Result<(), String> {
        let field = &self.field;
        if !(MIN_FIELD_SIDE..=MAX_FIELD_SIDE).contains(&field.width) {
            return Err(format!(
                "Field width must be between {} and {}",
                MIN_FIELD_SIDE, MAX_FIELD_SIDE
            ));
        }
        if !(MIN_FIELD_SIDE..=MAX_FIELD_SIDE).contains(&field.height) {
            return Err(format!(
                "Field height must be between {} and {}",
                MIN_FIELD_SIDE, MAX_FIELD_SIDE
            ));
        }
        if field.width <= 2 * field.spawn_margin || field.height <= 2 * field.spawn_margin {
            return Err("Spawn margin leaves no room for food".to_string());
        }
        if field.width <= 2 * field.obstacle_margin || field.height <= 2 * field.obstacle_margin {
            return Err("Obstacle margin leaves no room for obstacles".to_string());
        }
        Ok(())
    }

    fn validate_snake(&self) -> Result<(), String> {
        let snake = &self.snake;
        if snake.start_length < 1 {
            return Err("Snake start length must be at least 1".to_string());
        }
        let size = self.field.size();
        if !size.contains(&snake.start_cell()) {
            return Err("Snake start position must be inside the field".to_string());
        }
        let (dx, dy) = snake.start_direction.opposite().unit_vector();
        let reach = snake.start_length as i64 - 1;
        let tail_col = snake.start_col as i64 + dx * reach;
        let tail_row = snake.start_row as i64 + dy * reach;
        if tail_col < 0 || tail_row < 0 || tail_col >= size.width as i64 || tail_row >= size.height as i64 {
            return Err("Snake start body must fit inside the field".to_string());
        }
        Ok(())
    }

    fn validate_speed(&self) -> Result<(), String> {
        let speed = &self.speed;
        if speed.floor_interval_ms == 0 {
            return Err("Floor interval must be positive".to_string());
        }
        if speed.floor_interval_ms > speed.base_interval_ms {
            return Err("Floor interval must not exceed base interval".to_string());
        }
        if speed.step_ms == 0 {
            return Err("Speed step must be positive".to_string());
        }
        if speed.points_per_tier == 0 {
            return Err("Points per speed tier must be positive".to_string());
        }
        Ok(())
    }

    fn validate_tables(&self) -> Result<(), String> {
        self.food_tiers
            .validate()
            .map_err(|e| format!("Food tiers: {}", e))?;
        let points: Vec<u32> = self.food_tiers.values().map(|t| t.points).collect();
        if points.windows(2).any(|pair| pair[1] < pair[0]) {
            return Err("Food tier points must not decrease".to_string());
        }

        self.levels.validate().map_err(|e| format!("Levels: {}", e))?;
        let levels: Vec<u32> = self.levels.values().map(|t| t.level).collect();
        if levels.windows(2).any(|pair| pair[1] <= pair[0]) {
            return Err("Levels must be strictly increasing".to_string());
        }
        Ok(())
    }

    fn validate_bonuses(&self) -> Result<(), String> {
        for (i, rule) in self.bonuses.iter().enumerate() {
            if self.bonuses[..i].iter().any(|other| other.kind == rule.kind) {
                return Err(format!("Bonus {:?} is configured twice", rule.kind));
            }
            if rule.every == 0 {
                return Err(format!("Bonus {:?} spawn period must be positive", rule.kind));
            }
            if rule.lifespan_ms == 0 {
                return Err(format!("Bonus {:?} lifespan must be positive", rule.kind));
            }
            if rule.relocate_every_ms == Some(0) {
                return Err(format!("Bonus {:?} relocation period must be positive", rule.kind));
            }
        }
        Ok(())
    }

    fn validate_obstacles(&self) -> Result<(), String> {
        let obstacles = &self.obstacles;
        let usable_width = self.field.width - 2 * self.field.obstacle_margin;
        if obstacles.static_every == Some(0) || obstacles.moving_every == Some(0) {
            return Err("Obstacle spawn periods must be positive".to_string());
        }
        if obstacles.static_every.is_some()
            && (obstacles.static_length == 0 || obstacles.static_length > usable_width)
        {
            return Err("Static obstacle length must fit inside the obstacle area".to_string());
        }
        if obstacles.moving_every.is_some() {
            if obstacles.patrol_span == 0 || obstacles.patrol_span >= usable_width {
                return Err("Patrol span must fit inside the obstacle area".to_string());
            }
            if obstacles.patrol_leg_ms == 0 {
                return Err("Patrol leg duration must be positive".to_string());
            }
        }
        Ok(())
    }
}

impl Validate for ArcadeSettings {
    fn validate(&self) -> Result<(), String> {
        self.validate_field()?;
        self.validate_snake()?;
        self.validate_speed()?;
        self.validate_tables()?;
        self.validate_bonuses()?;
        self.validate_obstacles()?;
        if self.lives.initial < 1 {
            return Err("Initial lives must be at least 1".to_string());
        }
        Ok(())
    }
}
