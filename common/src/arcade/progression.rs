use std::time::Duration;

use super::events::GameEvent;
use super::placement::food_tier_for;
use super::settings::{FoodTier, LevelTheme, SpeedSettings};
use super::threshold_table::ThresholdTable;

#[derive(Clone, Debug, PartialEq)]
pub struct ProgressionUpdate {
    pub interval: Duration,
    pub level: u32,
    pub events: Vec<GameEvent>,
}

#[derive(Clone, Debug)]
pub struct Progression {
    speed: SpeedSettings,
    food_tiers: ThresholdTable<FoodTier>,
    levels: ThresholdTable<LevelTheme>,
    announced_speed_tier: u32,
    announced_food_points: u32,
    current_level: u32,
    interval: Duration,
}

impl Progression {
    pub fn new(
        speed: SpeedSettings,
        food_tiers: ThresholdTable<FoodTier>,
        levels: ThresholdTable<LevelTheme>,
    ) -> Self {
        let announced_food_points = food_tiers.first().points;
        let current_level = levels.first().level;
        let interval = Duration::from_millis(speed.base_interval_ms);
        Self {
            speed,
            food_tiers,
            levels,
            announced_speed_tier: 0,
            announced_food_points,
            current_level,
            interval,
        }
    }

    /// Tier at which the interval first reaches the floor.
    pub fn max_speed_tier(&self) -> u32 {
        let room = self.speed.base_interval_ms - self.speed.floor_interval_ms;
        room.div_ceil(self.speed.step_ms) as u32
    }

    pub fn speed_tier(&self, score: u32) -> u32 {
        (score / self.speed.points_per_tier).min(self.max_speed_tier())
    }

    pub fn interval_for(&self, score: u32) -> Duration {
        let reduction = self.speed_tier(score) as u64 * self.speed.step_ms;
        let ms = self
            .speed
            .base_interval_ms
            .saturating_sub(reduction)
            .max(self.speed.floor_interval_ms);
        Duration::from_millis(ms)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn level(&self) -> u32 {
        self.current_level
    }

    pub fn current_theme(&self) -> &LevelTheme {
        self.levels
            .values()
            .find(|theme| theme.level == self.current_level)
            .unwrap_or_else(|| self.levels.first())
    }

    pub fn on_score_changed(&mut self, score: u32) -> ProgressionUpdate {
        let mut events = Vec::new();

        self.interval = self.interval_for(score);
        let speed_tier = self.speed_tier(score);
        if speed_tier > self.announced_speed_tier {
            self.announced_speed_tier = speed_tier;
            events.push(GameEvent::SpeedIncreased {
                tier: speed_tier,
                interval_ms: self.interval.as_millis() as u64,
            });
        }

        let (tier, food_tier) = food_tier_for(score, &self.food_tiers);
        if food_tier.points > self.announced_food_points {
            self.announced_food_points = food_tier.points;
            events.push(GameEvent::TierIncreased {
                tier,
                points: food_tier.points,
            });
        }

        let theme = self.levels.lookup(score);
        if theme.level > self.current_level {
            self.current_level = theme.level;
            events.push(GameEvent::LevelChanged {
                level: theme.level,
                theme: theme.name.clone(),
                background: theme.background.clone(),
            });
        }

        ProgressionUpdate {
            interval: self.interval,
            level: self.current_level,
            events,
        }
    }

    pub fn reset(&mut self) {
        self.announced_speed_tier = 0;
        self.announced_food_points = self.food_tiers.first().points;
        self.current_level = self.levels.first().level;
        self.interval = Duration::from_millis(self.speed.base_interval_ms);
    }
}
