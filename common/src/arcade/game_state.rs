use std::time::Duration;

use crate::config::Validate;
use crate::log;
use super::board::{Board, CollectedBonus, TickResult};
use super::events::GameEvent;
use super::progression::Progression;
use super::session_rng::SessionRng;
use super::settings::{ArcadeSettings, BonusKind, SoftResetPolicy};
use super::snake::Snake;
use super::snapshot::ArcadeSnapshot;
use super::spawner::Spawner;
use super::types::{Cell, Direction, FatalCause};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FatalConsequence {
    LifeLost { lives_remaining: u32 },
    GameReset { final_score: u32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct TickOutcome {
    pub result: TickResult,
    pub consequence: Option<FatalConsequence>,
    pub events: Vec<GameEvent>,
}

impl TickOutcome {
    pub fn fatal_cause(&self) -> Option<FatalCause> {
        match self.result {
            TickResult::Fatal(cause) => Some(cause),
            TickResult::Moved { .. } => None,
        }
    }
}

pub struct ArcadeGameState {
    settings: ArcadeSettings,
    board: Board,
    spawner: Spawner,
    progression: Progression,
    rng: SessionRng,
    score: u32,
    lives: u32,
    ticks: u64,
}

impl ArcadeGameState {
    pub fn new(settings: ArcadeSettings, rng: SessionRng) -> Result<Self, String> {
        settings
            .validate()
            .map_err(|e| format!("Invalid arcade settings: {}", e))?;

        let board = Board::new(
            settings.field.size(),
            settings.field.boundary_mode,
            Self::starting_snake(&settings),
        );
        let spawner = Spawner::new(&settings);
        let progression = Progression::new(
            settings.speed.clone(),
            settings.food_tiers.clone(),
            settings.levels.clone(),
        );
        let lives = settings.lives.initial;

        let mut state = Self {
            settings,
            board,
            spawner,
            progression,
            rng,
            score: 0,
            lives,
            ticks: 0,
        };
        state.spawner.place_food(&mut state.board, 0, &mut state.rng);
        log!("Arcade game created with seed {}", state.rng.seed());
        Ok(state)
    }

    pub fn from_settings(settings: ArcadeSettings) -> Result<Self, String> {
        let rng = match settings.seed {
            Some(seed) => SessionRng::new(seed),
            None => SessionRng::from_random(),
        };
        Self::new(settings, rng)
    }

    fn starting_snake(settings: &ArcadeSettings) -> Snake {
        Snake::new(
            settings.snake.start_cell(),
            settings.snake.start_direction,
            settings.snake.start_length,
        )
    }

    pub fn tick(&mut self, requested: Option<Direction>) -> TickOutcome {
        self.ticks += 1;
        let result = self.board.step(requested);
        let mut events = Vec::new();

        let consequence = match &result {
            TickResult::Moved {
                food_eaten,
                bonus_collected,
                ..
            } => {
                if let Some(food) = food_eaten {
                    self.on_food_eaten(food.points, food.cell, &mut events);
                }
                if let Some(bonus) = bonus_collected {
                    self.on_bonus_collected(*bonus, &mut events);
                }
                // A full area leaves the round without food until cells free up.
                if self.board.food.is_none() {
                    self.spawner.place_food(&mut self.board, self.score, &mut self.rng);
                }
                None
            }
            TickResult::Fatal(cause) => {
                events.push(GameEvent::Fatal { cause: *cause });
                Some(self.on_fatal(*cause, &mut events))
            }
        };

        TickOutcome {
            result,
            consequence,
            events,
        }
    }

    fn on_food_eaten(&mut self, points: u32, cell: Cell, events: &mut Vec<GameEvent>) {
        self.score += points;
        events.push(GameEvent::FoodEaten {
            cell,
            points,
            score: self.score,
        });
        events.extend(self.progression.on_score_changed(self.score).events);

        self.spawner.place_food(&mut self.board, self.score, &mut self.rng);
        events.extend(
            self.spawner
                .maybe_spawn_bonuses(&mut self.board, self.score, &mut self.rng),
        );
        events.extend(
            self.spawner
                .maybe_spawn_obstacles(&mut self.board, self.score, &mut self.rng),
        );
    }

    fn on_bonus_collected(&mut self, bonus: CollectedBonus, events: &mut Vec<GameEvent>) {
        events.push(GameEvent::BonusCollected {
            kind: bonus.kind,
            value: bonus.value,
        });
        match bonus.kind {
            BonusKind::Coin => {
                self.score += bonus.value;
                log!("Coin collected, score {}", self.score);
                events.extend(self.progression.on_score_changed(self.score).events);
            }
            BonusKind::ExtraLife => {
                self.lives += bonus.value;
                log!("Extra life collected, lives {}", self.lives);
            }
        }
    }

    fn on_fatal(&mut self, cause: FatalCause, events: &mut Vec<GameEvent>) -> FatalConsequence {
        self.lives = self.lives.saturating_sub(1);
        log!("Fatal collision ({:?}), lives left {}", cause, self.lives);

        if self.lives > 0 {
            self.soft_reset(events);
            events.push(GameEvent::LifeLost {
                lives_remaining: self.lives,
                score: self.score,
            });
            FatalConsequence::LifeLost {
                lives_remaining: self.lives,
            }
        } else {
            let final_score = self.score;
            self.reset();
            events.push(GameEvent::GameReset { final_score });
            FatalConsequence::GameReset { final_score }
        }
    }

    fn soft_reset(&mut self, events: &mut Vec<GameEvent>) {
        self.board.clear_round(Self::starting_snake(&self.settings));
        if self.settings.lives.soft_reset_policy == SoftResetPolicy::ReplayNotifications {
            self.progression.reset();
            events.extend(self.progression.on_score_changed(self.score).events);
        }
        self.spawner.place_food(&mut self.board, self.score, &mut self.rng);
    }

    pub fn reset(&mut self) {
        log!("Game reset, final score {}", self.score);
        self.score = 0;
        self.lives = self.settings.lives.initial;
        self.progression.reset();
        self.board.clear_round(Self::starting_snake(&self.settings));
        self.spawner.place_food(&mut self.board, 0, &mut self.rng);
    }

    /// Feeds elapsed time to bonus lifespans, coin relocation and patrols.
    pub fn advance_time(&mut self, dt: Duration) -> Vec<GameEvent> {
        if dt.is_zero() {
            return Vec::new();
        }

        let (expired, relocations) = self.board.advance_timers(dt);
        let mut events: Vec<GameEvent> = expired
            .into_iter()
            .map(|kind| {
                log!("{:?} bonus expired", kind);
                GameEvent::BonusExpired { kind }
            })
            .collect();

        for (index, _) in relocations {
            if let Some(event) = self.spawner.relocate_bonus(&mut self.board, index, &mut self.rng) {
                events.push(event);
            }
        }
        events
    }

    pub fn tick_interval(&self) -> Duration {
        self.progression.interval()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn level(&self) -> u32 {
        self.progression.level()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn settings(&self) -> &ArcadeSettings {
        &self.settings
    }

    pub fn snapshot(&self) -> ArcadeSnapshot {
        let theme = self.progression.current_theme();
        ArcadeSnapshot {
            tick: self.ticks,
            field_size: self.board.field_size,
            snake: self.board.snake.cells().copied().collect(),
            direction: self.board.snake.direction,
            food: self.board.food.clone(),
            bonuses: self.board.bonuses.iter().map(|b| b.view()).collect(),
            static_obstacles: self
                .board
                .obstacles
                .statics
                .iter()
                .flat_map(|o| o.cells.iter().copied())
                .collect(),
            moving_obstacles: self
                .board
                .obstacles
                .movers
                .iter()
                .map(|o| o.current_cell())
                .collect(),
            score: self.score,
            lives: self.lives,
            level: theme.level,
            theme: theme.name.clone(),
            background: theme.background.clone(),
            interval_ms: self.tick_interval().as_millis() as u64,
        }
    }

    #[cfg(any(test, feature = "test-support"))]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    fn set_score(&mut self, score: u32) {
        self.score = score;
        self.progression.on_score_changed(score);
    }
}
