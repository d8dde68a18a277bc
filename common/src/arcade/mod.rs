mod board;
mod bonus;
mod events;
mod game_state;
mod obstacle;
mod placement;
mod progression;
mod session_rng;
mod settings;
mod sinks;
mod snake;
mod snapshot;
mod spawner;
mod threshold_table;
mod timers;
mod types;

pub use board::{Board, CollectedBonus, TickResult};
pub use bonus::{Bonus, BonusView};
pub use events::GameEvent;
pub use game_state::{ArcadeGameState, FatalConsequence, TickOutcome};
pub use obstacle::{MovingObstacle, Obstacles, StaticObstacle};
pub use placement::{place_food, place_free_cell, Food, SpawnArea, MAX_PLACEMENT_ATTEMPTS};
pub use progression::{Progression, ProgressionUpdate};
pub use session_rng::SessionRng;
pub use settings::{
    ArcadeSettings, BonusKind, BonusRule, FieldSettings, FoodTier, LevelTheme, LivesSettings,
    ObstacleSettings, SnakeSettings, SoftResetPolicy, SpeedSettings,
};
pub use sinks::{EventSink, InputSource, RenderSink};
pub use snake::Snake;
pub use snapshot::ArcadeSnapshot;
pub use spawner::Spawner;
pub use threshold_table::{Threshold, ThresholdTable};
pub use types::{BoundaryMode, Cell, Direction, FatalCause, FieldSize};
