use super::events::GameEvent;
use super::game_state::ArcadeGameState;
use super::snapshot::ArcadeSnapshot;
use super::types::Direction;

pub trait InputSource {
    fn poll(&mut self, state: &ArcadeGameState) -> Option<Direction>;
}

pub trait RenderSink {
    fn render(&mut self, snapshot: &ArcadeSnapshot);
}

pub trait EventSink {
    fn notify(&mut self, event: &GameEvent);
}
