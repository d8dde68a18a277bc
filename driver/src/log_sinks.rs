use snake_arcade_common::arcade::{ArcadeSnapshot, EventSink, GameEvent, RenderSink};
use snake_arcade_common::log;

pub struct LogRenderSink {
    every: u64,
}

impl LogRenderSink {
    pub fn new(every: u64) -> Self {
        Self { every: every.max(1) }
    }
}

impl RenderSink for LogRenderSink {
    fn render(&mut self, snapshot: &ArcadeSnapshot) {
        if snapshot.tick % self.every == 0 {
            log!("{}", snapshot.summary());
        }
    }
}

pub struct LogEventSink;

impl EventSink for LogEventSink {
    fn notify(&mut self, event: &GameEvent) {
        match event {
            GameEvent::BonusRelocated { .. } => {}
            GameEvent::Fatal { cause } => log!("Fatal: {:?}", cause),
            GameEvent::GameReset { final_score } => log!("Game over with score {}", final_score),
            other => log!("{:?}", other),
        }
    }
}
