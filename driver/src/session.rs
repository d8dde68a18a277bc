use std::time::Duration;

use snake_arcade_common::arcade::{
    ArcadeGameState, EventSink, FatalConsequence, InputSource, RenderSink, TickOutcome,
};
use snake_arcade_common::log;
use tokio::time::{sleep, Instant};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub ticks: u64,
    pub best_score: u32,
    pub lives_lost: u32,
    pub games_over: u32,
}

impl SessionSummary {
    fn record(&mut self, outcome: &TickOutcome, score_before: u32, score_after: u32) {
        self.ticks += 1;
        self.best_score = self.best_score.max(score_before).max(score_after);
        match outcome.consequence {
            Some(FatalConsequence::LifeLost { .. }) => self.lives_lost += 1,
            Some(FatalConsequence::GameReset { .. }) => self.games_over += 1,
            None => {}
        }
    }
}

pub fn drive_tick(
    state: &mut ArcadeGameState,
    elapsed: Duration,
    input: &mut impl InputSource,
    render: &mut impl RenderSink,
    events: &mut impl EventSink,
) -> TickOutcome {
    for event in state.advance_time(elapsed) {
        events.notify(&event);
    }

    let requested = input.poll(state);
    let outcome = state.tick(requested);
    for event in &outcome.events {
        events.notify(event);
    }

    render.render(&state.snapshot());
    outcome
}

/// Delay before the next tick, re-read every tick since it shrinks with the
/// score.
pub fn next_sleep(state: &ArcadeGameState) -> Duration {
    state.tick_interval()
}

pub struct ArcadeSession;

impl ArcadeSession {
    /// Runs until `max_ticks` or Ctrl+C.
    pub async fn run(
        state: &mut ArcadeGameState,
        input: &mut impl InputSource,
        render: &mut impl RenderSink,
        events: &mut impl EventSink,
        max_ticks: Option<u64>,
    ) -> SessionSummary {
        let mut summary = SessionSummary::default();
        let mut last_tick = Instant::now();

        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            if max_ticks.is_some_and(|max| summary.ticks >= max) {
                break;
            }

            tokio::select! {
                _ = &mut shutdown => {
                    log!("Shutdown signal received, stopping after {} ticks", summary.ticks);
                    break;
                }
                _ = sleep(next_sleep(state)) => {}
            }

            let now = Instant::now();
            let elapsed = now.duration_since(last_tick);
            last_tick = now;

            let score_before = state.score();
            let outcome = drive_tick(state, elapsed, input, render, events);
            summary.record(&outcome, score_before, state.score());
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scripted_input::ScriptedInput;
    use snake_arcade_common::arcade::{
        ArcadeSettings, ArcadeSnapshot, Bonus, BonusKind, Cell, Direction, Food, GameEvent,
        SessionRng, Snake,
    };

    #[derive(Default)]
    struct RecordingRender {
        frames: Vec<ArcadeSnapshot>,
    }

    impl RenderSink for RecordingRender {
        fn render(&mut self, snapshot: &ArcadeSnapshot) {
            self.frames.push(snapshot.clone());
        }
    }

    #[derive(Default)]
    struct RecordingEvents {
        events: Vec<GameEvent>,
    }

    impl EventSink for RecordingEvents {
        fn notify(&mut self, event: &GameEvent) {
            self.events.push(event.clone());
        }
    }

    fn create_state() -> ArcadeGameState {
        ArcadeGameState::new(ArcadeSettings::default(), SessionRng::new(42)).unwrap()
    }

    #[test]
    fn test_drive_tick_renders_each_tick() {
        let mut state = create_state();
        let mut input = ScriptedInput::parse("RRR").unwrap();
        let mut render = RecordingRender::default();
        let mut events = RecordingEvents::default();

        for _ in 0..3 {
            drive_tick(&mut state, Duration::from_millis(150), &mut input, &mut render, &mut events);
        }

        assert_eq!(render.frames.len(), 3);
        assert_eq!(render.frames[2].tick, 3);
        assert_eq!(render.frames[2].snake[0].col, 13);
    }

    #[test]
    fn test_drive_tick_forwards_fatal_and_reset_events() {
        let mut state = create_state();
        let mut input = ScriptedInput::parse("UUUUUUUUUUUUUUUUUUUU").unwrap();
        let mut render = RecordingRender::default();
        let mut events = RecordingEvents::default();
        let mut summary = SessionSummary::default();

        for _ in 0..20 {
            let before = state.score();
            let outcome = drive_tick(&mut state, Duration::from_millis(150), &mut input, &mut render, &mut events);
            summary.record(&outcome, before, state.score());
            if outcome.consequence.is_some() {
                break;
            }
        }

        assert!(events.events.iter().any(|e| matches!(e, GameEvent::Fatal { .. })));
        assert!(events.events.iter().any(|e| matches!(e, GameEvent::GameReset { .. })));
        assert_eq!(summary.games_over, 1);
    }

    fn food_ahead(state: &mut ArcadeGameState, points: u32) {
        let head = state.board().snake.head();
        state.board_mut().food = Some(Food {
            cell: Cell::new(head.col + 1, head.row),
            points,
            color: "#ff0000".to_string(),
            tier: 0,
        });
    }

    #[test]
    fn test_drive_tick_forwards_timer_events() {
        let mut state = create_state();
        let rule = state.settings().bonus_rule(BonusKind::Coin).unwrap().clone();
        // Row 0 is outside the item area, so the snake never runs into the coin.
        state.board_mut().snake = Snake::from_cells(&[Cell::new(30, 0)], Direction::Left);
        state.board_mut().bonuses.push(Bonus::spawn(&rule, Cell::new(30, 30)));
        let mut input = ScriptedInput::parse("..").unwrap();
        let mut render = RecordingRender::default();
        let mut events = RecordingEvents::default();

        drive_tick(&mut state, Duration::from_millis(1_000), &mut input, &mut render, &mut events);
        assert!(events
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::BonusRelocated { kind: BonusKind::Coin, .. })));
        assert_eq!(render.frames[0].bonuses.len(), 1);

        drive_tick(&mut state, Duration::from_millis(19_000), &mut input, &mut render, &mut events);
        assert!(events
            .events
            .contains(&GameEvent::BonusExpired { kind: BonusKind::Coin }));
        assert!(render.frames[1].bonuses.is_empty());
        assert_eq!(render.frames[1].direction, Direction::Left);
    }

    #[test]
    fn test_next_sleep_follows_score() {
        let mut state = create_state();
        let mut input = ScriptedInput::parse(".").unwrap();
        let mut render = RecordingRender::default();
        let mut events = RecordingEvents::default();
        assert_eq!(next_sleep(&state), Duration::from_millis(150));

        food_ahead(&mut state, 10);
        drive_tick(&mut state, Duration::from_millis(150), &mut input, &mut render, &mut events);

        assert_eq!(state.score(), 10);
        assert_eq!(next_sleep(&state), Duration::from_millis(140));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_sleeps_for_current_interval() {
        let mut state = create_state();
        food_ahead(&mut state, 10);
        let mut input = ScriptedInput::parse("..").unwrap();
        let mut render = RecordingRender::default();
        let mut events = RecordingEvents::default();

        let start = Instant::now();
        let summary =
            ArcadeSession::run(&mut state, &mut input, &mut render, &mut events, Some(2)).await;
        let elapsed = start.elapsed();

        assert_eq!(summary.ticks, 2);
        assert!(summary.best_score >= 10);
        assert!(elapsed >= Duration::from_millis(290));
        assert!(elapsed < Duration::from_millis(300));
    }
}
