mod autopilot;
mod log_sinks;
mod scripted_input;
mod session;

use std::path::PathBuf;

use clap::Parser;
use snake_arcade_common::arcade::{ArcadeGameState, ArcadeSettings, BoundaryMode, SessionRng};
use snake_arcade_common::config::ConfigManager;
use snake_arcade_common::{log, logger};

use autopilot::Autopilot;
use log_sinks::{LogEventSink, LogRenderSink};
use scripted_input::ScriptedInput;
use session::{ArcadeSession, SessionSummary};

#[derive(Parser)]
#[command(name = "snake_arcade", about = "Headless driver for the snake arcade simulation")]
struct Args {
    /// YAML settings file; defaults are used when it does not exist.
    #[arg(long, default_value = "snake_arcade.yaml")]
    config: PathBuf,

    /// Write the default settings to --config and exit.
    #[arg(long)]
    write_default_config: bool,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    max_ticks: Option<u64>,

    /// Wrap around the field edges instead of dying on them.
    #[arg(long)]
    wrap: bool,

    /// Per-tick directions (U/D/L/R, '.' for none) instead of the autopilot.
    #[arg(long)]
    script: Option<String>,

    #[arg(long, default_value_t = 10)]
    render_every: u64,

    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Arcade".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let manager: ConfigManager<_, ArcadeSettings> = ConfigManager::from_yaml_file(args.config.clone());

    if args.write_default_config {
        manager.save(&ArcadeSettings::default())?;
        log!("Default settings written to {}", args.config.display());
        return Ok(());
    }

    let mut settings = manager.load()?;
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    if args.wrap {
        settings.field.boundary_mode = BoundaryMode::WrapAround;
    }

    let mut state = ArcadeGameState::from_settings(settings)?;
    log!(
        "Starting on a {}x{} field, seed {}",
        state.settings().field.width,
        state.settings().field.height,
        state.seed()
    );

    let mut render = LogRenderSink::new(args.render_every);
    let mut events = LogEventSink;

    let summary = match args.script {
        Some(script) => {
            let mut input = ScriptedInput::parse(&script)?;
            let max_ticks = args.max_ticks.or(Some(input.len() as u64));
            ArcadeSession::run(&mut state, &mut input, &mut render, &mut events, max_ticks).await
        }
        None => {
            let mut input = Autopilot::new(SessionRng::new(state.seed().wrapping_add(1)));
            ArcadeSession::run(&mut state, &mut input, &mut render, &mut events, args.max_ticks).await
        }
    };

    report(&summary, &state);
    Ok(())
}

fn report(summary: &SessionSummary, state: &ArcadeGameState) {
    log!(
        "Session finished: {} ticks, best score {}, lives lost {}, games over {}, current score {}",
        summary.ticks,
        summary.best_score,
        summary.lives_lost,
        summary.games_over,
        state.score()
    );
}
