//! Head Bounce headless entry point
//!
//! Runs the game loop against a synthetic wandering head instead of a
//! camera. Usage: `head-bounce [settings.json]`

use std::process::ExitCode;

use head_bounce::tracker::WanderingHead;
use head_bounce::{Game, Settings};

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Head Bounce (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => {
            log::info!("No settings file given, using defaults");
            Settings::default()
        }
    };

    let mut game = match Game::new(&settings) {
        Ok(game) => game,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut locator = WanderingHead::new(
        settings.seed,
        settings.arena_width.round() as i32,
        settings.arena_height.round() as i32,
        settings.dropout,
        settings.detector,
        settings.dnn_confidence_threshold,
    );
    log::info!(
        "seed {}, detector {}, up to {} frames",
        settings.seed,
        settings.detector.as_str(),
        settings.max_frames
    );

    let summary = game.run(&mut locator, settings.max_frames);
    if summary.game_over {
        log::info!("Game over after {} frames", summary.frames);
    }

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            log::error!("failed to encode summary: {e}");
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
