use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use salvo_app::autopilot::Autopilot;
use salvo_app::game_loop::{self, LoopOptions};
use salvo_app::state::AppState;
use salvo_core::config::GameConfig;
use salvo_core::error::ConfigError;
use salvo_sim::{SimConfig, SimulationEngine};

const DEFAULT_FRAMES: u64 = 60 * 60;
const POLL_INTERVAL: Duration = Duration::from_millis(50);

struct Args {
    config: Option<String>,
    frames: u64,
}

/// `salvo-app [config.json] [frames]`. A lone numeric argument is the frame count.
fn parse_args(args: impl IntoIterator<Item = String>) -> Args {
    let mut parsed = Args {
        config: None,
        frames: DEFAULT_FRAMES,
    };
    for arg in args {
        match arg.parse::<u64>() {
            Ok(frames) => parsed.frames = frames,
            Err(_) => parsed.config = Some(arg),
        }
    }
    parsed
}

fn load_config(path: Option<&str>) -> Result<GameConfig, ConfigError> {
    match path {
        Some(path) => {
            log::info!("loading config from {path}");
            GameConfig::load(path)
        }
        None => Ok(GameConfig::default()),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args(std::env::args().skip(1));
    let game = match load_config(args.config.as_deref()) {
        Ok(game) => game,
        Err(e) => {
            log::error!("invalid config: {e}");
            return ExitCode::FAILURE;
        }
    };

    let engine = match SimulationEngine::new(SimConfig {
        game,
        ..Default::default()
    }) {
        Ok(engine) => engine,
        Err(e) => {
            log::error!("cannot start simulation: {e}");
            return ExitCode::FAILURE;
        }
    };

    let state = AppState::new();
    let options = LoopOptions {
        max_frames: None,
        paced: true,
        autopilot: Some(Autopilot::default()),
    };
    let (tx, handle) =
        match game_loop::spawn_game_loop(engine, options, Arc::clone(&state.latest_snapshot)) {
            Ok(spawned) => spawned,
            Err(e) => {
                log::error!("failed to spawn game loop thread: {e}");
                return ExitCode::FAILURE;
            }
        };
    if let Ok(mut slot) = state.command_tx.lock() {
        *slot = Some(tx);
    }

    let summary = match game_loop::supervise(&state, handle, args.frames, POLL_INTERVAL) {
        Ok(summary) => summary,
        Err(_) => {
            log::error!("game loop thread panicked");
            return ExitCode::FAILURE;
        }
    };

    log::info!(
        "finished after {} frames: {:?} on level {} with score {} ({} draw calls)",
        summary.frames,
        summary.phase,
        summary.level + 1,
        summary.score,
        summary.draws.total()
    );
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::warn!("could not serialise summary: {e}"),
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Args {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_args() {
        let a = args(&[]);
        assert!(a.config.is_none());
        assert_eq!(a.frames, DEFAULT_FRAMES);

        let a = args(&["levels.json", "120"]);
        assert_eq!(a.config.as_deref(), Some("levels.json"));
        assert_eq!(a.frames, 120);

        assert_eq!(args(&["300"]).frames, 300);
    }

    #[test]
    fn test_missing_config_file_is_io_error() {
        let err = load_config(Some("/nonexistent/salvo.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
        assert!(load_config(None).is_ok());
    }
}
