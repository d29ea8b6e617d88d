//! Game loop thread: runs the simulation engine at 60Hz and publishes snapshots.
//!
//! The engine is moved into the thread, so nothing else touches it while a
//! frame runs. Commands arrive via an `mpsc` channel and are queued at the
//! start of each frame. Snapshots are stored in shared state for polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use serde::Serialize;

use salvo_core::constants::FRAME_RATE;
use salvo_core::state::{FrameSnapshot, GamePhase};
use salvo_sim::SimulationEngine;

use crate::autopilot::Autopilot;
use crate::state::{AppState, GameLoopCommand};
use crate::surface::{DrawStats, RecordingSurface};

/// Nominal duration of one frame.
pub const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / FRAME_RATE as u64);

#[derive(Debug, Clone, Default)]
pub struct LoopOptions {
    /// Stop after this many frames. `None` runs until shutdown.
    pub max_frames: Option<u64>,
    /// Sleep to hold the frame rate. Off for batch runs and tests.
    pub paced: bool,
    /// Drive the pointer automatically.
    pub autopilot: Option<Autopilot>,
}

/// How a loop ended.
#[derive(Debug, Clone, Serialize)]
pub struct LoopSummary {
    pub frames: u64,
    pub phase: GamePhase,
    pub level: usize,
    pub score: u64,
    pub draws: DrawStats,
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the handle yielding the loop's summary.
pub fn spawn_game_loop(
    engine: SimulationEngine,
    options: LoopOptions,
    latest_snapshot: Arc<Mutex<Option<FrameSnapshot>>>,
) -> std::io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<LoopSummary>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("salvo-game-loop".into())
        .spawn(move || run_game_loop(engine, cmd_rx, options, &latest_snapshot))?;

    Ok((cmd_tx, handle))
}

/// Watch a spawned loop from the host thread and stop it once `frame_limit`
/// frames have run or the run is decided.
///
/// The loop is told to stop through `state`, so it must have been spawned
/// with the sender stored in `state.command_tx`.
pub fn supervise(
    state: &AppState,
    handle: JoinHandle<LoopSummary>,
    frame_limit: u64,
    poll: Duration,
) -> std::thread::Result<LoopSummary> {
    while !handle.is_finished() {
        let done = state
            .snapshot()
            .is_some_and(|snap| snap.frame >= frame_limit || snap.phase.is_finished());
        if done {
            log::debug!("frame limit or end of run reached, stopping game loop");
            if !state.send(GameLoopCommand::Shutdown) {
                break;
            }
        }
        std::thread::sleep(poll);
    }
    handle.join()
}

/// The game loop. Runs until Shutdown, channel disconnect, the frame limit,
/// or the end of the run.
pub fn run_game_loop(
    mut engine: SimulationEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    mut options: LoopOptions,
    latest_snapshot: &Mutex<Option<FrameSnapshot>>,
) -> LoopSummary {
    let mut surface = RecordingSurface::new();
    let mut next_frame_time = Instant::now();
    let mut frames = 0u64;

    loop {
        // 1. Drain all pending commands
        let mut shutdown = false;
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Player(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    shutdown = true;
                    break;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }
        if shutdown {
            log::debug!("game loop shutting down after {frames} frames");
            break;
        }

        // 2. Advance one frame (engine handles pause semantics internally)
        let snapshot = engine.tick_on(&mut surface);
        frames += 1;

        // 3. Let the autopilot react for the next frame
        if let Some(pilot) = options.autopilot.as_mut() {
            engine.queue_commands(pilot.plan(&snapshot));
        }

        let finished = snapshot.phase.is_finished();

        // 4. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if finished || options.max_frames.is_some_and(|max| frames >= max) {
            break;
        }

        // 5. Sleep until the next frame
        if options.paced {
            next_frame_time += FRAME_DURATION;
            let now = Instant::now();
            if next_frame_time > now {
                std::thread::sleep(next_frame_time - now);
            } else if now - next_frame_time > FRAME_DURATION * 2 {
                // Too far behind; reset to avoid a catch-up spiral
                next_frame_time = now;
            }
        }
    }

    LoopSummary {
        frames,
        phase: engine.phase(),
        level: engine.level(),
        score: engine.score(),
        draws: surface.total,
    }
}
