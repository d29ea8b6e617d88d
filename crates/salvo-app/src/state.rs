//! State shared between the host thread and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use salvo_core::commands::PlayerCommand;
use salvo_core::state::FrameSnapshot;

/// Commands sent from the host to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    Player(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Handles the host keeps while the loop runs.
///
/// The sender sits behind a `Mutex` so the state can be shared across
/// threads; `mpsc::Sender` is `Send` but not `Sync`.
pub struct AppState {
    /// `None` until the game loop has been spawned.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Written by the game loop after every frame.
    pub latest_snapshot: Arc<Mutex<Option<FrameSnapshot>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward a command to the loop. Returns `false` once the loop is gone.
    pub fn send(&self, command: GameLoopCommand) -> bool {
        match self.command_tx.lock() {
            Ok(guard) => guard
                .as_ref()
                .map(|tx| tx.send(command).is_ok())
                .unwrap_or(false),
            Err(_) => false,
        }
    }

    /// Clone of the most recent snapshot, if any frame has run.
    pub fn snapshot(&self) -> Option<FrameSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|s| s.clone())
    }
}
