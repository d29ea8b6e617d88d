//! Player commands sent from the host to the simulation.
//!
//! Commands are queued and processed at the next frame boundary, so
//! input never mutates entities mid-update.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Pointer ---
    /// Pointer moved; coordinates are absolute (screen/client space).
    PointerMoved { client_x: f64, client_y: f64 },
    /// The playfield moved on screen (resize/scroll). Replaces the cached offset.
    ViewportChanged { left: f64, top: f64 },
    /// Pointer click: fire the best-placed cannon at the pointer.
    Fire,

    // --- Run control ---
    Pause,
    Resume,
    /// Throw away the run and start again from the first level.
    Restart,
}
