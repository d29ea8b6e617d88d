//! Frame snapshot: the complete visible state handed to the host after each frame.

use serde::{Deserialize, Serialize};

use crate::components::MissileOwner;
use crate::events::GameEvent;
use crate::geometry::{Rect, Vector2};

/// Where the run currently stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Frames advance: spawning, updates, collisions.
    #[default]
    Active,
    /// Frames render but nothing moves.
    Paused,
    /// Current wave is exhausted; the next level starts after an intermission.
    LevelComplete,
    /// Every building was destroyed.
    GameOver,
    /// The last level was cleared.
    Victory,
}

impl GamePhase {
    /// Whether the run has ended.
    pub fn is_finished(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Victory)
    }
}

/// Complete state broadcast to the host after each frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameSnapshot {
    /// Frames advanced since the run started.
    pub frame: u64,
    pub phase: GamePhase,
    /// Zero-based level index.
    pub level: usize,
    pub score: u64,
    /// Pointer position in playfield coordinates.
    pub pointer: Vector2,
    pub cannons: Vec<CannonView>,
    pub buildings: Vec<BuildingView>,
    pub missiles: Vec<MissileView>,
    pub explosions: Vec<ExplosionView>,
    pub wave: WaveView,
    pub events: Vec<GameEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CannonView {
    pub slot: usize,
    pub rect: Rect,
    pub shots_left: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildingView {
    pub slot: usize,
    pub rect: Rect,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissileView {
    pub owner: MissileOwner,
    pub rect: Rect,
    pub target: Vector2,
    pub frames_until_impact: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplosionView {
    pub center: Vector2,
    pub radius: f64,
    pub color_index: usize,
}

/// Enemy wave progress for the current level.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    pub active_enemies: u32,
    pub spawned: u32,
    pub total: u32,
}
