//! Demo autopilot: plays the pointer so a headless run has something to do.
//!
//! Aims at the lowest enemy on screen and clicks every `fire_every` frames.
//! Snapshots are in playfield coordinates while pointer commands carry
//! client coordinates, so the pilot adds the viewport offset it was given.

use salvo_core::commands::PlayerCommand;
use salvo_core::components::MissileOwner;
use salvo_core::geometry::Vector2;
use salvo_core::state::{FrameSnapshot, GamePhase};

#[derive(Debug, Clone)]
pub struct Autopilot {
    pub fire_every: u64,
    /// Pixels to aim below the enemy's center, to lead its fall.
    pub lead: f64,
    /// Playfield origin in client coordinates.
    pub viewport_offset: Vector2,
    last_fired: Option<u64>,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            fire_every: 45,
            lead: 30.0,
            viewport_offset: Vector2::ZERO,
            last_fired: None,
        }
    }
}

impl Autopilot {
    pub fn new(fire_every: u64) -> Self {
        Self {
            fire_every: fire_every.max(1),
            ..Default::default()
        }
    }

    /// Track the same offset sent with `PlayerCommand::ViewportChanged`.
    pub fn viewport_changed(&mut self, left: f64, top: f64) {
        self.viewport_offset = Vector2::new(left, top);
    }

    /// The enemy closest to the ground, if any.
    pub fn pick_target(snapshot: &FrameSnapshot) -> Option<Vector2> {
        snapshot
            .missiles
            .iter()
            .filter(|m| m.owner == MissileOwner::Enemy)
            .max_by(|a, b| a.rect.y.total_cmp(&b.rect.y))
            .map(|m| m.rect.center())
    }

    /// Commands to send after seeing `snapshot`.
    pub fn plan(&mut self, snapshot: &FrameSnapshot) -> Vec<PlayerCommand> {
        if !matches!(snapshot.phase, GamePhase::Active | GamePhase::LevelComplete) {
            return Vec::new();
        }
        let Some(target) = Self::pick_target(snapshot) else {
            return Vec::new();
        };
        let due = self
            .last_fired
            .map_or(true, |at| snapshot.frame.saturating_sub(at) >= self.fire_every);
        if !due {
            return Vec::new();
        }
        self.last_fired = Some(snapshot.frame);
        vec![
            PlayerCommand::PointerMoved {
                client_x: target.x + self.viewport_offset.x,
                client_y: target.y + self.lead + self.viewport_offset.y,
            },
            PlayerCommand::Fire,
        ]
    }
}
