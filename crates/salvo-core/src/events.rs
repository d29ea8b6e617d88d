//! Events emitted by the simulation for UI and audio feedback.

use serde::{Deserialize, Serialize};

use crate::components::{DestroyCause, EntityKind};
use crate::geometry::Vector2;

/// Something noteworthy that happened during a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A cannon fired an interceptor.
    MissileFired {
        cannon_slot: usize,
        target: Vector2,
        frames_until_impact: Option<u32>,
    },
    /// A click arrived while every cannon was empty.
    OutOfAmmo,
    /// An enemy missile entered the playfield.
    EnemySpawned { position: Vector2, target: Vector2 },
    /// An explosion was queued at `center`.
    ExplosionSpawned { center: Vector2 },
    /// An entity was flagged destroyed for the first time.
    Destroyed {
        kind: EntityKind,
        cause: DestroyCause,
        position: Vector2,
    },
    LevelStarted { level: usize },
    LevelCompleted { level: usize, buildings_left: u32 },
    GameOver { score: u64 },
    Victory { score: u64 },
}
