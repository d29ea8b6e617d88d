//! ECS components for hecs entities.
//!
//! Components are plain data. Game logic lives in the simulation
//! systems; the only behaviour here is what keeps an invariant local
//! (the destroyed flag can only ever be set).

use serde::{Deserialize, Serialize};

use crate::geometry::{Circle, Rect, Vector2};

/// Position (top-left corner) and extent of an entity on the playfield.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vector2,
    pub size: Vector2,
}

impl Body {
    pub fn new(pos: Vector2, size: Vector2) -> Self {
        Self { pos, size }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_origin(self.pos, self.size)
    }
}

/// What ended an entity's life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DestroyCause {
    /// Missile left the playfield.
    OutOfBounds,
    /// Missile's impact countdown reached zero.
    Impact,
    /// Caught inside an explosion's radius.
    Explosion,
    /// Explosion reached the end of its lifetime.
    Expired,
}

/// The destroyed flag. Once set it is never cleared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lifecycle {
    destroyed: Option<DestroyCause>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.is_some()
    }

    /// The cause recorded by the first destruction, if any.
    pub fn cause(&self) -> Option<DestroyCause> {
        self.destroyed
    }

    /// Flag the entity destroyed. Returns `true` only for the call that
    /// actually flipped the flag; later causes are ignored.
    pub fn destroy(&mut self, cause: DestroyCause) -> bool {
        if self.destroyed.is_some() {
            return false;
        }
        self.destroyed = Some(cause);
        true
    }
}

/// A player cannon sitting on a hill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cannon {
    /// Hill index, left to right.
    pub slot: usize,
    /// Decremented on fire, never replenished.
    pub shots_left: u32,
}

/// A static building in a valley.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    /// Index, left to right.
    pub slot: usize,
}

/// Who launched a missile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MissileOwner {
    Player,
    Enemy,
}

/// A missile in flight.
///
/// `velocity` is fixed at construction; only an explosion can end the
/// flight before the countdown does.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Missile {
    pub owner: MissileOwner,
    pub launch: Vector2,
    pub target: Vector2,
    pub velocity: Vector2,
    /// Frames left until the missile detonates at its target. `None` flies
    /// until it leaves the playfield or is caught by an explosion.
    pub frames_until_impact: Option<u32>,
    /// Cannon that fired it (player missiles only).
    pub cannon_slot: Option<usize>,
}

/// A growing blast. The only thing in the game that destroys by contact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    pub center: Vector2,
    /// Always within `[0, max_radius]`.
    pub radius: f64,
    pub max_radius: f64,
    /// Frames since the explosion was created.
    pub timer: u32,
    /// Index into the configured colour cycle.
    pub color_index: usize,
}

impl Explosion {
    pub fn new(center: Vector2, max_radius: f64) -> Self {
        Self {
            center,
            radius: 0.0,
            max_radius: max_radius.max(0.0),
            timer: 0,
            color_index: 0,
        }
    }

    pub fn circle(&self) -> Circle {
        Circle::new(self.center.x, self.center.y, self.radius)
    }
}

/// Entity category, for events and snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Cannon,
    Building,
    PlayerMissile,
    EnemyMissile,
    Explosion,
}

impl From<MissileOwner> for EntityKind {
    fn from(owner: MissileOwner) -> Self {
        match owner {
            MissileOwner::Player => EntityKind::PlayerMissile,
            MissileOwner::Enemy => EntityKind::EnemyMissile,
        }
    }
}
