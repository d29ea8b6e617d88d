//! Spawns requested during the update pass.
//!
//! Systems never insert into the world while they iterate it. They queue
//! here instead, and the engine merges the queue after lifecycle cleanup.

use hecs::World;

use salvo_core::events::GameEvent;
use salvo_core::geometry::Vector2;

use crate::world_setup;

#[derive(Debug, Default)]
pub struct PendingSpawns {
    explosions: Vec<Vector2>,
}

impl PendingSpawns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one explosion at `center` and report it.
    pub fn push_explosion(&mut self, center: Vector2, events: &mut Vec<GameEvent>) {
        self.explosions.push(center);
        events.push(GameEvent::ExplosionSpawned { center });
    }

    pub fn explosions(&self) -> &[Vector2] {
        &self.explosions
    }

    pub fn is_empty(&self) -> bool {
        self.explosions.is_empty()
    }

    pub fn clear(&mut self) {
        self.explosions.clear();
    }

    /// Insert everything queued into the world, in request order.
    pub fn merge_into(&mut self, world: &mut World, explosion_max_radius: f64) {
        for center in self.explosions.drain(..) {
            world_setup::spawn_explosion(world, center, explosion_max_radius);
        }
    }
}
