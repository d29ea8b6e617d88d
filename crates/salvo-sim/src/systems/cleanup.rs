//! Cleanup system: removes every entity flagged destroyed.
//!
//! This is the only place entities leave the world.

use hecs::{Entity, World};

use salvo_core::components::{Lifecycle, Missile, MissileOwner};

use super::wave_spawner::WaveState;

/// Despawn destroyed entities and release their wave slots.
/// Uses a pre-allocated buffer to avoid per-frame allocation.
pub fn run(world: &mut World, wave: &mut WaveState, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, life) in world.query_mut::<&Lifecycle>() {
        if life.is_destroyed() {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let enemy = world
            .get::<&Missile>(entity)
            .map(|m| m.owner == MissileOwner::Enemy)
            .unwrap_or(false);
        if world.despawn(entity).is_ok() && enemy {
            wave.enemy_reaped();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;
    use salvo_core::components::DestroyCause;

    use crate::world_setup;

    #[test]
    fn only_destroyed_entities_are_removed() {
        let mut world = World::new();
        let keep = world_setup::spawn_cannon(&mut world, 0, DVec2::new(0.0, 0.0), 3);
        let gone = world_setup::spawn_building(&mut world, 0, DVec2::new(50.0, 0.0));
        world
            .get::<&mut Lifecycle>(gone)
            .unwrap()
            .destroy(DestroyCause::Explosion);

        let mut wave = WaveState::default();
        let mut buffer = Vec::new();
        run(&mut world, &mut wave, &mut buffer);

        assert!(world.contains(keep));
        assert!(!world.contains(gone));
        assert!(buffer.is_empty());
    }

    #[test]
    fn reaped_enemies_free_wave_slots() {
        let mut world = World::new();
        let mut wave = WaveState {
            active: 2,
            spawned: 2,
            ..Default::default()
        };
        for owner in [MissileOwner::Enemy, MissileOwner::Player] {
            let e = world_setup::spawn_free_missile(
                &mut world,
                owner,
                DVec2::new(10.0, 10.0),
                DVec2::new(0.0, 1.0),
            );
            world
                .get::<&mut Lifecycle>(e)
                .unwrap()
                .destroy(DestroyCause::OutOfBounds);
        }
        world_setup::spawn_free_missile(
            &mut world,
            MissileOwner::Enemy,
            DVec2::new(10.0, 10.0),
            DVec2::new(0.0, 1.0),
        );

        let mut buffer = Vec::new();
        run(&mut world, &mut wave, &mut buffer);

        assert_eq!(wave.active, 1);
        assert_eq!(world.len(), 1);
    }
}
