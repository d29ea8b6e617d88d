//! Entity spawn factories for setting up the simulation world.
//!
//! Every entity carries a `Body` and a `Lifecycle` plus exactly one kind
//! component (`Cannon`, `Building`, `Missile` or `Explosion`).

use glam::DVec2;
use hecs::World;

use salvo_core::components::*;
use salvo_core::constants::*;
use salvo_core::geometry::Vector2;
use salvo_core::terrain::Terrain;

use crate::trajectory::Trajectory;

/// Populate a fresh world with the run's cannons and buildings.
pub fn setup_run(world: &mut World, terrain: &Terrain) {
    for (slot, origin) in terrain.building_origins.iter().enumerate() {
        spawn_building(world, slot, *origin);
    }
    for (slot, origin) in terrain.cannon_origins.iter().enumerate() {
        spawn_cannon(world, slot, *origin, CANNON_SHOTS);
    }
}

pub fn spawn_cannon(world: &mut World, slot: usize, origin: Vector2, shots: u32) -> hecs::Entity {
    world.spawn((
        Cannon {
            slot,
            shots_left: shots,
        },
        Body::new(origin, DVec2::new(CANNON_WIDTH, CANNON_HEIGHT)),
        Lifecycle::new(),
    ))
}

pub fn spawn_building(world: &mut World, slot: usize, origin: Vector2) -> hecs::Entity {
    spawn_building_sized(
        world,
        slot,
        origin,
        DVec2::new(BUILDING_WIDTH, BUILDING_HEIGHT),
    )
}

pub fn spawn_building_sized(
    world: &mut World,
    slot: usize,
    origin: Vector2,
    size: Vector2,
) -> hecs::Entity {
    world.spawn((Building { slot }, Body::new(origin, size), Lifecycle::new()))
}

/// Spawn a missile at `launch` flying along a solved trajectory.
pub fn spawn_missile(
    world: &mut World,
    owner: MissileOwner,
    launch: Vector2,
    target: Vector2,
    trajectory: &Trajectory,
    cannon_slot: Option<usize>,
) -> hecs::Entity {
    world.spawn((
        Missile {
            owner,
            launch,
            target,
            velocity: trajectory.velocity,
            frames_until_impact: Some(trajectory.frames_until_impact),
            cannon_slot,
        },
        Body::new(launch, DVec2::new(MISSILE_WIDTH, MISSILE_HEIGHT)),
        Lifecycle::new(),
    ))
}

/// Spawn a missile with no impact countdown; it flies until it leaves the
/// playfield or an explosion catches it.
pub fn spawn_free_missile(
    world: &mut World,
    owner: MissileOwner,
    launch: Vector2,
    velocity: Vector2,
) -> hecs::Entity {
    world.spawn((
        Missile {
            owner,
            launch,
            target: launch,
            velocity,
            frames_until_impact: None,
            cannon_slot: None,
        },
        Body::new(launch, DVec2::new(MISSILE_WIDTH, MISSILE_HEIGHT)),
        Lifecycle::new(),
    ))
}

pub fn spawn_explosion(world: &mut World, center: Vector2, max_radius: f64) -> hecs::Entity {
    world.spawn((
        Explosion::new(center, max_radius),
        Body::new(center, DVec2::ZERO),
        Lifecycle::new(),
    ))
}
