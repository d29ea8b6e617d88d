//! Snapshot system: queries the ECS world and builds a complete FrameSnapshot.
//!
//! This system is read-only. Views are sorted so two worlds with the same
//! history serialise identically regardless of archetype iteration order.

use hecs::World;

use salvo_core::components::*;
use salvo_core::events::GameEvent;
use salvo_core::geometry::Vector2;
use salvo_core::state::*;

use super::wave_spawner::WaveState;

/// Run-level values the world does not hold.
#[derive(Debug, Clone, Copy)]
pub struct RunInfo {
    pub frame: u64,
    pub phase: GamePhase,
    pub level: usize,
    pub score: u64,
    pub pointer: Vector2,
}

/// Build a FrameSnapshot of every live entity.
pub fn build_snapshot(
    world: &World,
    run: RunInfo,
    wave: &WaveState,
    events: Vec<GameEvent>,
) -> FrameSnapshot {
    FrameSnapshot {
        frame: run.frame,
        phase: run.phase,
        level: run.level,
        score: run.score,
        pointer: run.pointer,
        cannons: build_cannons(world),
        buildings: build_buildings(world),
        missiles: build_missiles(world),
        explosions: build_explosions(world),
        wave: WaveView {
            active_enemies: wave.active,
            spawned: wave.spawned,
            total: wave.total_enemies,
        },
        events,
    }
}

fn build_cannons(world: &World) -> Vec<CannonView> {
    let mut views: Vec<CannonView> = world
        .query::<(&Cannon, &Body, &Lifecycle)>()
        .iter()
        .filter(|(_, (_, _, life))| !life.is_destroyed())
        .map(|(_, (cannon, body, _))| CannonView {
            slot: cannon.slot,
            rect: body.rect(),
            shots_left: cannon.shots_left,
        })
        .collect();
    views.sort_by_key(|v| v.slot);
    views
}

fn build_buildings(world: &World) -> Vec<BuildingView> {
    let mut views: Vec<BuildingView> = world
        .query::<(&Building, &Body, &Lifecycle)>()
        .iter()
        .filter(|(_, (_, _, life))| !life.is_destroyed())
        .map(|(_, (building, body, _))| BuildingView {
            slot: building.slot,
            rect: body.rect(),
        })
        .collect();
    views.sort_by_key(|v| v.slot);
    views
}

/// Missiles ordered by owner, then launch point, then position.
fn build_missiles(world: &World) -> Vec<MissileView> {
    let mut missiles: Vec<(Missile, Body)> = world
        .query::<(&Missile, &Body, &Lifecycle)>()
        .iter()
        .filter(|(_, (_, _, life))| !life.is_destroyed())
        .map(|(_, (missile, body, _))| (*missile, *body))
        .collect();
    missiles.sort_by(|(a, ab), (b, bb)| {
        let key = |m: &Missile, body: &Body| {
            (
                m.owner == MissileOwner::Enemy,
                [m.launch.x, m.launch.y, body.pos.x, body.pos.y],
            )
        };
        let (ka, kb) = (key(a, ab), key(b, bb));
        ka.0.cmp(&kb.0).then_with(|| {
            ka.1.iter()
                .zip(kb.1.iter())
                .map(|(x, y)| x.total_cmp(y))
                .find(|o| o.is_ne())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    });
    missiles
        .into_iter()
        .map(|(missile, body)| MissileView {
            owner: missile.owner,
            rect: body.rect(),
            target: missile.target,
            frames_until_impact: missile.frames_until_impact,
        })
        .collect()
}

fn build_explosions(world: &World) -> Vec<ExplosionView> {
    let mut views: Vec<ExplosionView> = world
        .query::<(&Explosion, &Lifecycle)>()
        .iter()
        .filter(|(_, (_, life))| !life.is_destroyed())
        .map(|(_, (explosion, _))| ExplosionView {
            center: explosion.center,
            radius: explosion.radius,
            color_index: explosion.color_index,
        })
        .collect();
    views.sort_by(|a, b| {
        a.center
            .x
            .total_cmp(&b.center.x)
            .then(a.center.y.total_cmp(&b.center.y))
            .then(a.radius.total_cmp(&b.radius))
    });
    views
}
