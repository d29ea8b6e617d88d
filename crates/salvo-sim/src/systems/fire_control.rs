//! Fire control: turns a click into at most one interceptor launch.
//!
//! Every cannon with ammunition proposes a shot at the pointer. Only the
//! shot that arrives first is fired; the rest are discarded. Ties go to
//! the lowest cannon slot.

use glam::DVec2;
use hecs::World;

use salvo_core::components::{Body, Cannon, Lifecycle, MissileOwner};
use salvo_core::config::LevelConfig;
use salvo_core::events::GameEvent;
use salvo_core::geometry::Vector2;

use crate::trajectory::{self, Trajectory};
use crate::world_setup;

/// A shot a cannon could take.
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub cannon: hecs::Entity,
    pub slot: usize,
    pub launch: Vector2,
    pub trajectory: Trajectory,
}

/// Launch point of a cannon: top edge, horizontally centered.
pub fn muzzle(body: &Body) -> Vector2 {
    DVec2::new(body.pos.x + body.size.x / 2.0, body.pos.y)
}

/// Candidate shots from every live cannon with ammunition, ordered by slot.
pub fn candidates(world: &World, target: Vector2, speed: f64) -> Vec<Candidate> {
    let mut shots: Vec<Candidate> = Vec::new();
    for (cannon_entity, (cannon, body, life)) in
        world.query::<(&Cannon, &Body, &Lifecycle)>().iter()
    {
        if life.is_destroyed() || cannon.shots_left == 0 {
            continue;
        }
        let launch = muzzle(body);
        match trajectory::solve(launch, target, speed) {
            Ok(trajectory) => shots.push(Candidate {
                cannon: cannon_entity,
                slot: cannon.slot,
                launch,
                trajectory,
            }),
            Err(e) => log::warn!("cannon {} cannot fire: {e}", cannon.slot),
        }
    }
    shots.sort_by_key(|c| c.slot);
    shots
}

/// Whether any live cannon still has ammunition.
pub fn armed(world: &World) -> bool {
    world
        .query::<(&Cannon, &Lifecycle)>()
        .iter()
        .any(|(_, (cannon, life))| !life.is_destroyed() && cannon.shots_left > 0)
}

/// The candidate with the earliest impact; first in slot order on ties.
pub fn select(candidates: &[Candidate]) -> Option<Candidate> {
    candidates.iter().copied().fold(None, |best, c| match best {
        Some(b) if b.trajectory.frames_until_impact <= c.trajectory.frames_until_impact => Some(b),
        _ => Some(c),
    })
}

/// Handle one click aimed at `target`. Returns the launched missile, if any.
pub fn fire(
    world: &mut World,
    target: Vector2,
    level: &LevelConfig,
    events: &mut Vec<GameEvent>,
) -> Option<hecs::Entity> {
    let shots = candidates(world, target, level.player_missile_speed);
    let Some(chosen) = select(&shots) else {
        if armed(world) {
            log::warn!(
                "click ignored: no shot solvable at ({}, {})",
                target.x,
                target.y
            );
        } else {
            log::debug!("click ignored: no cannon has ammunition");
            events.push(GameEvent::OutOfAmmo);
        }
        return None;
    };

    if let Ok(mut cannon) = world.get::<&mut Cannon>(chosen.cannon) {
        cannon.shots_left = cannon.shots_left.saturating_sub(1);
    }

    let missile = world_setup::spawn_missile(
        world,
        MissileOwner::Player,
        chosen.launch,
        target,
        &chosen.trajectory,
        Some(chosen.slot),
    );

    log::debug!(
        "cannon {} fired at ({:.0}, {:.0}), impact in {} frames",
        chosen.slot,
        target.x,
        target.y,
        chosen.trajectory.frames_until_impact
    );
    events.push(GameEvent::MissileFired {
        cannon_slot: chosen.slot,
        target,
        frames_until_impact: Some(chosen.trajectory.frames_until_impact),
    });

    Some(missile)
}
