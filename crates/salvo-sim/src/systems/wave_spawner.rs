//! Wave spawning system: launches enemy missiles on the level's cadence.

use glam::DVec2;
use hecs::World;
use rand_chacha::ChaCha8Rng;

use salvo_core::components::{Body, Building, Cannon, Lifecycle, MissileOwner};
use salvo_core::config::LevelConfig;
use salvo_core::constants::ENEMY_SPAWN_JITTER;
use salvo_core::events::GameEvent;
use salvo_core::geometry::{rand_up_to, Vector2};

use crate::trajectory;
use crate::world_setup;

/// Spawn bookkeeping for the current level.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaveState {
    pub enemies_at_once: u32,
    pub total_enemies: u32,
    pub spawn_delay: u64,
    pub enemy_speed: f64,
    /// Enemies spawned and not yet reaped.
    pub active: u32,
    /// Enemies spawned so far this level.
    pub spawned: u32,
}

impl WaveState {
    pub fn from_level(level: &LevelConfig) -> Self {
        Self {
            enemies_at_once: level.enemies_at_once,
            total_enemies: level.total_enemies,
            spawn_delay: level.spawn_delay,
            enemy_speed: level.enemy_missile_speed,
            active: 0,
            spawned: 0,
        }
    }

    /// Every enemy has been spawned and none is left alive.
    pub fn is_exhausted(&self) -> bool {
        self.spawned >= self.total_enemies && self.active == 0
    }

    /// Whether a spawn is due on `level_frame`.
    pub fn can_spawn(&self, level_frame: u64) -> bool {
        self.spawn_delay > 0
            && level_frame > 0
            && level_frame % self.spawn_delay == 0
            && self.active < self.enemies_at_once
            && self.spawned < self.total_enemies
    }

    /// An enemy left the world.
    pub fn enemy_reaped(&mut self) {
        self.active = self.active.saturating_sub(1);
    }
}

/// Centers of every live cannon and building, cannons first, each group
/// in slot order.
fn targets(world: &World) -> Vec<Vector2> {
    let mut cannons: Vec<(usize, Vector2)> = world
        .query::<(&Cannon, &Body, &Lifecycle)>()
        .iter()
        .filter(|(_, (_, _, life))| !life.is_destroyed())
        .map(|(_, (cannon, body, _))| (cannon.slot, body.rect().center()))
        .collect();
    let mut buildings: Vec<(usize, Vector2)> = world
        .query::<(&Building, &Body, &Lifecycle)>()
        .iter()
        .filter(|(_, (_, _, life))| !life.is_destroyed())
        .map(|(_, (building, body, _))| (building.slot, body.rect().center()))
        .collect();
    cannons.sort_by_key(|(slot, _)| *slot);
    buildings.sort_by_key(|(slot, _)| *slot);
    cannons
        .into_iter()
        .chain(buildings)
        .map(|(_, center)| center)
        .collect()
}

/// Spawn at most one enemy if the wave allows it on `level_frame`.
pub fn run(
    world: &mut World,
    wave: &mut WaveState,
    rng: &mut ChaCha8Rng,
    level_frame: u64,
    playfield_width: f64,
    events: &mut Vec<GameEvent>,
) -> Option<hecs::Entity> {
    if !wave.can_spawn(level_frame) {
        return None;
    }

    let targets = targets(world);
    if targets.is_empty() {
        return None;
    }
    let pick = rand_up_to(rng, targets.len() as f64, true) as usize;
    let target = targets[pick.min(targets.len() - 1)];

    let launch = DVec2::new(
        rand_up_to(rng, playfield_width, false),
        -rand_up_to(rng, ENEMY_SPAWN_JITTER, false),
    );

    let shot = match trajectory::solve(launch, target, wave.enemy_speed) {
        Ok(shot) => shot,
        Err(e) => {
            log::warn!("enemy spawn skipped: {e}");
            return None;
        }
    };

    let enemy = world_setup::spawn_missile(world, MissileOwner::Enemy, launch, target, &shot, None);
    wave.active += 1;
    wave.spawned += 1;

    log::debug!(
        "enemy {}/{} launched from ({:.0}, {:.0}) at ({:.0}, {:.0})",
        wave.spawned,
        wave.total_enemies,
        launch.x,
        launch.y,
        target.x,
        target.y
    );
    events.push(GameEvent::EnemySpawned {
        position: launch,
        target,
    });

    Some(enemy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use salvo_core::components::Missile;
    use salvo_core::terrain::Terrain;

    fn wave(delay: u64, at_once: u32, total: u32) -> WaveState {
        WaveState::from_level(&LevelConfig {
            enemy_missile_speed: 1.0,
            total_enemies: total,
            enemies_at_once: at_once,
            spawn_delay: delay,
            ..Default::default()
        })
    }

    fn world() -> World {
        let mut world = World::new();
        world_setup::setup_run(&mut world, &Terrain::standard());
        world
    }

    #[test]
    fn nothing_spawns_on_frame_zero_or_off_cadence() {
        let w = wave(10, 5, 12);
        assert!(!w.can_spawn(0));
        for frame in 1..10 {
            assert!(!w.can_spawn(frame));
        }
        assert!(w.can_spawn(10));
        assert!(!w.can_spawn(15));
        assert!(w.can_spawn(20));
    }

    #[test]
    fn cap_and_total_gate_spawning() {
        let mut world = world();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut w = wave(10, 5, 12);
        let mut events = Vec::new();
        let mut spawn_frames = Vec::new();

        for frame in 0..=400u64 {
            // Two enemies die at frame 100, the rest at frame 200.
            if frame == 100 {
                w.enemy_reaped();
                w.enemy_reaped();
            }
            if frame == 200 {
                while w.active > 0 {
                    w.enemy_reaped();
                }
            }
            if run(&mut world, &mut w, &mut rng, frame, 800.0, &mut events).is_some() {
                spawn_frames.push(frame);
            }
            assert!(w.active <= 5);
        }

        assert_eq!(spawn_frames[..5], [10, 20, 30, 40, 50]);
        assert_eq!(spawn_frames[5..7], [100, 110]);
        assert_eq!(spawn_frames[7..], [200, 210, 220, 230, 240]);
        assert_eq!(w.spawned, 12);
        assert_eq!(world.query::<&Missile>().iter().count(), 12);
    }

    #[test]
    fn enemies_spawn_above_playfield_aimed_at_targets() {
        let mut world = world();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut w = wave(1, 50, 50);
        let mut events = Vec::new();
        let terrain = Terrain::standard();

        for frame in 1..=50 {
            run(&mut world, &mut w, &mut rng, frame, 800.0, &mut events);
        }

        let valid: Vec<Vector2> = targets(&world);
        assert_eq!(valid.len(), terrain.cannon_origins.len() + terrain.building_origins.len());
        for (_, missile) in world.query::<&Missile>().iter() {
            assert_eq!(missile.owner, MissileOwner::Enemy);
            assert!((0.0..800.0).contains(&missile.launch.x));
            assert!(missile.launch.y <= 0.0 && missile.launch.y > -ENEMY_SPAWN_JITTER);
            assert!(valid.contains(&missile.target));
            assert!(missile.velocity.y > 0.0);
        }
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::EnemySpawned { .. }))
                .count(),
            50
        );
    }

    #[test]
    fn no_targets_no_spawn() {
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut w = wave(1, 5, 5);
        let mut events = Vec::new();
        assert!(run(&mut world, &mut w, &mut rng, 1, 800.0, &mut events).is_none());
        assert_eq!(w.spawned, 0);
    }

    #[test]
    fn exhausted_once_all_spawned_and_reaped() {
        let mut w = wave(10, 2, 2);
        assert!(!w.is_exhausted());
        w.spawned = 2;
        w.active = 1;
        assert!(!w.is_exhausted());
        w.enemy_reaped();
        assert!(w.is_exhausted());
        w.enemy_reaped();
        assert_eq!(w.active, 0);
    }
}
