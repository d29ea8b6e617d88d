//! Explosion growth and collision resolution.
//!
//! Explosions are the only collision medium: every frame each explosion's
//! circle is tested against every building, missile and cannon, and
//! anything whose rect it touches is flagged destroyed. Missiles never
//! test contact with each other or with buildings directly.

use hecs::World;

use salvo_core::components::*;
use salvo_core::constants::*;
use salvo_core::events::GameEvent;
use salvo_core::geometry::{circle_rect_colliding, Circle};

/// Grow and age every live explosion, then resolve contact.
/// Returns the score earned this frame.
pub fn run(world: &mut World, color_cycle_len: usize, events: &mut Vec<GameEvent>) -> u64 {
    grow(world, color_cycle_len, events);
    resolve_contacts(world, events)
}

/// Advance each explosion's timer, radius and colour.
fn grow(world: &mut World, color_cycle_len: usize, events: &mut Vec<GameEvent>) {
    let cycle = color_cycle_len.max(1);
    for (_entity, (explosion, life)) in world.query_mut::<(&mut Explosion, &mut Lifecycle)>() {
        if life.is_destroyed() {
            continue;
        }
        if explosion.timer % EXPLOSION_GROWTH_PERIOD == 0 {
            explosion.radius =
                (explosion.radius + EXPLOSION_GROWTH_STEP).clamp(0.0, explosion.max_radius);
            // The first growth step is the first frame drawn: it shows colour 0.
            if explosion.timer > 0 {
                explosion.color_index = (explosion.color_index + 1) % cycle;
            }
        }
        explosion.timer += 1;
        if explosion.timer >= EXPLOSION_LIFETIME_FRAMES && life.destroy(DestroyCause::Expired) {
            events.push(GameEvent::Destroyed {
                kind: EntityKind::Explosion,
                cause: DestroyCause::Expired,
                position: explosion.center,
            });
        }
    }
}

/// Flag everything touched by an explosion. Explosions that expired this
/// frame still count: they stay in the world until cleanup.
fn resolve_contacts(world: &mut World, events: &mut Vec<GameEvent>) -> u64 {
    let blasts: Vec<Circle> = world
        .query_mut::<&Explosion>()
        .into_iter()
        .map(|(_, explosion)| explosion.circle())
        .collect();
    if blasts.is_empty() {
        return 0;
    }

    let hit = |body: &Body| {
        let rect = body.rect();
        blasts.iter().any(|blast| circle_rect_colliding(blast, &rect))
    };

    let mut score = 0;

    for (_entity, (_building, body, life)) in
        world.query_mut::<(&Building, &Body, &mut Lifecycle)>()
    {
        if hit(body) && life.destroy(DestroyCause::Explosion) {
            events.push(destroyed(EntityKind::Building, body));
        }
    }

    for (_entity, (missile, body, life)) in
        world.query_mut::<(&Missile, &Body, &mut Lifecycle)>()
    {
        if hit(body) && life.destroy(DestroyCause::Explosion) {
            events.push(destroyed(EntityKind::from(missile.owner), body));
            if missile.owner == MissileOwner::Enemy {
                score += ENEMY_KILL_SCORE;
            }
        }
    }

    for (_entity, (_cannon, body, life)) in
        world.query_mut::<(&Cannon, &Body, &mut Lifecycle)>()
    {
        if hit(body) && life.destroy(DestroyCause::Explosion) {
            events.push(destroyed(EntityKind::Cannon, body));
        }
    }

    score
}

fn destroyed(kind: EntityKind, body: &Body) -> GameEvent {
    GameEvent::Destroyed {
        kind,
        cause: DestroyCause::Explosion,
        position: body.pos,
    }
}
