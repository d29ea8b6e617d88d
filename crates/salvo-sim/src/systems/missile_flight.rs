//! Missile flight: move, leave the playfield, count down to impact.
//!
//! Runs once per owner per frame. Destruction is checked in priority
//! order: out of bounds first (no explosion), then the impact countdown
//! (explosion at the current position). Missiles already caught by an
//! explosion earlier in the frame do not move; they detonate in place.

use hecs::World;

use salvo_core::components::{Body, DestroyCause, EntityKind, Lifecycle, Missile, MissileOwner};
use salvo_core::events::GameEvent;
use salvo_core::geometry::{rect_rect_colliding, Rect};

use crate::pending::PendingSpawns;

/// Advance every live missile of `owner` by one frame.
pub fn run(
    world: &mut World,
    owner: MissileOwner,
    playfield: &Rect,
    pending: &mut PendingSpawns,
    events: &mut Vec<GameEvent>,
) {
    for (_entity, (missile, body, life)) in
        world.query_mut::<(&mut Missile, &mut Body, &mut Lifecycle)>()
    {
        if missile.owner != owner {
            continue;
        }

        if life.is_destroyed() {
            // Intercepted by an explosion this frame. Destroyed entities are
            // reaped at the end of the frame, so this branch runs once.
            if life.cause() == Some(DestroyCause::Explosion) {
                pending.push_explosion(body.pos, events);
            }
            continue;
        }

        body.pos += missile.velocity;

        if !rect_rect_colliding(&body.rect(), playfield) {
            life.destroy(DestroyCause::OutOfBounds);
            events.push(GameEvent::Destroyed {
                kind: EntityKind::from(owner),
                cause: DestroyCause::OutOfBounds,
                position: body.pos,
            });
            continue;
        }

        if let Some(frames) = missile.frames_until_impact.as_mut() {
            *frames = frames.saturating_sub(1);
            if *frames == 0 {
                life.destroy(DestroyCause::Impact);
                events.push(GameEvent::Destroyed {
                    kind: EntityKind::from(owner),
                    cause: DestroyCause::Impact,
                    position: body.pos,
                });
                pending.push_explosion(body.pos, events);
            }
        }
    }
}
