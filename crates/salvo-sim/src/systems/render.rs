//! Render pass: draws the world through a [`RenderSurface`].
//!
//! Read-only over the world. Each draw function handles one entity
//! collection so the engine can interleave it with that collection's
//! update. Destroyed entities are never drawn.

use std::f64::consts::TAU;

use glam::DVec2;
use hecs::World;

use salvo_core::components::*;
use salvo_core::config::GlobalSettings;
use salvo_core::geometry::Rect;
use salvo_core::render::{Color, RenderSurface};
use salvo_core::state::GamePhase;
use salvo_core::terrain::Terrain;

const RIDGE_LINE_WIDTH: f64 = 2.5;
const TRAIL_LINE_WIDTH: f64 = 2.0;
const CANNON_LABEL_PX: f64 = 12.0;
const HUD_PX: f64 = 16.0;
const BANNER_PX: f64 = 36.0;

pub fn draw_terrain(surface: &mut dyn RenderSurface, terrain: &Terrain) {
    surface.stroke_polyline(&terrain.ridge, Color::LIME_GREEN, RIDGE_LINE_WIDTH);
}

pub fn draw_buildings(world: &World, surface: &mut dyn RenderSurface) {
    for (_, (_building, body, life)) in world.query::<(&Building, &Body, &Lifecycle)>().iter() {
        if !life.is_destroyed() {
            surface.fill_rect(body.rect(), Color::GREY);
        }
    }
}

/// Cannons with their remaining shots printed underneath.
pub fn draw_cannons(world: &World, surface: &mut dyn RenderSurface) {
    for (_, (cannon, body, life)) in world.query::<(&Cannon, &Body, &Lifecycle)>().iter() {
        if life.is_destroyed() {
            continue;
        }
        let rect = body.rect();
        surface.fill_rect(rect, Color::BLUE);
        let label = DVec2::new(rect.x, rect.y + rect.h + CANNON_LABEL_PX + 2.0);
        surface.text(
            &cannon.shots_left.to_string(),
            label,
            CANNON_LABEL_PX,
            Color::WHITE,
        );
    }
}

pub fn draw_explosions(world: &World, surface: &mut dyn RenderSurface, settings: &GlobalSettings) {
    let cycle = &settings.explosion_color_cycle;
    for (_, (explosion, life)) in world.query::<(&Explosion, &Lifecycle)>().iter() {
        if life.is_destroyed() {
            continue;
        }
        let color = if cycle.is_empty() {
            Color::WHITE
        } else {
            cycle[explosion.color_index % cycle.len()]
        };
        surface.fill_arc(explosion.circle(), 0.0, TAU, color);
    }
}

/// Missiles of one owner: body, a trail back to the launch point and a
/// marker over the target.
pub fn draw_missiles(
    world: &World,
    surface: &mut dyn RenderSurface,
    owner: MissileOwner,
    settings: &GlobalSettings,
) {
    let color = match owner {
        MissileOwner::Player => Color::RED,
        MissileOwner::Enemy => Color::ORANGE,
    };
    let marker = settings.target_marker_size;

    for (_, (missile, body, life)) in world.query::<(&Missile, &Body, &Lifecycle)>().iter() {
        if missile.owner != owner || life.is_destroyed() {
            continue;
        }
        let rect = body.rect();
        surface.gradient_line(
            missile.launch,
            rect.center(),
            Color::WHITE,
            color,
            TRAIL_LINE_WIDTH,
        );
        surface.fill_rect(rect, color);
        let marker_pos = DVec2::new(
            missile.target.x - marker / 4.0,
            missile.target.y + marker / 4.0,
        );
        surface.text("x", marker_pos, marker, Color::PINK);
    }
}

/// Score and level in the top-left corner, plus a banner for non-active phases.
pub fn draw_hud(
    surface: &mut dyn RenderSurface,
    playfield: &Rect,
    phase: GamePhase,
    level: usize,
    score: u64,
) {
    surface.text(
        &format!("Score {score}"),
        DVec2::new(10.0, HUD_PX + 4.0),
        HUD_PX,
        Color::WHITE,
    );
    surface.text(
        &format!("Level {}", level + 1),
        DVec2::new(10.0, 2.0 * HUD_PX + 8.0),
        HUD_PX,
        Color::WHITE,
    );

    let banner = match phase {
        GamePhase::Active => return,
        GamePhase::Paused => "PAUSED",
        GamePhase::LevelComplete => "LEVEL COMPLETE",
        GamePhase::GameOver => "GAME OVER",
        GamePhase::Victory => "VICTORY",
    };
    let center = playfield.center();
    let origin = DVec2::new(
        center.x - banner.len() as f64 * BANNER_PX * 0.3,
        center.y,
    );
    surface.text(banner, origin, BANNER_PX, Color::YELLOW);
}
