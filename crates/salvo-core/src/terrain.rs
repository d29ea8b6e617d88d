//! Static terrain layout: the hill ridge, cannon seats and building lots.
//!
//! Pure geometry. The ridge is only ever drawn; cannons and buildings
//! are spawned at the origins computed here.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::geometry::Vector2;

/// Terrain geometry for one playfield size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Terrain {
    pub width: f64,
    pub height: f64,
    /// Ridge polyline, left edge to right edge.
    pub ridge: Vec<Vector2>,
    /// Top-left corner of each cannon, one per hill, left to right.
    pub cannon_origins: Vec<Vector2>,
    /// Top-left corner of each building, left to right.
    pub building_origins: Vec<Vector2>,
}

impl Terrain {
    /// Layout for the standard 800x500 playfield.
    pub fn standard() -> Self {
        Self::layout(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT)
    }

    /// Lay out `HILL_COUNT` hills evenly across a playfield.
    pub fn layout(width: f64, height: f64) -> Self {
        let hills = HILL_COUNT as f64;
        let hill_span = HILL_INCLINE_X * 2.0 + HILL_WIDTH;
        let valley_count = HILL_COUNT.saturating_sub(1).max(1) as f64;
        let valley_width =
            ((width - (2.0 * HILL_OFFSET + hills * hill_span)) / valley_count).max(0.0);
        let ground_y = height - GROUND_LINE_HEIGHT;

        let mut ridge = Vec::with_capacity(2 + HILL_COUNT * 4);
        let mut cannon_origins = Vec::with_capacity(HILL_COUNT);
        let mut building_origins = Vec::new();

        let mut x = 0.0;
        ridge.push(DVec2::new(x, ground_y));
        x += HILL_OFFSET;
        ridge.push(DVec2::new(x, ground_y));

        for hill in 0..HILL_COUNT {
            let hill_start = x;
            ridge.push(DVec2::new(x + HILL_INCLINE_X, ground_y - HILL_INCLINE_Y));
            ridge.push(DVec2::new(
                x + HILL_INCLINE_X + HILL_WIDTH,
                ground_y - HILL_INCLINE_Y,
            ));
            x += hill_span;
            ridge.push(DVec2::new(x, ground_y));

            cannon_origins.push(DVec2::new(
                hill_start + HILL_INCLINE_X + HILL_WIDTH / 2.0 - CANNON_WIDTH / 2.0,
                height - CANNON_ELEVATION,
            ));

            if hill + 1 < HILL_COUNT {
                let valley_start = x;
                let lots = BUILDINGS_PER_VALLEY as f64 + 1.0;
                for lot in 1..=BUILDINGS_PER_VALLEY {
                    let center = valley_start + valley_width * lot as f64 / lots;
                    building_origins.push(DVec2::new(
                        center - BUILDING_WIDTH / 2.0,
                        ground_y - BUILDING_HEIGHT,
                    ));
                }
                x += valley_width;
                ridge.push(DVec2::new(x, ground_y));
            }
        }

        x += HILL_OFFSET;
        ridge.push(DVec2::new(x, ground_y));

        Self {
            width,
            height,
            ridge,
            cannon_origins,
            building_origins,
        }
    }
}
