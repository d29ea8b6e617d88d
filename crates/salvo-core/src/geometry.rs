//! Fundamental geometric types and shape predicates.
//!
//! Playfield coordinates are pixels with the origin at the top-left
//! corner and y growing downward.

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Scalar pair used for positions, velocities and targets.
pub type Vector2 = DVec2;

/// Axis-aligned box, origin at the top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// Circle given by center and radius.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Rect anchored at `origin` with the given size.
    pub fn from_origin(origin: Vector2, size: Vector2) -> Self {
        Self::new(origin.x, origin.y, size.x, size.y)
    }

    pub fn origin(&self) -> Vector2 {
        DVec2::new(self.x, self.y)
    }

    pub fn center(&self) -> Vector2 {
        DVec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Whether a point lies inside the rect (edges inclusive).
    pub fn contains(&self, point: Vector2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.w
            && point.y >= self.y
            && point.y <= self.y + self.h
    }
}

impl Circle {
    pub fn new(x: f64, y: f64, r: f64) -> Self {
        Self { x, y, r }
    }

    pub fn center(&self) -> Vector2 {
        DVec2::new(self.x, self.y)
    }

    /// Whether a point lies inside the circle (boundary inclusive).
    pub fn contains(&self, point: Vector2) -> bool {
        self.center().distance_squared(point) <= self.r * self.r
    }
}

/// Rounded circle-vs-AABB test.
///
/// Works on the axis distances from the circle center to the rect center:
/// beyond `half_extent + r` on either axis never collides, within the
/// half extent on either axis always collides, and the remaining corner
/// region compares squared corner distance against `r²`.
pub fn circle_rect_colliding(circle: &Circle, rect: &Rect) -> bool {
    let half_w = rect.w / 2.0;
    let half_h = rect.h / 2.0;
    let dist_x = (circle.x - rect.x - half_w).abs();
    let dist_y = (circle.y - rect.y - half_h).abs();

    if dist_x > half_w + circle.r {
        return false;
    }
    if dist_y > half_h + circle.r {
        return false;
    }
    if dist_x <= half_w {
        return true;
    }
    if dist_y <= half_h {
        return true;
    }

    let dx = dist_x - half_w;
    let dy = dist_y - half_h;
    dx * dx + dy * dy <= circle.r * circle.r
}

/// AABB overlap test with inclusive edges (touching rects collide).
pub fn rect_rect_colliding(first: &Rect, second: &Rect) -> bool {
    !(first.x > second.x + second.w
        || first.x + first.w < second.x
        || first.y > second.y + second.h
        || first.y + first.h < second.y)
}

/// Uniform random value in `[0, num)`, floored to a whole number when asked.
///
/// Returns 0 for a non-positive or non-finite bound instead of panicking.
pub fn rand_up_to<R: Rng + ?Sized>(rng: &mut R, num: f64, floor: bool) -> f64 {
    if !(num.is_finite() && num > 0.0) {
        return 0.0;
    }
    let value = rng.gen_range(0.0..num);
    if floor {
        value.floor()
    } else {
        value
    }
}
