//! Constant-velocity trajectory solving.
//!
//! Heading comes from `atan2` of the launch-to-target displacement, the
//! velocity is that heading scaled by speed, and the impact estimate is
//! the number of whole frames needed to cover the horizontal distance.
//! Shots with no horizontal motion fall back to the straight-line
//! distance, since the horizontal formula divides by zero there.

use glam::DVec2;

use salvo_core::constants::VERTICAL_SHOT_EPSILON;
use salvo_core::error::TrajectoryError;
use salvo_core::geometry::Vector2;

/// A solved constant-velocity shot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trajectory {
    /// Heading in radians, screen space (0 = right, positive = down).
    pub angle: f64,
    /// Per-frame displacement.
    pub velocity: Vector2,
    /// Whole frames until the missile reaches its target.
    pub frames_until_impact: u32,
}

/// Solve a shot from `launch` to `target` at `speed` pixels per frame.
pub fn solve(launch: Vector2, target: Vector2, speed: f64) -> Result<Trajectory, TrajectoryError> {
    if !(launch.is_finite() && target.is_finite() && speed.is_finite()) {
        return Err(TrajectoryError::NonFiniteInput);
    }
    if speed <= 0.0 {
        return Err(TrajectoryError::NonPositiveSpeed { speed });
    }

    let delta = target - launch;
    let angle = delta.y.atan2(delta.x);
    let velocity = DVec2::new(angle.cos() * speed, angle.sin() * speed);

    let frames = if velocity.x.abs() < VERTICAL_SHOT_EPSILON {
        (delta.length() / speed).floor()
    } else {
        (delta.x / velocity.x).floor()
    };

    Ok(Trajectory {
        angle,
        velocity,
        // `as` saturates: negatives (never produced for finite input) clamp to 0.
        frames_until_impact: frames.max(0.0) as u32,
    })
}
