//! ECS systems that operate on the simulation world each frame.
//!
//! Systems are plain functions over `&mut World` (or `&World` for the
//! read-only ones). Run-level state they need is passed in explicitly.

pub mod cleanup;
pub mod explosions;
pub mod fire_control;
pub mod missile_flight;
pub mod render;
pub mod snapshot;
pub mod wave_spawner;
