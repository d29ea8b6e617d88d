//! Simulation engine for Salvo.
//!
//! Owns the hecs ECS world, runs systems once per frame in a fixed order,
//! and produces FrameSnapshots for the host.

pub mod engine;
pub mod pending;
pub mod pointer;
pub mod systems;
pub mod trajectory;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use salvo_core as core;

#[cfg(test)]
mod tests;
