//! Salvo host application.
//!
//! Wires the headless simulation to a fixed-rate game loop thread, a
//! recording render surface and a demo autopilot.

pub mod autopilot;
pub mod game_loop;
pub mod state;
pub mod surface;

pub use salvo_core as core;
