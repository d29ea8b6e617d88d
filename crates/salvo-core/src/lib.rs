//! Core types and definitions for the SALVO missile-defense simulation.
//!
//! This crate defines the vocabulary shared across the other crates:
//! geometry, components, commands, events, configuration, constants,
//! the render-surface seam and per-frame snapshots.
//! It has no dependency on any runtime or rendering framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod geometry;
pub mod render;
pub mod state;
pub mod terrain;
