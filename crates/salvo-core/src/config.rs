//! Level configuration and global settings.
//!
//! Consumed read-only by the simulation. Loaded from JSON by hosts, or
//! taken from [`GameConfig::default`] for the built-in level table.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::render::Color;

/// Per-level tuning for the player battery and the enemy wave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Pixels per frame for player interceptors.
    pub player_missile_speed: f64,
    /// Pixels per frame for enemy missiles.
    pub enemy_missile_speed: f64,
    /// Enemies spawned over the whole level.
    pub total_enemies: u32,
    /// Cap on simultaneously active enemies.
    pub enemies_at_once: u32,
    /// A spawn is considered on every frame that is a multiple of this.
    pub spawn_delay: u64,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            player_missile_speed: 6.0,
            enemy_missile_speed: 1.0,
            total_enemies: 8,
            enemies_at_once: 3,
            spawn_delay: 90,
        }
    }
}

/// Settings shared by every level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalSettings {
    /// Font size of the target marker drawn at each missile's target.
    pub target_marker_size: f64,
    /// Explosion radius cap.
    pub explosion_max_radius: f64,
    /// Colours an explosion steps through as it grows.
    pub explosion_color_cycle: Vec<Color>,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            target_marker_size: 20.0,
            explosion_max_radius: 40.0,
            explosion_color_cycle: vec![
                Color::WHITE,
                Color::YELLOW,
                Color::ORANGE,
                Color::RED,
            ],
        }
    }
}

/// Complete game configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub settings: GlobalSettings,
    pub levels: Vec<LevelConfig>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            settings: GlobalSettings::default(),
            levels: Self::default_levels(),
        }
    }
}

impl GameConfig {
    /// Built-in five-level table with escalating pressure.
    pub fn default_levels() -> Vec<LevelConfig> {
        (0..5u32)
            .map(|i| LevelConfig {
                player_missile_speed: 6.0 + f64::from(i) * 0.5,
                enemy_missile_speed: 1.0 + f64::from(i) * 0.25,
                total_enemies: 8 + i * 4,
                enemies_at_once: 3 + i,
                spawn_delay: 90u64.saturating_sub(u64::from(i) * 15).max(30),
            })
            .collect()
    }

    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Level by zero-based index.
    pub fn level(&self, index: usize) -> Option<&LevelConfig> {
        self.levels.get(index)
    }

    /// Reject values that would make motion or spawning undefined.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.settings;
        if !(s.explosion_max_radius.is_finite() && s.explosion_max_radius > 0.0) {
            return Err(ConfigError::invalid(
                "settings.explosion_max_radius",
                "must be a positive number",
            ));
        }
        if !(s.target_marker_size.is_finite() && s.target_marker_size >= 0.0) {
            return Err(ConfigError::invalid(
                "settings.target_marker_size",
                "must be a non-negative number",
            ));
        }
        if s.explosion_color_cycle.is_empty() {
            return Err(ConfigError::invalid(
                "settings.explosion_color_cycle",
                "must contain at least one colour",
            ));
        }
        if self.levels.is_empty() {
            return Err(ConfigError::invalid("levels", "at least one level is required"));
        }

        for (i, level) in self.levels.iter().enumerate() {
            if !(level.player_missile_speed.is_finite() && level.player_missile_speed > 0.0) {
                return Err(ConfigError::invalid(
                    format!("levels[{i}].player_missile_speed"),
                    "must be a positive number",
                ));
            }
            if !(level.enemy_missile_speed.is_finite() && level.enemy_missile_speed > 0.0) {
                return Err(ConfigError::invalid(
                    format!("levels[{i}].enemy_missile_speed"),
                    "must be a positive number",
                ));
            }
            if level.spawn_delay == 0 {
                return Err(ConfigError::invalid(
                    format!("levels[{i}].spawn_delay"),
                    "must be at least 1",
                ));
            }
            if level.enemies_at_once == 0 {
                return Err(ConfigError::invalid(
                    format!("levels[{i}].enemies_at_once"),
                    "must be at least 1",
                ));
            }
        }
        Ok(())
    }
}
