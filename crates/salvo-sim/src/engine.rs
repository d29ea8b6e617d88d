//! Simulation engine: the per-frame driver.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems in a fixed order, and produces `FrameSnapshot`s.
//! Drawing goes through a caller-supplied `RenderSurface`, so the engine
//! stays headless and deterministic under test.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use salvo_core::commands::PlayerCommand;
use salvo_core::components::{Building, MissileOwner};
use salvo_core::config::{GameConfig, LevelConfig};
use salvo_core::constants::*;
use salvo_core::error::ConfigError;
use salvo_core::events::GameEvent;
use salvo_core::geometry::Rect;
use salvo_core::render::{NullSurface, RenderSurface};
use salvo_core::state::{FrameSnapshot, GamePhase};
use salvo_core::terrain::Terrain;

use crate::pending::PendingSpawns;
use crate::pointer::PointerState;
use crate::systems;
use crate::systems::snapshot::RunInfo;
use crate::systems::wave_spawner::WaveState;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Level table and global settings.
    pub game: GameConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            game: GameConfig::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    config: GameConfig,
    seed: u64,
    rng: ChaCha8Rng,
    terrain: Terrain,
    playfield: Rect,

    phase: GamePhase,
    /// Phase restored by `Resume`.
    resume_phase: GamePhase,
    frame: u64,
    level: usize,
    level_config: LevelConfig,
    level_start_frame: u64,
    level_complete_frame: u64,
    score: u64,
    wave: WaveState,
    pointer: PointerState,

    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    pending: PendingSpawns,
    events: Vec<GameEvent>,
}

impl SimulationEngine {
    /// Create a new engine and start a run at the first level.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.game.validate()?;
        let level_config = config
            .game
            .level(0)
            .cloned()
            .ok_or_else(|| ConfigError::invalid("levels", "must not be empty"))?;

        let mut engine = Self {
            world: World::new(),
            config: config.game,
            seed: config.seed,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            terrain: Terrain::standard(),
            playfield: Rect::new(0.0, 0.0, PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT),
            phase: GamePhase::default(),
            resume_phase: GamePhase::default(),
            frame: 0,
            level: 0,
            level_config,
            level_start_frame: 0,
            level_complete_frame: 0,
            score: 0,
            wave: WaveState::default(),
            pointer: PointerState::default(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            pending: PendingSpawns::new(),
            events: Vec::new(),
        };
        engine.start_run();
        Ok(engine)
    }

    /// Queue a player command for processing at the next frame boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance one frame without drawing.
    pub fn tick(&mut self) -> FrameSnapshot {
        self.tick_on(&mut NullSurface)
    }

    /// Advance one frame, drawing onto `surface`, and return the resulting snapshot.
    pub fn tick_on(&mut self, surface: &mut dyn RenderSurface) -> FrameSnapshot {
        self.process_commands();

        match self.phase {
            GamePhase::Active | GamePhase::LevelComplete => {
                self.run_systems(surface);
                self.frame += 1;
                self.evaluate_progress();
            }
            GamePhase::Paused | GamePhase::GameOver | GamePhase::Victory => {
                self.draw_only(surface);
            }
        }

        self.snapshot()
    }

    /// Snapshot of the current state without advancing. Drains pending events.
    pub fn snapshot(&mut self) -> FrameSnapshot {
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            RunInfo {
                frame: self.frame,
                phase: self.phase,
                level: self.level,
                score: self.score,
                pointer: self.pointer.position,
            },
            &self.wave,
            events,
        )
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Frames advanced since the run started.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Zero-based level index.
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn wave(&self) -> &WaveState {
        &self.wave
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access for tests that stage a scenario by hand.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Mutable wave access for tests.
    #[cfg(test)]
    pub fn wave_mut(&mut self) -> &mut WaveState {
        &mut self.wave
    }

    /// Throw away the world and start again at the first level.
    fn start_run(&mut self) {
        self.world.clear();
        self.pending.clear();
        self.despawn_buffer.clear();
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.frame = 0;
        self.score = 0;
        world_setup::setup_run(&mut self.world, &self.terrain);
        self.start_level(0);
    }

    fn start_level(&mut self, index: usize) {
        let Some(level_config) = self.config.level(index).cloned() else {
            log::warn!("level {index} is not configured");
            return;
        };
        self.level = index;
        self.wave = WaveState::from_level(&level_config);
        self.level_config = level_config;
        self.level_start_frame = self.frame;
        self.phase = GamePhase::Active;

        log::info!(
            "level {} started: {} enemies, {} at once",
            index + 1,
            self.wave.total_enemies,
            self.wave.enemies_at_once
        );
        self.events.push(GameEvent::LevelStarted { level: index });
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::PointerMoved { client_x, client_y } => {
                self.pointer.moved(client_x, client_y);
            }
            PlayerCommand::ViewportChanged { left, top } => {
                self.pointer.viewport_changed(left, top);
            }
            PlayerCommand::Fire => {
                if matches!(self.phase, GamePhase::Active | GamePhase::LevelComplete) {
                    systems::fire_control::fire(
                        &mut self.world,
                        self.pointer.position,
                        &self.level_config,
                        &mut self.events,
                    );
                }
            }
            PlayerCommand::Pause => {
                if matches!(self.phase, GamePhase::Active | GamePhase::LevelComplete) {
                    self.resume_phase = self.phase;
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = self.resume_phase;
                }
            }
            PlayerCommand::Restart => {
                log::info!("run restarted");
                self.start_run();
            }
        }
    }

    /// Run all systems in order, drawing each collection after its update.
    fn run_systems(&mut self, surface: &mut dyn RenderSurface) {
        let settings = &self.config.settings;

        // 1. Clear
        surface.clear(self.playfield);
        // 2. Enemy spawning
        if self.phase == GamePhase::Active {
            systems::wave_spawner::run(
                &mut self.world,
                &mut self.wave,
                &mut self.rng,
                self.frame - self.level_start_frame,
                self.playfield.w,
                &mut self.events,
            );
        }
        // 3. Terrain
        systems::render::draw_terrain(surface, &self.terrain);
        // 4. Buildings and cannons (passive)
        systems::render::draw_buildings(&self.world, surface);
        systems::render::draw_cannons(&self.world, surface);
        // 5. Explosions: growth and contact
        self.score += systems::explosions::run(
            &mut self.world,
            settings.explosion_color_cycle.len(),
            &mut self.events,
        );
        systems::render::draw_explosions(&self.world, surface, settings);
        // 6. Player missiles, then enemies
        for owner in [MissileOwner::Player, MissileOwner::Enemy] {
            systems::missile_flight::run(
                &mut self.world,
                owner,
                &self.playfield,
                &mut self.pending,
                &mut self.events,
            );
            systems::render::draw_missiles(&self.world, surface, owner, settings);
        }
        systems::render::draw_hud(surface, &self.playfield, self.phase, self.level, self.score);
        // 7. Lifecycle cleanup, then merge spawns queued during the pass
        systems::cleanup::run(&mut self.world, &mut self.wave, &mut self.despawn_buffer);
        self.pending
            .merge_into(&mut self.world, settings.explosion_max_radius);
    }

    /// Redraw the frozen world.
    fn draw_only(&self, surface: &mut dyn RenderSurface) {
        let settings = &self.config.settings;
        surface.clear(self.playfield);
        systems::render::draw_terrain(surface, &self.terrain);
        systems::render::draw_buildings(&self.world, surface);
        systems::render::draw_cannons(&self.world, surface);
        systems::render::draw_explosions(&self.world, surface, settings);
        for owner in [MissileOwner::Player, MissileOwner::Enemy] {
            systems::render::draw_missiles(&self.world, surface, owner, settings);
        }
        systems::render::draw_hud(surface, &self.playfield, self.phase, self.level, self.score);
    }

    /// Move between levels and end the run once it is decided.
    fn evaluate_progress(&mut self) {
        let buildings_left = self.world.query::<&Building>().iter().count() as u32;
        if buildings_left == 0 {
            self.phase = GamePhase::GameOver;
            log::info!("game over at frame {} with score {}", self.frame, self.score);
            self.events.push(GameEvent::GameOver { score: self.score });
            return;
        }

        match self.phase {
            GamePhase::Active if self.wave.is_exhausted() => {
                self.score += BUILDING_BONUS_SCORE * u64::from(buildings_left);
                log::info!(
                    "level {} complete with {} buildings standing",
                    self.level + 1,
                    buildings_left
                );
                self.events.push(GameEvent::LevelCompleted {
                    level: self.level,
                    buildings_left,
                });

                if self.level + 1 >= self.config.levels.len() {
                    self.phase = GamePhase::Victory;
                    log::info!("victory with score {}", self.score);
                    self.events.push(GameEvent::Victory { score: self.score });
                } else {
                    self.phase = GamePhase::LevelComplete;
                    self.level_complete_frame = self.frame;
                }
            }
            GamePhase::LevelComplete
                if self.frame - self.level_complete_frame >= LEVEL_INTERMISSION_FRAMES =>
            {
                self.start_level(self.level + 1);
            }
            _ => {}
        }
    }
}
