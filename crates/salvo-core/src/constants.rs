//! Simulation constants and tuning parameters.

/// Nominal frame rate of the host's frame-pacing primitive (Hz).
pub const FRAME_RATE: u32 = 60;

// --- Playfield ---

/// Playfield width in pixels.
pub const PLAYFIELD_WIDTH: f64 = 800.0;

/// Playfield height in pixels.
pub const PLAYFIELD_HEIGHT: f64 = 500.0;

// --- Terrain ---

/// Height of the flat ground line above the bottom edge.
pub const GROUND_LINE_HEIGHT: f64 = 30.0;

/// Horizontal distance from the left edge to the first hill.
pub const HILL_OFFSET: f64 = 30.0;

/// Width of a hill plateau.
pub const HILL_WIDTH: f64 = 60.0;

/// Horizontal run of a hill slope.
pub const HILL_INCLINE_X: f64 = 15.0;

/// Vertical rise of a hill slope.
pub const HILL_INCLINE_Y: f64 = 40.0;

/// Number of hills (one cannon per hill).
pub const HILL_COUNT: usize = 3;

// --- Cannons ---

pub const CANNON_WIDTH: f64 = 20.0;
pub const CANNON_HEIGHT: f64 = 20.0;

/// Cannon top edge, measured up from the bottom of the playfield.
pub const CANNON_ELEVATION: f64 = 90.0;

/// Shots each cannon starts the run with. Never replenished.
pub const CANNON_SHOTS: u32 = 10;

// --- Buildings ---

pub const BUILDING_WIDTH: f64 = 30.0;
pub const BUILDING_HEIGHT: f64 = 25.0;

/// Buildings placed in each valley between two hills.
pub const BUILDINGS_PER_VALLEY: usize = 2;

// --- Missiles ---

pub const MISSILE_WIDTH: f64 = 10.0;
pub const MISSILE_HEIGHT: f64 = 30.0;

/// Enemy launch height jitter above the top edge.
/// Kept below `MISSILE_HEIGHT` so a fresh enemy still overlaps the playfield.
pub const ENEMY_SPAWN_JITTER: f64 = 20.0;

/// Horizontal velocity magnitude below which a shot counts as vertical.
pub const VERTICAL_SHOT_EPSILON: f64 = 1e-9;

// --- Explosions ---

/// Frames an explosion lives before it is flagged destroyed.
pub const EXPLOSION_LIFETIME_FRAMES: u32 = 50;

/// Explosion radius grows (and the colour advances) every N frames.
pub const EXPLOSION_GROWTH_PERIOD: u32 = 3;

/// Radius added on each growth step.
pub const EXPLOSION_GROWTH_STEP: f64 = 4.0;

// --- Scoring ---

/// Points for an enemy missile destroyed by explosion contact.
pub const ENEMY_KILL_SCORE: u64 = 25;

/// Points per building still standing when a level completes.
pub const BUILDING_BONUS_SCORE: u64 = 100;

// --- Run progression ---

/// Frames between a completed level and the start of the next.
pub const LEVEL_INTERMISSION_FRAMES: u64 = 120;
