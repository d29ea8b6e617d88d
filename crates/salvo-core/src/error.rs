//! Error types for configuration loading and trajectory solving.
//!
//! Nothing in a running frame is fatal: callers turn these errors into
//! "entity not created" and log them.

use std::fmt;

/// Failure to load or validate a [`GameConfig`](crate::config::GameConfig).
#[derive(Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    Io(std::io::Error),
    /// The config text is not valid JSON for the config schema.
    Parse(serde_json::Error),
    /// A value parsed but is outside its legal range.
    Invalid {
        /// Dotted path of the offending field, e.g. `levels[2].spawn_delay`.
        field: String,
        reason: &'static str,
    },
}

impl ConfigError {
    pub fn invalid(field: impl Into<String>, reason: &'static str) -> Self {
        ConfigError::Invalid {
            field: field.into(),
            reason,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "could not read config: {e}"),
            ConfigError::Parse(e) => write!(f, "could not parse config: {e}"),
            ConfigError::Invalid { field, reason } => {
                write!(f, "invalid config value `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Degenerate input to the trajectory solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrajectoryError {
    /// Speed must be strictly positive; zero or negative speed has no motion.
    NonPositiveSpeed { speed: f64 },
    /// Launch point, target or speed contained NaN or infinity.
    NonFiniteInput,
}

impl fmt::Display for TrajectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrajectoryError::NonPositiveSpeed { speed } => {
                write!(f, "missile speed must be positive, got {speed}")
            }
            TrajectoryError::NonFiniteInput => {
                write!(f, "trajectory input is not finite")
            }
        }
    }
}

impl std::error::Error for TrajectoryError {}
