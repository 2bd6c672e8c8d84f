//! # Generation Error Types
//!
//! All errors that can occur while generating or tearing down a level.

use thiserror::Error;

use crate::tile::TileCoord;

/// Configuration rejected at generate-time.
///
/// Raised before any mutation: the grid, timers and backend are untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A level needs at least one lane.
    #[error("lane count must be at least 1")]
    ZeroLanes,

    /// A level needs at least one height level.
    #[error("height level count must be at least 1")]
    ZeroHeightLevels,

    /// The obstacle spacing window is inverted.
    #[error("obstacle spacing window is inverted: min {min} > max {max}")]
    InvertedObstacleSpacing {
        /// Configured minimum spacing.
        min: u32,
        /// Configured maximum spacing.
        max: u32,
    },

    /// A probability is NaN or outside [0, 1].
    #[error("probability `{name}` must be within [0, 1], got {value}")]
    ProbabilityOutOfRange {
        /// Name of the offending field.
        name: &'static str,
        /// The rejected value, formatted.
        value: String,
    },

    /// Extension requested with a lane count the existing grid was not built with.
    #[error("cannot extend a {grid}-lane level with a {config}-lane configuration")]
    LaneCountMismatch {
        /// Lanes in the existing grid.
        grid: u32,
        /// Lanes in the configuration.
        config: u32,
    },

    /// Extension requested with a different number of height levels.
    #[error("cannot extend a level of {grid} height levels with {config} height levels")]
    HeightLevelMismatch {
        /// Height levels in the existing grid.
        grid: u32,
        /// Height levels in the configuration.
        config: u32,
    },

    /// Configuration file could not be parsed.
    #[error("invalid configuration file: {0}")]
    Parse(String),

    /// Configuration file could not be read.
    #[error("cannot read configuration file: {0}")]
    Io(String),
}

/// The render backend failed to realize an object.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct SpawnError {
    /// Backend-provided reason.
    pub reason: String,
}

impl SpawnError {
    /// Creates a spawn error with the given reason.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Errors surfaced by the level generator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LevelError {
    /// Configuration failed validation; nothing was mutated.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// The backend failed while realizing a tile.
    ///
    /// Layers committed earlier in the batch stay committed. The failed layer
    /// is rolled back and its handles released.
    #[error("backend failed to spawn tile at lane {} layer {}: {source}", .coord.lane, .coord.forward_index)]
    BackendSpawnFailure {
        /// The tile being realized.
        coord: TileCoord,
        /// The backend's error.
        source: SpawnError,
    },
}

/// Result type for generation operations.
pub type LevelResult<T> = Result<T, LevelError>;
