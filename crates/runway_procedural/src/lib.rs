//! # RUNWAY Procedural Generation
//!
//! Endless-runner levels built layer by layer: parallel lanes, discrete
//! heights, ramps and spaced obstacles.
//!
//! ## Design Principles
//!
//! 1. **Always traversable**: no committed layer has a climb without a ramp
//!    or a way around it
//! 2. **Incremental**: levels extend one layer at a time with no look-ahead
//! 3. **Deterministic**: same seed and configuration, same level
//! 4. **Headless**: geometry is realized through [`SpawnBackend`]
//!
//! ## Core Components
//!
//! - [`LevelGenerator`]: drives generation and owns the level
//! - [`TileGrid`] / [`TileRecord`]: the generated level
//! - [`ObstacleScheduler`]: per-lane obstacle spacing
//! - [`LevelConfig`]: tuning, loadable from TOML
//! - [`RandomSource`] / [`SeededRandom`]: swappable randomness
//!
//! ## Example
//!
//! ```rust
//! use runway_procedural::{HeadlessBackend, LevelConfig, LevelGenerator, LevelSeed};
//!
//! let mut generator = LevelGenerator::with_seed(
//!     LevelConfig::default().with_lanes(5),
//!     HeadlessBackend::new(),
//!     LevelSeed::new(12345),
//! );
//! generator.generate(50, true)?;
//! assert!(generator.grid().death_walls().is_empty());
//! # Ok::<(), runway_procedural::LevelError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod backend;
pub mod config;
pub mod error;
pub mod generator;
pub mod grid;
pub mod obstacles;
pub mod random;
pub mod terrain;
pub mod tile;

pub use backend::{HeadlessBackend, SpawnBackend};
pub use config::{GeometryParams, LevelConfig};
pub use error::{ConfigError, LevelError, LevelResult, SpawnError};
pub use generator::{BatchStats, LevelGenerator};
pub use grid::TileGrid;
pub use obstacles::{ObstacleScheduler, SpacingWindow};
pub use random::{LevelSeed, RandomSource, SeededRandom};
pub use terrain::RepairOutcome;
pub use tile::{ObstacleKind, RenderHandle, TileCoord, TileRecord};
