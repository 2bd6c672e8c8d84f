//! # Level Generator
//!
//! Owns the tile grid, the obstacle timers and the layer cursor, and drives
//! one layer at a time through:
//!
//! ```text
//! assign heights -> repair ramps -> schedule obstacles -> realize -> commit
//! ```
//!
//! A layer is committed only after every one of its tiles was realized by the
//! backend. Committed layers are never revisited.
//!
//! ## Failure model
//!
//! - Bad configuration fails before anything is touched.
//! - A backend failure aborts the batch. Layers committed earlier in the
//!   batch stay; the failing layer is removed, its handles despawned and its
//!   obstacle timers restored.
//!
//! ## Example
//!
//! ```rust
//! use runway_procedural::{HeadlessBackend, LevelConfig, LevelGenerator, LevelSeed};
//!
//! let config = LevelConfig::default().with_obstacles(["barrier"]);
//! let mut generator = LevelGenerator::with_seed(config, HeadlessBackend::new(), LevelSeed::new(7));
//!
//! generator.generate(20, true)?;
//! generator.generate(10, false)?;
//! assert_eq!(generator.cursor(), 30);
//! assert!(generator.grid().death_walls().is_empty());
//!
//! generator.delete_all();
//! assert!(generator.grid().is_empty());
//! # Ok::<(), runway_procedural::LevelError>(())
//! ```

use crate::backend::SpawnBackend;
use crate::config::{GeometryParams, LevelConfig};
use crate::error::{ConfigError, LevelError, LevelResult, SpawnError};
use crate::grid::TileGrid;
use crate::obstacles::{ObstacleScheduler, SpacingWindow};
use crate::random::{LevelSeed, RandomSource, SeededRandom};
use crate::terrain::{assign_heights, repair_reachability};
use crate::tile::{TileCoord, TileRecord};

/// Summary of one generate call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Layers committed by this call.
    pub layers: u32,
    /// Ramps placed to break death walls.
    pub required_ramps: u32,
    /// Ramps placed for variety.
    pub optional_ramps: u32,
    /// Obstacles placed.
    pub obstacles: u32,
    /// Objects spawned on the backend.
    pub spawned: u32,
}

/// Endless-runner level generator.
pub struct LevelGenerator<B: SpawnBackend, R: RandomSource = SeededRandom> {
    config: LevelConfig,
    backend: B,
    rng: R,
    grid: TileGrid,
    obstacles: ObstacleScheduler,
    cursor: u32,
}

impl<B: SpawnBackend> LevelGenerator<B, SeededRandom> {
    /// Creates a generator with the default seed.
    #[must_use]
    pub fn new(config: LevelConfig, backend: B) -> Self {
        Self::with_random(config, backend, SeededRandom::default())
    }

    /// Creates a generator whose levels are reproducible from `seed`.
    #[must_use]
    pub fn with_seed(config: LevelConfig, backend: B, seed: LevelSeed) -> Self {
        Self::with_random(config, backend, SeededRandom::new(seed))
    }
}

impl<B: SpawnBackend, R: RandomSource> LevelGenerator<B, R> {
    /// Creates a generator drawing from `rng`.
    #[must_use]
    pub fn with_random(config: LevelConfig, backend: B, rng: R) -> Self {
        Self {
            config,
            backend,
            rng,
            grid: TileGrid::default(),
            obstacles: ObstacleScheduler::new(),
            cursor: 0,
        }
    }

    /// Current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    /// Mutable configuration. Checked on the next generate call.
    #[inline]
    pub fn config_mut(&mut self) -> &mut LevelConfig {
        &mut self.config
    }

    /// Generated tiles.
    #[inline]
    #[must_use]
    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// The spawn backend.
    #[inline]
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable spawn backend.
    #[inline]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Countdown per lane to the next obstacle.
    #[inline]
    #[must_use]
    pub fn obstacle_timers(&self) -> &[u32] {
        self.obstacles.timers()
    }

    /// Number of committed layers; the next layer gets this forward index.
    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> u32 {
        self.cursor
    }

    /// Generates `layers` more layers.
    ///
    /// With `regenerate` set the existing level is torn down first and the
    /// new layers start at forward index 0. Otherwise they continue from the
    /// last committed layer.
    ///
    /// # Errors
    ///
    /// - [`LevelError::InvalidConfiguration`] if the configuration is invalid,
    ///   or does not match the shape of the level being extended. Nothing is
    ///   mutated.
    /// - [`LevelError::BackendSpawnFailure`] if the backend fails. Layers
    ///   committed before the failure stay committed.
    pub fn generate(&mut self, layers: u32, regenerate: bool) -> LevelResult<BatchStats> {
        self.config.validate()?;
        if !regenerate && !self.grid.is_empty() {
            self.check_extension_shape()?;
        }

        if regenerate {
            self.delete_all();
        }

        let window = SpacingWindow::new(self.config.min_obstacle_spacing, self.config.max_obstacle_spacing);
        if self.grid.is_empty() {
            self.grid = TileGrid::new(self.config.lane_count, self.config.height_levels);
            self.obstacles.reset(self.config.lane_count, window, &mut self.rng);
        }
        debug_assert_eq!(self.obstacles.lane_count(), self.grid.lane_count() as usize);

        let mut stats = BatchStats::default();
        for _ in 0..layers {
            self.generate_layer(window, &mut stats)?;
        }

        tracing::info!(
            layers = stats.layers,
            cursor = self.cursor,
            required_ramps = stats.required_ramps,
            optional_ramps = stats.optional_ramps,
            obstacles = stats.obstacles,
            "level batch generated"
        );
        Ok(stats)
    }

    /// Tears the level down to a fresh 0..`layers` level.
    ///
    /// # Errors
    ///
    /// See [`LevelGenerator::generate`].
    pub fn regenerate(&mut self, layers: u32) -> LevelResult<BatchStats> {
        self.generate(layers, true)
    }

    /// Appends `layers` layers after the last committed one.
    ///
    /// # Errors
    ///
    /// See [`LevelGenerator::generate`].
    pub fn extend(&mut self, layers: u32) -> LevelResult<BatchStats> {
        self.generate(layers, false)
    }

    /// Despawns everything and empties the grid. Safe on an empty level.
    pub fn delete_all(&mut self) {
        if self.grid.is_empty() {
            return;
        }

        let mut released = 0usize;
        for tile in self.grid.tiles_mut() {
            for handle in tile.drain_handles() {
                self.backend.despawn(handle);
                released += 1;
            }
        }
        tracing::info!(layers = self.cursor, released, "level deleted");

        self.grid = TileGrid::default();
        self.cursor = 0;
    }

    fn check_extension_shape(&self) -> Result<(), ConfigError> {
        if self.grid.lane_count() != self.config.lane_count {
            return Err(ConfigError::LaneCountMismatch {
                grid: self.grid.lane_count(),
                config: self.config.lane_count,
            });
        }
        if self.grid.height_levels() != self.config.height_levels {
            return Err(ConfigError::HeightLevelMismatch {
                grid: self.grid.height_levels(),
                config: self.config.height_levels,
            });
        }
        Ok(())
    }

    fn generate_layer(&mut self, window: SpacingWindow, stats: &mut BatchStats) -> LevelResult<()> {
        let forward_index = self.cursor;

        let mut layer = assign_heights(&self.config, &mut self.rng, forward_index, self.grid.last_layer());
        let repair = match self.grid.last_layer() {
            Some(prev) => repair_reachability(
                &mut layer,
                prev,
                self.config.probability_for_non_required_ramps,
                &mut self.rng,
            ),
            None => Default::default(),
        };

        let timers_before = self.obstacles.clone();
        let placed = self
            .obstacles
            .schedule_layer(&mut layer, &self.config.obstacle_catalog, window, &mut self.rng);

        self.grid.push_layer(layer);
        let spawned = match self.realize_last_layer() {
            Ok(spawned) => spawned,
            Err((lane, source)) => {
                self.roll_back_last_layer(timers_before);
                tracing::warn!(forward_index, lane, error = %source, "layer rolled back after spawn failure");
                return Err(LevelError::BackendSpawnFailure {
                    coord: TileCoord::new(lane, forward_index),
                    source,
                });
            }
        };

        self.cursor += 1;
        stats.layers += 1;
        stats.required_ramps += repair.required_ramps;
        stats.optional_ramps += repair.optional_ramps;
        stats.obstacles += u32::try_from(placed).unwrap_or(u32::MAX);
        stats.spawned += spawned;

        tracing::debug!(
            forward_index,
            required_ramps = repair.required_ramps,
            optional_ramps = repair.optional_ramps,
            obstacles = placed,
            "layer committed"
        );
        Ok(())
    }

    /// Hands every tile of the newest layer to the backend.
    ///
    /// On failure returns the failing lane; handles spawned so far stay
    /// attached to their tiles for the rollback to release.
    fn realize_last_layer(&mut self) -> Result<u32, (u32, SpawnError)> {
        let geometry = self.config.geometry;
        let Some(layer) = self.grid.last_layer_mut() else {
            return Ok(0);
        };

        let mut spawned = 0;
        for tile in layer.iter_mut() {
            spawned += realize_tile(&mut self.backend, tile, &geometry).map_err(|e| (tile.lane(), e))?;
        }
        Ok(spawned)
    }

    fn roll_back_last_layer(&mut self, timers_before: ObstacleScheduler) {
        if let Some(mut layer) = self.grid.pop_layer() {
            for tile in &mut layer {
                for handle in tile.drain_handles() {
                    self.backend.despawn(handle);
                }
            }
        }
        self.obstacles = timers_before;
    }
}

/// Spawns ground, then ramp, then obstacle for one tile.
fn realize_tile<B: SpawnBackend + ?Sized>(
    backend: &mut B,
    tile: &mut TileRecord,
    geometry: &GeometryParams,
) -> Result<u32, SpawnError> {
    let coord = tile.coord();
    let height = tile.height();

    let ground = backend.spawn_ground_tile(coord, height, tile.is_ramp(), geometry)?;
    tile.attach_handle(ground);
    let mut spawned = 1;

    if tile.is_ramp() {
        let ramp = backend.spawn_ramp(coord, height, geometry)?;
        tile.attach_handle(ramp);
        spawned += 1;
    }

    if let Some(kind) = tile.obstacle().cloned() {
        let obstacle = backend.spawn_obstacle(coord, height, &kind, geometry)?;
        tile.attach_handle(obstacle);
        spawned += 1;
    }

    Ok(spawned)
}
