//! # Spawn Backend Interface
//!
//! The generator realizes finished tiles through [`SpawnBackend`] and never
//! touches geometry itself.
//!
//! ```text
//! Generator calls:               Backend implements:
//! ┌──────────────────────┐       ┌──────────────────────┐
//! │ spawn_ground_tile    │  ───> │ place a ground block │
//! │ spawn_ramp           │  ───> │ place a slope        │
//! │ spawn_obstacle       │  ───> │ place an obstacle    │
//! │ despawn              │  ───> │ remove it again      │
//! └──────────────────────┘       └──────────────────────┘
//! ```
//!
//! Indices are passed as-is. [`GeometryParams`] is forwarded untouched; turning
//! indices into world coordinates is the backend's job.

use std::collections::BTreeSet;

use crate::config::GeometryParams;
use crate::error::SpawnError;
use crate::tile::{ObstacleKind, RenderHandle, TileCoord};

/// Realizes generated tiles.
pub trait SpawnBackend {
    /// Spawns the ground block of a tile.
    ///
    /// # Errors
    ///
    /// Returns [`SpawnError`] if the block could not be realized.
    fn spawn_ground_tile(
        &mut self,
        coord: TileCoord,
        height: u32,
        is_ramp: bool,
        geometry: &GeometryParams,
    ) -> Result<RenderHandle, SpawnError>;

    /// Spawns the slope of a ramp tile. `height` is the ramp's exit height.
    ///
    /// # Errors
    ///
    /// Returns [`SpawnError`] if the slope could not be realized.
    fn spawn_ramp(
        &mut self,
        coord: TileCoord,
        height: u32,
        geometry: &GeometryParams,
    ) -> Result<RenderHandle, SpawnError>;

    /// Spawns an obstacle standing on a tile of the given height.
    ///
    /// # Errors
    ///
    /// Returns [`SpawnError`] if the obstacle could not be realized.
    fn spawn_obstacle(
        &mut self,
        coord: TileCoord,
        height: u32,
        kind: &ObstacleKind,
        geometry: &GeometryParams,
    ) -> Result<RenderHandle, SpawnError>;

    /// Releases a previously spawned object. Unknown handles are ignored.
    fn despawn(&mut self, handle: RenderHandle);
}

impl<B: SpawnBackend + ?Sized> SpawnBackend for &mut B {
    fn spawn_ground_tile(
        &mut self,
        coord: TileCoord,
        height: u32,
        is_ramp: bool,
        geometry: &GeometryParams,
    ) -> Result<RenderHandle, SpawnError> {
        (**self).spawn_ground_tile(coord, height, is_ramp, geometry)
    }

    fn spawn_ramp(
        &mut self,
        coord: TileCoord,
        height: u32,
        geometry: &GeometryParams,
    ) -> Result<RenderHandle, SpawnError> {
        (**self).spawn_ramp(coord, height, geometry)
    }

    fn spawn_obstacle(
        &mut self,
        coord: TileCoord,
        height: u32,
        kind: &ObstacleKind,
        geometry: &GeometryParams,
    ) -> Result<RenderHandle, SpawnError> {
        (**self).spawn_obstacle(coord, height, kind, geometry)
    }

    fn despawn(&mut self, handle: RenderHandle) {
        (**self).despawn(handle);
    }
}

/// Backend with no output: hands out handles and tracks which are live.
///
/// Used by headless servers, tests and benchmarks.
#[derive(Clone, Debug, Default)]
pub struct HeadlessBackend {
    next_handle: u64,
    live: BTreeSet<RenderHandle>,
    spawned_total: u64,
}

impl HeadlessBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of handles spawned and not yet released.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Number of objects spawned over the backend's lifetime.
    #[must_use]
    pub const fn spawned_total(&self) -> u64 {
        self.spawned_total
    }

    /// Whether `handle` is currently live.
    #[must_use]
    pub fn is_live(&self, handle: RenderHandle) -> bool {
        self.live.contains(&handle)
    }

    fn issue(&mut self) -> RenderHandle {
        let handle = RenderHandle(self.next_handle);
        self.next_handle += 1;
        self.spawned_total += 1;
        self.live.insert(handle);
        handle
    }
}

impl SpawnBackend for HeadlessBackend {
    fn spawn_ground_tile(
        &mut self,
        _coord: TileCoord,
        _height: u32,
        _is_ramp: bool,
        _geometry: &GeometryParams,
    ) -> Result<RenderHandle, SpawnError> {
        Ok(self.issue())
    }

    fn spawn_ramp(
        &mut self,
        _coord: TileCoord,
        _height: u32,
        _geometry: &GeometryParams,
    ) -> Result<RenderHandle, SpawnError> {
        Ok(self.issue())
    }

    fn spawn_obstacle(
        &mut self,
        _coord: TileCoord,
        _height: u32,
        _kind: &ObstacleKind,
        _geometry: &GeometryParams,
    ) -> Result<RenderHandle, SpawnError> {
        Ok(self.issue())
    }

    fn despawn(&mut self, handle: RenderHandle) {
        self.live.remove(&handle);
    }
}
