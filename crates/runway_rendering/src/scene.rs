//! # Scene Backend
//!
//! In-memory scene that realizes generated tiles as placed objects.
//!
//! The scene owns every object it spawned, keyed by handle. An optional
//! capacity models a fixed-size object pool: once full, spawns fail and the
//! generator rolls the layer back.

use std::collections::BTreeMap;

use runway_procedural::{
    GeometryParams, ObstacleKind, RenderHandle, SpawnBackend, SpawnError, TileCoord,
};

use crate::transform::{ground_transform, obstacle_transform, ramp_transform, Transform};

/// What a scene object is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SceneObjectKind {
    /// Ground block.
    Ground,
    /// Ramp slope.
    Ramp,
    /// Obstacle from the catalog.
    Obstacle(ObstacleKind),
}

/// A placed object.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneObject {
    /// Kind of object.
    pub kind: SceneObjectKind,
    /// Tile it belongs to.
    pub coord: TileCoord,
    /// World placement.
    pub transform: Transform,
}

/// Counters over the scene's lifetime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SceneStats {
    /// Objects spawned.
    pub spawned: u64,
    /// Objects despawned.
    pub despawned: u64,
    /// Spawns refused because the scene was full.
    pub refused: u64,
}

/// [`SpawnBackend`] that keeps placed objects in memory.
#[derive(Clone, Debug, Default)]
pub struct SceneBackend {
    objects: BTreeMap<RenderHandle, SceneObject>,
    next_handle: u64,
    capacity: Option<usize>,
    stats: SceneStats,
}

impl SceneBackend {
    /// Creates an unbounded scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scene holding at most `capacity` objects at once.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::default()
        }
    }

    /// Number of live objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the scene holds no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Looks up an object.
    #[must_use]
    pub fn get(&self, handle: RenderHandle) -> Option<&SceneObject> {
        self.objects.get(&handle)
    }

    /// Iterates live objects in spawn order.
    pub fn objects(&self) -> impl Iterator<Item = (RenderHandle, &SceneObject)> + '_ {
        self.objects.iter().map(|(&handle, object)| (handle, object))
    }

    /// Lifetime counters.
    #[must_use]
    pub const fn stats(&self) -> SceneStats {
        self.stats
    }

    fn insert(&mut self, kind: SceneObjectKind, coord: TileCoord, transform: Transform) -> Result<RenderHandle, SpawnError> {
        if let Some(capacity) = self.capacity {
            if self.objects.len() >= capacity {
                self.stats.refused += 1;
                tracing::warn!(capacity, lane = coord.lane, forward_index = coord.forward_index, "scene full");
                return Err(SpawnError::new(format!("scene full: capacity {capacity}")));
            }
        }

        let handle = RenderHandle(self.next_handle);
        self.next_handle += 1;
        self.stats.spawned += 1;
        self.objects.insert(handle, SceneObject { kind, coord, transform });
        Ok(handle)
    }
}

impl SpawnBackend for SceneBackend {
    fn spawn_ground_tile(
        &mut self,
        coord: TileCoord,
        height: u32,
        is_ramp: bool,
        geometry: &GeometryParams,
    ) -> Result<RenderHandle, SpawnError> {
        let transform = ground_transform(coord, height, is_ramp, geometry);
        self.insert(SceneObjectKind::Ground, coord, transform)
    }

    fn spawn_ramp(
        &mut self,
        coord: TileCoord,
        height: u32,
        geometry: &GeometryParams,
    ) -> Result<RenderHandle, SpawnError> {
        let transform = ramp_transform(coord, height, geometry);
        self.insert(SceneObjectKind::Ramp, coord, transform)
    }

    fn spawn_obstacle(
        &mut self,
        coord: TileCoord,
        height: u32,
        kind: &ObstacleKind,
        geometry: &GeometryParams,
    ) -> Result<RenderHandle, SpawnError> {
        let transform = obstacle_transform(coord, height, geometry);
        self.insert(SceneObjectKind::Obstacle(kind.clone()), coord, transform)
    }

    fn despawn(&mut self, handle: RenderHandle) {
        if self.objects.remove(&handle).is_some() {
            self.stats.despawned += 1;
        }
    }
}
