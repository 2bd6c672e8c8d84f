//! # Tile Records
//!
//! One record per lane-cell of a generated layer.
//!
//! A record's coordinates are fixed at creation. Height and ramp flag are only
//! touched by the repair pass of the layer that created it; the obstacle is
//! set at most once by the scheduler. After that the record is frozen and
//! only gains the render handles returned by the backend.

use serde::{Deserialize, Serialize};

/// Position of a tile in the level grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileCoord {
    /// Lane index (0..lane count).
    pub lane: u32,
    /// Layer index along the travel axis.
    pub forward_index: u32,
}

impl TileCoord {
    /// Creates a new tile coordinate.
    #[inline]
    #[must_use]
    pub const fn new(lane: u32, forward_index: u32) -> Self {
        Self {
            lane,
            forward_index,
        }
    }
}

/// An entry of the obstacle catalog.
///
/// The generator never inspects it; the backend decides what it looks like.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObstacleKind(String);

impl ObstacleKind {
    /// Creates an obstacle kind from its catalog name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the catalog name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Opaque handle to an object realized by a spawn backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderHandle(pub u64);

/// Generation state of a single lane-cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileRecord {
    coord: TileCoord,
    height: u32,
    is_ramp: bool,
    obstacle: Option<ObstacleKind>,
    handles: Vec<RenderHandle>,
}

impl TileRecord {
    /// Creates a flat, obstacle-free tile.
    #[must_use]
    pub fn new(coord: TileCoord, height: u32) -> Self {
        Self {
            coord,
            height,
            is_ramp: false,
            obstacle: None,
            handles: Vec::new(),
        }
    }

    /// Grid position of this tile.
    #[inline]
    #[must_use]
    pub const fn coord(&self) -> TileCoord {
        self.coord
    }

    /// Lane index.
    #[inline]
    #[must_use]
    pub const fn lane(&self) -> u32 {
        self.coord.lane
    }

    /// Layer index.
    #[inline]
    #[must_use]
    pub const fn forward_index(&self) -> u32 {
        self.coord.forward_index
    }

    /// Discrete height level. For ramps this is the exit (top) height.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Whether this tile climbs one level.
    #[inline]
    #[must_use]
    pub const fn is_ramp(&self) -> bool {
        self.is_ramp
    }

    /// The obstacle placed on this tile, if any.
    #[inline]
    #[must_use]
    pub fn obstacle(&self) -> Option<&ObstacleKind> {
        self.obstacle.as_ref()
    }

    /// Handles of everything the backend spawned for this tile.
    #[inline]
    #[must_use]
    pub fn handles(&self) -> &[RenderHandle] {
        &self.handles
    }

    /// Turns the tile into a ramp exiting at `height`.
    pub(crate) fn make_ramp(&mut self, height: u32) {
        debug_assert!(self.obstacle.is_none(), "ramps never carry obstacles");
        self.is_ramp = true;
        self.height = height;
    }

    /// Places an obstacle. Ramps are rejected by the scheduler before this.
    pub(crate) fn place_obstacle(&mut self, kind: ObstacleKind) {
        debug_assert!(!self.is_ramp, "ramps never carry obstacles");
        debug_assert!(self.obstacle.is_none(), "obstacle set twice");
        self.obstacle = Some(kind);
    }

    pub(crate) fn attach_handle(&mut self, handle: RenderHandle) {
        self.handles.push(handle);
    }

    /// Removes and returns every attached handle, oldest first.
    pub(crate) fn drain_handles(&mut self) -> std::vec::Drain<'_, RenderHandle> {
        self.handles.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tile_is_flat_and_empty() {
        let tile = TileRecord::new(TileCoord::new(2, 7), 1);

        assert_eq!(tile.lane(), 2);
        assert_eq!(tile.forward_index(), 7);
        assert_eq!(tile.height(), 1);
        assert!(!tile.is_ramp());
        assert!(tile.obstacle().is_none());
        assert!(tile.handles().is_empty());
    }

    #[test]
    fn test_handles_drain_in_order() {
        let mut tile = TileRecord::new(TileCoord::new(0, 0), 0);
        tile.attach_handle(RenderHandle(4));
        tile.attach_handle(RenderHandle(9));

        let drained: Vec<_> = tile.drain_handles().collect();
        assert_eq!(drained, vec![RenderHandle(4), RenderHandle(9)]);
        assert!(tile.handles().is_empty());
    }

    #[test]
    fn test_obstacle_kind_deserializes_from_plain_string() {
        #[derive(Deserialize)]
        struct Catalog {
            obstacles: Vec<ObstacleKind>,
        }

        let catalog: Catalog = toml::from_str(r#"obstacles = ["barrier", "hurdle"]"#).unwrap();
        assert_eq!(catalog.obstacles[1].name(), "hurdle");
    }
}
