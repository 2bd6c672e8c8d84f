//! # Tile Grid
//!
//! Append-only table of tile records indexed by (layer, lane).
//!
//! Layers are only ever pushed at the far end. The generator pops a layer
//! back off only when it failed before commit.

use crate::tile::{TileCoord, TileRecord};

/// Generated level, one `Vec` of lane tiles per layer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileGrid {
    lane_count: u32,
    height_levels: u32,
    layers: Vec<Vec<TileRecord>>,
}

impl TileGrid {
    /// Creates an empty grid for the given shape.
    #[must_use]
    pub fn new(lane_count: u32, height_levels: u32) -> Self {
        Self {
            lane_count,
            height_levels,
            layers: Vec::new(),
        }
    }

    /// Lanes per layer.
    #[inline]
    #[must_use]
    pub const fn lane_count(&self) -> u32 {
        self.lane_count
    }

    /// Height levels the grid was generated with.
    #[inline]
    #[must_use]
    pub const fn height_levels(&self) -> u32 {
        self.height_levels
    }

    /// Number of layers.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether no layer has been generated.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Tiles of one layer, in lane order.
    #[must_use]
    pub fn layer(&self, forward_index: u32) -> Option<&[TileRecord]> {
        self.layers.get(forward_index as usize).map(Vec::as_slice)
    }

    /// The furthest layer.
    #[must_use]
    pub fn last_layer(&self) -> Option<&[TileRecord]> {
        self.layers.last().map(Vec::as_slice)
    }

    /// One tile.
    #[must_use]
    pub fn tile(&self, coord: TileCoord) -> Option<&TileRecord> {
        self.layer(coord.forward_index)?.get(coord.lane as usize)
    }

    /// Iterates layers from nearest to furthest.
    pub fn layers(&self) -> impl DoubleEndedIterator<Item = &[TileRecord]> + ExactSizeIterator + '_ {
        self.layers.iter().map(Vec::as_slice)
    }

    /// Iterates every tile, layer by layer, lane by lane.
    pub fn tiles(&self) -> impl Iterator<Item = &TileRecord> + '_ {
        self.layers.iter().flatten()
    }

    /// Every tile whose climb has no ramp and no safe side lane.
    ///
    /// A side lane is safe when it started no higher than this lane and did
    /// not climb, or climbed by a ramp. An empty result means every layer can
    /// be entered from the one before it.
    ///
    /// A ramped side lane counts as level even though its height rose, so a
    /// climb next to a ramp is not a wall. That matches the repair pass, which
    /// treats already-ramped lanes as level when judging their neighbours.
    #[must_use]
    pub fn death_walls(&self) -> Vec<TileCoord> {
        let mut walls = Vec::new();
        for pair in self.layers.windows(2) {
            let (prev, current) = (&pair[0], &pair[1]);
            for (lane, tile) in current.iter().enumerate() {
                let prev_height = prev[lane].height();
                if tile.height() <= prev_height || tile.is_ramp() {
                    continue;
                }
                let safe_side = [lane.checked_sub(1), Some(lane + 1)]
                    .into_iter()
                    .flatten()
                    .filter(|&side| side < current.len())
                    .any(|side| {
                        let side_prev = prev[side].height();
                        let side_tile = &current[side];
                        side_prev <= prev_height
                            && (side_tile.height() <= side_prev || side_tile.is_ramp())
                    });
                if !safe_side {
                    walls.push(tile.coord());
                }
            }
        }
        walls
    }

    pub(crate) fn push_layer(&mut self, layer: Vec<TileRecord>) {
        debug_assert_eq!(layer.len(), self.lane_count as usize);
        self.layers.push(layer);
    }

    pub(crate) fn pop_layer(&mut self) -> Option<Vec<TileRecord>> {
        self.layers.pop()
    }

    pub(crate) fn last_layer_mut(&mut self) -> Option<&mut Vec<TileRecord>> {
        self.layers.last_mut()
    }

    pub(crate) fn tiles_mut(&mut self) -> impl Iterator<Item = &mut TileRecord> + '_ {
        self.layers.iter_mut().flatten()
    }
}
