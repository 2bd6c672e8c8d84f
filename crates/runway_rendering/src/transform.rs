//! # World Transforms
//!
//! Converts tile indices into world-space placement.
//!
//! Axes: X across lanes, Y up, Z along the travel direction. Every object is
//! an axis-aligned box described by its centre and size.
//!
//! ```text
//!   ramp tile (exit height 2)        flat tile (height 2)
//!
//!        /|  <- slope, one level          ┌──┐
//!       / |                               │  │
//!   ┌──┐                                  │  │  3 levels tall
//!   │  │  2 levels tall                   │  │
//!   └──┘                                  └──┘
//! ```

use runway_procedural::{GeometryParams, TileCoord};

/// Placement of one scene object.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform {
    /// World position.
    pub position: [f32; 3],
    /// Size along each axis.
    pub scale: [f32; 3],
}

#[allow(clippy::cast_precision_loss)]
fn base(coord: TileCoord, geometry: &GeometryParams) -> [f32; 3] {
    let [ox, oy, oz] = geometry.offset;
    [
        geometry.lane_width * coord.lane as f32 + ox,
        oy,
        coord.forward_index as f32 * geometry.tile_length + oz,
    ]
}

/// Ground block filling a tile column from the floor up to the walking surface.
///
/// Under a ramp the block stops one level short; the slope covers the rest.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn ground_transform(coord: TileCoord, height: u32, is_ramp: bool, geometry: &GeometryParams) -> Transform {
    let [x, y, z] = base(coord, geometry);
    let top = if is_ramp { height as f32 - 1.0 } else { height as f32 };
    let levels = if is_ramp { height as f32 } else { height as f32 + 1.0 };

    Transform {
        position: [x, y + top / 2.0 * geometry.tile_height, z],
        scale: [geometry.lane_width, geometry.tile_height * levels, geometry.tile_length],
    }
}

/// Slope of a ramp tile, one level tall, sitting at its exit height.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn ramp_transform(coord: TileCoord, height: u32, geometry: &GeometryParams) -> Transform {
    let [x, y, z] = base(coord, geometry);
    Transform {
        position: [x, y + height as f32 * geometry.tile_height, z],
        scale: [geometry.lane_width, geometry.tile_height, geometry.tile_length],
    }
}

/// Obstacle standing on the walking surface of a tile.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn obstacle_transform(coord: TileCoord, height: u32, geometry: &GeometryParams) -> Transform {
    let [x, y, z] = base(coord, geometry);
    Transform {
        position: [x, y + (height as f32 + 1.0) * geometry.tile_height, z],
        scale: [1.0; 3],
    }
}
