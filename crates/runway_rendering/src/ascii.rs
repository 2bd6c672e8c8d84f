//! # ASCII Level View
//!
//! Text rendering of a generated level, furthest layer on top so the runner
//! reads it bottom-up:
//!
//! ```text
//!  12 | 2   2*  1
//!  11 | 2/  1   1
//!  10 | 1   1   1*
//! ```
//!
//! Each cell is the height digit, `/` if the tile is a ramp, `*` if it
//! carries an obstacle.

use std::fmt::{self, Write as _};

use runway_procedural::{TileGrid, TileRecord};

/// Borrowed text view over a grid.
#[derive(Clone, Copy, Debug)]
pub struct AsciiView<'a> {
    grid: &'a TileGrid,
}

impl<'a> AsciiView<'a> {
    /// Creates a view over `grid`.
    #[must_use]
    pub const fn new(grid: &'a TileGrid) -> Self {
        Self { grid }
    }

    fn cell(tile: &TileRecord) -> String {
        let mut cell = tile.height().to_string();
        if tile.is_ramp() {
            cell.push('/');
        }
        if tile.obstacle().is_some() {
            cell.push('*');
        }
        cell
    }
}

impl fmt::Display for AsciiView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.grid.len().saturating_sub(1).to_string().len().max(3);

        for (forward_index, layer) in self.grid.layers().enumerate().rev() {
            let mut row = String::new();
            for tile in layer {
                write!(row, "{:<4}", Self::cell(tile))?;
            }
            writeln!(f, "{forward_index:>width$} | {}", row.trim_end())?;
        }
        Ok(())
    }
}
