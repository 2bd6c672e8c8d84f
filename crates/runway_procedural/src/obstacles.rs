//! # Obstacle Scheduler
//!
//! Per-lane countdowns that space obstacles along each lane.
//!
//! A lane's timer holds the number of non-ramp tiles still to pass before its
//! next obstacle. Ramp tiles are invisible to the countdown: they neither
//! consume nor reset it. When the timer reaches zero the current tile gets an
//! obstacle and the timer is re-rolled from the spacing window, so the gap
//! between two obstacles in one lane is always in `[min, max)` non-ramp tiles.

use crate::random::RandomSource;
use crate::tile::{ObstacleKind, TileRecord};

/// Half-open range of non-ramp tiles between obstacles in one lane.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpacingWindow {
    /// Inclusive lower bound.
    pub min: u32,
    /// Exclusive upper bound. Equal to `min` means exactly `min`.
    pub max: u32,
}

impl SpacingWindow {
    /// Creates a spacing window.
    #[inline]
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    fn roll<R: RandomSource + ?Sized>(self, rng: &mut R) -> u32 {
        rng.uniform_int(self.min, self.max)
    }
}

/// Per-lane obstacle countdowns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObstacleScheduler {
    timers: Vec<u32>,
}

impl ObstacleScheduler {
    /// Creates a scheduler with no lanes. Call [`ObstacleScheduler::reset`] before use.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current countdown of every lane.
    #[inline]
    #[must_use]
    pub fn timers(&self) -> &[u32] {
        &self.timers
    }

    /// Number of lanes the timers were rolled for.
    #[inline]
    #[must_use]
    pub fn lane_count(&self) -> usize {
        self.timers.len()
    }

    /// Rolls a fresh countdown for each of `lanes` lanes, in lane order.
    pub fn reset<R: RandomSource + ?Sized>(&mut self, lanes: u32, window: SpacingWindow, rng: &mut R) {
        self.timers.clear();
        self.timers.extend((0..lanes).map(|_| window.roll(rng)));
    }

    /// Places obstacles on one finished layer.
    ///
    /// Does nothing when the catalog is empty. Returns the number of
    /// obstacles placed.
    pub fn schedule_layer<R: RandomSource + ?Sized>(
        &mut self,
        layer: &mut [TileRecord],
        catalog: &[ObstacleKind],
        window: SpacingWindow,
        rng: &mut R,
    ) -> usize {
        if catalog.is_empty() {
            return 0;
        }
        debug_assert_eq!(layer.len(), self.timers.len());

        let mut placed = 0;
        for (tile, timer) in layer.iter_mut().zip(self.timers.iter_mut()) {
            if tile.is_ramp() {
                continue;
            }
            if *timer != 0 {
                *timer -= 1;
                continue;
            }

            let pick = rng.uniform_int(0, u32::try_from(catalog.len()).unwrap_or(u32::MAX));
            tile.place_obstacle(catalog[pick as usize].clone());
            *timer = window.roll(rng);
            placed += 1;
        }
        placed
    }
}
