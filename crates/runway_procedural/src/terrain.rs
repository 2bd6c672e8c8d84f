//! # Layer Terrain
//!
//! Height assignment and ramp repair for one new layer.
//!
//! ## Height assignment
//!
//! Each lane keeps its predecessor's height unless a change roll succeeds,
//! in which case a new height is drawn within `max_height_change` of the old
//! one. The first layer always rolls. A lane that just climbed a ramp stays
//! level for one layer.
//!
//! ## Ramp repair
//!
//! A climb is fine if a side lane offers a way around it: that lane started
//! no higher and does not climb itself. A climb with no way around is a death
//! wall and becomes a ramp exiting one level above the old height. A one-level
//! climb that does have a way around may still become a ramp, by chance.
//!
//! Lanes are repaired left to right. A repaired lane counts as level for the
//! lanes after it, so a ramp can be the way around for its right neighbor.

use crate::config::LevelConfig;
use crate::random::RandomSource;
use crate::tile::{TileCoord, TileRecord};

/// Ramps added by one repair pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RepairOutcome {
    /// Ramps placed to break a death wall.
    pub required_ramps: u32,
    /// Ramps placed for variety on already reachable climbs.
    pub optional_ramps: u32,
}

/// Draws candidate heights for layer `forward_index`.
///
/// Per lane this draws one change roll, then one height only if the roll
/// allows a change.
pub(crate) fn assign_heights<R: RandomSource + ?Sized>(
    config: &LevelConfig,
    rng: &mut R,
    forward_index: u32,
    prev: Option<&[TileRecord]>,
) -> Vec<TileRecord> {
    let max_height = config.max_height();
    let step = config.max_height_change;

    (0..config.lane_count)
        .map(|lane| {
            let roll = rng.uniform_unit();
            let (prev_height, prev_ramp) = prev
                .and_then(|tiles| tiles.get(lane as usize))
                .map_or((0, false), |tile| (tile.height(), tile.is_ramp()));

            let can_change = (prev.is_none() || roll < config.probability_to_change_height) && !prev_ramp;
            let height = if can_change {
                let low = prev_height.saturating_sub(step).min(max_height);
                let high = prev_height.saturating_add(step).min(max_height);
                rng.uniform_int(low, high + 1)
            } else {
                prev_height
            };

            TileRecord::new(TileCoord::new(lane, forward_index), height)
        })
        .collect()
}

/// Turns death walls in `layer` into ramps, given the committed `prev` layer.
pub(crate) fn repair_reachability<R: RandomSource + ?Sized>(
    layer: &mut [TileRecord],
    prev: &[TileRecord],
    probability_for_non_required_ramps: f32,
    rng: &mut R,
) -> RepairOutcome {
    debug_assert_eq!(layer.len(), prev.len());

    let prev_heights: Vec<u32> = prev.iter().map(TileRecord::height).collect();
    // Heights as seen by lanes further right: ramps read as level.
    let mut effective: Vec<u32> = layer.iter().map(TileRecord::height).collect();
    let mut outcome = RepairOutcome::default();

    for lane in 0..layer.len() {
        let prev_height = prev_heights[lane];
        let height = effective[lane];
        if height <= prev_height {
            continue;
        }

        let has_way_around = [lane.checked_sub(1), Some(lane + 1)]
            .into_iter()
            .flatten()
            .filter(|&side| side < layer.len())
            .any(|side| prev_heights[side] <= prev_height && effective[side] <= prev_heights[side]);

        if !has_way_around {
            layer[lane].make_ramp(prev_height + 1);
            effective[lane] = prev_height;
            outcome.required_ramps += 1;
        } else if height - prev_height == 1 && rng.uniform_unit() < probability_for_non_required_ramps {
            layer[lane].make_ramp(height);
            effective[lane] = prev_height;
            outcome.optional_ramps += 1;
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{LevelSeed, SeededRandom};

    /// Replays fixed draws; panics when a test draws more than it scripted.
    struct Script {
        units: Vec<f32>,
        ints: Vec<u32>,
    }

    impl Script {
        fn new(units: &[f32], ints: &[u32]) -> Self {
            Self {
                units: units.iter().rev().copied().collect(),
                ints: ints.iter().rev().copied().collect(),
            }
        }
    }

    impl RandomSource for Script {
        fn uniform_int(&mut self, low: u32, high: u32) -> u32 {
            let value = self.ints.pop().expect("unscripted int draw");
            assert!(value >= low && (value < high || low >= high), "scripted {value} outside [{low}, {high})");
            value
        }

        fn uniform_unit(&mut self) -> f32 {
            self.units.pop().expect("unscripted unit draw")
        }
    }

    fn layer_of(forward_index: u32, heights: &[u32]) -> Vec<TileRecord> {
        heights
            .iter()
            .enumerate()
            .map(|(lane, &h)| TileRecord::new(TileCoord::new(lane as u32, forward_index), h))
            .collect()
    }

    fn heights(layer: &[TileRecord]) -> Vec<u32> {
        layer.iter().map(TileRecord::height).collect()
    }

    fn ramps(layer: &[TileRecord]) -> Vec<bool> {
        layer.iter().map(TileRecord::is_ramp).collect()
    }

    #[test]
    fn test_first_layer_always_rolls_height() {
        let config = LevelConfig::default()
            .with_lanes(3)
            .with_height_levels(4)
            .with_change_probability(0.0);
        // The change roll is still drawn but ignored on the first layer.
        let mut rng = Script::new(&[0.9, 0.9, 0.9], &[3, 0, 2]);

        let layer = assign_heights(&config, &mut rng, 0, None);
        assert_eq!(heights(&layer), vec![3, 0, 2]);
        assert!(layer.iter().all(|t| t.forward_index() == 0));
    }

    #[test]
    fn test_failed_roll_keeps_height() {
        let config = LevelConfig::default()
            .with_lanes(2)
            .with_height_levels(4)
            .with_change_probability(0.5);
        let prev = layer_of(0, &[2, 1]);
        // Lane 0 fails its roll, lane 1 passes and draws 3.
        let mut rng = Script::new(&[0.7, 0.2], &[3]);

        let layer = assign_heights(&config, &mut rng, 1, Some(&prev));
        assert_eq!(heights(&layer), vec![2, 3]);
    }

    #[test]
    fn test_lane_after_ramp_stays_level() {
        let config = LevelConfig::default()
            .with_lanes(1)
            .with_height_levels(4)
            .with_change_probability(1.0);
        let mut prev = layer_of(0, &[1]);
        prev[0].make_ramp(1);
        let mut rng = Script::new(&[0.0], &[]);

        let layer = assign_heights(&config, &mut rng, 1, Some(&prev));
        assert_eq!(heights(&layer), vec![1]);
    }

    #[test]
    fn test_height_draw_clamped_to_levels() {
        let config = LevelConfig::default()
            .with_lanes(1)
            .with_height_levels(3)
            .with_max_height_change(1)
            .with_change_probability(1.0);
        let mut rng = SeededRandom::new(LevelSeed::new(5));
        let mut prev = layer_of(0, &[2]);

        for i in 1..500 {
            let layer = assign_heights(&config, &mut rng, i, Some(&prev));
            let (old, new) = (prev[0].height(), layer[0].height());
            assert!(new <= 2);
            assert!(old.abs_diff(new) <= 1);
            prev = layer;
        }
    }

    #[test]
    fn test_level_and_falling_lanes_untouched() {
        let prev = layer_of(0, &[2, 2, 2]);
        let mut layer = layer_of(1, &[2, 0, 1]);
        let mut rng = Script::new(&[], &[]);

        let outcome = repair_reachability(&mut layer, &prev, 1.0, &mut rng);
        assert_eq!(outcome, RepairOutcome::default());
        assert_eq!(ramps(&layer), vec![false, false, false]);
    }

    #[test]
    fn test_climb_with_level_neighbor_is_kept() {
        let prev = layer_of(0, &[0, 0, 0]);
        let mut layer = layer_of(1, &[2, 0, 0]);
        let mut rng = Script::new(&[], &[]);

        let outcome = repair_reachability(&mut layer, &prev, 1.0, &mut rng);
        assert_eq!(outcome, RepairOutcome::default());
        assert_eq!(heights(&layer), vec![2, 0, 0]);
    }

    #[test]
    fn test_wall_across_all_lanes() {
        let prev = layer_of(0, &[0, 0, 0]);
        let mut layer = layer_of(1, &[3, 3, 3]);
        let mut rng = Script::new(&[], &[]);

        let outcome = repair_reachability(&mut layer, &prev, 0.0, &mut rng);

        // Lane 0 has no way around and ramps. Lane 1 can go around through
        // lane 0's ramp, so it keeps its climb. Lane 2 only borders the
        // climbing lane 1 and ramps.
        assert_eq!(ramps(&layer), vec![true, false, true]);
        assert_eq!(heights(&layer), vec![1, 3, 1]);
        assert_eq!(outcome.required_ramps, 2);
    }

    #[test]
    fn test_single_lane_climb_always_ramps() {
        let prev = layer_of(0, &[0]);
        let mut layer = layer_of(1, &[2]);
        let mut rng = Script::new(&[], &[]);

        repair_reachability(&mut layer, &prev, 0.0, &mut rng);
        assert!(layer[0].is_ramp());
        assert_eq!(layer[0].height(), 1);
    }

    #[test]
    fn test_neighbor_starting_higher_does_not_help() {
        let prev = layer_of(0, &[0, 1]);
        let mut layer = layer_of(1, &[2, 1]);
        let mut rng = Script::new(&[], &[]);

        repair_reachability(&mut layer, &prev, 0.0, &mut rng);
        assert_eq!(ramps(&layer), vec![true, false]);
    }

    #[test]
    fn test_right_neighbor_read_before_repair() {
        // Lane 0 is checked first and sees lane 1 still climbing, so it ramps.
        // Lane 1 then goes around through lane 0's ramp.
        let prev = layer_of(0, &[0, 0]);
        let mut layer = layer_of(1, &[2, 2]);
        let mut rng = Script::new(&[], &[]);

        let outcome = repair_reachability(&mut layer, &prev, 0.0, &mut rng);
        assert_eq!(ramps(&layer), vec![true, false]);
        assert_eq!(outcome.required_ramps, 1);
    }

    #[test]
    fn test_optional_ramp_on_one_level_climb() {
        let prev = layer_of(0, &[0, 0]);
        let mut layer = layer_of(1, &[1, 0]);

        let mut rng = Script::new(&[0.3], &[]);
        let outcome = repair_reachability(&mut layer, &prev, 0.5, &mut rng);
        assert_eq!(outcome.optional_ramps, 1);
        assert!(layer[0].is_ramp());
        assert_eq!(layer[0].height(), 1);

        let mut layer = layer_of(1, &[1, 0]);
        let mut rng = Script::new(&[0.6], &[]);
        let outcome = repair_reachability(&mut layer, &prev, 0.5, &mut rng);
        assert_eq!(outcome.optional_ramps, 0);
        assert!(!layer[0].is_ramp());
    }

    #[test]
    fn test_optional_ramp_not_rolled_for_big_climb() {
        let prev = layer_of(0, &[0, 0]);
        let mut layer = layer_of(1, &[2, 0]);
        // No unit draw scripted: a two-level climb must not roll.
        let mut rng = Script::new(&[], &[]);

        repair_reachability(&mut layer, &prev, 1.0, &mut rng);
        assert!(!layer[0].is_ramp());
    }
}
