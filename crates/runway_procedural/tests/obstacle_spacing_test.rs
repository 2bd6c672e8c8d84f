//! # Obstacle Spacing Integration Test
//!
//! Verifies obstacle gaps per lane over long generated levels.

use runway_procedural::{HeadlessBackend, LevelConfig, LevelGenerator, LevelSeed, TileGrid};

/// Non-ramp tiles between consecutive obstacles in one lane, counted from
/// the start of the level. The trailing run after the last obstacle is
/// returned separately.
fn lane_gaps(grid: &TileGrid, lane: usize) -> (Vec<u32>, u32) {
    let mut gaps = Vec::new();
    let mut run = 0;
    for layer in grid.layers() {
        let tile = &layer[lane];
        if tile.is_ramp() {
            continue;
        }
        if tile.obstacle().is_some() {
            gaps.push(run);
            run = 0;
        } else {
            run += 1;
        }
    }
    (gaps, run)
}

fn assert_spacing(grid: &TileGrid, min: u32, max: u32) {
    let upper = max.max(min + 1);
    for lane in 0..grid.lane_count() as usize {
        let (gaps, trailing) = lane_gaps(grid, lane);
        assert!(!gaps.is_empty(), "lane {lane} never got an obstacle");
        for gap in gaps {
            assert!(
                (min..upper).contains(&gap),
                "lane {lane}: gap {gap} outside [{min}, {max})"
            );
        }
        assert!(trailing < upper, "lane {lane}: trailing run {trailing} too long");
    }
}

/// Test: gaps stay inside the window on flat ground.
#[test]
fn test_spacing_on_flat_level() {
    let config = LevelConfig::default()
        .with_lanes(4)
        .with_change_probability(0.0)
        .with_obstacle_spacing(2, 5)
        .with_obstacles(["barrier", "hurdle", "slide"]);

    for seed in 0..20 {
        let mut gen = LevelGenerator::with_seed(config.clone(), HeadlessBackend::new(), LevelSeed::new(seed));
        gen.generate(300, true).unwrap();
        assert_spacing(gen.grid(), 2, 5);
    }
}

/// Test: ramps are skipped by the countdown and never carry obstacles.
#[test]
fn test_spacing_with_many_ramps() {
    let config = LevelConfig::default()
        .with_lanes(3)
        .with_height_levels(6)
        .with_change_probability(0.9)
        .with_ramp_probability(1.0)
        .with_obstacle_spacing(1, 3)
        .with_obstacles(["barrier"]);

    for seed in 0..20 {
        let mut gen = LevelGenerator::with_seed(config.clone(), HeadlessBackend::new(), LevelSeed::new(seed));
        gen.generate(300, true).unwrap();

        let grid = gen.grid();
        assert!(grid.tiles().any(|t| t.is_ramp()), "seed {seed} produced no ramps");
        assert!(grid.tiles().all(|t| !(t.is_ramp() && t.obstacle().is_some())));
        assert_spacing(grid, 1, 3);
    }
}

/// Test: spacing carries across an extension without a reset.
#[test]
fn test_spacing_across_extensions() {
    let config = LevelConfig::default()
        .with_lanes(2)
        .with_change_probability(0.3)
        .with_obstacle_spacing(3, 6)
        .with_obstacles(["barrier"]);
    let mut gen = LevelGenerator::with_seed(config, HeadlessBackend::new(), LevelSeed::new(11));

    for _ in 0..30 {
        gen.extend(7).unwrap();
    }
    assert_eq!(gen.cursor(), 210);
    assert_spacing(gen.grid(), 3, 6);
}

/// Test: a degenerate window gives a fixed gap.
#[test]
fn test_fixed_gap_window() {
    let config = LevelConfig::default()
        .with_lanes(3)
        .with_change_probability(0.0)
        .with_obstacle_spacing(4, 4)
        .with_obstacles(["barrier"]);
    let mut gen = LevelGenerator::with_seed(config, HeadlessBackend::new(), LevelSeed::new(1));
    gen.generate(50, true).unwrap();

    for lane in 0..3 {
        let (gaps, _) = lane_gaps(gen.grid(), lane);
        assert_eq!(gaps, vec![4; 10]);
    }
}

/// Test: an empty catalog places nothing and leaves timers untouched.
#[test]
fn test_empty_catalog_places_nothing() {
    let mut gen = LevelGenerator::with_seed(LevelConfig::default(), HeadlessBackend::new(), LevelSeed::new(5));
    gen.generate(1, true).unwrap();
    let timers = gen.obstacle_timers().to_vec();

    let stats = gen.extend(100).unwrap();

    assert_eq!(stats.obstacles, 0);
    assert!(gen.grid().tiles().all(|t| t.obstacle().is_none()));
    assert_eq!(gen.obstacle_timers(), timers.as_slice());
}
