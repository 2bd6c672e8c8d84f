//! # Level Configuration
//!
//! Tuning knobs for the generator, loadable from TOML.
//!
//! Nothing here is checked at construction. [`LevelConfig::validate`] runs at
//! the start of every generate call so a bad value never reaches the grid.
//!
//! ## Example
//!
//! ```toml
//! lane_count = 5
//! height_levels = 4
//! max_height_change = 2
//! min_obstacle_spacing = 3
//! max_obstacle_spacing = 6
//! obstacles = ["barrier", "hurdle"]
//!
//! [geometry]
//! lane_width = 2.5
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::tile::ObstacleKind;

/// World-space dimensions handed to the spawn backend unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryParams {
    /// Width of one lane.
    pub lane_width: f32,
    /// Height of one height level.
    pub tile_height: f32,
    /// Length of one layer along the travel axis.
    pub tile_length: f32,
    /// World position of lane 0, height 0, layer 0.
    pub offset: [f32; 3],
}

impl Default for GeometryParams {
    fn default() -> Self {
        Self {
            lane_width: 2.0,
            tile_height: 2.0,
            tile_length: 7.0,
            offset: [0.0; 3],
        }
    }
}

/// Generator configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Number of parallel lanes.
    pub lane_count: u32,
    /// Number of discrete height levels; heights live in `0..height_levels`.
    pub height_levels: u32,
    /// Largest height step a single random change may take.
    pub max_height_change: u32,
    /// Fewest non-ramp tiles between two obstacles in a lane.
    pub min_obstacle_spacing: u32,
    /// Exclusive upper bound on non-ramp tiles between two obstacles.
    pub max_obstacle_spacing: u32,
    /// Chance per tile that a lane's height is re-rolled.
    pub probability_to_change_height: f32,
    /// Chance that a reachable one-level climb still becomes a ramp.
    pub probability_for_non_required_ramps: f32,
    /// Obstacles the scheduler may pick from. Empty disables obstacles.
    #[serde(rename = "obstacles")]
    pub obstacle_catalog: Vec<ObstacleKind>,
    /// Passed through to the backend.
    pub geometry: GeometryParams,
    /// Default number of layers for previews.
    pub preview_length: u32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            lane_count: 3,
            height_levels: 3,
            max_height_change: 3,
            min_obstacle_spacing: 2,
            max_obstacle_spacing: 4,
            probability_to_change_height: 0.1,
            probability_for_non_required_ramps: 0.5,
            obstacle_catalog: Vec::new(),
            geometry: GeometryParams::default(),
            preview_length: 20,
        }
    }
}

impl LevelConfig {
    /// Parses a configuration from TOML text. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML or wrongly typed
    /// values (a negative `max_height_change` included).
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise
    /// whatever [`LevelConfig::from_toml_str`] returns.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Checks every value the generator relies on.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lane_count == 0 {
            return Err(ConfigError::ZeroLanes);
        }
        if self.height_levels == 0 {
            return Err(ConfigError::ZeroHeightLevels);
        }
        if self.min_obstacle_spacing > self.max_obstacle_spacing {
            return Err(ConfigError::InvertedObstacleSpacing {
                min: self.min_obstacle_spacing,
                max: self.max_obstacle_spacing,
            });
        }
        check_probability("probability_to_change_height", self.probability_to_change_height)?;
        check_probability(
            "probability_for_non_required_ramps",
            self.probability_for_non_required_ramps,
        )?;
        Ok(())
    }

    /// Highest legal height.
    #[inline]
    #[must_use]
    pub(crate) fn max_height(&self) -> u32 {
        self.height_levels.saturating_sub(1)
    }

    /// Sets the lane count.
    #[must_use]
    pub fn with_lanes(mut self, lane_count: u32) -> Self {
        self.lane_count = lane_count;
        self
    }

    /// Sets the number of height levels.
    #[must_use]
    pub fn with_height_levels(mut self, height_levels: u32) -> Self {
        self.height_levels = height_levels;
        self
    }

    /// Sets the largest random height step.
    #[must_use]
    pub fn with_max_height_change(mut self, max_height_change: u32) -> Self {
        self.max_height_change = max_height_change;
        self
    }

    /// Sets the obstacle spacing window `[min, max)`.
    #[must_use]
    pub fn with_obstacle_spacing(mut self, min: u32, max: u32) -> Self {
        self.min_obstacle_spacing = min;
        self.max_obstacle_spacing = max;
        self
    }

    /// Sets the height change probability.
    #[must_use]
    pub fn with_change_probability(mut self, probability: f32) -> Self {
        self.probability_to_change_height = probability;
        self
    }

    /// Sets the non-required ramp probability.
    #[must_use]
    pub fn with_ramp_probability(mut self, probability: f32) -> Self {
        self.probability_for_non_required_ramps = probability;
        self
    }

    /// Replaces the obstacle catalog.
    #[must_use]
    pub fn with_obstacles<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.obstacle_catalog = names.into_iter().map(ObstacleKind::new).collect();
        self
    }

    /// Replaces the geometry passed to the backend.
    #[must_use]
    pub fn with_geometry(mut self, geometry: GeometryParams) -> Self {
        self.geometry = geometry;
        self
    }
}

fn check_probability(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ProbabilityOutOfRange {
            name,
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(LevelConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_zero_lanes_rejected() {
        let config = LevelConfig::default().with_lanes(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroLanes));
    }

    #[test]
    fn test_zero_height_levels_rejected() {
        let config = LevelConfig::default().with_height_levels(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroHeightLevels));
    }

    #[test]
    fn test_inverted_spacing_rejected() {
        let config = LevelConfig::default().with_obstacle_spacing(5, 2);
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvertedObstacleSpacing { min: 5, max: 2 })
        );
    }

    #[test]
    fn test_equal_spacing_accepted() {
        let config = LevelConfig::default().with_obstacle_spacing(3, 3);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_nan_probability_rejected() {
        let config = LevelConfig::default().with_change_probability(f32::NAN);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ProbabilityOutOfRange {
                name: "probability_to_change_height",
                ..
            })
        ));

        let config = LevelConfig::default().with_ramp_probability(1.5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_partial_overrides_defaults() {
        let config = LevelConfig::from_toml_str(
            r#"
            lane_count = 5
            obstacles = ["barrier"]

            [geometry]
            lane_width = 2.5
            "#,
        )
        .unwrap();

        assert_eq!(config.lane_count, 5);
        assert_eq!(config.height_levels, 3);
        assert_eq!(config.obstacle_catalog, vec![ObstacleKind::new("barrier")]);
        assert!((config.geometry.lane_width - 2.5).abs() < f32::EPSILON);
        assert!((config.geometry.tile_length - 7.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_negative_height_change_is_a_parse_error() {
        let result = LevelConfig::from_toml_str("max_height_change = -1");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = LevelConfig::from_toml_file("/definitely/not/here/level.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
