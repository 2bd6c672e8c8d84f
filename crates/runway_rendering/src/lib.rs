//! # RUNWAY Rendering
//!
//! Scene-side counterpart of `runway_procedural`.
//!
//! The generator only knows lanes, heights and layer indices. This crate turns
//! them into placed objects:
//!
//! - [`SceneBackend`]: a [`runway_procedural::SpawnBackend`] holding objects
//!   with world transforms
//! - [`transform`]: the placement rules for ground, ramps and obstacles
//! - [`AsciiView`]: a text view of a level for terminals and logs
//!
//! ## Example
//!
//! ```rust
//! use runway_procedural::{LevelConfig, LevelGenerator, LevelSeed};
//! use runway_rendering::{AsciiView, SceneBackend};
//!
//! let config = LevelConfig::default().with_obstacles(["barrier"]);
//! let mut generator = LevelGenerator::with_seed(config, SceneBackend::new(), LevelSeed::new(1));
//! generator.generate(10, true)?;
//!
//! println!("{}", AsciiView::new(generator.grid()));
//! assert!(!generator.backend().is_empty());
//! # Ok::<(), runway_procedural::LevelError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod ascii;
pub mod scene;
pub mod transform;

pub use ascii::AsciiView;
pub use scene::{SceneBackend, SceneObject, SceneObjectKind, SceneStats};
pub use transform::Transform;
