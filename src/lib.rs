/*
 * Bird Simulation - Module Definitions
 *
 * This file defines the module structure for the bird simulation. The core
 * (geometry, birds, food, perception, simulation) has no rendering
 * dependency; the window, camera and UI modules are only built with the
 * `viewer` feature.
 */

// Re-export key components for easier access
pub use bird::Bird;
pub use error::{ConfigError, InvariantViolation};
pub use food::{Food, FoodPool};
pub use geometry::Point;
pub use params::{BirdParams, SimulationParams};
pub use perception::{visible_food, VisibleFood};
pub use simulation::{SimState, Simulation, SimulationStats};

// Core modules
pub mod bird;
pub mod cli;
pub mod error;
pub mod food;
pub mod geometry;
pub mod params;
pub mod perception;
pub mod simulation;

// Viewer modules
#[cfg(feature = "viewer")]
pub mod app;
#[cfg(feature = "viewer")]
pub mod camera;
#[cfg(feature = "viewer")]
pub mod debug;
#[cfg(feature = "viewer")]
pub mod input;
#[cfg(feature = "viewer")]
pub mod renderer;
#[cfg(feature = "viewer")]
pub mod ui;
