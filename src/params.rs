/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that holds the arena size,
 * population counts, seed and bird tuning for a run. Parameters can be read
 * from a TOML file, any missing field falls back to its default, and every
 * value is validated before a simulation is built from it.
 */

use std::f32::consts::PI;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

// Default parameter file looked up by the binaries
pub const DEFAULT_PARAMS_PATH: &str = "birds.toml";

// Parameters for one simulation run
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    pub width: f32,
    pub height: f32,
    pub num_birds: usize,
    pub num_food: usize,
    pub seed: u64,
    pub bird: BirdParams,
}

// Tuning shared by every bird
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BirdParams {
    /// Body radius, also the radius within which food is eaten.
    pub size: f32,
    /// Full width of the view cone in radians.
    pub view_angle: f32,
    /// View distance as a multiple of `size`.
    pub view_distance_factor: f32,
    pub initial_speed: f32,
    pub max_speed: f32,
    /// Speed gained per acceleration event.
    pub speed_increment: f32,
    /// Chance per tick that a bird accelerates.
    pub acceleration_chance: f32,
    /// Largest heading change per tick, in radians, either direction.
    pub steer_jitter: f32,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            num_birds: 10,
            num_food: 20,
            seed: 42,
            bird: BirdParams::default(),
        }
    }
}

impl Default for BirdParams {
    fn default() -> Self {
        Self {
            size: 20.0,
            view_angle: PI / 2.0,
            view_distance_factor: 2.0,
            initial_speed: 2.0,
            max_speed: 5.0,
            speed_increment: 0.1,
            acceleration_chance: 0.1,
            steer_jitter: 0.1,
        }
    }
}

impl BirdParams {
    pub fn view_distance(&self) -> f32 {
        self.size * self.view_distance_factor
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("bird.size", self.size)?;
        positive("bird.view_distance_factor", self.view_distance_factor)?;

        if !(0.0..=2.0 * PI).contains(&self.view_angle) {
            return Err(ConfigError::OutOfRange {
                field: "bird.view_angle",
                value: self.view_angle,
            });
        }

        if !(self.initial_speed.is_finite() && self.max_speed.is_finite())
            || self.initial_speed < 0.0
            || self.initial_speed > self.max_speed
        {
            return Err(ConfigError::InvalidSpeedRange {
                initial: self.initial_speed,
                max: self.max_speed,
            });
        }

        if !(self.speed_increment >= 0.0 && self.speed_increment.is_finite()) {
            return Err(ConfigError::OutOfRange {
                field: "bird.speed_increment",
                value: self.speed_increment,
            });
        }

        if !(0.0..=1.0).contains(&self.acceleration_chance) {
            return Err(ConfigError::OutOfRange {
                field: "bird.acceleration_chance",
                value: self.acceleration_chance,
            });
        }

        if !(self.steer_jitter >= 0.0 && self.steer_jitter.is_finite()) {
            return Err(ConfigError::OutOfRange {
                field: "bird.steer_jitter",
                value: self.steer_jitter,
            });
        }

        Ok(())
    }
}

impl SimulationParams {
    // Default parameters with the four construction arguments replaced
    pub fn with_arena(width: f32, height: f32, num_birds: usize, num_food: usize, seed: u64) -> Self {
        Self {
            width,
            height,
            num_birds,
            num_food,
            seed,
            ..Self::default()
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let params: SimulationParams = toml::from_str(text)?;
        params.validate()?;
        Ok(params)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    // Reject anything that would make the run meaningless; nothing is clamped
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width > 0.0 && self.width.is_finite()) {
            return Err(ConfigError::InvalidDimension {
                axis: "width",
                value: self.width,
            });
        }
        if !(self.height > 0.0 && self.height.is_finite()) {
            return Err(ConfigError::InvalidDimension {
                axis: "height",
                value: self.height,
            });
        }
        if self.num_birds == 0 {
            return Err(ConfigError::NoBirds);
        }
        if self.num_food == 0 {
            return Err(ConfigError::NoFood);
        }
        self.bird.validate()
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        (0.0..self.width).contains(&x) && (0.0..self.height).contains(&y)
    }

    // Get parameter ranges for UI sliders
    pub fn get_num_birds_range() -> std::ops::RangeInclusive<usize> {
        1..=500
    }

    pub fn get_num_food_range() -> std::ops::RangeInclusive<usize> {
        1..=1000
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}
