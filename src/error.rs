/*
 * Error Module
 *
 * Construction-time configuration errors and the invariant violations that the
 * simulation checks for after each tick in debug builds.
 */

use std::path::PathBuf;

use thiserror::Error;

/// Reasons a simulation refuses to be built.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("arena {axis} must be a positive, finite number (got {value})")]
    InvalidDimension { axis: &'static str, value: f32 },

    #[error("the simulation needs at least one bird")]
    NoBirds,

    #[error("the simulation needs at least one food item")]
    NoFood,

    #[error("bird speed range is invalid: initial {initial}, max {max}")]
    InvalidSpeedRange { initial: f32, max: f32 },

    #[error("{field} is out of range (got {value})")]
    OutOfRange { field: &'static str, value: f32 },

    #[error("bird {index} has an invalid {field} (got {value})")]
    InvalidBird {
        index: usize,
        field: &'static str,
        value: f32,
    },

    #[error("{what} placed at ({x}, {y}) lies outside the {width}x{height} arena")]
    OutsideArena {
        what: &'static str,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },

    #[error("failed to read parameters from {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse parameters")]
    Parse(#[from] toml::de::Error),
}

/// A broken simulation invariant. Unreachable in a correct build.
#[derive(Debug, Error, PartialEq)]
pub enum InvariantViolation {
    #[error("food pool holds {actual} items, expected {expected}")]
    PoolSize { expected: usize, actual: usize },

    #[error("bird {index} has speed {speed}, outside [{min}, {max}]")]
    Speed {
        index: usize,
        speed: f32,
        min: f32,
        max: f32,
    },

    #[error("bird {index} is at ({x}, {y}), outside the arena")]
    Position { index: usize, x: f32, y: f32 },
}
