/*
 * Error Module
 *
 * Errors raised while building a flock from a configuration. The simulation
 * phases themselves are total and never fail once a flock exists.
 */

use thiserror::Error;

use crate::params::SteeringRule;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("population {requested} exceeds the cap of {cap} boids")]
    PopulationTooLarge { requested: usize, cap: usize },

    #[error("neighbor cap {requested} must be between 1 and {cap}")]
    NeighborCapOutOfRange { requested: usize, cap: usize },

    #[error("world bounds must be positive and finite, got ({x}, {y}, {z})")]
    InvalidBounds { x: f32, y: f32, z: f32 },

    #[error("perception radius must be positive and finite, got {0}")]
    InvalidPerceptionRadius(f32),

    #[error("speed limits must satisfy 0 <= min <= max, got min {min}, max {max}")]
    InvalidSpeedLimits { min: f32, max: f32 },

    #[error("parameter `{name}` must be finite and non-negative, got {value}")]
    InvalidParameter { name: &'static str, value: f32 },

    #[error("steering rule {0:?} is listed more than once")]
    DuplicateRule(SteeringRule),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
