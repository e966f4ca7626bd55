/*
 * 3D Boid Flocking Simulation - Module Definitions
 *
 * The simulation core (boid, params, physics, flock) has no knowledge of
 * windows or drawing; the viewer modules (app, camera, input, renderer, ui)
 * drive it once per frame and draw what it produces.
 */

// Re-export key components for easier access
pub use boid::{Boid, NeighborList};
pub use debug::{DebugInfo, FlockStats};
pub use error::{ConfigError, Result};
pub use flock::Flock;
pub use params::{
    BoundaryMode, FlockConfig, InitialVelocity, PhaseOrder, Preset, SpeedLimits, SteeringRule,
    SteeringRules,
};

// Simulation core
pub mod boid;
pub mod debug;
pub mod error;
pub mod flock;
pub mod math;
pub mod params;
pub mod physics;

// Viewer
pub mod app;
pub mod camera;
pub mod input;
pub mod renderer;
pub mod ui;

// Constants
pub const MAX_BOIDS: usize = 600;
pub const MAX_NEIGHBORS: usize = 30;
pub const BOID_RADIUS: f32 = 0.1;
