/*
 * Debug Information Module
 *
 * FlockStats summarizes the state of a flock (speeds, neighbor counts) for
 * logging and for the viewer's panel. DebugInfo adds the frame timing the
 * viewer measures.
 */

use std::fmt;
use std::time::Duration;

use crate::boid::Boid;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlockStats {
    pub population: usize,
    pub step: u64,
    pub mean_speed: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub mean_neighbors: f32,
    // Boids that found no neighbor this step
    pub isolated: usize,
}

impl FlockStats {
    pub fn from_boids(boids: &[Boid], step: u64) -> Self {
        if boids.is_empty() {
            return Self {
                step,
                ..Self::default()
            };
        }

        let mut total_speed = 0.0;
        let mut min_speed = f32::INFINITY;
        let mut max_speed = 0.0f32;
        let mut total_neighbors = 0usize;
        let mut isolated = 0usize;

        for boid in boids {
            let speed = boid.speed();
            total_speed += speed;
            min_speed = min_speed.min(speed);
            max_speed = max_speed.max(speed);

            total_neighbors += boid.neighbors.len();
            if boid.neighbors.is_empty() {
                isolated += 1;
            }
        }

        let n = boids.len() as f32;
        Self {
            population: boids.len(),
            step,
            mean_speed: total_speed / n,
            min_speed,
            max_speed,
            mean_neighbors: total_neighbors as f32 / n,
            isolated,
        }
    }
}

impl fmt::Display for FlockStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "step {}: {} boids, speed {:.2} (min {:.2}, max {:.2}), {:.1} neighbors/boid, {} isolated",
            self.step,
            self.population,
            self.mean_speed,
            self.min_speed,
            self.max_speed,
            self.mean_neighbors,
            self.isolated
        )
    }
}

// Debug information to display
#[derive(Clone, Debug, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub stats: FlockStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use nannou::prelude::{vec3, Vec3};

    #[test]
    fn empty_flock_has_zeroed_stats() {
        let stats = FlockStats::from_boids(&[], 7);
        assert_eq!(stats.population, 0);
        assert_eq!(stats.step, 7);
        assert_eq!(stats.mean_speed, 0.0);
    }

    #[test]
    fn stats_cover_speed_range_and_isolation() {
        let mut a = Boid::new(Vec3::ZERO, vec3(2.0, 0.0, 0.0));
        a.neighbors.push(1);
        let b = Boid::new(Vec3::ONE, vec3(0.0, 4.0, 0.0));

        let stats = FlockStats::from_boids(&[a, b], 1);
        assert_eq!(stats.population, 2);
        assert_eq!(stats.mean_speed, 3.0);
        assert_eq!(stats.min_speed, 2.0);
        assert_eq!(stats.max_speed, 4.0);
        assert_eq!(stats.mean_neighbors, 0.5);
        assert_eq!(stats.isolated, 1);
        assert!(stats.to_string().starts_with("step 1: 2 boids"));
    }
}
