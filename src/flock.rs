/*
 * Flock Module
 *
 * Flock owns the boid arena and the configuration it was built from. It is
 * created once, stepped once per frame by whatever drives it, and read back
 * through `boids()` / `positions()` for drawing. The population never changes
 * after construction; `reset` re-seeds the same number of boids in place.
 */

use log::{debug, info, log_enabled, Level};
use nannou::prelude::{vec3, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::boid::Boid;
use crate::debug::FlockStats;
use crate::error::Result;
use crate::params::{FlockConfig, InitialVelocity};
use crate::physics;

// How often (in steps) a stats line is logged at debug level
const STATS_LOG_INTERVAL: u64 = 300;

#[derive(Clone, Debug)]
pub struct Flock {
    boids: Vec<Boid>,
    config: FlockConfig,
    seed: u64,
    step_count: u64,
}

impl Flock {
    // Build `config.population` boids from a seeded generator
    pub fn new(config: FlockConfig, seed: u64) -> Result<Self> {
        config.validate()?;

        let boids = spawn_boids(&config, seed);
        info!(
            "flock created: {} boids, bounds {:?}, {:?} boundary, seed {}",
            boids.len(),
            config.world_bounds,
            config.boundary,
            seed
        );

        Ok(Self {
            boids,
            config,
            seed,
            step_count: 0,
        })
    }

    // Classic tuning with a custom population and world size
    pub fn with_population(population: usize, world_bounds: Vec3, seed: u64) -> Result<Self> {
        let config = FlockConfig {
            population,
            world_bounds,
            ..FlockConfig::default()
        };
        Self::new(config, seed)
    }

    // Use hand-placed boids instead of random ones; the population follows `boids`.
    // Neighbor lists start empty, as after spawning.
    pub fn from_boids(config: FlockConfig, mut boids: Vec<Boid>) -> Result<Self> {
        let config = FlockConfig {
            population: boids.len(),
            ..config
        };
        config.validate()?;

        for boid in &mut boids {
            boid.neighbors.clear();
        }

        Ok(Self {
            boids,
            config,
            seed: 0,
            step_count: 0,
        })
    }

    // Re-randomize every boid from a new seed, keeping the population
    pub fn reset(&mut self, seed: u64) {
        self.boids = spawn_boids(&self.config, seed);
        self.seed = seed;
        self.step_count = 0;
        info!("flock reset: {} boids, seed {}", self.boids.len(), seed);
    }

    // Advance one tick in the configured phase order
    pub fn step(&mut self, dt: f32) {
        physics::step(&mut self.boids, &self.config, dt);
        self.step_count += 1;

        if self.step_count % STATS_LOG_INTERVAL == 0 && log_enabled!(Level::Debug) {
            debug!("{}", self.stats());
        }
    }

    pub fn rebuild_neighbors(&mut self) {
        physics::rebuild_neighbors(&mut self.boids, &self.config);
    }

    pub fn apply_separation(&mut self) {
        physics::apply_separation(&mut self.boids, &self.config);
    }

    pub fn apply_alignment(&mut self) {
        physics::apply_alignment(&mut self.boids, &self.config);
    }

    pub fn apply_cohesion(&mut self) {
        physics::apply_cohesion(&mut self.boids, &self.config);
    }

    pub fn apply_boundary(&mut self) {
        physics::apply_boundary(&mut self.boids, &self.config);
    }

    pub fn clamp_speed(&mut self) {
        physics::clamp_speed(&mut self.boids, &self.config);
    }

    pub fn integrate(&mut self, dt: f32) {
        physics::integrate(&mut self.boids, &self.config, dt);
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.boids.iter().map(|boid| boid.position)
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    pub fn config(&self) -> &FlockConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn stats(&self) -> FlockStats {
        FlockStats::from_boids(&self.boids, self.step_count)
    }
}

fn spawn_boids(config: &FlockConfig, seed: u64) -> Vec<Boid> {
    let mut rng = StdRng::seed_from_u64(seed);
    let bounds = config.world_bounds;

    (0..config.population)
        .map(|_| {
            let position = vec3(
                rng.gen_range(-bounds.x..=bounds.x),
                rng.gen_range(-bounds.y..=bounds.y),
                rng.gen_range(-bounds.z..=bounds.z),
            );

            let velocity = match config.initial_velocity {
                InitialVelocity::Random { spread } => vec3(
                    rng.gen_range(-spread..=spread),
                    rng.gen_range(-spread..=spread),
                    rng.gen_range(-spread..=spread),
                ),
                InitialVelocity::Fixed(velocity) => velocity,
            };

            Boid::new(position, velocity)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::MAX_BOIDS;

    #[test]
    fn spawns_inside_bounds_with_empty_neighbor_lists() {
        let flock = Flock::new(FlockConfig::classic(), 42).unwrap();
        let bounds = flock.config().world_bounds;

        assert_eq!(flock.len(), 200);
        for boid in flock.boids() {
            assert!(boid.position.x.abs() <= bounds.x);
            assert!(boid.position.y.abs() <= bounds.y);
            assert!(boid.position.z.abs() <= bounds.z);
            assert!(boid.velocity.x.abs() <= 1.0);
            assert!(boid.neighbors.is_empty());
        }
    }

    #[test]
    fn fixed_initial_velocity_is_shared() {
        let flock = Flock::new(FlockConfig::separation_only(), 3).unwrap();
        assert!(flock.boids().iter().all(|b| b.velocity == vec3(1.0, 0.0, 0.0)));
    }

    #[test]
    fn same_seed_same_flock() {
        let a = Flock::new(FlockConfig::classic(), 9).unwrap();
        let b = Flock::new(FlockConfig::classic(), 9).unwrap();
        let c = Flock::new(FlockConfig::classic(), 10).unwrap();
        assert_eq!(a.boids(), b.boids());
        assert_ne!(a.boids(), c.boids());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = Flock::with_population(MAX_BOIDS + 1, vec3(10.0, 10.0, 10.0), 1).unwrap_err();
        assert!(matches!(err, ConfigError::PopulationTooLarge { .. }));
    }

    #[test]
    fn reset_keeps_population_and_restarts_counter() {
        let mut flock = Flock::with_population(50, vec3(5.0, 5.0, 5.0), 1).unwrap();
        flock.step(0.016);
        flock.step(0.016);
        assert_eq!(flock.step_count(), 2);

        flock.reset(2);
        assert_eq!(flock.len(), 50);
        assert_eq!(flock.step_count(), 0);
        assert_eq!(flock.seed(), 2);
        assert_eq!(flock.boids(), Flock::with_population(50, vec3(5.0, 5.0, 5.0), 2).unwrap().boids());
    }

    #[test]
    fn from_boids_takes_population_from_the_boids() {
        let boids = vec![Boid::new(Vec3::ZERO, Vec3::X); 3];
        let flock = Flock::from_boids(FlockConfig::classic(), boids).unwrap();
        assert_eq!(flock.config().population, 3);
        assert_eq!(flock.positions().count(), 3);
        assert_eq!(flock.len(), 3);
    }

    #[test]
    fn from_boids_drops_stale_neighbor_lists() {
        // Index 5 is past the end and 0 is the boid itself
        let mut boid = Boid::new(vec3(1.0, 0.0, 0.0), Vec3::X);
        boid.neighbors.push(5);
        boid.neighbors.push(0);

        let mut flock = Flock::from_boids(FlockConfig::classic(), vec![boid]).unwrap();
        assert!(flock.boids()[0].neighbors.is_empty());

        flock.apply_separation();
        flock.apply_alignment();
        flock.apply_cohesion();
        assert!(flock.boids()[0].velocity.x < 1.0);
    }
}
