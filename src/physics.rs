/*
 * Physics Module
 *
 * This module holds the simulation phases of the flock: neighbor rebuild,
 * the three neighbor rules (separation, alignment, cohesion), the boundary
 * rule, the speed clamp and integration, plus `step`, which runs them in the
 * configured order.
 *
 * Every pass that reads other boids is compute-then-commit: per-boid results
 * are computed from an unchanged snapshot of the flock and written back only
 * once all of them exist. That makes the serial and rayon paths produce the
 * same numbers and keeps the result independent of iteration order within a
 * pass (neighbor selection itself is still first-found in index order).
 */

use log::trace;
use nannou::prelude::Vec3;
use rayon::prelude::*;

use crate::boid::{Boid, NeighborList};
use crate::math;
use crate::params::{BoundaryMode, FlockConfig, PhaseOrder, SpeedLimits, SteeringRule};
use crate::MAX_NEIGHBORS;

// Evaluate `f` for every boid against the same read-only view of the flock
fn compute_per_boid<T, F>(boids: &[Boid], parallel: bool, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(&[Boid], usize) -> T + Sync + Send,
{
    if parallel {
        (0..boids.len())
            .into_par_iter()
            .map(|i| f(boids, i))
            .collect()
    } else {
        (0..boids.len()).map(|i| f(boids, i)).collect()
    }
}

// Compute a velocity change per boid, then add all of them
fn commit_velocity_deltas<F>(boids: &mut [Boid], parallel: bool, delta: F)
where
    F: Fn(&[Boid], usize) -> Vec3 + Sync + Send,
{
    let deltas = compute_per_boid(boids, parallel, delta);
    for (boid, dv) in boids.iter_mut().zip(deltas) {
        boid.velocity += dv;
    }
}

// First `max_neighbors` boids (in index order) within the perception radius
// of boid `i`, optionally restricted to those heading the same way
pub fn gather_neighbors(boids: &[Boid], i: usize, config: &FlockConfig) -> NeighborList {
    let mut neighbors = NeighborList::new();
    let cap = config.max_neighbors.min(MAX_NEIGHBORS);
    if cap == 0 {
        return neighbors;
    }

    let me = &boids[i];
    let radius_sq = config.perception_radius * config.perception_radius;

    for (j, other) in boids.iter().enumerate() {
        if j == i {
            continue;
        }

        // distance < radius, compared squared
        if me.position.distance_squared(other.position) >= radius_sq {
            continue;
        }

        if config.require_same_heading && me.velocity.dot(other.velocity) <= 0.0 {
            continue;
        }

        neighbors.push(j);
        if neighbors.len() >= cap {
            break;
        }
    }

    neighbors
}

// Rebuild every boid's neighbor list. O(N^2)
pub fn rebuild_neighbors(boids: &mut [Boid], config: &FlockConfig) {
    let lists = compute_per_boid(boids, config.parallel, |snapshot, i| {
        gather_neighbors(snapshot, i, config)
    });

    for (boid, neighbors) in boids.iter_mut().zip(lists) {
        boid.neighbors = neighbors;
    }
}

// Mean of `field` over boid `i`'s neighbors, or None without neighbors
fn neighbor_mean<F>(boids: &[Boid], i: usize, field: F) -> Option<Vec3>
where
    F: Fn(&Boid) -> Vec3,
{
    let neighbors = &boids[i].neighbors;
    if neighbors.is_empty() {
        return None;
    }

    let sum = neighbors
        .iter()
        .fold(Vec3::ZERO, |acc, j| acc + field(&boids[j]));
    Some(sum / neighbors.len() as f32)
}

// Steer away from neighbors: unit vector of the mean offset, times avoid_factor
pub fn separation_delta(boids: &[Boid], i: usize, config: &FlockConfig) -> Vec3 {
    match neighbor_mean(boids, i, |other| boids[i].position - other.position) {
        Some(away) => math::normalize_or(away, Vec3::ZERO) * config.avoid_factor,
        None => Vec3::ZERO,
    }
}

// Blend velocity toward the neighbors' mean velocity.
// Without neighbors the mean is taken as zero, so the boid is damped toward rest.
pub fn alignment_delta(boids: &[Boid], i: usize, config: &FlockConfig) -> Vec3 {
    let average = neighbor_mean(boids, i, |other| other.velocity).unwrap_or(Vec3::ZERO);
    (average - boids[i].velocity) * config.matching_factor
}

// Pull toward the neighbors' mean position.
// Without neighbors the mean is taken as the origin.
pub fn cohesion_delta(boids: &[Boid], i: usize, config: &FlockConfig) -> Vec3 {
    let center = neighbor_mean(boids, i, |other| other.position).unwrap_or(Vec3::ZERO);
    (center - boids[i].position) * config.centering_factor
}

pub fn apply_separation(boids: &mut [Boid], config: &FlockConfig) {
    commit_velocity_deltas(boids, config.parallel, |snapshot, i| {
        separation_delta(snapshot, i, config)
    });
}

pub fn apply_alignment(boids: &mut [Boid], config: &FlockConfig) {
    commit_velocity_deltas(boids, config.parallel, |snapshot, i| {
        alignment_delta(snapshot, i, config)
    });
}

pub fn apply_cohesion(boids: &mut [Boid], config: &FlockConfig) {
    commit_velocity_deltas(boids, config.parallel, |snapshot, i| {
        cohesion_delta(snapshot, i, config)
    });
}

pub fn apply_rule(boids: &mut [Boid], config: &FlockConfig, rule: SteeringRule) {
    match rule {
        SteeringRule::Separation => apply_separation(boids, config),
        SteeringRule::Alignment => apply_alignment(boids, config),
        SteeringRule::Cohesion => apply_cohesion(boids, config),
    }
}

// Run the enabled neighbor rules in the order the config lists them
pub fn apply_rules(boids: &mut [Boid], config: &FlockConfig) {
    for rule in config.rules.iter() {
        apply_rule(boids, config, rule);
    }
}

// -1, 0 or +1: which way to push a coordinate back inside [-bound, bound]
#[inline]
fn axis_steer(coordinate: f32, bound: f32) -> f32 {
    if coordinate > bound {
        -1.0
    } else if coordinate < -bound {
        1.0
    } else {
        0.0
    }
}

// Teleport a coordinate that left [-bound, bound] to the opposite face
#[inline]
fn axis_wrap(coordinate: f32, bound: f32) -> f32 {
    if coordinate > bound {
        -bound
    } else if coordinate < -bound {
        bound
    } else {
        coordinate
    }
}

// Velocity change that steers a boid at `position` back into the box
pub fn boundary_steering(position: Vec3, bounds: Vec3, turn_factor: f32) -> Vec3 {
    let steering = Vec3::new(
        axis_steer(position.x, bounds.x),
        axis_steer(position.y, bounds.y),
        axis_steer(position.z, bounds.z),
    );
    math::normalize_or(steering, Vec3::ZERO) * turn_factor
}

pub fn wrap_position(position: Vec3, bounds: Vec3) -> Vec3 {
    Vec3::new(
        axis_wrap(position.x, bounds.x),
        axis_wrap(position.y, bounds.y),
        axis_wrap(position.z, bounds.z),
    )
}

// Keep boids inside the world box according to the configured mode
pub fn apply_boundary(boids: &mut [Boid], config: &FlockConfig) {
    let bounds = config.world_bounds;
    match config.boundary {
        BoundaryMode::SoftSteer => {
            for boid in boids.iter_mut() {
                boid.velocity += boundary_steering(boid.position, bounds, config.turn_factor);
            }
        }
        BoundaryMode::HardWrap => {
            for boid in boids.iter_mut() {
                boid.position = wrap_position(boid.position, bounds);
            }
        }
        BoundaryMode::Open => {}
    }
}

// Rescale a velocity into [min_speed, max_speed]; a zero velocity leaves
// along the default forward axis at min_speed
pub fn clamp_velocity(velocity: Vec3, limits: SpeedLimits) -> Vec3 {
    let speed = velocity.length();
    if speed <= math::EPSILON {
        math::FORWARD * limits.min_speed
    } else if speed > limits.max_speed {
        math::scale_to_length(velocity, limits.max_speed, math::FORWARD)
    } else if speed < limits.min_speed {
        math::scale_to_length(velocity, limits.min_speed, math::FORWARD)
    } else {
        velocity
    }
}

pub fn clamp_speed(boids: &mut [Boid], config: &FlockConfig) {
    if let Some(limits) = config.speed_limits {
        for boid in boids.iter_mut() {
            boid.velocity = clamp_velocity(boid.velocity, limits);
        }
    }
}

// position += velocity * speed_multiplier * dt
pub fn integrate(boids: &mut [Boid], config: &FlockConfig, dt: f32) {
    for boid in boids.iter_mut() {
        boid.position += boid.velocity * config.speed_multiplier * dt;
    }
}

// Advance the flock by one tick
pub fn step(boids: &mut [Boid], config: &FlockConfig, dt: f32) {
    trace!("step: {} boids, dt {:.4}, {:?}", boids.len(), dt, config.order);

    match config.order {
        PhaseOrder::BoundaryFirst => {
            apply_boundary(boids, config);
            rebuild_neighbors(boids, config);
            apply_rules(boids, config);
        }
        PhaseOrder::RulesFirst => {
            rebuild_neighbors(boids, config);
            apply_rules(boids, config);
            apply_boundary(boids, config);
        }
    }

    clamp_speed(boids, config);
    integrate(boids, config, dt);
}
