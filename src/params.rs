/*
 * Simulation Parameters Module
 *
 * This module defines FlockConfig, the single struct holding every tunable of
 * the simulation: population, world bounds, which steering rules run, the
 * boundary policy and the steering constants. The four shipped flavours of
 * the simulation are presets of this struct; nothing here is edited at
 * runtime.
 */

use nannou::prelude::{vec3, Vec3};

use crate::error::{ConfigError, Result};
use crate::{MAX_BOIDS, MAX_NEIGHBORS};

// Neighbor-driven steering rules
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SteeringRule {
    Separation,
    Alignment,
    Cohesion,
}

impl SteeringRule {
    pub const ALL: [SteeringRule; 3] = [
        SteeringRule::Separation,
        SteeringRule::Alignment,
        SteeringRule::Cohesion,
    ];
}

// The neighbor rules a step runs, in the order it runs them. Each rule reads
// the velocities the previous one committed, so order changes the result.
// A rule appears at most once.
#[derive(Clone, Copy, Debug)]
pub struct SteeringRules {
    order: [SteeringRule; 3],
    len: usize,
}

impl SteeringRules {
    pub const ALL: SteeringRules = SteeringRules {
        order: SteeringRule::ALL,
        len: 3,
    };

    pub const SEPARATION_ONLY: SteeringRules = SteeringRules {
        order: SteeringRule::ALL,
        len: 1,
    };

    pub const NONE: SteeringRules = SteeringRules {
        order: SteeringRule::ALL,
        len: 0,
    };

    // Rules in the given order; a repeated rule is rejected
    pub fn new(rules: &[SteeringRule]) -> Result<Self> {
        let mut order = SteeringRule::ALL;
        let mut len = 0;

        for &rule in rules {
            if order[..len].contains(&rule) {
                return Err(ConfigError::DuplicateRule(rule));
            }
            order[len] = rule;
            len += 1;
        }

        Ok(Self { order, len })
    }

    pub fn as_slice(&self) -> &[SteeringRule] {
        &self.order[..self.len]
    }

    pub fn contains(&self, rule: SteeringRule) -> bool {
        self.as_slice().contains(&rule)
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // Enabled rules in application order
    pub fn iter(&self) -> impl Iterator<Item = SteeringRule> + '_ {
        self.as_slice().iter().copied()
    }
}

impl Default for SteeringRules {
    fn default() -> Self {
        Self::ALL
    }
}

// Slots past `len` are filler and don't take part in equality
impl PartialEq for SteeringRules {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for SteeringRules {}

// What happens when a boid leaves the world box
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundaryMode {
    // Nudge velocity back toward the box by `turn_factor`
    SoftSteer,
    // Teleport to the opposite face, velocity untouched
    HardWrap,
    // No boundary rule at all
    Open,
}

// Where the boundary rule sits within a step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhaseOrder {
    // boundary -> neighbors -> rules -> clamp -> integrate
    BoundaryFirst,
    // neighbors -> rules -> boundary -> clamp -> integrate
    RulesFirst,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeedLimits {
    pub min_speed: f32,
    pub max_speed: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InitialVelocity {
    // Uniform in [-spread, spread] per axis
    Random { spread: f32 },
    // Every boid starts with the same velocity
    Fixed(Vec3),
}

#[derive(Clone, Debug, PartialEq)]
pub struct FlockConfig {
    pub population: usize,
    // Half-extents of the world box per axis
    pub world_bounds: Vec3,
    pub rules: SteeringRules,
    pub boundary: BoundaryMode,
    pub order: PhaseOrder,
    pub perception_radius: f32,
    pub max_neighbors: usize,
    // Only count neighbors whose velocity has a positive dot product with ours
    pub require_same_heading: bool,
    pub avoid_factor: f32,
    pub matching_factor: f32,
    pub centering_factor: f32,
    pub turn_factor: f32,
    // None disables the speed clamp
    pub speed_limits: Option<SpeedLimits>,
    pub speed_multiplier: f32,
    pub initial_velocity: InitialVelocity,
    // Run the neighbor and steering passes on the rayon pool
    pub parallel: bool,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl FlockConfig {
    // 200 boids in a 20-unit cube with every rule on
    pub fn classic() -> Self {
        Self {
            population: 200,
            world_bounds: vec3(10.0, 10.0, 10.0),
            rules: SteeringRules::ALL,
            boundary: BoundaryMode::SoftSteer,
            order: PhaseOrder::RulesFirst,
            perception_radius: 5.0,
            max_neighbors: 10,
            require_same_heading: true,
            avoid_factor: 0.008,
            matching_factor: 0.05,
            centering_factor: 0.004,
            turn_factor: 0.1,
            speed_limits: Some(SpeedLimits {
                min_speed: 2.0,
                max_speed: 3.0,
            }),
            speed_multiplier: 3.0,
            initial_velocity: InitialVelocity::Random { spread: 1.0 },
            parallel: false,
        }
    }

    // Full population in a flatter, wider box at real-time speed
    pub fn wide() -> Self {
        Self {
            population: MAX_BOIDS,
            world_bounds: vec3(20.0, 12.0, 20.0),
            order: PhaseOrder::BoundaryFirst,
            max_neighbors: 20,
            speed_limits: Some(SpeedLimits {
                min_speed: 2.0,
                max_speed: 4.0,
            }),
            speed_multiplier: 1.0,
            parallel: true,
            ..Self::classic()
        }
    }

    // Separation alone with wrap-around edges; everyone starts heading +X
    pub fn separation_only() -> Self {
        Self {
            population: 300,
            rules: SteeringRules::SEPARATION_ONLY,
            boundary: BoundaryMode::HardWrap,
            order: PhaseOrder::BoundaryFirst,
            require_same_heading: false,
            speed_limits: None,
            speed_multiplier: 1.0,
            initial_velocity: InitialVelocity::Fixed(vec3(1.0, 0.0, 0.0)),
            ..Self::classic()
        }
    }

    // The flock behind the film-grain viewer; grain itself is a render effect
    pub fn grain() -> Self {
        Self {
            population: 400,
            world_bounds: vec3(15.0, 15.0, 15.0),
            order: PhaseOrder::BoundaryFirst,
            ..Self::classic()
        }
    }

    // Check every tunable before a flock is built from this config
    pub fn validate(&self) -> Result<()> {
        if self.population > MAX_BOIDS {
            return Err(ConfigError::PopulationTooLarge {
                requested: self.population,
                cap: MAX_BOIDS,
            });
        }

        if self.max_neighbors == 0 || self.max_neighbors > MAX_NEIGHBORS {
            return Err(ConfigError::NeighborCapOutOfRange {
                requested: self.max_neighbors,
                cap: MAX_NEIGHBORS,
            });
        }

        let b = self.world_bounds;
        if !is_finite(b) || b.x <= 0.0 || b.y <= 0.0 || b.z <= 0.0 {
            return Err(ConfigError::InvalidBounds {
                x: b.x,
                y: b.y,
                z: b.z,
            });
        }

        if !self.perception_radius.is_finite() || self.perception_radius <= 0.0 {
            return Err(ConfigError::InvalidPerceptionRadius(self.perception_radius));
        }

        check_non_negative("avoid_factor", self.avoid_factor)?;
        check_non_negative("matching_factor", self.matching_factor)?;
        check_non_negative("centering_factor", self.centering_factor)?;
        check_non_negative("turn_factor", self.turn_factor)?;
        check_non_negative("speed_multiplier", self.speed_multiplier)?;

        if let Some(limits) = self.speed_limits {
            let SpeedLimits {
                min_speed,
                max_speed,
            } = limits;
            if !min_speed.is_finite()
                || !max_speed.is_finite()
                || min_speed < 0.0
                || min_speed > max_speed
            {
                return Err(ConfigError::InvalidSpeedLimits {
                    min: min_speed,
                    max: max_speed,
                });
            }
        }

        match self.initial_velocity {
            InitialVelocity::Random { spread } => {
                check_non_negative("initial_velocity.spread", spread)?;
            }
            InitialVelocity::Fixed(v) => {
                if !is_finite(v) {
                    return Err(ConfigError::InvalidParameter {
                        name: "initial_velocity",
                        value: v.length(),
                    });
                }
            }
        }

        Ok(())
    }
}

fn is_finite(v: Vec3) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}

fn check_non_negative(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}

// Named flavours of the simulation, for drivers that let the viewer pick one
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Preset {
    #[default]
    Classic,
    Wide,
    SeparationOnly,
    Grain,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::Classic,
        Preset::Wide,
        Preset::SeparationOnly,
        Preset::Grain,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Classic => "Classic",
            Preset::Wide => "Wide",
            Preset::SeparationOnly => "Separation only",
            Preset::Grain => "Grain",
        }
    }

    pub fn config(self) -> FlockConfig {
        match self {
            Preset::Classic => FlockConfig::classic(),
            Preset::Wide => FlockConfig::wide(),
            Preset::SeparationOnly => FlockConfig::separation_only(),
            Preset::Grain => FlockConfig::grain(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_is_valid() {
        for preset in Preset::ALL {
            assert_eq!(preset.config().validate(), Ok(()), "{}", preset.name());
        }
    }

    #[test]
    fn default_is_classic() {
        assert_eq!(FlockConfig::default(), FlockConfig::classic());
        assert_eq!(Preset::default().config(), FlockConfig::classic());
    }

    #[test]
    fn rule_constants_list_their_rules() {
        assert_eq!(SteeringRules::ALL.as_slice(), &SteeringRule::ALL);
        assert_eq!(
            SteeringRules::SEPARATION_ONLY.as_slice(),
            &[SteeringRule::Separation]
        );
        assert!(SteeringRules::NONE.is_empty());
        assert!(!SteeringRules::SEPARATION_ONLY.contains(SteeringRule::Cohesion));
    }

    #[test]
    fn rules_keep_the_order_they_were_given() {
        let rules =
            SteeringRules::new(&[SteeringRule::Cohesion, SteeringRule::Separation]).unwrap();
        let order: Vec<_> = rules.iter().collect();
        assert_eq!(order, vec![SteeringRule::Cohesion, SteeringRule::Separation]);
        assert_ne!(
            rules,
            SteeringRules::new(&[SteeringRule::Separation, SteeringRule::Cohesion]).unwrap()
        );

        assert_eq!(SteeringRules::new(&SteeringRule::ALL), Ok(SteeringRules::ALL));
        assert_eq!(SteeringRules::new(&[]), Ok(SteeringRules::NONE));
    }

    #[test]
    fn repeated_rule_is_rejected() {
        let err = SteeringRules::new(&[
            SteeringRule::Alignment,
            SteeringRule::Cohesion,
            SteeringRule::Alignment,
        ])
        .unwrap_err();
        assert_eq!(err, ConfigError::DuplicateRule(SteeringRule::Alignment));
    }

    #[test]
    fn rejects_oversized_population() {
        let config = FlockConfig {
            population: MAX_BOIDS + 1,
            ..FlockConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::PopulationTooLarge {
                requested: MAX_BOIDS + 1,
                cap: MAX_BOIDS
            })
        );
    }

    #[test]
    fn rejects_neighbor_cap_outside_range() {
        for max_neighbors in [0, MAX_NEIGHBORS + 1] {
            let config = FlockConfig {
                max_neighbors,
                ..FlockConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::NeighborCapOutOfRange { .. })
            ));
        }
    }

    #[test]
    fn rejects_degenerate_bounds_and_radius() {
        let config = FlockConfig {
            world_bounds: vec3(10.0, 0.0, 10.0),
            ..FlockConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBounds { .. })
        ));

        let config = FlockConfig {
            perception_radius: f32::NAN,
            ..FlockConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPerceptionRadius(_))
        ));
    }

    #[test]
    fn rejects_inverted_speed_limits() {
        let config = FlockConfig {
            speed_limits: Some(SpeedLimits {
                min_speed: 3.0,
                max_speed: 2.0,
            }),
            ..FlockConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidSpeedLimits { min: 3.0, max: 2.0 })
        );
    }

    #[test]
    fn rejects_negative_factors() {
        let config = FlockConfig {
            matching_factor: -0.1,
            ..FlockConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidParameter {
                name: "matching_factor",
                value: -0.1
            })
        );
    }
}
