/*
 * Boid Module
 *
 * This module defines the Boid struct and its per-step neighbor cache.
 * A boid is a point with a velocity; everything it knows about the rest of
 * the flock is the bounded list of neighbor indices rebuilt every step.
 */

use nannou::prelude::Vec3;

use crate::math;
use crate::MAX_NEIGHBORS;

// Bounded list of neighbor indices with an explicit occupied count.
// Slots past `len` are never read, so clearing is just resetting the count.
#[derive(Clone, Debug)]
pub struct NeighborList {
    slots: [usize; MAX_NEIGHBORS],
    len: usize,
}

impl NeighborList {
    pub const fn new() -> Self {
        Self {
            slots: [0; MAX_NEIGHBORS],
            len: 0,
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    // Append an index; returns false and leaves the list untouched when full
    #[inline]
    pub fn push(&mut self, index: usize) -> bool {
        if self.len >= MAX_NEIGHBORS {
            return false;
        }
        self.slots[self.len] = index;
        self.len += 1;
        true
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.slots[..self.len]
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.as_slice().iter().copied()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.as_slice().contains(&index)
    }
}

impl Default for NeighborList {
    fn default() -> Self {
        Self::new()
    }
}

// Two lists are equal when their occupied slots are; stale slots don't count
impl PartialEq for NeighborList {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Boid {
    pub position: Vec3,
    pub velocity: Vec3,
    pub neighbors: NeighborList,
}

impl Boid {
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Self {
            position,
            velocity,
            neighbors: NeighborList::new(),
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    // Direction of travel; a stationary boid faces the default forward axis
    pub fn heading(&self) -> Vec3 {
        math::normalize_or(self.velocity, math::FORWARD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nannou::prelude::vec3;

    #[test]
    fn push_stops_at_capacity() {
        let mut list = NeighborList::new();
        for i in 0..MAX_NEIGHBORS {
            assert!(list.push(i));
        }
        assert!(!list.push(99));
        assert_eq!(list.len(), MAX_NEIGHBORS);
        assert!(!list.contains(99));
    }

    #[test]
    fn clear_forgets_previous_entries() {
        let mut list = NeighborList::new();
        list.push(4);
        list.push(7);
        list.clear();
        assert!(list.is_empty());
        assert!(!list.contains(4));
        assert_eq!(list.iter().count(), 0);

        list.push(2);
        assert_eq!(list.as_slice(), &[2]);
    }

    #[test]
    fn equality_ignores_stale_slots() {
        let mut a = NeighborList::new();
        a.push(1);
        a.push(2);
        a.clear();
        a.push(5);

        let mut b = NeighborList::new();
        b.push(5);
        assert_eq!(a, b);
    }

    #[test]
    fn new_boid_has_no_neighbors() {
        let boid = Boid::new(vec3(1.0, 2.0, 3.0), vec3(0.0, 2.0, 0.0));
        assert!(boid.neighbors.is_empty());
        assert_eq!(boid.speed(), 2.0);
        assert_eq!(boid.heading(), Vec3::Y);
    }

    #[test]
    fn stationary_boid_faces_forward() {
        let boid = Boid::new(Vec3::ZERO, Vec3::ZERO);
        assert_eq!(boid.heading(), math::FORWARD);
    }
}
