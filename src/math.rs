/*
 * Math Module
 *
 * Guarded vector helpers. Normalizing a zero-length vector has no answer, so
 * every normalize-and-scale in the simulation goes through these functions
 * and names its fallback explicitly.
 */

use nannou::prelude::Vec3;

pub const EPSILON: f32 = 1.0e-6;

// Heading used when a velocity has collapsed to zero
pub const FORWARD: Vec3 = Vec3::X;

// Unit vector along `v`, or `fallback` when `v` is too short (or not finite) to normalize
#[inline]
pub fn normalize_or(v: Vec3, fallback: Vec3) -> Vec3 {
    let len_sq = v.length_squared();
    if !len_sq.is_finite() || len_sq <= EPSILON * EPSILON {
        return fallback;
    }
    v / len_sq.sqrt()
}

// Rescale `v` to `length`; a degenerate `v` takes the direction of `fallback`
#[inline]
pub fn scale_to_length(v: Vec3, length: f32, fallback: Vec3) -> Vec3 {
    normalize_or(v, fallback) * length
}

#[cfg(test)]
mod tests {
    use super::*;
    use nannou::prelude::vec3;

    #[test]
    fn normalize_produces_unit_length() {
        let n = normalize_or(vec3(3.0, 4.0, 0.0), Vec3::ZERO);
        assert!((n.length() - 1.0).abs() < 1.0e-6);
        assert!((n.x - 0.6).abs() < 1.0e-6);
        assert!((n.y - 0.8).abs() < 1.0e-6);
    }

    #[test]
    fn zero_vector_takes_the_fallback() {
        assert_eq!(normalize_or(Vec3::ZERO, FORWARD), FORWARD);
        assert_eq!(normalize_or(Vec3::ZERO, Vec3::ZERO), Vec3::ZERO);
        assert_eq!(scale_to_length(Vec3::ZERO, 2.0, FORWARD), vec3(2.0, 0.0, 0.0));
    }

    #[test]
    fn non_finite_input_takes_the_fallback() {
        let v = vec3(f32::NAN, 1.0, 0.0);
        assert_eq!(normalize_or(v, Vec3::Y), Vec3::Y);
    }

    #[test]
    fn scale_keeps_direction() {
        let v = scale_to_length(vec3(0.0, 0.0, -10.0), 2.5, FORWARD);
        assert!((v.z + 2.5).abs() < 1.0e-6);
        assert_eq!(v.x, 0.0);
    }
}
