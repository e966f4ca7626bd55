/*
 * Camera Module
 *
 * This module defines an orbit camera around the flock. It turns world-space
 * points into window coordinates with a perspective projection so the
 * renderer can draw the 3D flock with nannou's 2D primitives.
 */

use nannou::prelude::*;

use crate::math;

// A point after projection into the window
#[derive(Clone, Copy, Debug)]
pub struct Projected {
    pub screen: Vec2,
    // Distance along the view axis; larger is farther away
    pub depth: f32,
    // Pixels per world unit at this depth
    pub scale: f32,
}

pub struct Camera {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub fov_y: f32,
    pub near: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub is_dragging: bool,
    pub last_cursor_pos: Vec2,
}

impl Camera {
    // Looking at the origin from `eye`
    pub fn looking_from(eye: Vec3) -> Self {
        let distance = eye.length().max(1.0);
        let pitch = (eye.y / distance).clamp(-1.0, 1.0).asin();
        let yaw = eye.x.atan2(eye.z);

        Self {
            target: Vec3::ZERO,
            yaw,
            pitch,
            distance,
            fov_y: 60.0_f32.to_radians(),
            near: 0.05,
            min_distance: 1.0,
            max_distance: 200.0,
            is_dragging: false,
            last_cursor_pos: Vec2::ZERO,
        }
    }

    // Same viewing direction as the eye at (3, 3, 2), pulled back to fit the whole box
    pub fn framing(world_bounds: Vec3) -> Self {
        let direction = math::normalize_or(vec3(3.0, 3.0, 2.0), Vec3::Z);
        Self::looking_from(direction * world_bounds.length() * 1.8)
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target + vec3(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw) * self.distance
    }

    // Project a world point into window coordinates; None when behind the camera
    pub fn project(&self, point: Vec3, window_rect: Rect) -> Option<Projected> {
        let eye = self.eye();
        let forward = math::normalize_or(self.target - eye, -Vec3::Z);
        let right = math::normalize_or(forward.cross(Vec3::Y), Vec3::X);
        let up = right.cross(forward);

        let relative = point - eye;
        let depth = relative.dot(forward);
        if depth <= self.near {
            return None;
        }

        let focal = (window_rect.h() * 0.5) / (self.fov_y * 0.5).tan();
        let scale = focal / depth;
        let screen = vec2(relative.dot(right), relative.dot(up)) * scale + window_rect.xy();

        Some(Projected {
            screen,
            depth,
            scale,
        })
    }

    // Handle mouse wheel events for zooming
    pub fn zoom(&mut self, scroll_delta: Vec2) {
        let zoom_factor = 1.0 - scroll_delta.y * 0.1;
        self.distance = (self.distance * zoom_factor).clamp(self.min_distance, self.max_distance);
    }

    // Start dragging the camera
    pub fn start_drag(&mut self, position: Vec2) {
        self.last_cursor_pos = position;
        self.is_dragging = true;
    }

    // Orbit around the target while dragging
    pub fn drag(&mut self, position: Vec2) {
        if self.is_dragging {
            let delta = position - self.last_cursor_pos;
            if delta.length_squared() > 0.0 {
                self.yaw -= delta.x * 0.01;
                self.pitch = (self.pitch - delta.y * 0.01).clamp(-1.5, 1.5);
                self.last_cursor_pos = position;
            }
        }
    }

    // End dragging
    pub fn end_drag(&mut self) {
        self.is_dragging = false;
    }
}
