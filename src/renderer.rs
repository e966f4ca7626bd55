/*
 * Renderer Module
 *
 * This module draws the flock: a sphere per boid projected through the orbit
 * camera with a tick along its heading, a ground grid, the world box, and
 * optionally a line from every boid to each of its neighbors. It only reads
 * the flock.
 */

use nannou::color::Rgba;
use nannou::prelude::*;

use crate::app::Model;
use crate::camera::Camera;
use crate::flock::Flock;
use crate::BOID_RADIUS;

const GRID_SLICES: i32 = 10;
// World-space length of the heading tick
const HEADING_LENGTH: f32 = BOID_RADIUS * 3.0;

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let window_rect = app.window_rect();

    draw.background().color(rgb(245u8, 245u8, 245u8));

    let bounds = model.flock.config().world_bounds;
    if model.controls.show_grid {
        draw_grid(&draw, &model.camera, window_rect, bounds);
        draw_world_box(&draw, &model.camera, window_rect, bounds);
    }

    if model.controls.show_neighbors {
        draw_neighbor_lines(&draw, &model.camera, window_rect, &model.flock);
    }

    draw_boids(&draw, &model.camera, window_rect, &model.flock);

    draw.to_frame(app, &frame).unwrap();

    // Draw the egui UI
    model.egui.draw_to_frame(&frame).unwrap();
}

fn line_3d(draw: &Draw, camera: &Camera, window_rect: Rect, a: Vec3, b: Vec3, color: Rgba) {
    if let (Some(pa), Some(pb)) = (camera.project(a, window_rect), camera.project(b, window_rect)) {
        draw.line()
            .start(pa.screen)
            .end(pb.screen)
            .weight(1.0)
            .color(color);
    }
}

// Grid on the y = 0 plane, spanning the world box in x and z
fn draw_grid(draw: &Draw, camera: &Camera, window_rect: Rect, bounds: Vec3) {
    let color = rgba(0.6, 0.6, 0.6, 1.0);
    let half = GRID_SLICES / 2;

    for i in -half..=half {
        let t = i as f32 / half as f32;
        let x = t * bounds.x;
        let z = t * bounds.z;
        line_3d(draw, camera, window_rect, vec3(x, 0.0, -bounds.z), vec3(x, 0.0, bounds.z), color);
        line_3d(draw, camera, window_rect, vec3(-bounds.x, 0.0, z), vec3(bounds.x, 0.0, z), color);
    }
}

fn draw_world_box(draw: &Draw, camera: &Camera, window_rect: Rect, bounds: Vec3) {
    let color = rgba(0.3, 0.3, 0.3, 0.5);
    let corner = |sx: f32, sy: f32, sz: f32| vec3(sx * bounds.x, sy * bounds.y, sz * bounds.z);

    for &(sy, sz) in &[(-1.0, -1.0), (-1.0, 1.0), (1.0, -1.0), (1.0, 1.0)] {
        line_3d(draw, camera, window_rect, corner(-1.0, sy, sz), corner(1.0, sy, sz), color);
    }
    for &(sx, sz) in &[(-1.0, -1.0), (-1.0, 1.0), (1.0, -1.0), (1.0, 1.0)] {
        line_3d(draw, camera, window_rect, corner(sx, -1.0, sz), corner(sx, 1.0, sz), color);
    }
    for &(sx, sy) in &[(-1.0, -1.0), (-1.0, 1.0), (1.0, -1.0), (1.0, 1.0)] {
        line_3d(draw, camera, window_rect, corner(sx, sy, -1.0), corner(sx, sy, 1.0), color);
    }
}

fn draw_neighbor_lines(draw: &Draw, camera: &Camera, window_rect: Rect, flock: &Flock) {
    let color = rgba(0.75, 0.75, 0.75, 1.0);
    let boids = flock.boids();

    for boid in boids {
        for j in boid.neighbors.iter() {
            line_3d(draw, camera, window_rect, boid.position, boids[j].position, color);
        }
    }
}

// Spheres are drawn back to front so nearer boids cover farther ones, each
// with a short tick toward its heading
fn draw_boids(draw: &Draw, camera: &Camera, window_rect: Rect, flock: &Flock) {
    let mut projected: Vec<_> = flock
        .boids()
        .iter()
        .filter_map(|boid| {
            let body = camera.project(boid.position, window_rect)?;
            let nose = boid.position + boid.heading() * HEADING_LENGTH;
            let tip = camera.project(nose, window_rect).map(|p| p.screen);
            Some((body, tip))
        })
        .collect();
    projected.sort_by(|(a, _), (b, _)| b.depth.total_cmp(&a.depth));

    for (p, tip) in &projected {
        let radius = (BOID_RADIUS * p.scale).max(1.0);
        if let Some(tip) = tip {
            draw.line()
                .start(p.screen)
                .end(*tip)
                .weight(1.0)
                .color(GRAY);
        }
        draw.ellipse()
            .xy(p.screen)
            .radius(radius)
            .color(DARKGRAY);
    }
}
