/*
 * Boid Flocking Simulation
 *
 * Opens a window and flies a 3D flock in it. Each boid follows separation,
 * alignment and cohesion with its neighbors and is kept inside the world box
 * by the boundary rule. Set RUST_LOG=debug for periodic flock statistics.
 */

use flock3d::app;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    nannou::app(app::model).update(app::update).run();
}
