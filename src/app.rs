/*
 * Application Module
 *
 * This module defines the viewer's model and its per-frame update. The viewer
 * is only a driver for the simulation: it builds a Flock from a preset, calls
 * `step` once per frame with the elapsed time, and hands the result to the
 * renderer.
 */

use log::info;
use nannou::prelude::*;
use nannou_egui::Egui;

use crate::camera::Camera;
use crate::debug::DebugInfo;
use crate::flock::Flock;
use crate::params::Preset;
use crate::{input, renderer, ui};

// Longest frame the simulation is asked to integrate over in one step
const MAX_FRAME_DT: f32 = 0.1;

// Viewer toggles; none of these touch the simulation's tunables
pub struct ViewControls {
    pub preset: Preset,
    pub paused: bool,
    pub show_neighbors: bool,
    pub show_grid: bool,
}

impl Default for ViewControls {
    fn default() -> Self {
        Self {
            preset: Preset::default(),
            paused: false,
            show_neighbors: false,
            show_grid: true,
        }
    }
}

// Main model for the application
pub struct Model {
    pub flock: Flock,
    pub controls: ViewControls,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub camera: Camera,
    pub mouse_position: Vec2,
}

impl Model {
    // Rebuild the flock for the selected preset and reframe the camera
    pub fn load_preset(&mut self, preset: Preset) {
        self.controls.preset = preset;
        self.flock = build_flock(preset, rand::random());
        self.camera = Camera::framing(self.flock.config().world_bounds);
    }

    pub fn reset(&mut self) {
        self.flock.reset(rand::random());
    }
}

fn build_flock(preset: Preset, seed: u64) -> Flock {
    info!("loading preset {}", preset.name());
    Flock::new(preset.config(), seed).expect("built-in presets are valid")
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let window_id = app
        .new_window()
        .title("Boid Flocking Simulation")
        .size(800, 450)
        .view(renderer::view)
        .mouse_moved(input::mouse_moved)
        .mouse_pressed(input::mouse_pressed)
        .mouse_released(input::mouse_released)
        .mouse_wheel(input::mouse_wheel)
        .key_pressed(input::key_pressed)
        .raw_event(input::raw_window_event)
        .build()
        .unwrap();

    let window = app.window(window_id).unwrap();
    let egui = Egui::from_window(&window);

    let controls = ViewControls::default();
    let flock = build_flock(controls.preset, rand::random());
    let camera = Camera::framing(flock.config().world_bounds);

    Model {
        flock,
        controls,
        egui,
        debug_info: DebugInfo::default(),
        camera,
        mouse_position: Vec2::ZERO,
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    let action = ui::update_ui(&mut model.egui, &mut model.controls, &model.debug_info, &model.flock);

    if let Some(preset) = action.load_preset {
        model.load_preset(preset);
    } else if action.reset {
        model.reset();
    }

    if !model.controls.paused {
        let dt = update.since_last.as_secs_f32().min(MAX_FRAME_DT);
        model.flock.step(dt);
    }

    model.debug_info.stats = model.flock.stats();
}
