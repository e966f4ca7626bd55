/*
 * UI Module
 *
 * The viewer's control panel (nannou_egui): preset picker, pause/reset,
 * display toggles and the live flock statistics. Presets are picked whole;
 * no individual tunable is exposed.
 */

use nannou_egui::{egui, Egui};

use crate::app::ViewControls;
use crate::debug::DebugInfo;
use crate::flock::Flock;
use crate::params::Preset;

// What the panel asked the app to do this frame
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct UiAction {
    pub reset: bool,
    pub load_preset: Option<Preset>,
}

pub fn update_ui(
    egui: &mut Egui,
    controls: &mut ViewControls,
    debug_info: &DebugInfo,
    flock: &Flock,
) -> UiAction {
    let mut action = UiAction::default();
    let mut selected = controls.preset;

    let ctx = egui.begin_frame();

    egui::Window::new("Flock")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            egui::ComboBox::from_label("Preset")
                .selected_text(selected.name())
                .show_ui(ui, |ui| {
                    for preset in Preset::ALL {
                        ui.selectable_value(&mut selected, preset, preset.name());
                    }
                });

            ui.horizontal(|ui| {
                if ui.button("Reset").clicked() {
                    action.reset = true;
                }
                ui.checkbox(&mut controls.paused, "Pause");
            });

            ui.checkbox(&mut controls.show_neighbors, "Neighbor lines");
            ui.checkbox(&mut controls.show_grid, "Grid");

            ui.separator();

            let stats = &debug_info.stats;
            ui.label(format!("FPS: {:.1}", debug_info.fps));
            ui.label(format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0));
            ui.label(format!("Boids: {}", stats.population));
            ui.label(format!("Step: {}", stats.step));
            ui.label(format!(
                "Speed: {:.2} (min {:.2}, max {:.2})",
                stats.mean_speed, stats.min_speed, stats.max_speed
            ));
            ui.label(format!("Neighbors per boid: {:.1}", stats.mean_neighbors));
            ui.label(format!("Isolated: {}", stats.isolated));
            ui.label(format!("Seed: {}", flock.seed()));

            ui.separator();
            ui.label("Drag to orbit, wheel to zoom");
            ui.label("Space: pause, R: reset");
        });

    if selected != controls.preset {
        action.load_preset = Some(selected);
    }

    action
}
