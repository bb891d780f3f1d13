/*
 * UI Module
 *
 * The viewer's egui control panel and its text overlay. Display toggles live
 * here and only here: the simulation never reads them, so flipping one changes
 * what is drawn but never how the birds move.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::SimulationParams;
use crate::simulation::SimulationStats;

// Presentation state owned by the viewer
#[derive(Debug, Clone)]
pub struct ViewerSettings {
    pub show_view: bool,
    pub show_lines: bool,
    pub show_debug: bool,
    pub pause_simulation: bool,
    // Applied on the next restart
    pub num_birds: usize,
    pub num_food: usize,
    pub seed: u64,
}

impl ViewerSettings {
    pub fn new(params: &SimulationParams) -> Self {
        Self {
            show_view: true,
            show_lines: true,
            show_debug: false,
            pause_simulation: false,
            num_birds: params.num_birds,
            num_food: params.num_food,
            seed: params.seed,
        }
    }

    // Parameters for a restart: the running ones with the panel's counts and seed
    pub fn restart_params(&self, current: &SimulationParams) -> SimulationParams {
        SimulationParams {
            num_birds: self.num_birds,
            num_food: self.num_food,
            seed: self.seed,
            ..current.clone()
        }
    }
}

// Update the UI and return whether a restart was requested
pub fn update_ui(
    egui: &mut Egui,
    settings: &mut ViewerSettings,
    debug_info: &DebugInfo,
    stats: SimulationStats,
) -> bool {
    let mut restart = false;

    let ctx = egui.begin_frame();

    egui::Window::new("Bird Simulation")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.horizontal(|ui| {
                ui.checkbox(&mut settings.show_view, "View");
                ui.checkbox(&mut settings.show_lines, "Lines");
            });
            ui.checkbox(&mut settings.pause_simulation, "Pause Simulation");
            ui.checkbox(&mut settings.show_debug, "Show Debug Info");

            ui.collapsing("Population", |ui| {
                ui.add(
                    egui::Slider::new(&mut settings.num_birds, SimulationParams::get_num_birds_range())
                        .text("Birds"),
                );
                ui.add(
                    egui::Slider::new(&mut settings.num_food, SimulationParams::get_num_food_range())
                        .text("Food"),
                );
                ui.horizontal(|ui| {
                    ui.label("Seed");
                    ui.add(egui::DragValue::new(&mut settings.seed));
                });
                if ui.button("Restart").clicked() {
                    restart = true;
                }
            });

            ui.separator();
            ui.label(format!("Tick: {}", stats.ticks));
            ui.label(format!("Food eaten: {}", stats.food_eaten));
            ui.label(format!("FPS: {:.1}", debug_info.fps));
        });

    restart
}

// Draw debug information in the top-left corner of the window
pub fn draw_debug_info(
    draw: &nannou::Draw,
    debug_info: &DebugInfo,
    window_rect: nannou::geom::Rect,
    stats: SimulationStats,
    camera_zoom: f32,
) {
    let margin = 20.0;
    let line_height = 20.0;
    let text_x = window_rect.left() + margin;
    let text_y = window_rect.top() - margin;

    let debug_texts = [
        format!("FPS: {:.1}", debug_info.fps),
        format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0),
        format!("Ticks this frame: {}", debug_info.ticks_this_frame),
        format!("Tick: {}", stats.ticks),
        format!("Eaten last tick: {}", stats.eaten_last_tick),
        format!("Zoom: {:.2}x", camera_zoom),
    ];

    for (i, text) in debug_texts.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);
        draw.text(text)
            .x_y(text_x + 70.0, y)
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}
