/*
 * Application Module
 *
 * This module defines the viewer's model and its update loop. The simulation
 * is stepped on a fixed timestep (60 ticks per second) that is independent of
 * the rendering frame rate; rendering only reads the state between ticks.
 */

use std::sync::OnceLock;
use std::time::{Duration, Instant};

use nannou::prelude::*;
use nannou_egui::Egui;
use tracing::{info, warn};

use crate::camera::Camera;
use crate::debug::DebugInfo;
use crate::error::ConfigError;
use crate::input::{mouse_moved, mouse_pressed, mouse_released, mouse_wheel, raw_window_event};
use crate::params::SimulationParams;
use crate::renderer::view;
use crate::simulation::Simulation;
use crate::ui::{self, ViewerSettings};

pub const TICKS_PER_SECOND: f32 = 60.0;

// Catch-up limit after a stall, so a long pause doesn't replay a burst of ticks
const MAX_TICKS_PER_FRAME: usize = 5;

static INITIAL_PARAMS: OnceLock<SimulationParams> = OnceLock::new();

pub struct Model {
    pub sim: Simulation,
    pub settings: ViewerSettings,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub camera: Camera,
    pub mouse_position: Vec2,
    pub physics_accumulator: Duration,
    pub physics_step_size: Duration,
    pub last_update_time: Instant,
}

// Open the window and run until it is closed
pub fn run(params: SimulationParams) -> Result<(), ConfigError> {
    params.validate()?;
    if INITIAL_PARAMS.set(params).is_err() {
        warn!("viewer parameters were already set; keeping the first ones");
    }
    nannou::app(model).update(update).exit(exit).run();
    Ok(())
}

fn model(app: &App) -> Model {
    let params = INITIAL_PARAMS.get().cloned().unwrap_or_default();

    let window_id = app
        .new_window()
        .title("Bird Simulation")
        .size(params.width as u32, params.height as u32)
        .view(view)
        .mouse_moved(mouse_moved)
        .mouse_pressed(mouse_pressed)
        .mouse_released(mouse_released)
        .mouse_wheel(mouse_wheel)
        .raw_event(raw_window_event)
        .build()
        .expect("failed to build the viewer window");

    let window = app.window(window_id).expect("viewer window vanished after creation");
    let egui = Egui::from_window(&window);

    let mut camera = Camera::new(params.width, params.height);
    camera.fit(window.rect());

    let settings = ViewerSettings::new(&params);
    // `run` validated these before the window opened
    let sim = Simulation::from_params(params).expect("viewer parameters were validated before launch");

    Model {
        sim,
        settings,
        egui,
        debug_info: DebugInfo::default(),
        camera,
        mouse_position: Vec2::ZERO,
        physics_accumulator: Duration::ZERO,
        physics_step_size: Duration::from_secs_f32(1.0 / TICKS_PER_SECOND),
        last_update_time: Instant::now(),
    }
}

fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    let restart = ui::update_ui(
        &mut model.egui,
        &mut model.settings,
        &model.debug_info,
        model.sim.stats(),
    );
    if restart {
        restart_simulation(model);
    }

    let now = Instant::now();
    model.physics_accumulator += now.duration_since(model.last_update_time);
    model.last_update_time = now;

    let mut ticks = 0;
    if model.settings.pause_simulation {
        model.physics_accumulator = Duration::ZERO;
    } else {
        while model.physics_accumulator >= model.physics_step_size && ticks < MAX_TICKS_PER_FRAME {
            model.sim.step();
            model.physics_accumulator -= model.physics_step_size;
            ticks += 1;
        }
        if ticks == MAX_TICKS_PER_FRAME {
            model.physics_accumulator = Duration::ZERO;
        }
    }
    model.debug_info.ticks_this_frame = ticks;
}

fn restart_simulation(model: &mut Model) {
    let params = model.settings.restart_params(model.sim.params());
    match Simulation::from_params(params) {
        Ok(sim) => {
            info!(seed = model.settings.seed, "simulation restarted");
            model.sim = sim;
            model.physics_accumulator = Duration::ZERO;
        }
        Err(err) => warn!(%err, "restart rejected"),
    }
}

fn exit(_app: &App, mut model: Model) {
    model.sim.stop();
}
