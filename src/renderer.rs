/*
 * Renderer Module
 *
 * Draws the arena, the food and every bird: body triangle, eye, mouth, the
 * boost indicator, and (when toggled on) the view cone arc and lines from the
 * mouth to each piece of food the bird can see.
 */

use nannou::prelude::*;
use tracing::error;

use crate::app::Model;
use crate::bird::Bird;
use crate::camera::Camera;
use crate::geometry::Point;
use crate::ui::{self, ViewerSettings};

const COLOR_BACKGROUND: (u8, u8, u8) = (35, 37, 74);
const COLOR_MOUTH: (u8, u8, u8) = (234, 158, 240);
const COLOR_BORDER: (u8, u8, u8) = (80, 80, 110);

const ARC_SEGMENTS: usize = 24;

fn color((r, g, b): (u8, u8, u8)) -> Rgb<u8> {
    rgb(r, g, b)
}

pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let window_rect = app.window_rect();
    let camera = &model.camera;

    draw.background().color(color(COLOR_BACKGROUND));

    let arena = camera.arena_rect(window_rect);
    draw.rect()
        .xy(arena.xy())
        .wh(arena.wh())
        .no_fill()
        .stroke_weight(1.0)
        .stroke(color(COLOR_BORDER));

    for food in model.sim.food() {
        draw.ellipse()
            .xy(camera.arena_to_screen(food.position, window_rect))
            .radius(camera.scale(3.0))
            .color(GREEN);
    }

    for bird in model.sim.birds() {
        draw_bird(&draw, camera, window_rect, bird, &model.settings);

        if model.settings.show_lines {
            let mouth = camera.arena_to_screen(bird.mouth_position(), window_rect);
            for food in model.sim.visible_food(bird) {
                draw.line()
                    .start(mouth)
                    .end(camera.arena_to_screen(food.position, window_rect))
                    .weight(1.0)
                    .color(WHITE);
            }
        }

        // Ring the food the bird is facing
        if model.settings.show_view {
            for food in model.sim.visible_food(bird).within_cone(bird) {
                draw.ellipse()
                    .xy(camera.arena_to_screen(food.position, window_rect))
                    .radius(camera.scale(6.0))
                    .no_fill()
                    .stroke(GREEN)
                    .stroke_weight(1.0);
            }
        }
    }

    if model.settings.show_debug {
        ui::draw_debug_info(&draw, &model.debug_info, window_rect, model.sim.stats(), camera.zoom);
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        error!(?err, "failed to draw frame");
    }
    if let Err(err) = model.egui.draw_to_frame(&frame) {
        error!(?err, "failed to draw ui");
    }
}

fn draw_bird(draw: &Draw, camera: &Camera, window_rect: Rect, bird: &Bird, settings: &ViewerSettings) {
    let to_screen = |point: Point| camera.arena_to_screen(point, window_rect);

    let outline: Vec<Point2> = bird.body_outline().iter().map(|&p| to_screen(p)).collect();
    draw.polygon().color(WHITE).points(outline);

    draw.ellipse()
        .xy(to_screen(bird.eye_position()))
        .radius(camera.scale(3.0))
        .color(BLACK);

    draw.ellipse()
        .xy(to_screen(bird.mouth_position()))
        .radius(camera.scale(5.0))
        .color(color(COLOR_MOUTH));

    if bird.boosted() {
        draw.ellipse()
            .xy(to_screen(bird.tail_position()))
            .radius(camera.scale(3.0))
            .color(BLUE);
    }

    if settings.show_view {
        let (start, end) = bird.view_arc();
        let centre = bird.position();
        let radius = bird.view_distance();
        let points: Vec<Point2> = (0..=ARC_SEGMENTS)
            .map(|i| {
                let angle = start + (end - start) * i as f32 / ARC_SEGMENTS as f32;
                to_screen(centre.offset(angle, radius))
            })
            .collect();
        draw.polyline().weight(1.0).points(points).color(GREEN);
    }
}
