/*
 * Camera Module
 *
 * This module defines the Camera struct that handles zooming and panning in
 * the viewer. It converts between arena coordinates (origin top-left, y down)
 * and nannou's screen space (origin at the window centre, y up).
 */

use nannou::prelude::*;

use crate::geometry::Point;

pub struct Camera {
    pub position: Vec2,
    pub zoom: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub is_dragging: bool,
    pub last_cursor_pos: Vec2,
    arena: Vec2,
}

impl Camera {
    pub fn new(arena_width: f32, arena_height: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: 0.1,
            max_zoom: 5.0,
            is_dragging: false,
            last_cursor_pos: Vec2::ZERO,
            arena: vec2(arena_width, arena_height),
        }
    }

    // Centre the arena and pick the zoom that fits it in the window
    pub fn fit(&mut self, window_rect: Rect) {
        let zoom = (window_rect.w() / self.arena.x).min(window_rect.h() / self.arena.y);
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        self.position = Vec2::ZERO;
    }

    // Arena point to the camera's world space (centred, y up)
    pub fn arena_to_world(&self, point: Point) -> Vec2 {
        vec2(point.x - self.arena.x / 2.0, self.arena.y / 2.0 - point.y)
    }

    pub fn world_to_screen(&self, point: Vec2, window_rect: Rect) -> Vec2 {
        (point - self.position) * self.zoom + window_rect.xy()
    }

    pub fn screen_to_world(&self, point: Vec2, window_rect: Rect) -> Vec2 {
        (point - window_rect.xy()) / self.zoom + self.position
    }

    pub fn arena_to_screen(&self, point: Point, window_rect: Rect) -> Vec2 {
        self.world_to_screen(self.arena_to_world(point), window_rect)
    }

    // Arena length (radius, stroke) at the current zoom
    pub fn scale(&self, length: f32) -> f32 {
        length * self.zoom
    }

    // Screen rectangle covered by the arena
    pub fn arena_rect(&self, window_rect: Rect) -> Rect {
        let top_left = self.arena_to_screen(Point::new(0.0, 0.0), window_rect);
        let bottom_right = self.arena_to_screen(Point::new(self.arena.x, self.arena.y), window_rect);
        Rect::from_corners(top_left, bottom_right)
    }

    // Zoom towards the cursor so the point under it stays put
    pub fn zoom(&mut self, scroll_delta: Vec2, cursor_position: Vec2, window_rect: Rect) {
        let zoom_factor = 1.0 + scroll_delta.y * 0.1;
        let cursor_world_before = self.screen_to_world(cursor_position, window_rect);

        self.zoom = (self.zoom * zoom_factor).clamp(self.min_zoom, self.max_zoom);

        let cursor_world_after = self.screen_to_world(cursor_position, window_rect);
        self.position += cursor_world_before - cursor_world_after;
    }

    pub fn start_drag(&mut self, position: Vec2) {
        self.last_cursor_pos = position;
        self.is_dragging = true;
    }

    pub fn drag(&mut self, position: Vec2) {
        if self.is_dragging {
            let delta = position - self.last_cursor_pos;
            if delta.length_squared() > 0.0 {
                self.position -= delta / self.zoom;
                self.last_cursor_pos = position;
            }
        }
    }

    pub fn end_drag(&mut self) {
        self.is_dragging = false;
    }
}
