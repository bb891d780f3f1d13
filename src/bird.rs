/*
 * Bird Module
 *
 * This module defines the Bird struct and its per-tick behavior.
 * Each tick a bird:
 * 1. Turns by a small random amount
 * 2. Sometimes speeds up (never past its maximum speed)
 * 3. Moves along its heading and wraps around the arena edges
 *
 * The order matters for reproducible runs: acceleration takes effect before
 * the bird moves in the same tick.
 */

use rand::Rng;

use crate::error::ConfigError;
use crate::geometry::{wrap, Point};
use crate::params::BirdParams;

// Angle between the beak and each wing tip of the drawn body
const WING_ANGLE: f32 = 2.5;

#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    position: Point,
    heading: f32,
    speed: f32,
    min_speed: f32,
    max_speed: f32,
    speed_increment: f32,
    size: f32,
    view_angle: f32,
    view_distance: f32,
    boosted: bool,
    meals: u64,
}

impl Bird {
    pub fn new(x: f32, y: f32, heading: f32, params: &BirdParams) -> Self {
        Self {
            position: Point::new(x, y),
            heading,
            speed: params.initial_speed,
            min_speed: params.initial_speed,
            max_speed: params.max_speed,
            speed_increment: params.speed_increment,
            size: params.size,
            view_angle: params.view_angle,
            view_distance: params.view_distance(),
            boosted: false,
            meals: 0,
        }
    }

    // Spawn with a random position and heading, drawn in that order
    pub fn random<R: Rng + ?Sized>(rng: &mut R, width: f32, height: f32, params: &BirdParams) -> Self {
        let x = rng.gen_range(0.0..width);
        let y = rng.gen_range(0.0..height);
        let heading = rng.gen_range(0.0..std::f32::consts::TAU);
        Self::new(x, y, heading, params)
    }

    /// Starts the bird at `speed`, which must lie inside its speed range.
    pub fn with_speed(mut self, speed: f32) -> Result<Self, ConfigError> {
        if !(self.min_speed..=self.max_speed).contains(&speed) {
            return Err(ConfigError::OutOfRange {
                field: "speed",
                value: speed,
            });
        }
        self.speed = speed;
        Ok(self)
    }

    // First piece of per-bird state a simulation cannot run with, if any
    pub(crate) fn invalid_field(&self) -> Option<(&'static str, f32)> {
        let finite_positive = |value: f32| value > 0.0 && value.is_finite();

        if !(self.min_speed >= 0.0 && self.min_speed.is_finite()) {
            return Some(("min_speed", self.min_speed));
        }
        if !(self.max_speed.is_finite() && self.max_speed >= self.min_speed) {
            return Some(("max_speed", self.max_speed));
        }
        if !(self.min_speed..=self.max_speed).contains(&self.speed) {
            return Some(("speed", self.speed));
        }
        if !(self.speed_increment >= 0.0 && self.speed_increment.is_finite()) {
            return Some(("speed_increment", self.speed_increment));
        }
        if !finite_positive(self.size) {
            return Some(("size", self.size));
        }
        if !finite_positive(self.view_distance) {
            return Some(("view_distance", self.view_distance));
        }
        if !(0.0..=std::f32::consts::TAU).contains(&self.view_angle) {
            return Some(("view_angle", self.view_angle));
        }
        if !self.heading.is_finite() {
            return Some(("heading", self.heading));
        }
        None
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn min_speed(&self) -> f32 {
        self.min_speed
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn view_angle(&self) -> f32 {
        self.view_angle
    }

    pub fn view_distance(&self) -> f32 {
        self.view_distance
    }

    // Whether the bird sped up during the most recent tick
    pub fn boosted(&self) -> bool {
        self.boosted
    }

    pub fn meals(&self) -> u64 {
        self.meals
    }

    pub fn steer(&mut self, delta_angle: f32) {
        self.heading += delta_angle;
    }

    pub fn accelerate(&mut self) {
        self.speed = (self.speed + self.speed_increment).min(self.max_speed);
    }

    // Accelerate with the given probability; always consumes exactly one draw
    pub fn maybe_accelerate<R: Rng + ?Sized>(&mut self, probability: f32, rng: &mut R) -> bool {
        let accelerated = rng.gen::<f32>() < probability;
        if accelerated {
            self.accelerate();
        }
        accelerated
    }

    // Move one tick along the heading and wrap into the arena
    pub fn advance(&mut self, width: f32, height: f32) {
        self.position.x += self.heading.cos() * self.speed;
        self.position.y += self.heading.sin() * self.speed;

        self.position.x = wrap(self.position.x, width);
        self.position.y = wrap(self.position.y, height);
    }

    // One full tick of behavior: jitter, maybe accelerate, move
    pub fn update<R: Rng + ?Sized>(&mut self, params: &BirdParams, width: f32, height: f32, rng: &mut R) {
        let jitter = params.steer_jitter;
        self.steer(rng.gen_range(-jitter..=jitter));
        self.boosted = self.maybe_accelerate(params.acceleration_chance, rng);
        self.advance(width, height);
    }

    pub(crate) fn record_meals(&mut self, eaten: u64) {
        self.meals += eaten;
    }

    pub fn mouth_position(&self) -> Point {
        self.position.offset(self.heading, self.size)
    }

    pub fn eye_position(&self) -> Point {
        self.position.offset(self.heading, self.size * 0.3)
    }

    // Where the boost indicator sits, behind the body
    pub fn tail_position(&self) -> Point {
        self.position.offset(self.heading, -self.size * 0.7)
    }

    // Beak, then the two wing tips
    pub fn body_outline(&self) -> [Point; 3] {
        [
            self.mouth_position(),
            self.position.offset(self.heading + WING_ANGLE, self.size),
            self.position.offset(self.heading - WING_ANGLE, self.size),
        ]
    }

    // Start and end angles of the drawn view cone
    pub fn view_arc(&self) -> (f32, f32) {
        let half = self.view_angle / 2.0;
        (self.heading - half, self.heading + half)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::f32::consts::PI;

    const EPS: f32 = 1e-3;

    fn bird_at(x: f32, y: f32, heading: f32) -> Bird {
        Bird::new(x, y, heading, &BirdParams::default())
    }

    #[test]
    fn new_bird_uses_tuning() {
        let bird = bird_at(10.0, 20.0, 0.0);
        assert_eq!(bird.speed(), 2.0);
        assert_eq!(bird.size(), 20.0);
        assert_eq!(bird.view_distance(), 40.0);
        assert_eq!(bird.view_angle(), PI / 2.0);
        assert_eq!(bird.meals(), 0);
        assert!(!bird.boosted());
    }

    #[test]
    fn steering_accumulates_without_normalizing() {
        let mut bird = bird_at(0.0, 0.0, 3.0);
        bird.steer(4.0);
        assert_eq!(bird.heading(), 7.0);
    }

    #[test]
    fn acceleration_is_clamped() {
        let mut bird = bird_at(0.0, 0.0, 0.0);
        for _ in 0..100 {
            bird.accelerate();
        }
        assert_eq!(bird.speed(), 5.0);

        let mut bird = bird_at(0.0, 0.0, 0.0);
        bird.accelerate();
        assert!((bird.speed() - 2.1).abs() < EPS);
    }

    #[test]
    fn maybe_accelerate_respects_extremes() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut bird = bird_at(0.0, 0.0, 0.0);
        for _ in 0..50 {
            assert!(!bird.maybe_accelerate(0.0, &mut rng));
        }
        assert_eq!(bird.speed(), 2.0);

        assert!(bird.maybe_accelerate(1.0, &mut rng));
        assert!((bird.speed() - 2.1).abs() < EPS);
    }

    #[test]
    fn advance_wraps_past_the_right_edge() {
        let mut bird = bird_at(800.0 - 0.01, 300.0, 0.0).with_speed(5.0).unwrap();
        bird.advance(800.0, 600.0);
        assert!((0.0..800.0).contains(&bird.position().x));
        assert!((bird.position().x - 4.99).abs() < EPS);
        assert!((bird.position().y - 300.0).abs() < EPS);
    }

    #[test]
    fn advance_wraps_past_the_top_edge() {
        let mut bird = bird_at(100.0, 1.0, -PI / 2.0).with_speed(5.0).unwrap();
        bird.advance(800.0, 600.0);
        assert!((bird.position().y - 596.0).abs() < EPS);
    }

    #[test]
    fn with_speed_rejects_speeds_outside_the_range() {
        assert_eq!(bird_at(0.0, 0.0, 0.0).with_speed(3.5).unwrap().speed(), 3.5);
        assert_eq!(bird_at(0.0, 0.0, 0.0).with_speed(5.0).unwrap().speed(), 5.0);

        assert!(matches!(
            bird_at(0.0, 0.0, 0.0).with_speed(50.0),
            Err(ConfigError::OutOfRange { field: "speed", .. })
        ));
        assert!(matches!(
            bird_at(0.0, 0.0, 0.0).with_speed(0.5),
            Err(ConfigError::OutOfRange { field: "speed", .. })
        ));
    }

    #[test]
    fn invalid_tuning_is_reported() {
        assert_eq!(bird_at(0.0, 0.0, 0.0).invalid_field(), None);

        let params = BirdParams {
            initial_speed: 6.0,
            ..BirdParams::default()
        };
        assert_eq!(
            Bird::new(0.0, 0.0, 0.0, &params).invalid_field(),
            Some(("max_speed", 5.0))
        );

        let params = BirdParams {
            size: 0.0,
            ..BirdParams::default()
        };
        assert_eq!(Bird::new(0.0, 0.0, 0.0, &params).invalid_field(), Some(("size", 0.0)));

        assert!(matches!(
            bird_at(0.0, 0.0, f32::NAN).invalid_field(),
            Some(("heading", _))
        ));
    }

    #[test]
    fn update_with_zero_jitter_keeps_heading() {
        let params = BirdParams {
            steer_jitter: 0.0,
            acceleration_chance: 0.0,
            ..BirdParams::default()
        };
        let mut rng = SmallRng::seed_from_u64(1);
        let mut bird = Bird::new(100.0, 100.0, 0.0, &params);
        bird.update(&params, 800.0, 600.0, &mut rng);

        assert_eq!(bird.heading(), 0.0);
        assert!((bird.position().x - 102.0).abs() < EPS);
        assert!(!bird.boosted());
    }

    #[test]
    fn acceleration_happens_before_the_move() {
        let params = BirdParams {
            steer_jitter: 0.0,
            acceleration_chance: 1.0,
            ..BirdParams::default()
        };
        let mut rng = SmallRng::seed_from_u64(1);
        let mut bird = Bird::new(100.0, 100.0, 0.0, &params);
        bird.update(&params, 800.0, 600.0, &mut rng);

        assert!(bird.boosted());
        assert!((bird.position().x - 102.1).abs() < EPS);
    }

    #[test]
    fn derived_points_follow_the_heading() {
        let bird = bird_at(100.0, 100.0, PI / 2.0);

        let mouth = bird.mouth_position();
        assert!((mouth.x - 100.0).abs() < EPS && (mouth.y - 120.0).abs() < EPS);

        let eye = bird.eye_position();
        assert!((eye.y - 106.0).abs() < EPS);

        let tail = bird.tail_position();
        assert!((tail.y - 86.0).abs() < EPS);

        let outline = bird.body_outline();
        assert_eq!(outline[0], mouth);
        for vertex in outline {
            assert!((vertex.distance(bird.position()) - 20.0).abs() < EPS);
        }

        let (start, end) = bird.view_arc();
        assert!((start - PI / 4.0).abs() < EPS);
        assert!((end - 3.0 * PI / 4.0).abs() < EPS);
    }
}
