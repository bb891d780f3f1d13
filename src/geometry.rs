/*
 * Geometry Module
 *
 * Pure helpers shared by the simulation core: a small point type, toroidal
 * wrapping of coordinates, angle normalization and the view cone test.
 *
 * Distances are plain Euclidean distances between wrapped coordinates. A bird
 * near the right edge and food near the left edge are therefore far apart,
 * even though they are neighbours on the torus. Consumption and perception both
 * rely on this.
 */

use std::f32::consts::{PI, TAU};

// A position in arena coordinates (x to the right, y down)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    // Angle of the vector from `self` to `other`, in radians
    pub fn angle_to(self, other: Point) -> f32 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    // Point at `distance` along `angle` from this one
    pub fn offset(self, angle: f32, distance: f32) -> Point {
        Point::new(
            self.x + distance * angle.cos(),
            self.y + distance * angle.sin(),
        )
    }
}

/// True modulo of `value` into `[0, limit)`.
///
/// `rem_euclid` can round up to exactly `limit` for tiny negative inputs, which
/// would put a coordinate on the far edge. That case folds back to zero.
#[inline]
pub fn wrap(value: f32, limit: f32) -> f32 {
    let wrapped = value.rem_euclid(limit);
    if wrapped >= limit {
        0.0
    } else {
        wrapped
    }
}

/// Maps any angle into `(-PI, PI]`.
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let turned = angle.rem_euclid(TAU);
    if turned > PI {
        turned - TAU
    } else {
        turned
    }
}

/// Whether `target_angle` lies within `half_angle` of `heading` on either side.
#[inline]
pub fn angle_in_cone(heading: f32, half_angle: f32, target_angle: f32) -> bool {
    normalize_angle(target_angle - heading).abs() <= half_angle
}
