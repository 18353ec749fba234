// Math utilities and helper functions

use glam::Vec2;

/// Straight-line distance between two points
pub fn distance(p1: Vec2, p2: Vec2) -> f32 {
    p1.distance(p2)
}

/// Bearing from `from` to `to` in degrees, in the range [-180, 180]
///
/// Screen space: y grows downward, so targets above `from` give negative bearings.
pub fn bearing_degrees(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x).to_degrees()
}

/// Inclusive range test
pub fn within(value: f32, min: f32, max: f32) -> bool {
    value >= min && value <= max
}
