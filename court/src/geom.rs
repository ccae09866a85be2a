#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

/// A point in court (canvas pixel) space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Linear interpolation toward `other`. `t` is not clamped.
    #[must_use]
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Midpoint of the segment to `other`.
    #[must_use]
    pub fn midpoint(self, other: Point) -> Point {
        self.lerp(other, 0.5)
    }

    /// Mirror across the vertical line `x = axis_x`.
    #[must_use]
    pub fn mirrored_x(self, axis_x: f64) -> Point {
        Point { x: axis_x * 2.0 - self.x, y: self.y }
    }
}

/// Milliseconds needed to cover `from → to` at `speed_px_s`.
///
/// Zero distance yields exactly `0.0`; a non-positive speed also yields `0.0`
/// rather than an infinite or NaN duration.
#[must_use]
pub fn travel_ms(from: Point, to: Point, speed_px_s: f64) -> f64 {
    if speed_px_s <= 0.0 {
        return 0.0;
    }
    from.distance_to(to) / speed_px_s * 1000.0
}
