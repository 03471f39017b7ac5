use std::fmt;

use serde::{Deserialize, Serialize};

/// A single `(x, y)` sample of a discretized function.
///
/// Points are plain values: functions hand out copies, so changing a point
/// never changes the function it came from. To change a stored value, call
/// the function's `set_y`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// The coordinate.
    pub x: f64,
    /// The value at `x`.
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Returns a copy of this point with a different value.
    pub const fn with_y(self, y: f64) -> Self {
        Point { x: self.x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

impl From<Point> for (f64, f64) {
    fn from(point: Point) -> Self {
        (point.x, point.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
