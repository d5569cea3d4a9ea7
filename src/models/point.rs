use serde::{Deserialize, Serialize};

/// 2D point with sub-pixel precision
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Point with both coordinates floored (pixel containing this point)
    pub fn floor(&self) -> Self {
        Self::new(self.x.floor(), self.y.floor())
    }
}
