/// Geometry utilities for perspective transformations
use crate::models::Point;

/// Round half toward positive infinity (`Math.round` semantics)
#[inline]
pub fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// Homogeneous 3x3 transform in row-vector form:
/// `[x' y' w'] = [x y 1] * A`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveTransform {
    a11: f64,
    a12: f64,
    a13: f64,
    a21: f64,
    a22: f64,
    a23: f64,
    a31: f64,
    a32: f64,
    a33: f64,
}

impl PerspectiveTransform {
    /// Map the unit square (0,0), (1,0), (1,1), (0,1) onto `p1..p4`
    pub fn square_to_quadrilateral(p1: Point, p2: Point, p3: Point, p4: Point) -> Self {
        let dx3 = p1.x - p2.x + p3.x - p4.x;
        let dy3 = p1.y - p2.y + p3.y - p4.y;
        if dx3 == 0.0 && dy3 == 0.0 {
            // Affine
            return Self {
                a11: p2.x - p1.x,
                a12: p2.y - p1.y,
                a13: 0.0,
                a21: p3.x - p2.x,
                a22: p3.y - p2.y,
                a23: 0.0,
                a31: p1.x,
                a32: p1.y,
                a33: 1.0,
            };
        }

        let dx1 = p2.x - p3.x;
        let dx2 = p4.x - p3.x;
        let dy1 = p2.y - p3.y;
        let dy2 = p4.y - p3.y;
        let denominator = dx1 * dy2 - dx2 * dy1;
        let a13 = (dx3 * dy2 - dx2 * dy3) / denominator;
        let a23 = (dx1 * dy3 - dx3 * dy1) / denominator;
        Self {
            a11: p2.x - p1.x + a13 * p2.x,
            a12: p2.y - p1.y + a13 * p2.y,
            a13,
            a21: p4.x - p1.x + a23 * p4.x,
            a22: p4.y - p1.y + a23 * p4.y,
            a23,
            a31: p1.x,
            a32: p1.y,
            a33: 1.0,
        }
    }

    /// Map `p1..p4` onto the unit square.
    ///
    /// Uses the adjoint of the forward transform, which equals the inverse
    /// up to a scale factor that the projective divide cancels.
    pub fn quadrilateral_to_square(p1: Point, p2: Point, p3: Point, p4: Point) -> Self {
        Self::square_to_quadrilateral(p1, p2, p3, p4).adjoint()
    }

    fn adjoint(&self) -> Self {
        Self {
            a11: self.a22 * self.a33 - self.a23 * self.a32,
            a12: self.a13 * self.a32 - self.a12 * self.a33,
            a13: self.a12 * self.a23 - self.a13 * self.a22,
            a21: self.a23 * self.a31 - self.a21 * self.a33,
            a22: self.a11 * self.a33 - self.a13 * self.a31,
            a23: self.a13 * self.a21 - self.a11 * self.a23,
            a31: self.a21 * self.a32 - self.a22 * self.a31,
            a32: self.a12 * self.a31 - self.a11 * self.a32,
            a33: self.a11 * self.a22 - self.a12 * self.a21,
        }
    }

    /// Composition: apply `other` first, then `self`
    pub fn times(&self, other: &Self) -> Self {
        let a = self;
        let b = other;
        Self {
            a11: a.a11 * b.a11 + a.a21 * b.a12 + a.a31 * b.a13,
            a12: a.a12 * b.a11 + a.a22 * b.a12 + a.a32 * b.a13,
            a13: a.a13 * b.a11 + a.a23 * b.a12 + a.a33 * b.a13,
            a21: a.a11 * b.a21 + a.a21 * b.a22 + a.a31 * b.a23,
            a22: a.a12 * b.a21 + a.a22 * b.a22 + a.a32 * b.a23,
            a23: a.a13 * b.a21 + a.a23 * b.a22 + a.a33 * b.a23,
            a31: a.a11 * b.a31 + a.a21 * b.a32 + a.a31 * b.a33,
            a32: a.a12 * b.a31 + a.a22 * b.a32 + a.a32 * b.a33,
            a33: a.a13 * b.a31 + a.a23 * b.a32 + a.a33 * b.a33,
        }
    }

    /// Transform a point. A point on the line at infinity maps to non-finite
    /// coordinates.
    pub fn transform(&self, x: f64, y: f64) -> Point {
        let denominator = self.a13 * x + self.a23 * y + self.a33;
        Point::new(
            (self.a11 * x + self.a21 * y + self.a31) / denominator,
            (self.a12 * x + self.a22 * y + self.a32) / denominator,
        )
    }
}
