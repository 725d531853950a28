//! 2D vector and point arithmetic.
//!
//! Node coordinates are stored as [`Point`] values in the node
//! `coordinate` column.

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// A 2D vector with `f64` components.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector2d {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
}

/// Displacement between two points.
pub type Vector = Vector2d;

/// Position in the plane.
pub type Point = Vector2d;

impl Vector2d {
    /// The origin / zero vector.
    pub const ZERO: Vector2d = Vector2d { x: 0.0, y: 0.0 };

    /// Create a vector from its components.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Rotate 90 degrees clockwise.
    pub fn rotcw(self) -> Self {
        Self::new(self.y, -self.x)
    }

    /// Euclidean length.
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Dot product.
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Scalar (z-component of the 3D) cross product.
    pub fn cross(self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Unit vector in the same direction.
    ///
    /// The zero vector normalises to NaN components.
    pub fn normalize(self) -> Self {
        self / self.length()
    }
}

impl From<[f64; 2]> for Vector2d {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl Add for Vector2d {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2d {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2d {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

impl Div<f64> for Vector2d {
    type Output = Self;
    fn div(self, scalar: f64) -> Self {
        Self::new(self.x / scalar, self.y / scalar)
    }
}

impl Neg for Vector2d {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl AddAssign for Vector2d {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Vector2d {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

/// Tolerance on the segment parameters, so touching endpoints count.
const SEGMENT_EPS: f64 = 1e-15;

/// Intersection of segments `[p0, p1]` and `[q0, q1]`.
///
/// Returns the point `(1 - t) * p0 + t * p1` when both segment parameters
/// fall in `[0, 1]` (within a 1e-15 tolerance). Parallel segments yield a
/// non-finite parameter and report no intersection.
pub fn intersection_point_of_two_segments(
    p0: Point,
    p1: Point,
    q0: Point,
    q1: Point,
) -> Option<Point> {
    let v0 = p0 - p1;
    let v1 = q0 - q1;
    let v2 = q0 - p0;
    let denom = v0.cross(v1);
    let t = v1.cross(v2) / denom;
    if !(t > -SEGMENT_EPS && t < 1.0 + SEGMENT_EPS) {
        return None;
    }
    let s = v0.cross(v2) / denom;
    if !(s > -SEGMENT_EPS && s < 1.0 + SEGMENT_EPS) {
        return None;
    }
    Some(p0 * (1.0 - t) + p1 * t)
}
