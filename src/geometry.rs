//! Fundamental geometric types for beam sketches.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Position in the sketch plane, in drawing units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Distance along the global X axis.
    pub x: f32,
    /// Distance along the global Y axis.
    pub y: f32,
}

impl Point {
    /// Create a [`Point`] with explicit coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Return this point shifted by `delta`.
    #[must_use]
    pub fn offset(self, delta: Point) -> Self {
        (self.to_vector() + Vector2::from(delta)).into()
    }

    /// Convert the point into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector2<f32> {
        Vector2::new(self.x, self.y)
    }
}

impl From<Vector2<f32>> for Point {
    fn from(value: Vector2<f32>) -> Self {
        Self::new(value.x, value.y)
    }
}

impl From<Point> for Vector2<f32> {
    fn from(value: Point) -> Self {
        value.to_vector()
    }
}

/// Aggregate horizontal and vertical force components.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Resultant {
    /// Component acting along the global X axis.
    pub fx: f32,
    /// Component acting along the global Y axis.
    pub fy: f32,
}

impl Resultant {
    /// Create a [`Resultant`] with explicit components.
    #[must_use]
    pub const fn new(fx: f32, fy: f32) -> Self {
        Self { fx, fy }
    }

    /// Split a force given by magnitude and direction into components.
    ///
    /// The angle is measured counter-clockwise from the positive X axis. The
    /// trigonometric functions run in double precision and the components are
    /// narrowed back, which keeps results identical to the sketching tool that
    /// produced the input.
    ///
    /// # Examples
    /// ```
    /// use beamx::Resultant;
    ///
    /// let down = Resultant::from_polar(100.0, 270.0);
    /// assert!(down.fx.abs() < 1.0e-3);
    /// assert!((down.fy + 100.0).abs() < 1.0e-3);
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_polar(magnitude: f32, angle_degrees: f32) -> Self {
        let radians = f64::from(angle_degrees * std::f32::consts::PI / 180.0);
        Self::new(
            magnitude * radians.cos() as f32,
            magnitude * radians.sin() as f32,
        )
    }
}

impl std::ops::Add for Resultant {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.fx + rhs.fx, self.fy + rhs.fy)
    }
}

impl std::ops::AddAssign for Resultant {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// Convenience helper for creating [`Point`] instances.
///
/// # Examples
/// ```
/// use beamx::point;
///
/// let origin = point(0.0, 0.0);
/// assert_eq!(origin.x, 0.0);
/// ```
#[must_use]
pub const fn point(x: f32, y: f32) -> Point {
    Point::new(x, y)
}
