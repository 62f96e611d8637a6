//! Force and moment aggregation.
//!
//! Moments are taken about a vertical line through the reference point: only
//! the vertical component of a force and its horizontal offset contribute. The
//! beam is the sole load-bearing axis, so the `Fx * dy` term is left out even
//! when a force sits slightly above or below the beam.

use crate::geometry::{Point, Resultant};
use crate::results::SupportReaction;
use crate::scene::Force;

impl Force {
    /// Horizontal and vertical components of this force.
    #[must_use]
    pub fn components(&self) -> Resultant {
        Resultant::from_polar(self.magnitude, self.angle_degrees)
    }
}

/// Sum of the components of `forces`.
///
/// # Examples
/// ```
/// use beamx::{loads, point, Scene};
///
/// let mut scene = Scene::new();
/// scene.add_force(point(0.0, 0.0), 10.0, 0.0);
/// scene.add_force(point(5.0, 0.0), 10.0, 90.0);
/// let total = loads::resultant(scene.forces().map(|(_, force)| force));
/// assert!((total.fx - 10.0).abs() < 1.0e-4);
/// assert!((total.fy - 10.0).abs() < 1.0e-4);
/// ```
pub fn resultant<'a>(forces: impl IntoIterator<Item = &'a Force>) -> Resultant {
    let mut total = Resultant::default();
    for force in forces {
        total += force.components();
    }
    total
}

/// Moment of `forces` about `reference`, counter-clockwise positive.
pub fn moment_about<'a>(forces: impl IntoIterator<Item = &'a Force>, reference: Point) -> f32 {
    let mut moment = 0.0;
    for force in forces {
        moment += force.components().fy * (force.location.x - reference.x);
    }
    moment
}

/// Net force and moment left over after adding reactions to the external loads.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Residual {
    /// Unbalanced horizontal force.
    pub fx: f32,
    /// Unbalanced vertical force.
    pub fy: f32,
    /// Unbalanced moment about the chosen point.
    pub m: f32,
}

impl Residual {
    /// Whether every component is within `tolerance` of zero.
    #[must_use]
    pub fn is_balanced(&self, tolerance: f32) -> bool {
        self.fx.abs() <= tolerance && self.fy.abs() <= tolerance && self.m.abs() <= tolerance
    }
}

/// Equilibrium residual of external `forces` plus `reactions` about `about`.
///
/// Each reaction is paired with the location of its support. Reaction moments
/// use the same arm convention as [`moment_about`].
pub fn residual<'a>(
    forces: impl IntoIterator<Item = &'a Force>,
    reactions: impl IntoIterator<Item = (Point, &'a SupportReaction)>,
    about: Point,
) -> Residual {
    let mut out = Residual::default();
    for force in forces {
        let components = force.components();
        out.fx += components.fx;
        out.fy += components.fy;
        out.m += components.fy * (force.location.x - about.x);
    }
    for (location, reaction) in reactions {
        out.fx += reaction.rx;
        out.fy += reaction.ry;
        out.m += reaction.ry * (location.x - about.x) + reaction.mz;
    }
    out
}
