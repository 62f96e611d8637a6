//! Structural scene model read by the solver.
//!
//! A [`Scene`] owns every beam, support and force. Supports and forces may be
//! attached to a beam endpoint through a [`NodeRef`]; the reference is a plain
//! id pair, so a node never owns what is attached to it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::SceneEditError;
use crate::geometry::Point;

macro_rules! element_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(usize);

        impl $name {
            /// Wrap a raw index.
            #[must_use]
            pub const fn new(index: usize) -> Self {
                Self(index)
            }

            /// Position of the element in scene order.
            #[must_use]
            pub const fn index(self) -> usize {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

element_id!(
    /// Identifier of a beam within a [`Scene`].
    BeamId,
    "beam"
);
element_id!(
    /// Identifier of a support within a [`Scene`].
    SupportId,
    "support"
);
element_id!(
    /// Identifier of a force within a [`Scene`].
    ForceId,
    "force"
);

/// Which end of a beam a node sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BeamEnd {
    /// The first endpoint of the beam.
    Start,
    /// The second endpoint of the beam.
    End,
}

/// Non-owning reference to one beam endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeRef {
    /// Beam owning the node.
    pub beam: BeamId,
    /// Endpoint of the beam.
    pub end: BeamEnd,
}

impl NodeRef {
    /// Create a reference to `end` of `beam`.
    #[must_use]
    pub const fn new(beam: BeamId, end: BeamEnd) -> Self {
        Self { beam, end }
    }
}

/// Straight beam segment between two endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Beam {
    /// Start endpoint.
    pub start: Point,
    /// End endpoint.
    pub end: Point,
}

impl Beam {
    /// Location of the node at `end`.
    #[must_use]
    pub fn node_location(&self, end: BeamEnd) -> Point {
        match end {
            BeamEnd::Start => self.start,
            BeamEnd::End => self.end,
        }
    }
}

/// Kind of support restraint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportKind {
    /// Restrains horizontal and vertical translation.
    Pinned,
    /// Restrains vertical translation only.
    Roller,
    /// Restrains translation and rotation.
    Fixed,
}

/// One reaction component a support can develop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Unknown {
    /// Horizontal force.
    Rx,
    /// Vertical force.
    Ry,
    /// Reactive moment.
    Mz,
}

impl SupportKind {
    /// Reaction components contributed by this kind of support.
    ///
    /// # Examples
    /// ```
    /// use beamx::{SupportKind, Unknown};
    ///
    /// assert_eq!(SupportKind::Roller.unknowns(), &[Unknown::Ry]);
    /// assert_eq!(SupportKind::Fixed.unknowns().len(), 3);
    /// ```
    #[must_use]
    pub const fn unknowns(self) -> &'static [Unknown] {
        match self {
            Self::Pinned => &[Unknown::Rx, Unknown::Ry],
            Self::Roller => &[Unknown::Ry],
            Self::Fixed => &[Unknown::Rx, Unknown::Ry, Unknown::Mz],
        }
    }
}

impl fmt::Display for SupportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pinned => "pinned",
            Self::Roller => "roller",
            Self::Fixed => "fixed",
        })
    }
}

/// Point support.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Support {
    /// Location of the support.
    pub location: Point,
    /// Restraint kind.
    pub kind: SupportKind,
    /// Beam node the support is attached to, if any.
    #[serde(default)]
    pub node: Option<NodeRef>,
}

/// External point force.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Force {
    /// Point of application.
    pub location: Point,
    /// Magnitude in newtons.
    pub magnitude: f32,
    /// Direction in degrees, counter-clockwise from the positive X axis.
    pub angle_degrees: f32,
    /// Beam node the force is attached to, if any.
    #[serde(default)]
    pub node: Option<NodeRef>,
}

/// Elements attached to one beam node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attachments {
    /// Supports attached to the node, in scene order.
    pub supports: Vec<SupportId>,
    /// Forces attached to the node, in scene order.
    pub forces: Vec<ForceId>,
}

/// Snapshot of a sketched structural scheme.
///
/// Iteration order of every element kind is insertion order, which is the
/// order the solver relies on when picking the subject beam and breaking ties.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Beams in insertion order.
    #[serde(default)]
    beams: Vec<Beam>,
    /// Supports in insertion order.
    #[serde(default)]
    supports: Vec<Support>,
    /// Forces in insertion order.
    #[serde(default)]
    forces: Vec<Force>,
}

impl Scene {
    /// Create an empty scene.
    ///
    /// # Examples
    /// ```
    /// use beamx::Scene;
    ///
    /// let scene = Scene::new();
    /// assert_eq!(scene.beams().count(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterate over beams in scene order.
    pub fn beams(&self) -> impl Iterator<Item = (BeamId, &Beam)> + '_ {
        self.beams
            .iter()
            .enumerate()
            .map(|(idx, beam)| (BeamId(idx), beam))
    }

    /// Iterate over supports in scene order.
    pub fn supports(&self) -> impl Iterator<Item = (SupportId, &Support)> + '_ {
        self.supports
            .iter()
            .enumerate()
            .map(|(idx, support)| (SupportId(idx), support))
    }

    /// Iterate over forces in scene order.
    pub fn forces(&self) -> impl Iterator<Item = (ForceId, &Force)> + '_ {
        self.forces
            .iter()
            .enumerate()
            .map(|(idx, force)| (ForceId(idx), force))
    }

    /// Look up a beam.
    #[must_use]
    pub fn beam(&self, beam: BeamId) -> Option<&Beam> {
        self.beams.get(beam.0)
    }

    /// Look up a support.
    #[must_use]
    pub fn support(&self, support: SupportId) -> Option<&Support> {
        self.supports.get(support.0)
    }

    /// Look up a force.
    #[must_use]
    pub fn force(&self, force: ForceId) -> Option<&Force> {
        self.forces.get(force.0)
    }

    /// Location of a beam node.
    ///
    /// # Errors
    ///
    /// Returns [`SceneEditError::UnknownBeam`] when the node's beam is not part of this scene.
    pub fn node_location(&self, node: NodeRef) -> Result<Point, SceneEditError> {
        self.beam(node.beam)
            .map(|beam| beam.node_location(node.end))
            .ok_or(SceneEditError::UnknownBeam(node.beam))
    }

    /// Add a beam between two points.
    ///
    /// # Examples
    /// ```
    /// use beamx::{point, Scene};
    ///
    /// let mut scene = Scene::new();
    /// let beam = scene.add_beam(point(0.0, 0.0), point(200.0, 0.0));
    /// assert_eq!(beam.index(), 0);
    /// ```
    pub fn add_beam(&mut self, start: Point, end: Point) -> BeamId {
        self.beams.push(Beam { start, end });
        BeamId(self.beams.len() - 1)
    }

    /// Add a free-standing support.
    pub fn add_support(&mut self, location: Point, kind: SupportKind) -> SupportId {
        self.supports.push(Support {
            location,
            kind,
            node: None,
        });
        SupportId(self.supports.len() - 1)
    }

    /// Add a support attached to a beam node.
    ///
    /// # Errors
    ///
    /// Returns [`SceneEditError::UnknownBeam`] when the node's beam is not part of this scene.
    pub fn add_support_at(
        &mut self,
        node: NodeRef,
        kind: SupportKind,
    ) -> Result<SupportId, SceneEditError> {
        let location = self.node_location(node)?;
        self.supports.push(Support {
            location,
            kind,
            node: Some(node),
        });
        Ok(SupportId(self.supports.len() - 1))
    }

    /// Add a free-standing force.
    pub fn add_force(&mut self, location: Point, magnitude: f32, angle_degrees: f32) -> ForceId {
        self.forces.push(Force {
            location,
            magnitude,
            angle_degrees,
            node: None,
        });
        ForceId(self.forces.len() - 1)
    }

    /// Add a force attached to a beam node.
    ///
    /// # Errors
    ///
    /// Returns [`SceneEditError::UnknownBeam`] when the node's beam is not part of this scene.
    pub fn add_force_at(
        &mut self,
        node: NodeRef,
        magnitude: f32,
        angle_degrees: f32,
    ) -> Result<ForceId, SceneEditError> {
        let location = self.node_location(node)?;
        self.forces.push(Force {
            location,
            magnitude,
            angle_degrees,
            node: Some(node),
        });
        Ok(ForceId(self.forces.len() - 1))
    }

    /// Attach an existing support to a node and snap it onto the node.
    ///
    /// # Errors
    ///
    /// Returns [`SceneEditError::UnknownSupport`] or [`SceneEditError::UnknownBeam`]
    /// when either id is not part of this scene.
    pub fn attach_support(
        &mut self,
        support: SupportId,
        node: NodeRef,
    ) -> Result<(), SceneEditError> {
        let location = self.node_location(node)?;
        let entry = self
            .supports
            .get_mut(support.0)
            .ok_or(SceneEditError::UnknownSupport(support))?;
        entry.location = location;
        entry.node = Some(node);
        Ok(())
    }

    /// Attach an existing force to a node and snap it onto the node.
    ///
    /// # Errors
    ///
    /// Returns [`SceneEditError::UnknownForce`] or [`SceneEditError::UnknownBeam`]
    /// when either id is not part of this scene.
    pub fn attach_force(&mut self, force: ForceId, node: NodeRef) -> Result<(), SceneEditError> {
        let location = self.node_location(node)?;
        let entry = self
            .forces
            .get_mut(force.0)
            .ok_or(SceneEditError::UnknownForce(force))?;
        entry.location = location;
        entry.node = Some(node);
        Ok(())
    }

    /// Translate a beam together with everything attached to its nodes.
    ///
    /// # Errors
    ///
    /// Returns [`SceneEditError::UnknownBeam`] when `beam` is not part of this scene.
    pub fn move_beam(&mut self, beam: BeamId, delta: Point) -> Result<(), SceneEditError> {
        let entry = self
            .beams
            .get_mut(beam.0)
            .ok_or(SceneEditError::UnknownBeam(beam))?;
        entry.start = entry.start.offset(delta);
        entry.end = entry.end.offset(delta);
        for support in self.supports.iter_mut().filter(|s| on_beam(s.node, beam)) {
            support.location = support.location.offset(delta);
        }
        for force in self.forces.iter_mut().filter(|f| on_beam(f.node, beam)) {
            force.location = force.location.offset(delta);
        }
        Ok(())
    }

    /// Reposition both endpoints of a beam; attached elements follow their node.
    ///
    /// # Errors
    ///
    /// Returns [`SceneEditError::UnknownBeam`] when `beam` is not part of this scene.
    pub fn set_beam_points(
        &mut self,
        beam: BeamId,
        start: Point,
        end: Point,
    ) -> Result<(), SceneEditError> {
        let entry = self
            .beams
            .get_mut(beam.0)
            .ok_or(SceneEditError::UnknownBeam(beam))?;
        entry.start = start;
        entry.end = end;
        let updated = *entry;
        for support in &mut self.supports {
            if let Some(node) = support.node.filter(|node| node.beam == beam) {
                support.location = updated.node_location(node.end);
            }
        }
        for force in &mut self.forces {
            if let Some(node) = force.node.filter(|node| node.beam == beam) {
                force.location = updated.node_location(node.end);
            }
        }
        Ok(())
    }

    /// Supports and forces attached to `node`.
    #[must_use]
    pub fn attachments(&self, node: NodeRef) -> Attachments {
        Attachments {
            supports: self
                .supports()
                .filter(|(_, support)| support.node == Some(node))
                .map(|(id, _)| id)
                .collect(),
            forces: self
                .forces()
                .filter(|(_, force)| force.node == Some(node))
                .map(|(id, _)| id)
                .collect(),
        }
    }

    /// Check that every node reference names a beam of this scene.
    ///
    /// The solver does not require a valid scene, but hosts that build scenes
    /// from untrusted input should call this first.
    ///
    /// # Errors
    ///
    /// Returns [`SceneEditError::UnknownBeam`] for the first dangling reference.
    pub fn validate(&self) -> Result<(), SceneEditError> {
        let nodes = self
            .supports
            .iter()
            .filter_map(|support| support.node)
            .chain(self.forces.iter().filter_map(|force| force.node));
        for node in nodes {
            if self.beam(node.beam).is_none() {
                return Err(SceneEditError::UnknownBeam(node.beam));
            }
        }
        Ok(())
    }
}

/// Whether an optional node reference points at `beam`.
fn on_beam(node: Option<NodeRef>, beam: BeamId) -> bool {
    node.is_some_and(|node| node.beam == beam)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::point;

    fn simple_scene() -> (Scene, BeamId) {
        let mut scene = Scene::new();
        let beam = scene.add_beam(point(0.0, 0.0), point(200.0, 0.0));
        (scene, beam)
    }

    #[test]
    fn attached_elements_take_the_node_location() {
        let (mut scene, beam) = simple_scene();
        let support = scene
            .add_support_at(NodeRef::new(beam, BeamEnd::End), SupportKind::Roller)
            .expect("support attached");
        let force = scene
            .add_force_at(NodeRef::new(beam, BeamEnd::Start), 10.0, 270.0)
            .expect("force attached");

        assert_eq!(scene.support(support).map(|s| s.location), Some(point(200.0, 0.0)));
        assert_eq!(scene.force(force).map(|f| f.location), Some(point(0.0, 0.0)));
    }

    #[test]
    fn mutators_return_error_for_unknown_ids() {
        let (mut scene, _) = simple_scene();
        let missing_beam = BeamId::new(3);
        let dangling = NodeRef::new(missing_beam, BeamEnd::Start);

        assert_eq!(
            scene.add_force_at(dangling, 1.0, 0.0),
            Err(SceneEditError::UnknownBeam(missing_beam))
        );
        assert_eq!(
            scene.move_beam(missing_beam, point(1.0, 1.0)),
            Err(SceneEditError::UnknownBeam(missing_beam))
        );
        assert_eq!(
            scene.attach_support(SupportId::new(0), NodeRef::new(BeamId::new(0), BeamEnd::End)),
            Err(SceneEditError::UnknownSupport(SupportId::new(0)))
        );
        assert_eq!(
            scene.attach_force(ForceId::new(4), NodeRef::new(BeamId::new(0), BeamEnd::End)),
            Err(SceneEditError::UnknownForce(ForceId::new(4)))
        );
    }

    #[test]
    fn moving_a_beam_carries_attached_elements_only() {
        let (mut scene, beam) = simple_scene();
        let attached = scene
            .add_support_at(NodeRef::new(beam, BeamEnd::Start), SupportKind::Fixed)
            .expect("support attached");
        let loose = scene.add_force(point(100.0, 3.0), 50.0, 270.0);

        scene
            .move_beam(beam, point(10.0, -5.0))
            .expect("beam moves");

        let moved = scene.beam(beam).copied().expect("beam exists");
        assert_eq!(moved.start, point(10.0, -5.0));
        assert_eq!(moved.end, point(210.0, -5.0));
        assert_eq!(scene.support(attached).map(|s| s.location), Some(point(10.0, -5.0)));
        assert_eq!(scene.force(loose).map(|f| f.location), Some(point(100.0, 3.0)));
    }

    #[test]
    fn resetting_beam_points_snaps_attachments_to_nodes() {
        let (mut scene, beam) = simple_scene();
        let force = scene.add_force(point(150.0, 8.0), 20.0, 90.0);
        scene
            .attach_force(force, NodeRef::new(beam, BeamEnd::End))
            .expect("force attached");

        scene
            .set_beam_points(beam, point(0.0, 0.0), point(300.0, 0.0))
            .expect("beam updated");

        assert_eq!(scene.force(force).map(|f| f.location), Some(point(300.0, 0.0)));
        assert_eq!(scene.beam(beam).map(|b| b.end), Some(point(300.0, 0.0)));
    }

    #[test]
    fn attachments_are_looked_up_per_node() {
        let (mut scene, beam) = simple_scene();
        let start = NodeRef::new(beam, BeamEnd::Start);
        let end = NodeRef::new(beam, BeamEnd::End);
        let pinned = scene
            .add_support_at(start, SupportKind::Pinned)
            .expect("support attached");
        let roller = scene
            .add_support_at(end, SupportKind::Roller)
            .expect("support attached");
        let load = scene.add_force_at(end, 5.0, 270.0).expect("force attached");

        assert_eq!(scene.attachments(start).supports, vec![pinned]);
        assert!(scene.attachments(start).forces.is_empty());
        assert_eq!(scene.attachments(end).supports, vec![roller]);
        assert_eq!(scene.attachments(end).forces, vec![load]);
    }

    #[test]
    fn validate_reports_dangling_references() {
        let json = r#"{
            "beams": [],
            "supports": [
                { "location": { "x": 0.0, "y": 0.0 }, "kind": "fixed",
                  "node": { "beam": 2, "end": "start" } }
            ]
        }"#;
        let scene: Scene = serde_json::from_str(json).expect("scene parses");
        assert_eq!(scene.validate(), Err(SceneEditError::UnknownBeam(BeamId::new(2))));
        assert_eq!(simple_scene().0.validate(), Ok(()));
    }
}
