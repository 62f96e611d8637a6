//! Error types produced while editing scenes or running the matrix solver.

use thiserror::Error;

use crate::scene::{BeamId, ForceId, SupportId};

/// Error returned when editing or validating a [`Scene`](crate::Scene) with
/// invalid ids.
///
/// # Examples
///
/// ```
/// use beamx::{BeamEnd, BeamId, NodeRef, Scene, SceneEditError, SupportKind};
///
/// let mut scene = Scene::new();
/// let missing = NodeRef::new(BeamId::new(7), BeamEnd::Start);
/// let error = scene
///     .add_support_at(missing, SupportKind::Pinned)
///     .expect_err("unknown beam is rejected");
/// assert_eq!(error, SceneEditError::UnknownBeam(BeamId::new(7)));
/// ```
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum SceneEditError {
    /// Returned when a beam cannot be found in the scene.
    #[error("beam {0} does not exist in this scene")]
    UnknownBeam(BeamId),
    /// Returned when a support cannot be found in the scene.
    #[error("support {0} does not exist in this scene")]
    UnknownSupport(SupportId),
    /// Returned when a force cannot be found in the scene.
    #[error("force {0} does not exist in this scene")]
    UnknownForce(ForceId),
}

/// Error returned by the general equilibrium-matrix solver.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum MatrixError {
    /// Returned when the scene contains no beam.
    #[error("no beam found in the scene")]
    NoBeam,
    /// Returned when no support is attached to the subject beam.
    #[error("no supports attached to the beam")]
    NoSupports,
    /// Returned when the supports provide fewer unknowns than equations.
    #[error("{unknowns} reaction unknowns cannot balance 3 equilibrium equations")]
    Unstable {
        /// Number of reaction unknowns contributed by the supports.
        unknowns: usize,
    },
    /// Returned when the supports provide more unknowns than equations.
    #[error("{unknowns} reaction unknowns exceed 3 equilibrium equations")]
    Indeterminate {
        /// Number of reaction unknowns contributed by the supports.
        unknowns: usize,
    },
    /// Returned when the equilibrium matrix cannot be inverted.
    #[error("equilibrium matrix is singular; check support placement")]
    Singular,
}
