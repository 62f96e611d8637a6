#![warn(clippy::all)]
#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

pub mod errors;
pub mod geometry;
pub mod loads;
pub mod matrix;
pub mod report;
pub mod results;
pub mod scene;
pub mod solver;

pub use errors::{MatrixError, SceneEditError};
pub use geometry::{point, Point, Resultant};
pub use results::{Failure, SolveResult, SupportReaction};
pub use scene::{
    Attachments, Beam, BeamEnd, BeamId, Force, ForceId, NodeRef, Scene, Support, SupportId,
    SupportKind, Unknown,
};
pub use solver::solve;
