//! General equilibrium-matrix solver.
//!
//! Assembles the three planar equilibrium equations over the reaction
//! unknowns of every support and solves the square system with an LU
//! decomposition. This path is independent of [`solve`](crate::solve): it
//! accepts any support mix that yields exactly three independent unknowns, so
//! its set of solvable scenes differs from the closed-form dispatch (two rollers
//! under vertical load are solvable there but not here).

use log::debug;
use nalgebra::{DMatrix, DVector};

use crate::errors::MatrixError;
use crate::loads;
use crate::results::SupportReaction;
use crate::scene::{Scene, Unknown};
use crate::solver::{collect_forces, collect_supports, select_subject_beam, DEGENERACY_TOLERANCE};

/// Number of planar equilibrium equations.
const EQUATIONS: usize = 3;

/// Solve the support reactions of the first beam with the equilibrium matrix.
///
/// Rows are ΣFx, ΣFy and ΣM about the first support; moments use the same
/// horizontal-arm convention as the closed-form solver.
///
/// # Errors
///
/// Returns [`MatrixError`] when the scene has no beam or supports, when the
/// supports do not contribute exactly three unknowns, or when the system is
/// singular.
///
/// # Examples
/// ```
/// use beamx::{matrix, point, BeamEnd, NodeRef, Scene, SupportKind};
///
/// let mut scene = Scene::new();
/// let beam = scene.add_beam(point(0.0, 0.0), point(10.0, 0.0));
/// scene.add_support_at(NodeRef::new(beam, BeamEnd::Start), SupportKind::Pinned)?;
/// scene.add_support_at(NodeRef::new(beam, BeamEnd::End), SupportKind::Roller)?;
/// scene.add_force(point(5.0, 0.0), 10.0, 270.0);
///
/// let reactions = matrix::solve_general(&scene).expect("determinate system");
/// assert!((reactions[0].ry - 5.0).abs() < 1.0e-3);
/// assert!((reactions[1].ry - 5.0).abs() < 1.0e-3);
/// # Ok::<(), beamx::SceneEditError>(())
/// ```
pub fn solve_general(scene: &Scene) -> Result<Vec<SupportReaction>, MatrixError> {
    let beam = select_subject_beam(scene).ok_or(MatrixError::NoBeam)?;
    let supports: Vec<_> = collect_supports(scene, beam)
        .into_iter()
        .filter_map(|id| scene.support(id).map(|support| (id, support)))
        .collect();
    let reference = supports.first().ok_or(MatrixError::NoSupports)?.1.location;
    let forces: Vec<_> = collect_forces(scene, beam)
        .into_iter()
        .filter_map(|id| scene.force(id))
        .collect();

    let columns: Vec<(usize, Unknown)> = supports
        .iter()
        .enumerate()
        .flat_map(|(idx, (_, support))| {
            support
                .kind
                .unknowns()
                .iter()
                .map(move |&unknown| (idx, unknown))
        })
        .collect();
    let unknowns = columns.len();
    if unknowns < EQUATIONS {
        return Err(MatrixError::Unstable { unknowns });
    }
    if unknowns > EQUATIONS {
        return Err(MatrixError::Indeterminate { unknowns });
    }

    let mut system = DMatrix::<f32>::zeros(EQUATIONS, unknowns);
    for (col, &(idx, unknown)) in columns.iter().enumerate() {
        let arm = supports[idx].1.location.x - reference.x;
        match unknown {
            Unknown::Rx => system[(0, col)] = 1.0,
            Unknown::Ry => {
                system[(1, col)] = 1.0;
                system[(2, col)] = arm;
            }
            Unknown::Mz => system[(2, col)] = 1.0,
        }
    }
    let total = loads::resultant(forces.iter().copied());
    let load = DVector::from_vec(vec![
        -total.fx,
        -total.fy,
        -loads::moment_about(forces.iter().copied(), reference),
    ]);
    debug!("equilibrium system {system} with load {load}");

    let lu = system.lu();
    if lu.determinant().abs() < DEGENERACY_TOLERANCE {
        return Err(MatrixError::Singular);
    }
    let solution = lu.solve(&load).ok_or(MatrixError::Singular)?;

    let mut reactions: Vec<SupportReaction> = supports
        .iter()
        .map(|&(id, support)| SupportReaction::new(id, support.kind))
        .collect();
    for (col, &(idx, unknown)) in columns.iter().enumerate() {
        let reaction = &mut reactions[idx];
        match unknown {
            Unknown::Rx => reaction.rx = solution[col],
            Unknown::Ry => reaction.ry = solution[col],
            Unknown::Mz => reaction.mz = solution[col],
        }
    }
    Ok(reactions)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::point;
    use crate::scene::{BeamEnd, NodeRef, SupportKind};

    /// Scene whose supports all sit on the start node of one beam.
    fn stacked_supports(kinds: &[SupportKind]) -> Scene {
        let mut scene = Scene::new();
        let beam = scene.add_beam(point(0.0, 0.0), point(200.0, 0.0));
        for &kind in kinds {
            scene
                .add_support_at(NodeRef::new(beam, BeamEnd::Start), kind)
                .expect("support attached");
        }
        scene
    }

    #[test]
    fn fixed_support_matches_closed_form() {
        let mut scene = Scene::new();
        let beam = scene.add_beam(point(0.0, 0.0), point(200.0, 0.0));
        scene
            .add_support_at(NodeRef::new(beam, BeamEnd::Start), SupportKind::Fixed)
            .expect("support attached");
        scene.add_force(point(200.0, 0.0), 100.0, 270.0);
        scene.add_force(point(120.0, 0.0), 25.0, 180.0);

        let reactions = solve_general(&scene).expect("system solves");
        assert_eq!(reactions.len(), 1);
        assert_relative_eq!(reactions[0].rx, 25.0, epsilon = 1.0e-3);
        assert_relative_eq!(reactions[0].ry, 100.0, epsilon = 1.0e-3);
        assert_relative_eq!(reactions[0].mz, 20_000.0, epsilon = 1.0e-1);
    }

    #[test]
    fn unknown_count_is_checked() {
        let rollers = stacked_supports(&[SupportKind::Roller, SupportKind::Roller]);
        assert_eq!(
            solve_general(&rollers),
            Err(MatrixError::Unstable { unknowns: 2 })
        );

        let crowded = stacked_supports(&[SupportKind::Pinned, SupportKind::Pinned]);
        assert_eq!(
            solve_general(&crowded),
            Err(MatrixError::Indeterminate { unknowns: 4 })
        );
    }

    #[test]
    fn coincident_supports_are_singular() {
        let scene = stacked_supports(&[SupportKind::Pinned, SupportKind::Roller]);
        assert_eq!(solve_general(&scene), Err(MatrixError::Singular));
    }

    #[test]
    fn empty_scenes_are_rejected() {
        assert_eq!(solve_general(&Scene::new()), Err(MatrixError::NoBeam));
        let mut scene = Scene::new();
        scene.add_beam(point(0.0, 0.0), point(1.0, 0.0));
        assert_eq!(solve_general(&scene), Err(MatrixError::NoSupports));
    }
}
