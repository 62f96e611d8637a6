//! Closed-form support reactions for a single sketched beam.
//!
//! The solver picks the first beam of the scene, gathers the supports attached
//! to it and the forces acting on it, and dispatches on the support
//! configuration. Each supported configuration has its own closed-form
//! equilibrium solution; everything else is reported as a [`Failure`].

use log::{debug, info, warn};

use crate::geometry::Point;
use crate::loads::{self, Residual};
use crate::results::{Failure, SolveResult, SupportReaction};
use crate::scene::{BeamId, Force, ForceId, Scene, Support, SupportId, SupportKind};

/// Smallest horizontal arm, and largest horizontal load on two rollers, treated as non-zero.
pub const DEGENERACY_TOLERANCE: f32 = 0.01;
/// Vertical half-width of the band in which free forces count as acting on the beam.
pub const NEAR_BEAM_TOLERANCE_Y: f32 = 20.0;
/// Horizontal overhang past the beam ends that still counts as acting on the beam.
pub const NEAR_BEAM_TOLERANCE_X: f32 = 5.0;

/// First beam in scene order.
#[must_use]
pub fn select_subject_beam(scene: &Scene) -> Option<BeamId> {
    scene.beams().next().map(|(id, _)| id)
}

/// Supports attached to either node of `beam`, ordered by ascending X.
///
/// Supports sharing an X coordinate keep their scene order.
#[must_use]
pub fn collect_supports(scene: &Scene, beam: BeamId) -> Vec<SupportId> {
    let mut supports: Vec<(SupportId, &Support)> = scene
        .supports()
        .filter(|(_, support)| support.node.is_some_and(|node| node.beam == beam))
        .collect();
    supports.sort_by(|(_, a), (_, b)| a.location.x.total_cmp(&b.location.x));
    supports.into_iter().map(|(id, _)| id).collect()
}

/// Forces attached to `beam` plus free forces lying close to it, in scene order.
#[must_use]
pub fn collect_forces(scene: &Scene, beam: BeamId) -> Vec<ForceId> {
    let Some(subject) = scene.beam(beam) else {
        return Vec::new();
    };
    scene
        .forces()
        .filter(|(_, force)| match force.node {
            Some(node) => node.beam == beam,
            None => is_near_beam(force.location, subject.start, subject.end),
        })
        .map(|(id, _)| id)
        .collect()
}

/// Whether `location` falls inside the proximity band of the beam `start`-`end`.
///
/// The band is measured from the start height, treating the beam as horizontal.
///
/// # Examples
/// ```
/// use beamx::{point, solver::is_near_beam};
///
/// let (start, end) = (point(0.0, 0.0), point(200.0, 0.0));
/// assert!(is_near_beam(point(100.0, 19.0), start, end));
/// assert!(is_near_beam(point(205.0, 0.0), start, end));
/// assert!(!is_near_beam(point(100.0, 20.0), start, end));
/// assert!(!is_near_beam(point(-6.0, 0.0), start, end));
/// ```
#[must_use]
pub fn is_near_beam(location: Point, start: Point, end: Point) -> bool {
    let beam_y = start.y;
    let min_x = start.x.min(end.x);
    let max_x = start.x.max(end.x);
    (location.y - beam_y).abs() < NEAR_BEAM_TOLERANCE_Y
        && location.x >= min_x - NEAR_BEAM_TOLERANCE_X
        && location.x <= max_x + NEAR_BEAM_TOLERANCE_X
}

/// Compute the support reactions for the first beam of `scene`.
///
/// Never fails: configurations outside the closed-form cases come back with
/// `solved == false` and a diagnostic message.
///
/// # Examples
/// ```
/// use beamx::{point, solve, BeamEnd, NodeRef, Scene, SupportKind};
///
/// let mut scene = Scene::new();
/// let beam = scene.add_beam(point(0.0, 0.0), point(200.0, 0.0));
/// let fixed = scene.add_support_at(NodeRef::new(beam, BeamEnd::Start), SupportKind::Fixed)?;
/// scene.add_force_at(NodeRef::new(beam, BeamEnd::End), 100.0, 270.0)?;
///
/// let result = solve(&scene);
/// assert!(result.solved);
/// let reaction = result.reaction(fixed).expect("fixed support reacts");
/// assert!((reaction.ry - 100.0).abs() < 1.0e-2);
/// assert!((reaction.mz - 20_000.0).abs() < 1.0);
/// # Ok::<(), beamx::SceneEditError>(())
/// ```
#[must_use]
pub fn solve(scene: &Scene) -> SolveResult {
    match solve_reactions(scene) {
        Ok(reactions) => {
            info!("solved support reactions for {} supports", reactions.len());
            SolveResult::solved(reactions)
        }
        Err(failure) => {
            warn!("beam cannot be solved: {failure}");
            SolveResult::failed(failure)
        }
    }
}

/// External forces acting on the subject beam.
struct Loading<'a> {
    /// Forces in scene order.
    forces: Vec<&'a Force>,
    /// Sum of their horizontal components.
    fx: f32,
    /// Sum of their vertical components.
    fy: f32,
}

impl<'a> Loading<'a> {
    /// Gather the forces and their resultant.
    fn new(forces: Vec<&'a Force>) -> Self {
        let total = loads::resultant(forces.iter().copied());
        Self {
            forces,
            fx: total.fx,
            fy: total.fy,
        }
    }

    /// Moment of the loads about `reference`.
    fn moment_about(&self, reference: Point) -> f32 {
        loads::moment_about(self.forces.iter().copied(), reference)
    }
}

/// Run the dispatch and return the reactions or the reason they are unavailable.
fn solve_reactions(scene: &Scene) -> Result<Vec<SupportReaction>, Failure> {
    let beam = select_subject_beam(scene).ok_or(Failure::NoBeam)?;
    let supports = resolve(scene, &collect_supports(scene, beam), Scene::support);
    if supports.is_empty() {
        return Err(Failure::NoSupports);
    }
    let forces = resolve(scene, &collect_forces(scene, beam), Scene::force);
    let loading = Loading::new(forces.into_iter().map(|(_, force)| force).collect());
    debug!(
        "{beam}: {} supports, {} forces, resultant ({}, {})",
        supports.len(),
        loading.forces.len(),
        loading.fx,
        loading.fy
    );

    match supports.as_slice() {
        [single] => solve_single(*single, &loading),
        [first, second] => solve_pair(*first, *second, &loading),
        _ => Err(Failure::TooManySupports {
            count: supports.len(),
        }),
    }
}

/// Pair ids with the scene elements they name, skipping unknown ids.
fn resolve<'a, I: Copy, T>(
    scene: &'a Scene,
    ids: &[I],
    lookup: fn(&'a Scene, I) -> Option<&'a T>,
) -> Vec<(I, &'a T)> {
    ids.iter()
        .filter_map(|&id| lookup(scene, id).map(|item| (id, item)))
        .collect()
}

/// One support: only a fixed support balances all three equations.
fn solve_single(
    (id, support): (SupportId, &Support),
    loading: &Loading<'_>,
) -> Result<Vec<SupportReaction>, Failure> {
    if support.kind != SupportKind::Fixed {
        return Err(Failure::UnstableSingleSupport { kind: support.kind });
    }
    debug!("{id}: fixed cantilever");
    let mut reaction = SupportReaction::new(id, support.kind);
    reaction.rx = -loading.fx;
    reaction.ry = -loading.fy;
    reaction.mz = -loading.moment_about(support.location);
    Ok(vec![reaction])
}

/// Two supports ordered by X.
fn solve_pair(
    first: (SupportId, &Support),
    second: (SupportId, &Support),
    loading: &Loading<'_>,
) -> Result<Vec<SupportReaction>, Failure> {
    use SupportKind::{Pinned, Roller};

    let (s1, s2) = (first.1, second.1);
    let mut r1 = SupportReaction::new(first.0, s1.kind);
    let mut r2 = SupportReaction::new(second.0, s2.kind);

    match (s1.kind, s2.kind) {
        (Pinned, Roller) | (Roller, Pinned) => {
            let (pinned, roller, pinned_reaction, roller_reaction) = if s1.kind == Pinned {
                (s1, s2, &mut r1, &mut r2)
            } else {
                (s2, s1, &mut r2, &mut r1)
            };
            let arm = roller.location.x - pinned.location.x;
            if arm.abs() < DEGENERACY_TOLERANCE {
                return Err(Failure::SameVertical {
                    first: s1.kind,
                    second: s2.kind,
                });
            }
            debug!("pinned + roller, arm {arm}");
            pinned_reaction.rx = -loading.fx;
            roller_reaction.rx = 0.0;
            roller_reaction.ry = -loading.moment_about(pinned.location) / arm;
            pinned_reaction.ry = -loading.fy - roller_reaction.ry;
        }
        (Roller, Roller) => {
            if loading.fx.abs() > DEGENERACY_TOLERANCE {
                return Err(Failure::UnstableUnderHorizontalLoad);
            }
            let arm = s2.location.x - s1.location.x;
            if arm.abs() < DEGENERACY_TOLERANCE {
                return Err(Failure::SameVertical {
                    first: s1.kind,
                    second: s2.kind,
                });
            }
            debug!("two rollers, arm {arm}");
            r2.ry = -loading.moment_about(s1.location) / arm;
            r1.ry = -loading.fy - r2.ry;
        }
        (first, second) => return Err(Failure::UnsupportedCombination { first, second }),
    }
    Ok(vec![r1, r2])
}

/// Equilibrium residual of `result` about `about`, using the forces the solver saw.
///
/// Failed results contribute no reactions, so the residual is then just the
/// unbalanced external load.
#[must_use]
pub fn residual(scene: &Scene, result: &SolveResult, about: Point) -> Residual {
    let forces = select_subject_beam(scene)
        .map(|beam| resolve(scene, &collect_forces(scene, beam), Scene::force))
        .unwrap_or_default();
    let reactions = result.reactions.iter().filter_map(|reaction| {
        scene
            .support(reaction.support)
            .map(|support| (support.location, reaction))
    });
    loads::residual(forces.into_iter().map(|(_, force)| force), reactions, about)
}
