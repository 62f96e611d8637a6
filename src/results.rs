//! Outcome of one reaction analysis.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::MatrixError;
use crate::scene::{SupportId, SupportKind};

/// Reactions developed by one support.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SupportReaction {
    /// Support the reaction belongs to.
    pub support: SupportId,
    /// Kind of the support, copied for reporting.
    pub kind: SupportKind,
    /// Horizontal reaction force.
    pub rx: f32,
    /// Vertical reaction force.
    pub ry: f32,
    /// Reactive moment; only fixed supports develop one.
    pub mz: f32,
}

impl SupportReaction {
    /// Create a reaction with every component at zero.
    #[must_use]
    pub const fn new(support: SupportId, kind: SupportKind) -> Self {
        Self {
            support,
            kind,
            rx: 0.0,
            ry: 0.0,
            mz: 0.0,
        }
    }
}

/// Reason a configuration could not be solved.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Failure {
    /// The scene contains no beam.
    #[error("no beam found in the scene")]
    NoBeam,
    /// No support is attached to the subject beam.
    #[error("no supports attached to the beam")]
    NoSupports,
    /// A lone support that is not fixed cannot resist rotation.
    #[error("a single {kind} support is statically unstable")]
    UnstableSingleSupport {
        /// Kind of the lone support.
        kind: SupportKind,
    },
    /// Two supports share the same X coordinate, so the moment arm vanishes.
    #[error("{first} and {second} supports lie on the same vertical; the scheme is degenerate")]
    SameVertical {
        /// Kind of the first support.
        first: SupportKind,
        /// Kind of the second support.
        second: SupportKind,
    },
    /// Two rollers cannot resist a horizontal load.
    #[error("two roller supports are unstable under horizontal load")]
    UnstableUnderHorizontalLoad,
    /// The two supports form a pair this solver has no closed form for.
    #[error("the {first} + {second} support combination is not supported")]
    UnsupportedCombination {
        /// Kind of the first support.
        first: SupportKind,
        /// Kind of the second support.
        second: SupportKind,
    },
    /// More than two supports.
    #[error("{count} supports require advanced analysis (possibly statically indeterminate)")]
    TooManySupports {
        /// Number of supports on the beam.
        count: usize,
    },
}

impl Failure {
    /// Whether the failed problem keeps the statically determinate flag.
    ///
    /// Missing beams and missing supports leave the flag at its default `true`;
    /// every other rejection is about the shape of the problem and clears it.
    #[must_use]
    pub const fn keeps_determinate_flag(self) -> bool {
        matches!(self, Self::NoBeam | Self::NoSupports)
    }
}

/// Result of [`solve`](crate::solve).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolveResult {
    /// Whether reactions were computed.
    pub solved: bool,
    /// Whether the problem shape admits a closed-form solution.
    pub statically_determinate: bool,
    /// Human-readable diagnostic; empty on success.
    pub message: String,
    /// Category of the failure, if any.
    pub failure: Option<Failure>,
    /// Reactions in the order the supports were identified.
    pub reactions: Vec<SupportReaction>,
}

impl Default for SolveResult {
    fn default() -> Self {
        Self {
            solved: false,
            statically_determinate: true,
            message: String::new(),
            failure: None,
            reactions: Vec::new(),
        }
    }
}

impl SolveResult {
    /// Successful result carrying `reactions`.
    #[must_use]
    pub fn solved(reactions: Vec<SupportReaction>) -> Self {
        Self {
            solved: true,
            reactions,
            ..Self::default()
        }
    }

    /// Failed result for `failure`; never carries reactions.
    #[must_use]
    pub fn failed(failure: Failure) -> Self {
        Self {
            statically_determinate: failure.keeps_determinate_flag(),
            message: failure.to_string(),
            failure: Some(failure),
            ..Self::default()
        }
    }

    /// Reaction computed for `support`, if any.
    #[must_use]
    pub fn reaction(&self, support: SupportId) -> Option<&SupportReaction> {
        self.reactions
            .iter()
            .find(|reaction| reaction.support == support)
    }
}

/// Matrix-path errors reported in the closed-form result shape.
///
/// Missing beams and supports map onto the matching [`Failure`]. Every other
/// error keeps its message and clears the determinate flag.
impl From<MatrixError> for SolveResult {
    fn from(error: MatrixError) -> Self {
        match error {
            MatrixError::NoBeam => Self::failed(Failure::NoBeam),
            MatrixError::NoSupports => Self::failed(Failure::NoSupports),
            _ => Self {
                statically_determinate: false,
                message: error.to_string(),
                ..Self::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_results_carry_message_and_flag() {
        let result = SolveResult::failed(Failure::SameVertical {
            first: SupportKind::Pinned,
            second: SupportKind::Roller,
        });
        assert!(!result.solved);
        assert!(!result.statically_determinate);
        assert!(result.reactions.is_empty());
        assert!(result.message.contains("same vertical"));
    }

    #[test]
    fn missing_inputs_keep_default_determinate_flag() {
        for failure in [Failure::NoBeam, Failure::NoSupports] {
            let result = SolveResult::failed(failure);
            assert!(!result.solved);
            assert!(result.statically_determinate);
        }
    }

    #[test]
    fn failures_serialize_with_a_type_tag() {
        let json = serde_json::to_value(Failure::TooManySupports { count: 3 })
            .expect("failure serializes");
        assert_eq!(json["type"], "too_many_supports");
        assert_eq!(json["count"], 3);
    }

    #[test]
    fn matrix_errors_for_missing_inputs_become_failures() {
        let no_beam = SolveResult::from(MatrixError::NoBeam);
        assert_eq!(no_beam.failure, Some(Failure::NoBeam));
        assert!(no_beam.statically_determinate);
        assert_eq!(no_beam.message, "no beam found in the scene");

        let no_supports = SolveResult::from(MatrixError::NoSupports);
        assert_eq!(no_supports.failure, Some(Failure::NoSupports));
        assert!(no_supports.statically_determinate);
        assert!(!no_supports.solved);
    }

    #[test]
    fn other_matrix_errors_clear_the_determinate_flag() {
        let result = SolveResult::from(MatrixError::Indeterminate { unknowns: 4 });
        assert!(!result.solved);
        assert!(!result.statically_determinate);
        assert_eq!(result.failure, None);
        assert!(result.message.contains("4 reaction unknowns"));
    }
}
