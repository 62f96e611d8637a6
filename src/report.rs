//! Plain-text rendering of reaction results.

use std::fmt::Write;

use crate::results::SolveResult;

/// Reactive moments at or below this magnitude are left out of the report.
const MOMENT_DISPLAY_THRESHOLD: f32 = 0.01;

/// Label for the support at `index` in reaction order: `RA`, `RB`, ...
///
/// Past `RZ` the label continues with the index, as in `R26`.
#[must_use]
pub fn support_label(index: usize) -> String {
    match u8::try_from(index) {
        Ok(offset) if offset < 26 => format!("R{}", char::from(b'A' + offset)),
        _ => format!("R{index}"),
    }
}

/// Render a textual summary of a reaction analysis.
///
/// Forces are printed in newtons and moments in newton-metres with two
/// decimals; supports are named by their position along the beam.
#[must_use]
pub fn render_report(result: &SolveResult) -> String {
    let mut output = String::new();

    if !result.solved {
        writeln!(&mut output, "Analysis failed: {}", result.message)
            .expect("writing to string cannot fail");
        if !result.statically_determinate {
            output.push_str("The support configuration is not statically determinate.\n");
        }
        return output;
    }

    output.push_str("Support reactions:\n");
    for (index, reaction) in result.reactions.iter().enumerate() {
        let label = support_label(index);
        write!(
            &mut output,
            "{label}x: {:.2} N, {label}y: {:.2} N",
            reaction.rx, reaction.ry
        )
        .expect("writing to string cannot fail");
        if reaction.mz.abs() > MOMENT_DISPLAY_THRESHOLD {
            write!(&mut output, ", {label}z: {:.2} N·m", reaction.mz)
                .expect("writing to string cannot fail");
        }
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::{Failure, SupportReaction};
    use crate::scene::{SupportId, SupportKind};

    #[test]
    fn labels_follow_the_alphabet() {
        assert_eq!(support_label(0), "RA");
        assert_eq!(support_label(1), "RB");
        assert_eq!(support_label(25), "RZ");
        assert_eq!(support_label(26), "R26");
    }

    #[test]
    fn formats_human_readable_report() {
        let mut fixed = SupportReaction::new(SupportId::new(0), SupportKind::Fixed);
        fixed.ry = 100.0;
        fixed.mz = 20_000.0;
        let mut roller = SupportReaction::new(SupportId::new(1), SupportKind::Roller);
        roller.ry = 50.0;

        let report = render_report(&SolveResult::solved(vec![fixed, roller]));
        assert!(report.starts_with("Support reactions:"));
        assert!(report.contains("RAx: 0.00 N, RAy: 100.00 N, RAz: 20000.00 N·m"));
        assert!(report.contains("RBy: 50.00 N\n"));
        assert!(!report.contains("RBz"));
    }

    #[test]
    fn reports_failures() {
        let report = render_report(&SolveResult::failed(Failure::UnstableUnderHorizontalLoad));
        assert!(report.contains("Analysis failed: two roller supports are unstable"));
        assert!(report.contains("not statically determinate"));

        let report = render_report(&SolveResult::failed(Failure::NoBeam));
        assert!(!report.contains("not statically determinate"));
    }
}
