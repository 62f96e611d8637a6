use std::error::Error;
use std::fs;
use std::path::PathBuf;

use beamx::{matrix, point, report, solver, Scene, SolveResult};
use clap::{Parser, ValueEnum};
use log::info;

/// Compute support reactions for a sketched beam scene.
#[derive(Debug, Parser)]
#[command(name = "beamx", version, about)]
struct Cli {
    /// Scene snapshot in JSON.
    scene: PathBuf,
    /// Print the full result as JSON instead of the text report.
    #[arg(long)]
    json: bool,
    /// Solution method.
    #[arg(long, value_enum, default_value_t = Method::ClosedForm)]
    method: Method,
    /// Print the equilibrium residual about the beam start.
    #[arg(long)]
    check: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Method {
    /// Per-configuration closed-form equations.
    ClosedForm,
    /// General equilibrium matrix.
    Matrix,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Logging goes to stderr and is filtered through RUST_LOG, so the report
    // on stdout stays clean for piping.
    env_logger::init();
    let cli = Cli::parse();

    // Read the scene snapshot. Beams, supports and forces arrive exactly as
    // the sketching host stored them, node references included.
    let scene: Scene = serde_json::from_str(&fs::read_to_string(&cli.scene)?)?;

    // The host owns scene validation; dangling node references are rejected
    // here before the solver sees them.
    scene.validate()?;
    info!("loaded scene from {}", cli.scene.display());

    // Solve for the support reactions. Matrix errors are folded into the same
    // result shape so both methods report through one path.
    let result = match cli.method {
        Method::ClosedForm => solver::solve(&scene),
        Method::Matrix => {
            matrix::solve_general(&scene).map_or_else(SolveResult::from, SolveResult::solved)
        }
    };

    // Render either the full result as JSON or the plain-text reaction list
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", report::render_report(&result));
    }

    // Optionally close the loop: external loads plus reactions should sum to
    // zero about the beam start. An empty scene is checked about the origin.
    if cli.check {
        let about = scene
            .beams()
            .next()
            .map_or(point(0.0, 0.0), |(_, beam)| beam.start);
        let residual = solver::residual(&scene, &result, about);
        println!(
            "Residual about ({:.2}, {:.2}): Fx = {:+.3e} N, Fy = {:+.3e} N, M = {:+.3e} N·m",
            about.x, about.y, residual.fx, residual.fy, residual.m
        );
    }

    Ok(())
}
