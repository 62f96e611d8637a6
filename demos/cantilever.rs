use beamx::{point, report, solve, BeamEnd, NodeRef, Scene, SupportKind};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Sketch a 200 unit cantilever
    let mut scene = Scene::new();
    let beam = scene.add_beam(point(0.0, 0.0), point(200.0, 0.0));

    // Clamp the start and hang a load off the free end
    scene.add_support_at(NodeRef::new(beam, BeamEnd::Start), SupportKind::Fixed)?;
    scene.add_force_at(NodeRef::new(beam, BeamEnd::End), 100.0, 270.0)?;

    // A second load drawn slightly above the beam still counts
    scene.add_force(point(120.0, 8.0), 40.0, 300.0);

    // Solve and print the reactions
    let result = solve(&scene);
    print!("{}", report::render_report(&result));

    Ok(())
}
