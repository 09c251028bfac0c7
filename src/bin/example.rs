//! Frame Solver Example - Simple Portal Frame

use anyhow::Context;
use frame_solver::prelude::*;
use frame_solver::report::render_summary;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("=== Frame Solver Example: Portal Frame ===\n");

    // Create a simple portal frame
    //
    //     N2 -------- N3
    //     |          |
    //     |          |
    //     |          |
    //     N1        N4
    //     ^          ^
    //   Fixed     Fixed
    //

    let height = 4.0; // 4m column height
    let span = 6.0; // 6m beam span

    // W12x26, approximate strong-axis properties
    let (e, a, i) = (200e9, 0.00494, 8.49e-5);

    let mut model = FrameModel::new();
    model.add_node(Node::new(1, 0.0, 0.0).with_support(Support::fixed()))?;
    model.add_node(Node::new(2, 0.0, height))?;
    model.add_node(Node::new(3, span, height))?;
    model.add_node(Node::new(4, span, 0.0).with_support(Support::fixed()))?;

    model.add_element(Element::new(1, 1, 2, e, a, i))?; // left column
    model.add_element(Element::new(2, 2, 3, e, a, i))?; // beam
    model.add_element(Element::new(3, 3, 4, e, a, i))?; // right column

    // 10 kN/m gravity on the beam, 20 kN lateral at the left eave
    model.add_load(Load::distributed("D", 2, LoadDirection::Y, -10_000.0))?;
    model.add_load(Load::nodal_force("W", 2, LoadDirection::X, 20_000.0))?;

    let result = model.analyze(&AnalysisOptions::default().with_logging());
    print!("{}", render_summary(&result));

    let beam = result
        .element(ElementId(2))
        .context("beam missing from results")?;
    let midspan = model.evaluate(&result, beam.element, 0.5)?;
    println!(
        "\nBeam at midspan: N = {:.1} N, V = {:.1} N, M = {:.1} N·m, δ = {:.3} mm",
        midspan.axial,
        midspan.shear,
        midspan.moment,
        midspan.deflection * 1000.0
    );

    let [fx, fy] = result.total_reaction();
    println!("Reaction totals: ΣFx = {fx:.1} N, ΣFy = {fy:.1} N");

    Ok(())
}
