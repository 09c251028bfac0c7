//! Presentation helpers: value cleanup and a plain-text summary

use std::fmt::Write;

use crate::results::AnalysisResult;

/// Snap a result value for display
///
/// Magnitudes below 1e-4 become 0; values within 0.02 of an integer or a
/// half-integer are snapped to it; anything else is rounded to 4 decimals.
/// Never used inside the solver.
pub fn clean_value(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    if value.abs() < 1e-4 {
        return 0.0;
    }

    let rounded = value.round();
    if (value - rounded).abs() < 0.02 {
        return rounded;
    }

    let doubled = value * 2.0;
    if (doubled - doubled.round()).abs() < 0.02 {
        return doubled.round() / 2.0;
    }

    (value * 1e4).round() / 1e4
}

/// Render a textual summary of an analysis
#[must_use]
pub fn render_summary(result: &AnalysisResult) -> String {
    let mut output = String::new();

    if result.is_empty() {
        output.push_str("Nothing to analyse (need at least two nodes and one element)\n");
        return output;
    }

    let _ = writeln!(
        &mut output,
        "Frame analysis: {} nodes, {} elements",
        result.displacements.len(),
        result.elements.len()
    );

    output.push_str("\nReactions\n");
    for r in &result.reactions {
        let _ = writeln!(
            &mut output,
            "  node {:>4}: Fx = {:>12}  Fy = {:>12}  Mz = {:>12}",
            r.node,
            clean_value(r.fx),
            clean_value(r.fy),
            clean_value(r.mz)
        );
    }

    output.push_str("\nDisplacements\n");
    for d in &result.displacements {
        let _ = writeln!(
            &mut output,
            "  node {:>4}: ux = {:+.4e}  uy = {:+.4e}  rz = {:+.4e}",
            d.node, d.ux, d.uy, d.rz
        );
    }

    output.push_str("\nElements\n");
    for e in &result.elements {
        let _ = writeln!(
            &mut output,
            "  element {:>4} (L = {:.3}): |N| = {}  |V| = {}  |M| = {}  |δ| = {:.4e}",
            e.element,
            e.length,
            clean_value(e.max_axial),
            clean_value(e.max_shear),
            clean_value(e.max_moment),
            e.max_deflection
        );
    }

    let _ = writeln!(&mut output, "\nMax deflection: {:.4e}", result.max_deflection);

    let stability = &result.stability;
    if stability.is_degenerate() {
        let _ = writeln!(
            &mut output,
            "WARNING: structure is unstable, singular DOFs {:?}",
            stability.singular_dofs
        );
    }
    if !stability.skipped_elements.is_empty() {
        let ids: Vec<String> = stability
            .skipped_elements
            .iter()
            .map(ToString::to_string)
            .collect();
        let _ = writeln!(&mut output, "Skipped elements: {}", ids.join(", "));
    }

    output
}
