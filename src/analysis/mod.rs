//! Analysis options and the linear static pipeline
//!
//! `solve` runs formulation, assembly, the constrained solve and recovery
//! in sequence. Every call builds its own matrices; nothing is cached.

pub mod assembly;
pub mod constraints;
pub mod recovery;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::elements::{Element, Node};
use crate::loads::Load;
use crate::results::{AnalysisResult, NodeDisplacement, Reaction, Stability};

pub use assembly::{assemble, DofMap, ElementContribution, GlobalSystem};
pub use constraints::{solve_constrained, ConstrainedSolution};
pub use recovery::{evaluate_at, recover_element, station_positions};

/// How element stiffness is taken from the section properties
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StiffnessMode {
    /// Properties as given
    #[default]
    Elastic,
    /// Area scaled by the rigid multiplier (negligible axial shortening)
    AxiallyRigid,
    /// Modulus scaled by the rigid multiplier (near rigid members)
    RigidBody,
}

/// Options for frame analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Stiffness override
    pub stiffness_mode: StiffnessMode,
    /// Factor applied by the rigid stiffness modes
    pub rigid_multiplier: f64,
    /// Number of uniform intervals sampled along each element
    pub station_count: usize,
    /// Offset either side of a concentrated load where extra stations go
    pub discontinuity_offset: f64,
    /// Pivots below this fraction of the largest stiffness term are singular
    pub pivot_tolerance: f64,
    /// Elements shorter than this are skipped
    pub min_element_length: f64,
    /// Enable logging/progress output
    pub log: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            stiffness_mode: StiffnessMode::Elastic,
            rigid_multiplier: 1e4,
            station_count: 100,
            discontinuity_offset: 1e-3,
            pivot_tolerance: 1e-12,
            min_element_length: 1e-6,
            log: false,
        }
    }
}

impl AnalysisOptions {
    /// Options for a plain elastic analysis
    pub fn elastic() -> Self {
        Self::default()
    }

    /// Set the stiffness mode
    pub fn with_mode(mut self, mode: StiffnessMode) -> Self {
        self.stiffness_mode = mode;
        self
    }

    /// Set the rigid multiplier
    pub fn with_rigid_multiplier(mut self, multiplier: f64) -> Self {
        self.rigid_multiplier = multiplier;
        self
    }

    /// Set the number of sampling intervals per element
    pub fn with_stations(mut self, count: usize) -> Self {
        self.station_count = count.max(1);
        self
    }

    /// Set the pivot tolerance
    pub fn with_pivot_tolerance(mut self, tol: f64) -> Self {
        self.pivot_tolerance = tol;
        self
    }

    /// Enable logging
    pub fn with_logging(mut self) -> Self {
        self.log = true;
        self
    }
}

/// Solve a frame with default options and the given stiffness mode
pub fn solve(
    nodes: &[Node],
    elements: &[Element],
    loads: &[Load],
    mode: StiffnessMode,
) -> AnalysisResult {
    solve_with_options(nodes, elements, loads, &AnalysisOptions::default().with_mode(mode))
}

/// Run the full linear static analysis
pub fn solve_with_options(
    nodes: &[Node],
    elements: &[Element],
    loads: &[Load],
    options: &AnalysisOptions,
) -> AnalysisResult {
    if nodes.len() < 2 || elements.is_empty() {
        debug!(
            "nothing to solve: {} nodes, {} elements",
            nodes.len(),
            elements.len()
        );
        return AnalysisResult::empty();
    }

    let dofs = DofMap::new(nodes);
    let member_loads = assembly::group_member_loads(elements, loads);

    let mut skipped_elements = Vec::new();
    let contributions: Vec<ElementContribution> = elements
        .iter()
        .filter_map(|element| {
            let loads = member_loads.get(&element.id).map(Vec::as_slice).unwrap_or(&[]);
            let contribution = ElementContribution::new(element, nodes, &dofs, loads, options);
            if contribution.is_none() {
                warn!("element {} skipped: missing node or zero length", element.id);
                skipped_elements.push(element.id);
            }
            contribution
        })
        .collect();

    let system = assemble(&dofs, &contributions, loads);
    let restrained = constraints::restrained_dofs(nodes, &dofs);

    if options.log {
        info!(
            "assembled {} elements into {} DOFs ({} restrained)",
            contributions.len(),
            dofs.len(),
            restrained.len()
        );
    } else {
        debug!(
            "assembled {} elements into {} DOFs ({} restrained)",
            contributions.len(),
            dofs.len(),
            restrained.len()
        );
    }

    let solution = solve_constrained(&system, &restrained, options.pivot_tolerance);
    if !solution.singular.is_empty() {
        warn!(
            "structure is unstable: {} singular DOF(s) pinned {:?}",
            solution.singular.len(),
            solution.singular
        );
    }

    let displacements = nodes
        .iter()
        .enumerate()
        .map(|(index, node)| {
            let base = index * 3;
            NodeDisplacement::from_array(
                node.id,
                [
                    solution.displacements[base],
                    solution.displacements[base + 1],
                    solution.displacements[base + 2],
                ],
            )
        })
        .collect();

    let reactions = nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| node.is_supported())
        .map(|(index, node)| {
            let base = index * 3;
            let mut arr = [0.0; 3];
            for (k, restrained) in node.restraints.as_array().into_iter().enumerate() {
                if restrained {
                    arr[k] = solution.reactions[base + k];
                }
            }
            Reaction::from_array(node.id, arr)
        })
        .collect();

    let element_results: Vec<_> = contributions
        .iter()
        .map(|c| recover_element(c, &solution.displacements, options))
        .collect();

    let max_deflection = element_results
        .iter()
        .fold(0.0_f64, |acc, e| acc.max(e.max_deflection));

    if options.log {
        info!("recovered {} elements, max deflection {:.6e}", element_results.len(), max_deflection);
    }

    AnalysisResult {
        elements: element_results,
        displacements,
        reactions,
        max_deflection,
        stability: Stability {
            singular_dofs: solution.singular,
            inactive_dofs: solution.inactive,
            skipped_elements,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Releases, Support};
    use crate::loads::LoadDirection;
    use approx::assert_relative_eq;

    fn cantilever() -> (Vec<Node>, Vec<Element>) {
        (
            vec![
                Node::new(1, 0.0, 0.0).with_support(Support::fixed()),
                Node::new(2, 10.0, 0.0),
            ],
            vec![Element::new(1, 1, 2, 200e9, 0.01, 1e-4)],
        )
    }

    #[test]
    fn test_simple_cantilever() {
        let (nodes, elements) = cantilever();
        let loads = vec![Load::nodal_force("P", 2, LoadDirection::Y, -10_000.0)];
        let result = solve(&nodes, &elements, &loads, StiffnessMode::Elastic);

        // PL³/3EI
        let tip = result.displacement(crate::elements::NodeId(2)).unwrap();
        assert_relative_eq!(tip.uy, -10_000.0 * 1000.0 / (3.0 * 200e9 * 1e-4), max_relative = 1e-9);

        let rxn = result.reaction(crate::elements::NodeId(1)).unwrap();
        assert_relative_eq!(rxn.fy, 10_000.0, epsilon = 1e-6);
        assert_relative_eq!(rxn.mz, 100_000.0, epsilon = 1e-4);
        assert!(!result.stability.is_degenerate());
    }

    #[test]
    fn test_degenerate_input_is_empty() {
        let nodes = vec![Node::new(1, 0.0, 0.0)];
        let result = solve(&nodes, &[], &[], StiffnessMode::Elastic);
        assert!(result.is_empty());
    }

    #[test]
    fn test_zero_length_element_is_skipped() {
        let (mut nodes, mut elements) = cantilever();
        nodes.push(Node::new(3, 10.0, 0.0));
        elements.push(Element::new(2, 2, 3, 200e9, 0.01, 1e-4));
        let result = solve(&nodes, &elements, &[], StiffnessMode::Elastic);
        assert_eq!(result.stability.skipped_elements, vec![crate::elements::ElementId(2)]);
        assert_eq!(result.elements.len(), 1);
    }

    #[test]
    fn test_mechanism_is_flagged() {
        // Two pinned supports joined by a hinge-hinge pair with a free middle node
        let nodes = vec![
            Node::new(1, 0.0, 0.0).with_support(Support::pinned()),
            Node::new(2, 5.0, 0.0),
            Node::new(3, 10.0, 0.0).with_support(Support::pinned()),
        ];
        let elements = vec![
            Element::new(1, 1, 2, 200e9, 0.01, 1e-4).with_releases(Releases::pin_end()),
            Element::new(2, 2, 3, 200e9, 0.01, 1e-4).with_releases(Releases::pin_start()),
        ];
        let loads = vec![Load::nodal_force("P", 2, LoadDirection::Y, -1.0)];
        let result = solve(&nodes, &elements, &loads, StiffnessMode::Elastic);
        assert!(result.stability.is_degenerate());
        assert!(result.displacements.iter().all(|d| d.uy.is_finite()));
    }

    #[test]
    fn test_rigid_body_mode_stiffens() {
        let (nodes, elements) = cantilever();
        let loads = vec![Load::nodal_force("P", 2, LoadDirection::Y, -10_000.0)];
        let elastic = solve(&nodes, &elements, &loads, StiffnessMode::Elastic);
        let rigid = solve(&nodes, &elements, &loads, StiffnessMode::RigidBody);
        let id = crate::elements::NodeId(2);
        assert_relative_eq!(
            rigid.displacement(id).unwrap().uy * 1e4,
            elastic.displacement(id).unwrap().uy,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_options_from_partial_json() {
        let options: AnalysisOptions =
            serde_json::from_str(r#"{"stiffness_mode": "axially_rigid", "station_count": 20}"#).unwrap();
        assert_eq!(options.stiffness_mode, StiffnessMode::AxiallyRigid);
        assert_eq!(options.station_count, 20);
        assert_eq!(options.rigid_multiplier, 1e4);
    }
}
