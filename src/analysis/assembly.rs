//! Global stiffness and load assembly
//!
//! Each element is formulated independently into an [`ElementContribution`]
//! and the global system is a fold of those contributions, so the order of
//! elements does not matter.

use std::collections::HashMap;

use log::{debug, warn};

use super::AnalysisOptions;
use crate::elements::{Element, ElementId, Node, NodeId, Releases};
use crate::loads::{Load, MemberLoad};
use crate::math::{
    fixed_end_forces, local_stiffness, member_transformation_matrix, DirectionCosines, Mat, Mat6,
    SectionProperties, Vec, Vec6,
};

/// Map from node id to its first global DOF (three DOFs per node)
#[derive(Debug, Clone)]
pub struct DofMap {
    index: HashMap<NodeId, usize>,
    n_nodes: usize,
}

impl DofMap {
    /// DOFs in node order; a repeated id keeps its first position
    pub fn new(nodes: &[Node]) -> Self {
        let mut index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            index.entry(node.id).or_insert(i);
        }
        Self {
            index,
            n_nodes: nodes.len(),
        }
    }

    /// Position of a node in the node list
    pub fn node_index(&self, id: NodeId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// First global DOF of a node
    pub fn base(&self, id: NodeId) -> Option<usize> {
        self.node_index(id).map(|i| i * 3)
    }

    /// Total number of DOFs
    pub fn len(&self) -> usize {
        self.n_nodes * 3
    }

    pub fn is_empty(&self) -> bool {
        self.n_nodes == 0
    }
}

/// Everything one element adds to the global system, plus what recovery needs
#[derive(Debug, Clone)]
pub struct ElementContribution {
    pub element: ElementId,
    pub releases: Releases,
    pub start_dof: usize,
    pub end_dof: usize,
    /// Global coordinates of the start node
    pub origin: [f64; 2],
    pub length: f64,
    pub cosines: DirectionCosines,
    pub k_local: Mat6,
    pub transform: Mat6,
    /// Summed fixed-end forces of all element loads, local axes
    pub fem_local: Vec6,
    pub loads: std::vec::Vec<MemberLoad>,
}

impl ElementContribution {
    /// Formulate an element, or `None` when it cannot take part
    /// (missing end node or length below the minimum)
    pub fn new(
        element: &Element,
        nodes: &[Node],
        dofs: &DofMap,
        loads: &[MemberLoad],
        options: &AnalysisOptions,
    ) -> Option<Self> {
        let start = nodes.get(dofs.node_index(element.start)?)?;
        let end = nodes.get(dofs.node_index(element.end)?)?;
        let (cosines, length) =
            DirectionCosines::between(start.coords(), end.coords(), options.min_element_length)?;

        let props =
            SectionProperties::effective(element, options.stiffness_mode, options.rigid_multiplier);
        let k_local = local_stiffness(props, length, element.releases);
        let transform = member_transformation_matrix(cosines);

        let fem_local = loads.iter().fold(Vec6::zeros(), |acc, load| {
            acc + fixed_end_forces(&load.to_local(length, cosines), length, element.releases)
        });

        Some(Self {
            element: element.id,
            releases: element.releases,
            start_dof: dofs.base(element.start)?,
            end_dof: dofs.base(element.end)?,
            origin: start.coords(),
            length,
            cosines,
            k_local,
            transform,
            fem_local,
            loads: loads.to_vec(),
        })
    }

    /// Global DOF numbers in local order
    pub fn dof_indices(&self) -> [usize; 6] {
        let (i, j) = (self.start_dof, self.end_dof);
        [i, i + 1, i + 2, j, j + 1, j + 2]
    }

    /// Transform to global: K_global = T^T * K_local * T
    pub fn global_stiffness(&self) -> Mat6 {
        self.transform.transpose() * self.k_local * self.transform
    }

    /// Fixed-end forces rotated to global axes
    pub fn global_fixed_end_forces(&self) -> Vec6 {
        self.transform.transpose() * self.fem_local
    }

    /// Pick this element's six entries out of a global vector
    pub fn gather(&self, global: &Vec) -> Vec6 {
        let dofs = self.dof_indices();
        Vec6::from_fn(|i, _| global[dofs[i]])
    }
}

/// Global stiffness matrix and load vector
#[derive(Debug, Clone)]
pub struct GlobalSystem {
    pub k: Mat,
    pub f: Vec,
}

impl GlobalSystem {
    pub fn new(n_dofs: usize) -> Self {
        Self {
            k: Mat::zeros(n_dofs, n_dofs),
            f: Vec::zeros(n_dofs),
        }
    }

    pub fn n_dofs(&self) -> usize {
        self.f.len()
    }

    /// Scatter an element's stiffness and equivalent nodal loads
    pub fn add_element(mut self, contribution: &ElementContribution) -> Self {
        let dofs = contribution.dof_indices();
        let k_global = contribution.global_stiffness();
        let fem_global = contribution.global_fixed_end_forces();

        for (a, &row) in dofs.iter().enumerate() {
            for (b, &col) in dofs.iter().enumerate() {
                self.k[(row, col)] += k_global[(a, b)];
            }
            // Subtract from load vector (FER is reaction, so negate)
            self.f[row] -= fem_global[a];
        }
        self
    }

    /// Add a load applied directly at a node
    pub fn add_nodal(mut self, base_dof: usize, components: [f64; 3]) -> Self {
        for (k, value) in components.into_iter().enumerate() {
            self.f[base_dof + k] += value;
        }
        self
    }
}

/// Group element loads by the element they act on
///
/// Loads on elements that are not in the list are dropped with a warning.
pub fn group_member_loads(
    elements: &[Element],
    loads: &[Load],
) -> HashMap<ElementId, std::vec::Vec<MemberLoad>> {
    let mut grouped: HashMap<ElementId, std::vec::Vec<MemberLoad>> = HashMap::new();
    for load in loads {
        if let Some((element, member_load)) = load.member_load() {
            if elements.iter().any(|e| e.id == element) {
                grouped.entry(element).or_default().push(member_load);
            } else {
                warn!("load {} ignored: element {} not found", load.id, element);
            }
        }
    }
    grouped
}

/// Assemble the global system from element contributions and nodal loads
pub fn assemble(dofs: &DofMap, contributions: &[ElementContribution], loads: &[Load]) -> GlobalSystem {
    let system = contributions
        .iter()
        .fold(GlobalSystem::new(dofs.len()), |system, c| system.add_element(c));

    let system = loads
        .iter()
        .filter_map(|load| load.nodal_components().map(|(node, comps)| (load, node, comps)))
        .fold(system, |system, (load, node, comps)| match dofs.base(node) {
            Some(base) => system.add_nodal(base, comps),
            None => {
                warn!("load {} ignored: node {} not found", load.id, node);
                system
            }
        });

    debug!(
        "global system: {} DOFs, {} element contributions",
        system.n_dofs(),
        contributions.len()
    );
    system
}
