//! Boundary conditions and the constrained solve

use log::debug;

use super::assembly::{DofMap, GlobalSystem};
use crate::elements::Node;
use crate::math::linalg::max_abs;
use crate::math::{solve_gaussian, Vec};

/// Displacements and reactions of a constrained solve
#[derive(Debug, Clone)]
pub struct ConstrainedSolution {
    /// Global displacement vector U
    pub displacements: Vec,
    /// K·U - F on every DOF; only restrained entries are reactions
    pub reactions: Vec,
    /// DOFs pinned by the singular-pivot fallback
    pub singular: std::vec::Vec<usize>,
    /// DOFs with no stiffness and no load, pinned up front
    pub inactive: std::vec::Vec<usize>,
}

/// Global DOFs restrained by node supports
pub fn restrained_dofs(nodes: &[Node], dofs: &DofMap) -> std::vec::Vec<usize> {
    let mut restrained = std::vec::Vec::new();
    for node in nodes {
        // Repeated ids map onto the first node; skip the shadowed copies
        let Some(base) = dofs.base(node.id) else { continue };
        for local in node.restraints.restrained_dofs() {
            if !restrained.contains(&(base + local)) {
                restrained.push(base + local);
            }
        }
    }
    restrained.sort_unstable();
    restrained
}

/// Zero a row and column, put `diagonal` on the diagonal and 0 on the right-hand side
///
/// The diagonal must be on the scale of K, otherwise the pinned pivot falls
/// under the relative singular tolerance of a stiff system.
fn pin(k: &mut crate::math::Mat, f: &mut Vec, dof: usize, diagonal: f64) {
    k.row_mut(dof).fill(0.0);
    k.column_mut(dof).fill(0.0);
    k[(dof, dof)] = diagonal;
    f[dof] = 0.0;
}

/// Apply supports and solve `K·U = F`
///
/// Reactions are computed from the unmodified system.
pub fn solve_constrained(
    system: &GlobalSystem,
    restrained: &[usize],
    pivot_tolerance: f64,
) -> ConstrainedSolution {
    let n = system.n_dofs();
    let scale = max_abs(&system.k);
    let zero = pivot_tolerance * scale.max(f64::MIN_POSITIVE);
    let diagonal = scale.max(1.0);

    let mut k = system.k.clone();
    let mut f = system.f.clone();

    for &dof in restrained {
        pin(&mut k, &mut f, dof, diagonal);
    }

    let inactive: std::vec::Vec<usize> = (0..n)
        .filter(|dof| !restrained.contains(dof))
        .filter(|&dof| system.f[dof] == 0.0 && k.row(dof).iter().all(|v| v.abs() <= zero))
        .collect();
    for &dof in &inactive {
        pin(&mut k, &mut f, dof, diagonal);
    }
    if !inactive.is_empty() {
        debug!("pinned {} inactive DOF(s): {:?}", inactive.len(), inactive);
    }

    let solution = solve_gaussian(&k, &f, pivot_tolerance);
    let displacements = solution.x;
    let reactions = &system.k * &displacements - &system.f;

    ConstrainedSolution {
        displacements,
        reactions,
        singular: solution.singular,
        inactive,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::Support;
    use crate::math::Mat;
    use approx::assert_relative_eq;

    #[test]
    fn test_restrained_dofs() {
        let nodes = vec![
            Node::new(1, 0.0, 0.0).with_support(Support::pinned()),
            Node::new(2, 5.0, 0.0),
            Node::new(3, 10.0, 0.0).with_support(Support::roller()),
        ];
        let dofs = DofMap::new(&nodes);
        assert_eq!(restrained_dofs(&nodes, &dofs), vec![0, 1, 7]);
    }

    #[test]
    fn test_spring_chain() {
        // Two springs in series, left end fixed, unit load at the right
        let system = GlobalSystem {
            k: Mat::from_row_slice(3, 3, &[2.0, -2.0, 0.0, -2.0, 3.0, -1.0, 0.0, -1.0, 1.0]),
            f: Vec::from_vec(vec![0.0, 0.0, 1.0]),
        };
        let solution = solve_constrained(&system, &[0], 1e-12);
        assert_relative_eq!(solution.displacements[1], 0.5, epsilon = 1e-12);
        assert_relative_eq!(solution.displacements[2], 1.5, epsilon = 1e-12);
        assert_relative_eq!(solution.reactions[0], -1.0, epsilon = 1e-12);
        assert!(solution.singular.is_empty());
        assert!(solution.inactive.is_empty());
    }

    #[test]
    fn test_unloaded_empty_row_is_inactive() {
        let system = GlobalSystem {
            k: Mat::from_row_slice(3, 3, &[1.0, 0.0, -1.0, 0.0, 0.0, 0.0, -1.0, 0.0, 2.0]),
            f: Vec::from_vec(vec![0.0, 0.0, 3.0]),
        };
        let solution = solve_constrained(&system, &[0], 1e-12);
        assert_eq!(solution.inactive, vec![1]);
        assert!(solution.singular.is_empty());
        assert_relative_eq!(solution.displacements[2], 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_stiff_system_supports_are_not_singular() {
        // Stiffness in the 1e13 range puts the relative tolerance above 1
        let system = GlobalSystem {
            k: Mat::from_row_slice(3, 3, &[2e13, -2e13, 0.0, -2e13, 3e13, -1e13, 0.0, -1e13, 1e13]),
            f: Vec::from_vec(vec![0.0, 0.0, 1e3]),
        };
        let solution = solve_constrained(&system, &[0], 1e-12);
        assert!(solution.singular.is_empty());
        assert_eq!(solution.displacements[0], 0.0);
        assert_relative_eq!(solution.displacements[2], 1.5e-10, max_relative = 1e-9);
        assert_relative_eq!(solution.reactions[0], -1e3, max_relative = 1e-9);
    }

    #[test]
    fn test_loaded_empty_row_is_singular() {
        let system = GlobalSystem {
            k: Mat::from_row_slice(2, 2, &[1.0, 0.0, 0.0, 0.0]),
            f: Vec::from_vec(vec![1.0, 2.0]),
        };
        let solution = solve_constrained(&system, &[], 1e-12);
        assert!(solution.inactive.is_empty());
        assert_eq!(solution.singular, vec![1]);
        assert_eq!(solution.displacements[1], 0.0);
    }
}
