//! Dense linear solver: Gaussian elimination with partial pivoting
//!
//! A pivot that is numerically zero does not abort the solve. The unknown in
//! that column is pinned to zero (unit pivot, zero right-hand side) and its
//! index is reported, so an under-constrained structure still produces a
//! defined displacement vector alongside a list of the freedoms that were
//! pinned.

use super::{Mat, Vec};

/// Outcome of a Gaussian elimination solve
#[derive(Debug, Clone)]
pub struct GaussSolution {
    /// Solution vector
    pub x: Vec,
    /// Unknowns pinned to zero because their pivot was singular
    pub singular: std::vec::Vec<usize>,
}

impl GaussSolution {
    /// True when no pivot fallback was needed
    pub fn is_regular(&self) -> bool {
        self.singular.is_empty()
    }
}

/// Largest absolute entry of a matrix, used to scale pivot tolerances
pub fn max_abs(a: &Mat) -> f64 {
    a.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
}

/// Solve `a * x = b` by Gaussian elimination with partial pivoting
///
/// # Arguments
/// * `a` - Square coefficient matrix
/// * `b` - Right-hand side
/// * `relative_tolerance` - Pivots below `relative_tolerance * max|a|` are singular
pub fn solve_gaussian(a: &Mat, b: &Vec, relative_tolerance: f64) -> GaussSolution {
    let n = b.len();
    debug_assert_eq!(a.nrows(), n);
    debug_assert_eq!(a.ncols(), n);

    let mut m = a.clone();
    let mut rhs = b.clone();
    let mut singular = std::vec::Vec::new();

    let scale = max_abs(a);
    let tolerance = if scale > 0.0 {
        relative_tolerance * scale
    } else {
        relative_tolerance
    };

    for i in 0..n {
        // Partial pivoting: bring the largest entry of column i to the diagonal
        let mut pivot_row = i;
        for k in (i + 1)..n {
            if m[(k, i)].abs() > m[(pivot_row, i)].abs() {
                pivot_row = k;
            }
        }
        if pivot_row != i {
            m.swap_rows(i, pivot_row);
            rhs.swap_rows(i, pivot_row);
        }

        if m[(i, i)].abs() < tolerance {
            m[(i, i)] = 1.0;
            rhs[i] = 0.0;
            for j in (i + 1)..n {
                m[(i, j)] = 0.0;
            }
            singular.push(i);
            continue;
        }

        for k in (i + 1)..n {
            let factor = m[(k, i)] / m[(i, i)];
            if factor == 0.0 {
                continue;
            }
            m[(k, i)] = 0.0;
            for j in (i + 1)..n {
                m[(k, j)] -= factor * m[(i, j)];
            }
            rhs[k] -= factor * rhs[i];
        }
    }

    // Back substitution
    let mut x = Vec::zeros(n);
    for i in (0..n).rev() {
        let mut sum = 0.0;
        for j in (i + 1)..n {
            sum += m[(i, j)] * x[j];
        }
        x[i] = (rhs[i] - sum) / m[(i, i)];
    }

    GaussSolution { x, singular }
}
