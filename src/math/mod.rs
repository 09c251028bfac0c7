//! Mathematical utilities for planar frame analysis

pub mod linalg;
pub mod member;

use nalgebra::{DMatrix, DVector, Matrix6, Vector6};
use serde::{Deserialize, Serialize};

pub use linalg::{solve_gaussian, GaussSolution};
pub use member::{
    condensed_end_rotations, fixed_end_forces, local_stiffness, SectionProperties,
};

pub type Mat = DMatrix<f64>;
pub type Vec = DVector<f64>;

/// 6x6 matrix for planar member stiffness
pub type Mat6 = Matrix6<f64>;
/// 6-element vector for planar member forces/displacements [u1, v1, θ1, u2, v2, θ2]
pub type Vec6 = Vector6<f64>;

/// Direction cosines of a member's local x-axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionCosines {
    /// cos θ = Δx / L
    pub c: f64,
    /// sin θ = Δy / L
    pub s: f64,
}

impl DirectionCosines {
    /// Cosines of the chord between two points, with its length
    ///
    /// Returns `None` when the points coincide (length below `min_length`).
    pub fn between(start: [f64; 2], end: [f64; 2], min_length: f64) -> Option<(Self, f64)> {
        let dx = end[0] - start[0];
        let dy = end[1] - start[1];
        let length = (dx * dx + dy * dy).sqrt();
        if !(length > min_length) {
            return None;
        }
        Some((
            Self {
                c: dx / length,
                s: dy / length,
            },
            length,
        ))
    }

    /// Resolve a global vector (FX, FY) into (axial, transverse) member components
    pub fn to_local(&self, fx: f64, fy: f64) -> (f64, f64) {
        (self.c * fx + self.s * fy, -self.s * fx + self.c * fy)
    }

    /// Rotate member components (axial, transverse) back to global (FX, FY)
    pub fn to_global(&self, axial: f64, transverse: f64) -> (f64, f64) {
        (self.c * axial - self.s * transverse, self.s * axial + self.c * transverse)
    }
}

/// Compute the transformation matrix for a planar frame element
///
/// Rotates global end vectors [UX, UY, RZ] x 2 into member axes, so that
/// `d_local = T * d_global` and `K_global = Tᵀ * K_local * T`.
pub fn member_transformation_matrix(cosines: DirectionCosines) -> Mat6 {
    let DirectionCosines { c, s } = cosines;

    let mut t = Mat6::zeros();
    for offset in [0, 3] {
        t[(offset, offset)] = c;
        t[(offset, offset + 1)] = s;
        t[(offset + 1, offset)] = -s;
        t[(offset + 1, offset + 1)] = c;
        t[(offset + 2, offset + 2)] = 1.0;
    }
    t
}
