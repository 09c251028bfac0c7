//! Planar frame element formulation
//!
//! Local DOF order is `[u1, v1, θ1, u2, v2, θ2]`: axial and transverse
//! translation plus rotation at the start node, then the same at the end
//! node. Fixed-end force vectors hold the forces the end restraints exert on
//! a fully fixed member, in the same order.

use super::{Mat6, Vec6};
use crate::analysis::StiffnessMode;
use crate::elements::{Element, Releases};
use crate::loads::LocalLoad;

/// Effective elastic/section properties of an element for one analysis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionProperties {
    /// Modulus of elasticity
    pub e: f64,
    /// Cross-sectional area
    pub a: f64,
    /// Second moment of area
    pub i: f64,
}

impl SectionProperties {
    pub fn new(e: f64, a: f64, i: f64) -> Self {
        Self { e, a, i }
    }

    /// Properties of `element` after the stiffness mode override
    ///
    /// `RigidBody` scales the modulus (axial and flexural stiffness),
    /// `AxiallyRigid` scales the area only.
    pub fn effective(element: &Element, mode: StiffnessMode, multiplier: f64) -> Self {
        let mut props = Self::new(element.e, element.a, element.i);
        match mode {
            StiffnessMode::Elastic => {}
            StiffnessMode::AxiallyRigid => props.a *= multiplier,
            StiffnessMode::RigidBody => props.e *= multiplier,
        }
        props
    }

    pub fn ea(&self) -> f64 {
        self.e * self.a
    }

    pub fn ei(&self) -> f64 {
        self.e * self.i
    }
}

/// Compute the local stiffness matrix for a planar frame element
///
/// The bending block depends on the release pattern: the full 4x4
/// Euler-Bernoulli block without releases, the statically condensed
/// 3EI block with one hinge, and nothing with two hinges (axial link).
pub fn local_stiffness(props: SectionProperties, length: f64, releases: Releases) -> Mat6 {
    let l = length;
    let ea_l = props.ea() / l;
    let ei = props.ei();

    let mut k = Mat6::zeros();
    k[(0, 0)] = ea_l;
    k[(0, 3)] = -ea_l;
    k[(3, 0)] = -ea_l;
    k[(3, 3)] = ea_l;

    match (releases.start, releases.end) {
        (false, false) => {
            let k1 = 12.0 * ei / (l * l * l);
            let k2 = 6.0 * ei / (l * l);
            let k3 = 4.0 * ei / l;
            let k4 = 2.0 * ei / l;

            #[rustfmt::skip]
            let bending = [
                // v1    θ1    v2    θ2
                ( k1,   k2,  -k1,   k2),
                ( k2,   k3,  -k2,   k4),
                (-k1,  -k2,   k1,  -k2),
                ( k2,   k4,  -k2,   k3),
            ];
            scatter_bending(&mut k, &bending);
        }
        (true, false) => {
            let k1 = 3.0 * ei / (l * l * l);
            let k2 = 3.0 * ei / (l * l);
            let k3 = 3.0 * ei / l;

            #[rustfmt::skip]
            let bending = [
                ( k1,  0.0, -k1,   k2),
                (0.0,  0.0, 0.0,  0.0),
                (-k1,  0.0,  k1,  -k2),
                ( k2,  0.0, -k2,   k3),
            ];
            scatter_bending(&mut k, &bending);
        }
        (false, true) => {
            let k1 = 3.0 * ei / (l * l * l);
            let k2 = 3.0 * ei / (l * l);
            let k3 = 3.0 * ei / l;

            #[rustfmt::skip]
            let bending = [
                ( k1,   k2,  -k1,  0.0),
                ( k2,   k3,  -k2,  0.0),
                (-k1,  -k2,   k1,  0.0),
                (0.0,  0.0,  0.0,  0.0),
            ];
            scatter_bending(&mut k, &bending);
        }
        (true, true) => {}
    }

    k
}

/// Write a 4x4 bending block (rows/cols v1, θ1, v2, θ2) into a 6x6 matrix
fn scatter_bending(k: &mut Mat6, block: &[(f64, f64, f64, f64); 4]) {
    const DOFS: [usize; 4] = [1, 2, 4, 5];
    for (row, &(a, b, c, d)) in DOFS.iter().zip(block.iter()) {
        for (col, value) in DOFS.iter().zip([a, b, c, d]) {
            k[(*row, *col)] = value;
        }
    }
}

/// Fixed-end forces of a fully fixed member (no releases)
pub fn fixed_fixed_end_forces(load: &LocalLoad, length: f64) -> Vec6 {
    let l = length;
    let l2 = l * l;
    let l3 = l2 * l;

    match *load {
        LocalLoad::Distributed { axial, transverse } => Vec6::new(
            -axial * l / 2.0,
            -transverse * l / 2.0,
            -transverse * l2 / 12.0,
            -axial * l / 2.0,
            -transverse * l / 2.0,
            transverse * l2 / 12.0,
        ),
        LocalLoad::Point { a, axial, transverse } => {
            let a = a.clamp(0.0, l);
            let b = l - a;
            Vec6::new(
                -axial * b / l,
                -transverse * b * b * (3.0 * a + b) / l3,
                -transverse * a * b * b / l2,
                -axial * a / l,
                -transverse * a * a * (a + 3.0 * b) / l3,
                transverse * a * a * b / l2,
            )
        }
        LocalLoad::Moment { a, moment } => {
            let a = a.clamp(0.0, l);
            let b = l - a;
            Vec6::new(
                0.0,
                6.0 * moment * a * b / l3,
                moment * b * (2.0 * a - b) / l2,
                0.0,
                -6.0 * moment * a * b / l3,
                moment * a * (2.0 * b - a) / l2,
            )
        }
    }
}

/// Redistribute fixed-end forces for moment releases by static condensation
///
/// A released end moment is carried over to the opposite end at half
/// magnitude with a `1.5 M / L` shear couple; two releases leave the
/// simply supported end shears and no end moments.
pub fn condense_end_forces(fem: &Vec6, length: f64, releases: Releases) -> Vec6 {
    let mut f = *fem;
    let (m1, m2) = (fem[2], fem[5]);

    match (releases.start, releases.end) {
        (false, false) => {}
        (true, false) => {
            f[2] = 0.0;
            f[5] -= m1 / 2.0;
            f[1] -= 1.5 * m1 / length;
            f[4] += 1.5 * m1 / length;
        }
        (false, true) => {
            f[5] = 0.0;
            f[2] -= m2 / 2.0;
            f[1] -= 1.5 * m2 / length;
            f[4] += 1.5 * m2 / length;
        }
        (true, true) => {
            f[2] = 0.0;
            f[5] = 0.0;
            f[1] -= (m1 + m2) / length;
            f[4] += (m1 + m2) / length;
        }
    }

    f
}

/// Compute fixed-end forces of one load on an element with the given releases
pub fn fixed_end_forces(load: &LocalLoad, length: f64, releases: Releases) -> Vec6 {
    condense_end_forces(&fixed_fixed_end_forces(load, length), length, releases)
}

/// Replace released-end rotations by the member's own end rotations
///
/// At a hinge the nodal rotation says nothing about the member, so the
/// member end slope is recovered from the condition of zero end moment
/// (ignoring span loads). A doubly released member rotates with its chord.
pub fn condensed_end_rotations(d: &Vec6, length: f64, releases: Releases) -> Vec6 {
    let mut out = *d;
    let chord = (d[4] - d[1]) / length;

    match (releases.start, releases.end) {
        (false, false) => {}
        (true, false) => out[2] = 1.5 * chord - d[5] / 2.0,
        (false, true) => out[5] = 1.5 * chord - d[2] / 2.0,
        (true, true) => {
            out[2] = chord;
            out[5] = chord;
        }
    }

    out
}
