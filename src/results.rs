//! Result types for frame analysis

use serde::{Deserialize, Serialize};

use crate::elements::{ElementId, NodeId};
use crate::loads::MemberLoad;
use crate::math::Vec6;
use crate::report::clean_value;

pub use crate::math::DirectionCosines;

/// Displacement results at a node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeDisplacement {
    /// Node the displacement belongs to
    pub node: NodeId,
    /// Displacement in X direction
    pub ux: f64,
    /// Displacement in Y direction
    pub uy: f64,
    /// Rotation about Z axis (counter-clockwise positive)
    pub rz: f64,
}

impl NodeDisplacement {
    /// Create from array [UX, UY, RZ]
    pub fn from_array(node: NodeId, arr: [f64; 3]) -> Self {
        Self {
            node,
            ux: arr[0],
            uy: arr[1],
            rz: arr[2],
        }
    }

    /// Get translation magnitude
    pub fn translation_magnitude(&self) -> f64 {
        (self.ux.powi(2) + self.uy.powi(2)).sqrt()
    }
}

/// Reaction forces at a supported node
///
/// Components on unrestrained freedoms are zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    pub node: NodeId,
    /// Reaction force in X direction
    pub fx: f64,
    /// Reaction force in Y direction
    pub fy: f64,
    /// Reaction moment about Z axis
    pub mz: f64,
}

impl Reaction {
    /// Create from array [FX, FY, MZ]
    pub fn from_array(node: NodeId, arr: [f64; 3]) -> Self {
        Self {
            node,
            fx: arr[0],
            fy: arr[1],
            mz: arr[2],
        }
    }

    /// Get total force magnitude
    pub fn force_magnitude(&self) -> f64 {
        (self.fx.powi(2) + self.fy.powi(2)).sqrt()
    }
}

/// Forces the nodes exert on a member, in member axes
///
/// Same order as the local DOFs: `fx1, fy1, m1` at the start node and
/// `fx2, fy2, m2` at the end node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EndForces {
    pub fx1: f64,
    pub fy1: f64,
    pub m1: f64,
    pub fx2: f64,
    pub fy2: f64,
    pub m2: f64,
}

impl EndForces {
    pub fn from_vector(f: &Vec6) -> Self {
        Self {
            fx1: f[0],
            fy1: f[1],
            m1: f[2],
            fx2: f[3],
            fy2: f[4],
            m2: f[5],
        }
    }

    pub fn to_vector(&self) -> Vec6 {
        Vec6::new(self.fx1, self.fy1, self.m1, self.fx2, self.fy2, self.m2)
    }

    /// Internal forces just inside the start node (tension, shear, sagging)
    pub fn at_start(&self) -> (f64, f64, f64) {
        (-self.fx1, self.fy1, -self.m1)
    }

    /// Internal forces just inside the end node
    pub fn at_end(&self) -> (f64, f64, f64) {
        (self.fx2, -self.fy2, self.m2)
    }
}

/// Internal forces and transverse deflection at one section
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionForces {
    /// Axial force (positive = tension)
    pub axial: f64,
    /// Shear force
    pub shear: f64,
    /// Bending moment (positive = sagging)
    pub moment: f64,
    /// Deflection perpendicular to the member axis
    pub deflection: f64,
}

/// One sampled section along a member
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Distance from the start node
    pub x: f64,
    pub axial: f64,
    pub shear: f64,
    pub moment: f64,
    pub deflection: f64,
    /// Global X of the displaced station
    pub global_x: f64,
    /// Global Y of the displaced station
    pub global_y: f64,
}

/// Results for one element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementResult {
    pub element: ElementId,
    pub length: f64,
    pub cosines: DirectionCosines,
    /// Global coordinates of the start node
    pub origin: [f64; 2],
    /// Member end displacements in member axes; released ends carry the
    /// member's own end rotation
    pub local_displacements: [f64; 6],
    pub end_forces: EndForces,
    pub stations: Vec<Station>,
    pub max_axial: f64,
    pub max_shear: f64,
    pub max_moment: f64,
    pub max_deflection: f64,
}

impl ElementResult {
    /// Probe the internal forces at distance `x` from the start node
    pub fn evaluate_at(&self, x: f64, loads: &[MemberLoad]) -> SectionForces {
        crate::analysis::evaluate_at(
            x,
            self.length,
            self.cosines,
            &self.local_displacements,
            &self.end_forces,
            loads,
        )
    }

    /// Station with the largest absolute moment
    pub fn critical_station(&self) -> Option<&Station> {
        self.stations
            .iter()
            .max_by(|a, b| a.moment.abs().total_cmp(&b.moment.abs()))
    }
}

/// Stability diagnostics of a solve
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stability {
    /// Global DOFs pinned by the singular-pivot fallback
    pub singular_dofs: Vec<usize>,
    /// Global DOFs with neither stiffness nor load, pinned before the solve
    pub inactive_dofs: Vec<usize>,
    /// Elements left out of the analysis (dangling or zero length)
    pub skipped_elements: Vec<ElementId>,
}

impl Stability {
    /// True when the structure is a mechanism or otherwise unstable
    pub fn is_degenerate(&self) -> bool {
        !self.singular_dofs.is_empty()
    }
}

/// Complete analysis output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub elements: Vec<ElementResult>,
    pub displacements: Vec<NodeDisplacement>,
    pub reactions: Vec<Reaction>,
    /// Largest absolute member deflection over all stations
    pub max_deflection: f64,
    pub stability: Stability,
}

impl AnalysisResult {
    /// Result of an analysis with nothing to solve
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty() && self.displacements.is_empty()
    }

    pub fn element(&self, id: ElementId) -> Option<&ElementResult> {
        self.elements.iter().find(|e| e.element == id)
    }

    pub fn displacement(&self, node: NodeId) -> Option<&NodeDisplacement> {
        self.displacements.iter().find(|d| d.node == node)
    }

    pub fn reaction(&self, node: NodeId) -> Option<&Reaction> {
        self.reactions.iter().find(|r| r.node == node)
    }

    /// Sum of all reactions as [FX, FY]
    pub fn total_reaction(&self) -> [f64; 2] {
        self.reactions
            .iter()
            .fold([0.0, 0.0], |acc, r| [acc[0] + r.fx, acc[1] + r.fy])
    }

    /// Copy with every reported number passed through [`clean_value`]
    ///
    /// Only forces and moments are cleaned; displacements are left raw since
    /// their magnitude depends entirely on the unit system.
    pub fn cleaned(&self) -> Self {
        let mut out = self.clone();
        for r in &mut out.reactions {
            r.fx = clean_value(r.fx);
            r.fy = clean_value(r.fy);
            r.mz = clean_value(r.mz);
        }
        for e in &mut out.elements {
            let f = &mut e.end_forces;
            for v in [&mut f.fx1, &mut f.fy1, &mut f.m1, &mut f.fx2, &mut f.fy2, &mut f.m2] {
                *v = clean_value(*v);
            }
            for s in &mut e.stations {
                s.axial = clean_value(s.axial);
                s.shear = clean_value(s.shear);
                s.moment = clean_value(s.moment);
            }
            e.max_axial = clean_value(e.max_axial);
            e.max_shear = clean_value(e.max_shear);
            e.max_moment = clean_value(e.max_moment);
        }
        out
    }
}
