//! Frame Solver - planar structural analysis by the direct stiffness method
//!
//! This library analyses 2D beams, frames and trusses:
//! - Axial + Euler-Bernoulli frame elements with optional moment releases
//! - Nodal forces/moments, member point loads, point moments and uniform loads
//! - Linear static analysis with support reactions
//! - Exact shear/moment/axial/deflection diagrams along every member
//!
//! ## Example
//! ```rust
//! use frame_solver::prelude::*;
//!
//! let mut model = FrameModel::new();
//!
//! // Simply supported 10 m beam
//! model.add_node(Node::new(1, 0.0, 0.0).with_support(Support::pinned())).unwrap();
//! model.add_node(Node::new(2, 10.0, 0.0).with_support(Support::roller())).unwrap();
//! model.add_element(Element::new(1, 1, 2, 200e9, 0.01, 1e-4)).unwrap();
//!
//! // 10 kN downward at midspan
//! model.add_load(Load::point("P1", 1, 0.5, LoadDirection::Y, -10_000.0)).unwrap();
//!
//! let result = model.analyze(&AnalysisOptions::default());
//! let beam = result.element(ElementId(1)).unwrap();
//! assert!((beam.max_moment - 25_000.0).abs() < 1.0);
//! ```

pub mod analysis;
pub mod api;
pub mod elements;
pub mod error;
pub mod loads;
pub mod math;
pub mod model;
pub mod presets;
pub mod report;
pub mod results;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::{
        evaluate_at, solve, solve_with_options, AnalysisOptions, StiffnessMode,
    };
    pub use crate::elements::{Element, ElementId, Node, NodeId, Releases, Support};
    pub use crate::error::{FrameError, FrameResult};
    pub use crate::loads::{Load, LoadDirection, LoadKind, MemberLoad};
    pub use crate::model::FrameModel;
    pub use crate::presets::{PresetParams, StructureType};
    pub use crate::results::{
        AnalysisResult, DirectionCosines, ElementResult, EndForces, NodeDisplacement, Reaction,
        SectionForces, Stability, Station,
    };
}

#[cfg(feature = "wasm")]
pub mod wasm;
