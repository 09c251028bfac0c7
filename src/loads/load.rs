//! Load records - one tagged variant per load kind

use serde::{Deserialize, Serialize};

use super::{LoadDirection, MemberLoad};
use crate::elements::{ElementId, NodeId};

/// What a load is and where it acts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LoadKind {
    /// Force applied directly to a node (global axes)
    NodalForce {
        node: NodeId,
        #[serde(default)]
        direction: LoadDirection,
        magnitude: f64,
    },
    /// Counter-clockwise moment applied directly to a node
    NodalMoment { node: NodeId, magnitude: f64 },
    /// Concentrated force on an element at a normalised position
    Point {
        element: ElementId,
        position: f64,
        #[serde(default)]
        direction: LoadDirection,
        magnitude: f64,
    },
    /// Concentrated moment on an element at a normalised position
    Moment {
        element: ElementId,
        position: f64,
        magnitude: f64,
    },
    /// Uniform load over the full length of an element
    Distributed {
        element: ElementId,
        #[serde(default)]
        direction: LoadDirection,
        magnitude: f64,
    },
}

/// A load applied to the structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Load {
    /// Identifier
    pub id: String,
    /// Kind, target and magnitude
    #[serde(flatten)]
    pub kind: LoadKind,
}

impl Load {
    /// Create a load from its kind
    pub fn new(id: &str, kind: LoadKind) -> Self {
        Self {
            id: id.to_string(),
            kind,
        }
    }

    /// Force on a node
    pub fn nodal_force(id: &str, node: u32, direction: LoadDirection, magnitude: f64) -> Self {
        Self::new(
            id,
            LoadKind::NodalForce {
                node: NodeId(node),
                direction,
                magnitude,
            },
        )
    }

    /// Moment on a node
    pub fn nodal_moment(id: &str, node: u32, magnitude: f64) -> Self {
        Self::new(
            id,
            LoadKind::NodalMoment {
                node: NodeId(node),
                magnitude,
            },
        )
    }

    /// Point force on an element
    pub fn point(
        id: &str,
        element: u32,
        position: f64,
        direction: LoadDirection,
        magnitude: f64,
    ) -> Self {
        Self::new(
            id,
            LoadKind::Point {
                element: ElementId(element),
                position,
                direction,
                magnitude,
            },
        )
    }

    /// Point moment on an element
    pub fn moment(id: &str, element: u32, position: f64, magnitude: f64) -> Self {
        Self::new(
            id,
            LoadKind::Moment {
                element: ElementId(element),
                position,
                magnitude,
            },
        )
    }

    /// Uniform load over an element
    pub fn distributed(id: &str, element: u32, direction: LoadDirection, magnitude: f64) -> Self {
        Self::new(
            id,
            LoadKind::Distributed {
                element: ElementId(element),
                direction,
                magnitude,
            },
        )
    }

    /// Node this load is applied to, if it is a nodal load
    pub fn node(&self) -> Option<NodeId> {
        match self.kind {
            LoadKind::NodalForce { node, .. } | LoadKind::NodalMoment { node, .. } => Some(node),
            _ => None,
        }
    }

    /// Element this load is applied to, if it is an element load
    pub fn element(&self) -> Option<ElementId> {
        self.member_load().map(|(element, _)| element)
    }

    /// The element-applied part of this load
    pub fn member_load(&self) -> Option<(ElementId, MemberLoad)> {
        match self.kind {
            LoadKind::NodalForce { .. } | LoadKind::NodalMoment { .. } => None,
            LoadKind::Point {
                element,
                position,
                direction,
                magnitude,
            } => Some((
                element,
                MemberLoad::Point {
                    position,
                    direction,
                    magnitude,
                },
            )),
            LoadKind::Moment {
                element,
                position,
                magnitude,
            } => Some((element, MemberLoad::Moment { position, magnitude })),
            LoadKind::Distributed {
                element,
                direction,
                magnitude,
            } => Some((element, MemberLoad::Distributed { direction, magnitude })),
        }
    }

    /// Nodal contribution as [FX, FY, MZ], if this is a nodal load
    pub fn nodal_components(&self) -> Option<(NodeId, [f64; 3])> {
        match self.kind {
            LoadKind::NodalForce {
                node,
                direction,
                magnitude,
            } => {
                let (fx, fy) = direction.components(magnitude);
                Some((node, [fx, fy, 0.0]))
            }
            LoadKind::NodalMoment { node, magnitude } => Some((node, [0.0, 0.0, magnitude])),
            _ => None,
        }
    }

    /// Move an element load onto another element with a new position
    pub fn retargeted(&self, id: &str, element: ElementId, position: f64) -> Self {
        let kind = match self.kind {
            LoadKind::Point {
                direction,
                magnitude,
                ..
            } => LoadKind::Point {
                element,
                position,
                direction,
                magnitude,
            },
            LoadKind::Moment { magnitude, .. } => LoadKind::Moment {
                element,
                position,
                magnitude,
            },
            LoadKind::Distributed {
                direction,
                magnitude,
                ..
            } => LoadKind::Distributed {
                element,
                direction,
                magnitude,
            },
            nodal => nodal,
        };
        Self::new(id, kind)
    }
}
