//! Frame element - a planar beam/column/truss bar between two nodes

use serde::{Deserialize, Serialize};
use std::fmt;

use super::NodeId;

/// Identifier of an element, unique within a structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub u32);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<u32> for ElementId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Moment releases (hinges) at the element ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Releases {
    /// Moment released at the start node
    #[serde(default)]
    pub start: bool,
    /// Moment released at the end node
    #[serde(default)]
    pub end: bool,
}

impl Releases {
    /// Create releases with no end releases
    pub fn none() -> Self {
        Self::default()
    }

    /// Hinge at the start node
    pub fn pin_start() -> Self {
        Self { start: true, end: false }
    }

    /// Hinge at the end node
    pub fn pin_end() -> Self {
        Self { start: false, end: true }
    }

    /// Hinges at both ends (two-force truss member)
    pub fn pin_both() -> Self {
        Self { start: true, end: true }
    }

    /// True when both ends are released
    pub fn is_truss(&self) -> bool {
        self.start && self.end
    }
}

/// A planar frame element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Unique identifier
    pub id: ElementId,
    /// Start node
    pub start: NodeId,
    /// End node
    pub end: NodeId,
    /// Modulus of elasticity
    pub e: f64,
    /// Cross-sectional area
    pub a: f64,
    /// Second moment of area
    pub i: f64,
    /// End releases
    #[serde(default)]
    pub releases: Releases,
}

impl Element {
    /// Create a new rigidly connected element
    pub fn new(id: u32, start: u32, end: u32, e: f64, a: f64, i: f64) -> Self {
        Self {
            id: ElementId(id),
            start: NodeId(start),
            end: NodeId(end),
            e,
            a,
            i,
            releases: Releases::none(),
        }
    }

    /// Set element end releases
    pub fn with_releases(mut self, releases: Releases) -> Self {
        self.releases = releases;
        self
    }

    /// Release both end moments (truss bar)
    pub fn truss(self) -> Self {
        self.with_releases(Releases::pin_both())
    }

    /// Check whether the element is connected to the given node
    pub fn connects(&self, node: NodeId) -> bool {
        self.start == node || self.end == node
    }
}
