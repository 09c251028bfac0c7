//! Node element - a joint in the XY plane

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Support;

/// Identifier of a node, unique within a structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<u32> for NodeId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// A planar node with its support conditions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier
    pub id: NodeId,
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Restrained freedoms (translation X, translation Y, rotation)
    #[serde(default)]
    pub restraints: Support,
}

impl Node {
    /// Create a free node at the given coordinates
    pub fn new(id: u32, x: f64, y: f64) -> Self {
        Self {
            id: NodeId(id),
            x,
            y,
            restraints: Support::free(),
        }
    }

    /// Set the support conditions of the node
    pub fn with_support(mut self, support: Support) -> Self {
        self.restraints = support;
        self
    }

    /// Get the coordinates as an array
    pub fn coords(&self) -> [f64; 2] {
        [self.x, self.y]
    }

    /// Calculate distance to another node
    pub fn distance_to(&self, other: &Node) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Check if any freedom of this node is restrained
    pub fn is_supported(&self) -> bool {
        self.restraints.is_supported()
    }
}
