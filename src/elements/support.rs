//! Support conditions

use serde::{Deserialize, Serialize};

/// Support conditions at a planar node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Support {
    /// Restrained in X translation
    #[serde(default)]
    pub dx: bool,
    /// Restrained in Y translation
    #[serde(default)]
    pub dy: bool,
    /// Restrained in rotation about Z
    #[serde(default)]
    pub rz: bool,
}

impl Support {
    /// Create a support with specific restraints
    pub fn new(dx: bool, dy: bool, rz: bool) -> Self {
        Self { dx, dy, rz }
    }

    /// No restraint
    pub fn free() -> Self {
        Self::default()
    }

    /// Fully fixed support (all freedoms restrained)
    pub fn fixed() -> Self {
        Self::new(true, true, true)
    }

    /// Pinned support (translations restrained, rotation free)
    pub fn pinned() -> Self {
        Self::new(true, true, false)
    }

    /// Roller support (Y translation restrained only)
    pub fn roller() -> Self {
        Self::new(false, true, false)
    }

    /// Roller support (X translation restrained only)
    pub fn roller_x() -> Self {
        Self::new(true, false, false)
    }

    /// Restraint flags ordered as the node's DOFs [DX, DY, RZ]
    pub fn as_array(&self) -> [bool; 3] {
        [self.dx, self.dy, self.rz]
    }

    /// Build from flags ordered [DX, DY, RZ]
    pub fn from_array(flags: [bool; 3]) -> Self {
        Self::new(flags[0], flags[1], flags[2])
    }

    /// Get list of restrained DOF offsets (0-2)
    pub fn restrained_dofs(&self) -> Vec<usize> {
        self.as_array()
            .iter()
            .enumerate()
            .filter_map(|(i, &r)| r.then_some(i))
            .collect()
    }

    /// Check if any DOF is restrained
    pub fn is_supported(&self) -> bool {
        self.dx || self.dy || self.rz
    }

    /// Count number of restrained DOFs
    pub fn num_restrained(&self) -> usize {
        self.restrained_dofs().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_support() {
        let support = Support::fixed();
        assert!(support.dx && support.dy && support.rz);
        assert_eq!(support.num_restrained(), 3);
    }

    #[test]
    fn test_pinned_support() {
        let support = Support::pinned();
        assert_eq!(support.restrained_dofs(), vec![0, 1]);
    }

    #[test]
    fn test_rollers() {
        assert_eq!(Support::roller().as_array(), [false, true, false]);
        assert_eq!(Support::roller_x().as_array(), [true, false, false]);
        assert!(!Support::free().is_supported());
    }
}
