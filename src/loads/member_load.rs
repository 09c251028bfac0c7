//! Loads acting along an element

use serde::{Deserialize, Serialize};

use crate::math::DirectionCosines;

/// Global axis a force acts along
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LoadDirection {
    /// Force in global X direction
    X,
    /// Force in global Y direction (gravity axis, transverse to horizontal members)
    #[default]
    Y,
}

impl LoadDirection {
    /// Global components (FX, FY) of a force of the given magnitude
    pub fn components(self, magnitude: f64) -> (f64, f64) {
        match self {
            Self::X => (magnitude, 0.0),
            Self::Y => (0.0, magnitude),
        }
    }
}

/// A load applied to an element, positioned by a fraction of its length
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MemberLoad {
    /// Concentrated force at `position` (0 = start node, 1 = end node)
    Point {
        position: f64,
        #[serde(default)]
        direction: LoadDirection,
        magnitude: f64,
    },
    /// Concentrated counter-clockwise moment at `position`
    Moment { position: f64, magnitude: f64 },
    /// Uniform force per unit length over the whole element
    Distributed {
        #[serde(default)]
        direction: LoadDirection,
        magnitude: f64,
    },
}

impl MemberLoad {
    /// Normalised position clamped to [0, 1]; `None` for full-span loads
    pub fn position(&self) -> Option<f64> {
        match self {
            Self::Point { position, .. } | Self::Moment { position, .. } => {
                Some(position.clamp(0.0, 1.0))
            }
            Self::Distributed { .. } => None,
        }
    }

    /// Distance of a concentrated load from the start node
    pub fn location(&self, length: f64) -> Option<f64> {
        self.position().map(|p| p * length)
    }

    /// Resolve the load into member axes
    pub fn to_local(&self, length: f64, cosines: DirectionCosines) -> LocalLoad {
        match *self {
            Self::Point { direction, magnitude, .. } => {
                let (fx, fy) = direction.components(magnitude);
                let (axial, transverse) = cosines.to_local(fx, fy);
                LocalLoad::Point {
                    a: self.location(length).unwrap_or(0.0),
                    axial,
                    transverse,
                }
            }
            Self::Moment { magnitude, .. } => LocalLoad::Moment {
                a: self.location(length).unwrap_or(0.0),
                moment: magnitude,
            },
            Self::Distributed { direction, magnitude } => {
                let (fx, fy) = direction.components(magnitude);
                let (axial, transverse) = cosines.to_local(fx, fy);
                LocalLoad::Distributed { axial, transverse }
            }
        }
    }
}

/// An element load expressed in member axes with absolute distances
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocalLoad {
    /// Force components at distance `a` from the start node
    Point { a: f64, axial: f64, transverse: f64 },
    /// Counter-clockwise moment at distance `a`
    Moment { a: f64, moment: f64 },
    /// Uniform intensities per unit length over the whole element
    Distributed { axial: f64, transverse: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_direction_is_y() {
        let load: MemberLoad =
            serde_json::from_str(r#"{"type": "point", "position": 0.25, "magnitude": -5.0}"#)
                .unwrap();
        assert_eq!(
            load,
            MemberLoad::Point { position: 0.25, direction: LoadDirection::Y, magnitude: -5.0 }
        );
    }

    #[test]
    fn test_position_is_clamped() {
        let load = MemberLoad::Moment { position: 1.4, magnitude: 1.0 };
        assert_eq!(load.position(), Some(1.0));
        assert_eq!(load.location(8.0), Some(8.0));
        let udl = MemberLoad::Distributed { direction: LoadDirection::Y, magnitude: 1.0 };
        assert_eq!(udl.position(), None);
    }

    #[test]
    fn test_gravity_load_on_inclined_member() {
        // 45 degree member: half the gravity load acts axially, half transversely
        let cos = std::f64::consts::FRAC_1_SQRT_2;
        let cosines = DirectionCosines { c: cos, s: cos };
        let load = MemberLoad::Distributed { direction: LoadDirection::Y, magnitude: -2.0 };
        match load.to_local(4.0, cosines) {
            LocalLoad::Distributed { axial, transverse } => {
                assert_relative_eq!(axial, -2.0 * cos, epsilon = 1e-12);
                assert_relative_eq!(transverse, -2.0 * cos, epsilon = 1e-12);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_horizontal_force_on_vertical_member_is_transverse() {
        let cosines = DirectionCosines { c: 0.0, s: 1.0 };
        let load = MemberLoad::Point { position: 0.5, direction: LoadDirection::X, magnitude: 3.0 };
        match load.to_local(2.0, cosines) {
            LocalLoad::Point { a, axial, transverse } => {
                assert_relative_eq!(a, 1.0);
                assert_relative_eq!(axial, 0.0);
                assert_relative_eq!(transverse, -3.0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
