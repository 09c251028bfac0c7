//! Parametric generators for common structure archetypes

use serde::{Deserialize, Serialize};

use crate::elements::{Element, Node, Support};
use crate::error::{FrameError, FrameResult};
use crate::model::FrameModel;

/// Structure archetypes with their conventional supports and hinges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureType {
    /// Two-span continuous beam: pin, roller, roller
    Beam,
    /// Continuous beam over `spans` equal spans
    MultiSpanBeam,
    /// Single bay portal with fixed bases
    PortalFrame,
    /// `bays` x `stories` rigid frame with fixed bases
    MultiStoryFrame,
    /// Pitched portal with pinned bases
    GableFrame,
    /// Pratt-style truss of pin-jointed bars over `spans` panels
    Truss,
    /// Fixed column with a horizontal arm
    Cantilever,
}

impl StructureType {
    pub const ALL: [StructureType; 7] = [
        Self::Beam,
        Self::MultiSpanBeam,
        Self::PortalFrame,
        Self::MultiStoryFrame,
        Self::GableFrame,
        Self::Truss,
        Self::Cantilever,
    ];
}

/// Dimensions and section of a generated structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresetParams {
    /// Overall width
    pub width: f64,
    /// Overall height (column or truss depth)
    pub height: f64,
    /// Rise of the gable ridge above the eaves
    pub roof_height: f64,
    /// Modulus of elasticity
    pub e: f64,
    /// Cross-sectional area
    pub a: f64,
    /// Second moment of area
    pub i: f64,
    /// Spans of a multi-span beam, panels of a truss
    pub spans: usize,
    /// Storeys of a multi-storey frame
    pub stories: usize,
    /// Bays of a multi-storey frame
    pub bays: usize,
}

impl Default for PresetParams {
    fn default() -> Self {
        Self {
            width: 10.0,
            height: 5.0,
            roof_height: 2.0,
            e: 200e9,
            a: 50e-4,
            i: 200e-6,
            spans: 2,
            stories: 2,
            bays: 2,
        }
    }
}

/// Id-allocating helper over a fresh model
struct Builder<'a> {
    model: FrameModel,
    params: &'a PresetParams,
}

impl<'a> Builder<'a> {
    fn new(params: &'a PresetParams) -> Self {
        Self {
            model: FrameModel::new(),
            params,
        }
    }

    fn node(&mut self, x: f64, y: f64, support: Support) -> FrameResult<u32> {
        let id = self.model.next_node_id();
        self.model.add_node(Node::new(id, x, y).with_support(support))?;
        Ok(id)
    }

    fn element(&mut self, start: u32, end: u32) -> FrameResult<()> {
        let p = self.params;
        let id = self.model.next_element_id();
        self.model
            .add_element(Element::new(id, start, end, p.e, p.a, p.i))
    }

    fn bar(&mut self, start: u32, end: u32) -> FrameResult<()> {
        let p = self.params;
        let id = self.model.next_element_id();
        self.model
            .add_element(Element::new(id, start, end, p.e, p.a, p.i).truss())
    }
}

/// Generate a structure of the given type
pub fn generate(kind: StructureType, params: &PresetParams) -> FrameResult<FrameModel> {
    if !(params.width > 0.0) {
        return Err(FrameError::InvalidInput("width must be positive".into()));
    }
    let needs_height = !matches!(kind, StructureType::Beam | StructureType::MultiSpanBeam);
    if needs_height && !(params.height > 0.0) {
        return Err(FrameError::InvalidInput("height must be positive".into()));
    }

    let w = params.width;
    let h = params.height;
    let mut b = Builder::new(params);

    match kind {
        StructureType::Beam => {
            let n1 = b.node(0.0, 0.0, Support::pinned())?;
            let n2 = b.node(w / 2.0, 0.0, Support::roller())?;
            let n3 = b.node(w, 0.0, Support::roller())?;
            b.element(n1, n2)?;
            b.element(n2, n3)?;
        }
        StructureType::MultiSpanBeam => {
            let spans = params.spans.max(1);
            let span = w / spans as f64;
            let mut prev = b.node(0.0, 0.0, Support::pinned())?;
            for k in 1..=spans {
                let next = b.node(k as f64 * span, 0.0, Support::roller())?;
                b.element(prev, next)?;
                prev = next;
            }
        }
        StructureType::PortalFrame => {
            let n1 = b.node(0.0, 0.0, Support::fixed())?;
            let n2 = b.node(0.0, h, Support::free())?;
            let n3 = b.node(w, h, Support::free())?;
            let n4 = b.node(w, 0.0, Support::fixed())?;
            b.element(n1, n2)?;
            b.element(n2, n3)?;
            b.element(n3, n4)?;
        }
        StructureType::MultiStoryFrame => {
            let bays = params.bays.max(1);
            let stories = params.stories.max(1);
            let bay = w / bays as f64;
            let story = h / stories as f64;

            let mut grid = Vec::with_capacity(stories + 1);
            for level in 0..=stories {
                let support = if level == 0 { Support::fixed() } else { Support::free() };
                let row = (0..=bays)
                    .map(|k| b.node(k as f64 * bay, level as f64 * story, support))
                    .collect::<FrameResult<Vec<_>>>()?;
                grid.push(row);
            }

            for level in 0..=stories {
                for k in 0..=bays {
                    if level > 0 && k < bays {
                        b.element(grid[level][k], grid[level][k + 1])?;
                    }
                    if level < stories {
                        b.element(grid[level][k], grid[level + 1][k])?;
                    }
                }
            }
        }
        StructureType::GableFrame => {
            let n1 = b.node(0.0, 0.0, Support::pinned())?;
            let n2 = b.node(0.0, h, Support::free())?;
            let n3 = b.node(w / 2.0, h + params.roof_height, Support::free())?;
            let n4 = b.node(w, h, Support::free())?;
            let n5 = b.node(w, 0.0, Support::pinned())?;
            b.element(n1, n2)?;
            b.element(n2, n3)?;
            b.element(n3, n4)?;
            b.element(n4, n5)?;
        }
        StructureType::Truss => {
            let panels = params.spans.max(2);
            let panel = w / panels as f64;

            let bottom = (0..=panels)
                .map(|k| {
                    let support = match k {
                        0 => Support::pinned(),
                        k if k == panels => Support::roller(),
                        _ => Support::free(),
                    };
                    b.node(k as f64 * panel, 0.0, support)
                })
                .collect::<FrameResult<Vec<_>>>()?;
            let top = (0..=panels)
                .map(|k| b.node(k as f64 * panel, h, Support::free()))
                .collect::<FrameResult<Vec<_>>>()?;

            for k in 0..panels {
                b.bar(bottom[k], bottom[k + 1])?;
                b.bar(top[k], top[k + 1])?;
                b.bar(bottom[k], top[k])?;
                b.bar(bottom[k], top[k + 1])?;
            }
            b.bar(bottom[panels], top[panels])?;
        }
        StructureType::Cantilever => {
            let n1 = b.node(0.0, 0.0, Support::fixed())?;
            let n2 = b.node(0.0, h, Support::free())?;
            let n3 = b.node(w, h, Support::free())?;
            b.element(n1, n2)?;
            b.element(n2, n3)?;
        }
    }

    Ok(b.model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalysisOptions;

    #[test]
    fn test_every_preset_builds_and_solves() {
        let params = PresetParams::default();
        for kind in StructureType::ALL {
            let model = generate(kind, &params).unwrap();
            assert!(model.nodes.len() >= 3, "{kind:?}");
            let result = model.analyze(&AnalysisOptions::default());
            assert!(!result.stability.is_degenerate(), "{kind:?} is unstable");
            assert!(result.stability.skipped_elements.is_empty());
        }
    }

    #[test]
    fn test_multi_story_counts() {
        let params = PresetParams {
            bays: 3,
            stories: 2,
            ..PresetParams::default()
        };
        let model = generate(StructureType::MultiStoryFrame, &params).unwrap();
        assert_eq!(model.nodes.len(), 12);
        // 8 columns + 6 beams
        assert_eq!(model.elements.len(), 14);
    }

    #[test]
    fn test_truss_bars_are_pinned() {
        let model = generate(StructureType::Truss, &PresetParams::default()).unwrap();
        assert_eq!(model.elements.len(), 9);
        assert!(model.elements.iter().all(|e| e.releases.is_truss()));
    }

    #[test]
    fn test_rejects_zero_width() {
        let params = PresetParams {
            width: 0.0,
            ..PresetParams::default()
        };
        assert!(generate(StructureType::Beam, &params).is_err());
    }
}
