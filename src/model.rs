//! Frame model - owns the nodes, elements and loads of one structure

use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::analysis::{self, AnalysisOptions};
use crate::elements::{Element, ElementId, Node, NodeId, Releases, Support};
use crate::error::{FrameError, FrameResult};
use crate::loads::{Load, LoadKind, MemberLoad};
use crate::results::{AnalysisResult, SectionForces};

/// Distance below which an element is treated as zero length
const MIN_LENGTH: f64 = 1e-6;
/// Maximum distance from an element chord for a node to split it
const SPLIT_DISTANCE: f64 = 0.05;
/// Split parameters must fall strictly inside (0.01, 0.99)
const SPLIT_MARGIN: f64 = 0.01;
/// Slack when deciding which segment a concentrated load falls on
const SEGMENT_SLACK: f64 = 1e-4;

/// The planar structural model
///
/// Nodes, elements and loads keep insertion order; node order defines the
/// global DOF numbering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameModel {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default)]
    pub loads: Vec<Load>,
}

impl FrameModel {
    /// Create a new empty model
    pub fn new() -> Self {
        Self::default()
    }

    // ========================
    // Model Building Methods
    // ========================

    /// Add a node to the model
    pub fn add_node(&mut self, node: Node) -> FrameResult<()> {
        if self.node(node.id).is_some() {
            return Err(FrameError::DuplicateNode(node.id));
        }
        if !node.x.is_finite() || !node.y.is_finite() {
            return Err(FrameError::InvalidGeometry(format!(
                "node {} has non-finite coordinates",
                node.id
            )));
        }
        self.nodes.push(node);
        Ok(())
    }

    /// Add an element to the model
    pub fn add_element(&mut self, element: Element) -> FrameResult<()> {
        if self.element(element.id).is_some() {
            return Err(FrameError::DuplicateElement(element.id));
        }
        let start = self
            .node(element.start)
            .ok_or(FrameError::NodeNotFound(element.start))?;
        let end = self
            .node(element.end)
            .ok_or(FrameError::NodeNotFound(element.end))?;
        if element.start == element.end || start.distance_to(end) < MIN_LENGTH {
            return Err(FrameError::InvalidGeometry(format!(
                "element {} has zero length ({} -> {})",
                element.id, element.start, element.end
            )));
        }
        if !(element.e > 0.0 && element.a > 0.0 && element.i >= 0.0) {
            return Err(FrameError::InvalidInput(format!(
                "element {} needs E > 0, A > 0 and I >= 0",
                element.id
            )));
        }
        self.elements.push(element);
        Ok(())
    }

    /// Add a load to the model
    pub fn add_load(&mut self, load: Load) -> FrameResult<()> {
        if self.load(&load.id).is_some() {
            return Err(FrameError::DuplicateLoad(load.id));
        }
        if let Some(node) = load.node() {
            if self.node(node).is_none() {
                return Err(FrameError::NodeNotFound(node));
            }
        }
        if let Some(element) = load.element() {
            if self.element(element).is_none() {
                return Err(FrameError::ElementNotFound(element));
            }
        }
        if let LoadKind::Point { position, .. } | LoadKind::Moment { position, .. } = load.kind {
            if !(0.0..=1.0).contains(&position) {
                return Err(FrameError::InvalidInput(format!(
                    "load '{}' position {position} outside [0, 1]",
                    load.id
                )));
            }
        }
        self.loads.push(load);
        Ok(())
    }

    /// Replace the support conditions of a node
    pub fn set_support(&mut self, id: NodeId, support: Support) -> FrameResult<()> {
        let node = self
            .nodes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(FrameError::NodeNotFound(id))?;
        node.restraints = support;
        Ok(())
    }

    /// Replace the end releases of an element
    pub fn set_releases(&mut self, id: ElementId, releases: Releases) -> FrameResult<()> {
        let element = self
            .elements
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(FrameError::ElementNotFound(id))?;
        element.releases = releases;
        Ok(())
    }

    /// Remove a node together with its elements and every load on them
    pub fn remove_node(&mut self, id: NodeId) -> FrameResult<Node> {
        let index = self
            .nodes
            .iter()
            .position(|n| n.id == id)
            .ok_or(FrameError::NodeNotFound(id))?;

        let attached: Vec<ElementId> = self
            .elements
            .iter()
            .filter(|e| e.connects(id))
            .map(|e| e.id)
            .collect();
        for element in attached {
            self.remove_element(element)?;
        }
        self.loads.retain(|l| l.node() != Some(id));

        Ok(self.nodes.remove(index))
    }

    /// Remove an element and its loads
    pub fn remove_element(&mut self, id: ElementId) -> FrameResult<Element> {
        let index = self
            .elements
            .iter()
            .position(|e| e.id == id)
            .ok_or(FrameError::ElementNotFound(id))?;
        self.loads.retain(|l| l.element() != Some(id));
        Ok(self.elements.remove(index))
    }

    /// Remove a load by id
    pub fn remove_load(&mut self, id: &str) -> FrameResult<Load> {
        let index = self
            .loads
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| FrameError::LoadNotFound(id.to_string()))?;
        Ok(self.loads.remove(index))
    }

    // ========================
    // Lookup
    // ========================

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn load(&self, id: &str) -> Option<&Load> {
        self.loads.iter().find(|l| l.id == id)
    }

    /// Smallest node id above every existing one
    pub fn next_node_id(&self) -> u32 {
        self.nodes.iter().map(|n| n.id.0).max().map_or(1, |m| m + 1)
    }

    /// Smallest element id above every existing one
    pub fn next_element_id(&self) -> u32 {
        self.elements.iter().map(|e| e.id.0).max().map_or(1, |m| m + 1)
    }

    /// Loads acting along an element, in insertion order
    pub fn member_loads(&self, id: ElementId) -> Vec<MemberLoad> {
        self.loads
            .iter()
            .filter_map(Load::member_load)
            .filter(|(element, _)| *element == id)
            .map(|(_, load)| load)
            .collect()
    }

    /// Length of an element
    pub fn element_length(&self, id: ElementId) -> FrameResult<f64> {
        let element = self.element(id).ok_or(FrameError::ElementNotFound(id))?;
        let start = self
            .node(element.start)
            .ok_or(FrameError::NodeNotFound(element.start))?;
        let end = self
            .node(element.end)
            .ok_or(FrameError::NodeNotFound(element.end))?;
        Ok(start.distance_to(end))
    }

    // ========================
    // Auto-connect
    // ========================

    /// Split every element that has other nodes lying on it
    ///
    /// A node splits an element when it is within `0.05` of the chord and
    /// its projection parameter lies in `(0.01, 0.99)`. Outer releases stay
    /// on the outer segments; inner joints are rigid. Distributed loads are
    /// copied onto every segment, concentrated loads move to the segment
    /// holding them with a re-normalised position. Returns the number of
    /// elements that were split.
    pub fn split_at_nodes(&mut self) -> usize {
        let mut next_id = self.next_element_id();
        let mut elements = Vec::with_capacity(self.elements.len());
        let mut loads: Vec<Load> = self.loads.iter().filter(|l| l.node().is_some()).cloned().collect();
        let mut split_count = 0;

        for element in &self.elements {
            let own_loads: Vec<&Load> = self
                .loads
                .iter()
                .filter(|l| l.element() == Some(element.id))
                .collect();

            let splits = match (self.node(element.start), self.node(element.end)) {
                (Some(start), Some(end)) => self.nodes_on_chord(element, start, end),
                _ => Vec::new(),
            };

            if splits.is_empty() {
                elements.push(*element);
                loads.extend(own_loads.into_iter().cloned());
                continue;
            }

            split_count += 1;
            debug!(
                "splitting element {} at {} intermediate node(s)",
                element.id,
                splits.len()
            );

            let points: Vec<(NodeId, f64)> = splits
                .into_iter()
                .chain(std::iter::once((element.end, 1.0)))
                .collect();
            let last = points.len() - 1;

            let mut current_start = element.start;
            let mut prev_t = 0.0;
            let mut placed = vec![false; own_loads.len()];

            for (index, (node, t)) in points.into_iter().enumerate() {
                let id = ElementId(next_id);
                next_id += 1;

                elements.push(Element {
                    id,
                    start: current_start,
                    end: node,
                    releases: Releases {
                        start: index == 0 && element.releases.start,
                        end: index == last && element.releases.end,
                    },
                    ..*element
                });

                for (k, load) in own_loads.iter().enumerate() {
                    let new_id = format!("{}-{}", load.id, id);
                    match load.kind {
                        LoadKind::Distributed { .. } => {
                            loads.push(load.retargeted(&new_id, id, 0.0));
                        }
                        LoadKind::Point { position, .. } | LoadKind::Moment { position, .. } => {
                            let inside = position >= prev_t - SEGMENT_SLACK
                                && position <= t + SEGMENT_SLACK;
                            if placed[k] || !inside {
                                continue;
                            }
                            let span = t - prev_t;
                            let local = if span > MIN_LENGTH {
                                ((position - prev_t) / span).clamp(0.0, 1.0)
                            } else {
                                0.0
                            };
                            loads.push(load.retargeted(&new_id, id, local));
                            placed[k] = true;
                        }
                        LoadKind::NodalForce { .. } | LoadKind::NodalMoment { .. } => {}
                    }
                }

                current_start = node;
                prev_t = t;
            }
        }

        self.elements = elements;
        self.loads = loads;
        split_count
    }

    /// Nodes lying on an element's chord, sorted by their parameter along it
    fn nodes_on_chord(&self, element: &Element, start: &Node, end: &Node) -> Vec<(NodeId, f64)> {
        let (cx, cy) = (end.x - start.x, end.y - start.y);
        let len_sq = cx * cx + cy * cy;
        if len_sq == 0.0 {
            return Vec::new();
        }

        let mut on_chord: Vec<(NodeId, f64)> = self
            .nodes
            .iter()
            .filter(|n| !element.connects(n.id))
            .filter_map(|n| {
                let t = ((n.x - start.x) * cx + (n.y - start.y) * cy) / len_sq;
                let (px, py) = if t < 0.0 {
                    (start.x, start.y)
                } else if t > 1.0 {
                    (end.x, end.y)
                } else {
                    (start.x + t * cx, start.y + t * cy)
                };
                let dist = ((n.x - px).powi(2) + (n.y - py).powi(2)).sqrt();
                let inside = t > SPLIT_MARGIN && t < 1.0 - SPLIT_MARGIN;
                (dist < SPLIT_DISTANCE && inside).then_some((n.id, t))
            })
            .collect();

        on_chord.sort_by(|a, b| a.1.total_cmp(&b.1));
        on_chord
    }

    // ========================
    // Analysis
    // ========================

    /// Run the linear static analysis
    pub fn analyze(&self, options: &AnalysisOptions) -> AnalysisResult {
        if options.log {
            info!(
                "analysing model: {} nodes, {} elements, {} loads",
                self.nodes.len(),
                self.elements.len(),
                self.loads.len()
            );
        }
        analysis::solve_with_options(&self.nodes, &self.elements, &self.loads, options)
    }

    /// Probe an analysed element at a normalised position along it
    pub fn evaluate(
        &self,
        result: &AnalysisResult,
        id: ElementId,
        position: f64,
    ) -> FrameResult<SectionForces> {
        if !(0.0..=1.0).contains(&position) {
            return Err(FrameError::InvalidInput(format!(
                "position {position} outside [0, 1]"
            )));
        }
        let element = result.element(id).ok_or(FrameError::ElementNotFound(id))?;
        Ok(element.evaluate_at(position * element.length, &self.member_loads(id)))
    }

    // ========================
    // Serialization
    // ========================

    /// Build a model from JSON, checking every reference
    pub fn from_json(json: &str) -> FrameResult<Self> {
        let raw: FrameModel = serde_json::from_str(json)?;
        raw.validated()
    }

    /// Serialize the model to pretty JSON
    pub fn to_json(&self) -> FrameResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a model from a JSON file
    pub fn load_from_file(path: impl AsRef<Path>) -> FrameResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Save the model as a JSON file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> FrameResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Rebuild through the checked insertion methods
    pub fn validated(self) -> FrameResult<Self> {
        let mut model = Self::new();
        for node in self.nodes {
            model.add_node(node)?;
        }
        for element in self.elements {
            model.add_element(element)?;
        }
        for load in self.loads {
            model.add_load(load)?;
        }
        Ok(model)
    }
}
