//! Error types for the frame solver
//!
//! The analysis pipeline itself never fails: degenerate input degrades to
//! skipped elements, pinned freedoms or an empty result. These errors cover
//! model building and I/O only.

use thiserror::Error;

use crate::elements::{ElementId, NodeId};

/// Main error type for model building and I/O
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("Node {0} not found in model")]
    NodeNotFound(NodeId),

    #[error("Element {0} not found in model")]
    ElementNotFound(ElementId),

    #[error("Load '{0}' not found in model")]
    LoadNotFound(String),

    #[error("Duplicate node id {0}")]
    DuplicateNode(NodeId),

    #[error("Duplicate element id {0}")]
    DuplicateElement(ElementId),

    #[error("Duplicate load id '{0}'")]
    DuplicateLoad(String),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for frame solver operations
pub type FrameResult<T> = Result<T, FrameError>;
