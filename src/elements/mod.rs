//! Structural elements module

mod element;
mod node;
mod support;

pub use element::{Element, ElementId, Releases};
pub use node::{Node, NodeId};
pub use support::Support;
