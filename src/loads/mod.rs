//! Load types applied to nodes and elements

mod load;
mod member_load;

pub use load::{Load, LoadKind};
pub use member_load::{LoadDirection, LocalLoad, MemberLoad};
