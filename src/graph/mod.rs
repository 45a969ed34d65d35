//! Turns a [`Dataset`](crate::dataset::Dataset) into typed nodes and links.

mod builder;
mod types;

pub use builder::{BuildStats, build, build_with_stats};
pub use types::{Graph, Link, Node, NodeId, NodeKind, Pin, Relation, Role};
