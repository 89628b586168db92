//! Node graph: the full node set, its filtered projection and dependency edges
//!
//! # Main Types
//!
//! - [`NodeStore`] - Owns every node; exposes the filtered view
//! - [`ProcessFilter`] - Which process (or all) is displayed
//! - [`FilterTransitions`] - Delayed, fire-and-forget filter application
//! - [`Edge`] - A resolved prerequisite -> dependent connection

pub mod edges;
pub mod filter;
pub mod store;

pub use edges::{resolve_edges, Edge};
pub use filter::{FilterTransitions, ProcessFilter};
pub use store::{NodeStats, NodeStore};
