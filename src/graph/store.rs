//! Node storage with a filtered projection.
//!
//! The store owns the full node set for the lifetime of a fixture. Filtering
//! only recomputes which indices are visible; it never copies or drops
//! nodes, so positions changed while a node is visible survive any later
//! filter change, including a return to "all".

use std::collections::HashMap;

use crate::error::{MonitorError, Result};
use crate::fixture::Fixture;
use crate::graph::filter::ProcessFilter;
use crate::types::{Node, NodeId, NodeStatus, PipelineLevel, WorldPos};

/// Status counts over the visible nodes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeStats {
    pub total: usize,
    pub success: usize,
    pub running: usize,
    pub failed: usize,
    pub pending: usize,
}

impl NodeStats {
    pub fn count(&self, status: NodeStatus) -> usize {
        match status {
            NodeStatus::Success => self.success,
            NodeStatus::Running => self.running,
            NodeStatus::Failed => self.failed,
            NodeStatus::Pending => self.pending,
            NodeStatus::Unknown => {
                self.total - self.success - self.running - self.failed - self.pending
            }
        }
    }
}

/// Full node set plus the active filter's projection
#[derive(Debug, Clone, Default)]
pub struct NodeStore {
    nodes: Vec<Node>,
    processes: Vec<String>,
    index: HashMap<NodeId, usize>,
    filter: ProcessFilter,
    visible: Vec<usize>,
}

impl NodeStore {
    /// Build a store from a fixture, rejecting duplicate ids
    pub fn from_fixture(fixture: Fixture) -> Result<Self> {
        fixture.validate()?;
        let index = fixture
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.clone(), i))
            .collect();
        let visible = (0..fixture.nodes.len()).collect();
        Ok(Self {
            nodes: fixture.nodes,
            processes: fixture.processes,
            index,
            filter: ProcessFilter::All,
            visible,
        })
    }

    /// Every node, in fixture order, regardless of filter
    pub fn all(&self) -> &[Node] {
        &self.nodes
    }

    /// Distinct process names offered by the filter selector
    pub fn processes(&self) -> &[String] {
        &self.processes
    }

    pub fn filter(&self) -> &ProcessFilter {
        &self.filter
    }

    /// Replace the displayed projection
    pub fn set_filter(&mut self, filter: ProcessFilter) {
        self.visible = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| filter.matches(n))
            .map(|(i, _)| i)
            .collect();
        tracing::info!(
            "Filter '{}' applied: {}/{} nodes visible",
            filter,
            self.visible.len(),
            self.nodes.len()
        );
        self.filter = filter;
    }

    /// Visible nodes in original relative order
    pub fn visible(&self) -> Vec<&Node> {
        self.visible.iter().map(|&i| &self.nodes[i]).collect()
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn total_len(&self) -> usize {
        self.nodes.len()
    }

    pub fn get(&self, id: &NodeId) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn is_visible(&self, id: &NodeId) -> bool {
        self.index
            .get(id)
            .is_some_and(|i| self.visible.contains(i))
    }

    /// Move one node; negative coordinates are clamped to zero
    pub fn set_position(&mut self, id: &NodeId, position: WorldPos) -> Result<()> {
        let &i = self
            .index
            .get(id)
            .ok_or_else(|| MonitorError::UnknownNode(id.to_string()))?;
        self.nodes[i].position = position.clamped();
        Ok(())
    }

    /// Status counts over the visible nodes
    pub fn stats(&self) -> NodeStats {
        let mut stats = NodeStats::default();
        for node in self.visible() {
            stats.total += 1;
            match node.status {
                NodeStatus::Success => stats.success += 1,
                NodeStatus::Running => stats.running += 1,
                NodeStatus::Failed => stats.failed += 1,
                NodeStatus::Pending => stats.pending += 1,
                NodeStatus::Unknown => {}
            }
        }
        stats
    }

    /// Visible nodes in one pipeline level
    pub fn by_level(&self, level: PipelineLevel) -> Vec<&Node> {
        self.visible()
            .into_iter()
            .filter(|n| n.level == level)
            .collect()
    }

    /// Visible nodes whose last run failed
    pub fn failed(&self) -> Vec<&Node> {
        self.visible()
            .into_iter()
            .filter(|n| n.status == NodeStatus::Failed)
            .collect()
    }
}
