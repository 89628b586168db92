//! Test data builders for creating test objects

use etl_monitor::types::{FlowTag, WorldPos};
use etl_monitor::{Fixture, Node, NodeCategory, NodeId, NodeStatus, NodeStore, PipelineLevel};

/// Builder for creating test Nodes
pub struct NodeBuilder {
    node: Node,
}

impl NodeBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            node: Node {
                id: NodeId::new(id),
                name: id.to_string(),
                category: NodeCategory::Glue,
                process: "Test".to_string(),
                status: NodeStatus::Pending,
                start_time: None,
                end_time: None,
                position: WorldPos::new(0.0, 0.0),
                dependencies: Vec::new(),
                level: PipelineLevel::Ingestion,
                flow: FlowTag::Blue,
                error_detail: None,
            },
        }
    }

    pub fn process(mut self, process: &str) -> Self {
        self.node.process = process.to_string();
        self
    }

    pub fn status(mut self, status: NodeStatus) -> Self {
        self.node.status = status;
        self
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.node.position = WorldPos::new(x, y);
        self
    }

    pub fn depends_on(mut self, deps: &[&str]) -> Self {
        self.node.dependencies = deps.iter().map(|d| NodeId::new(*d)).collect();
        self
    }

    pub fn level(mut self, level: PipelineLevel) -> Self {
        self.node.level = level;
        self
    }

    pub fn times(mut self, start: &str, end: &str) -> Self {
        self.node.start_time = Some(start.to_string());
        self.node.end_time = Some(end.to_string());
        self
    }

    pub fn build(self) -> Node {
        self.node
    }
}

/// Store over the given nodes, with the process list derived from them
pub fn store_of(nodes: Vec<Node>) -> NodeStore {
    let json = serde_json::to_string(&Fixture {
        processes: Vec::new(),
        nodes,
    })
    .unwrap();
    NodeStore::from_fixture(Fixture::from_json(&json).unwrap()).unwrap()
}

/// Store over the built-in flow map
pub fn builtin_store() -> NodeStore {
    NodeStore::from_fixture(Fixture::builtin()).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_builder() {
        let node = NodeBuilder::new("a")
            .process("P")
            .at(10.0, 20.0)
            .depends_on(&["b"])
            .build();

        assert_eq!(node.id.as_str(), "a");
        assert_eq!(node.process, "P");
        assert_eq!(node.position, WorldPos::new(10.0, 20.0));
        assert_eq!(node.dependencies, vec![NodeId::new("b")]);
    }
}
