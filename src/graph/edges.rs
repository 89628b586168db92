//! Dependency-edge resolution.
//!
//! Edges are resolved against the visible projection only: a dependency on a
//! node that is filtered out (or absent from the fixture altogether) produces
//! no edge.

use std::collections::HashMap;

use crate::types::{Node, NodeId};

/// A prerequisite -> dependent connection between two visible nodes
#[derive(Debug, Clone, Copy)]
pub struct Edge<'a> {
    /// The prerequisite
    pub from: &'a Node,
    /// The node that declares the dependency
    pub to: &'a Node,
}

/// Resolve every dependency of every visible node to a live node reference.
///
/// Edges come out in node order, then dependency declaration order.
pub fn resolve_edges<'a>(visible: &[&'a Node]) -> Vec<Edge<'a>> {
    let lookup: HashMap<&NodeId, &'a Node> = visible.iter().map(|n| (&n.id, *n)).collect();

    visible
        .iter()
        .flat_map(|&node| {
            node.dependencies
                .iter()
                .filter_map(|dep| lookup.get(dep).map(|&from| Edge { from, to: node }))
                .collect::<Vec<_>>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::Fixture;
    use crate::graph::{NodeStore, ProcessFilter};

    fn pairs(edges: &[Edge<'_>]) -> Vec<(String, String)> {
        edges
            .iter()
            .map(|e| (e.from.id.to_string(), e.to.id.to_string()))
            .collect()
    }

    #[test]
    fn test_edges_for_raas() {
        let mut store = NodeStore::from_fixture(Fixture::builtin()).unwrap();
        store.set_filter(ProcessFilter::Process("RaaS".into()));
        let visible = store.visible();
        let edges = resolve_edges(&visible);

        assert_eq!(
            pairs(&edges),
            vec![
                ("raas".into(), "ancillaries-atlas".into()),
                ("raas".into(), "basefare-atlas".into()),
                ("ancillaries-atlas".into(), "total-revenue-atlas".into()),
                ("basefare-atlas".into(), "total-sales-atlas".into()),
            ]
        );
    }

    #[test]
    fn test_full_builtin_edge_count() {
        let store = NodeStore::from_fixture(Fixture::builtin()).unwrap();
        let visible = store.visible();
        let declared: usize = visible.iter().map(|n| n.dependencies.len()).sum();
        assert_eq!(resolve_edges(&visible).len(), declared);
    }

    #[test]
    fn test_filtered_out_dependency_is_omitted() {
        let fixture = Fixture::builtin();
        // Keep the dependent but drop its prerequisite
        let visible: Vec<&Node> = fixture
            .nodes
            .iter()
            .filter(|n| n.id.as_str() == "golden-record")
            .collect();
        assert_eq!(visible[0].dependencies.len(), 1);
        assert!(resolve_edges(&visible).is_empty());
    }

    #[test]
    fn test_empty_view_has_no_edges() {
        assert!(resolve_edges(&[]).is_empty());
    }
}
