//! Node fixtures
//!
//! A fixture is the ordered node set plus the ordered list of distinct
//! process names offered by the filter selector. The built-in fixture is the
//! reference flow map; additional fixtures can be loaded from JSON:
//!
//! ```json
//! {
//!   "processes": ["RaaS"],
//!   "nodes": [
//!     { "id": "raas", "name": "RaaS", "type": "Lambda", "process": "RaaS",
//!       "status": "SUCCESS", "position": { "x": 80, "y": 150 },
//!       "dependencies": [], "level": "Ingesta" }
//!   ]
//! }
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MonitorError, Result, ResultExt};
use crate::types::{FlowTag, Node, NodeCategory, NodeId, NodeStatus, PipelineLevel, WorldPos};

/// Ordered node set and process list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub processes: Vec<String>,
    pub nodes: Vec<Node>,
}

impl Fixture {
    /// Load and validate a JSON fixture file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixture {}", path.display()))?;
        let fixture = Self::from_json(&content)
            .with_context(|| format!("Failed to load fixture {}", path.display()))?;
        tracing::info!(
            "Loaded fixture {:?}: {} nodes, {} processes",
            path,
            fixture.nodes.len(),
            fixture.processes.len()
        );
        Ok(fixture)
    }

    /// Parse and validate a JSON fixture document
    pub fn from_json(content: &str) -> Result<Self> {
        let mut fixture: Fixture = serde_json::from_str(content)
            .map_err(|e| MonitorError::Fixture(e.to_string()))?;
        fixture.normalize();
        fixture.validate()?;
        Ok(fixture)
    }

    /// Clamp positions and derive the process list when absent
    fn normalize(&mut self) {
        for node in &mut self.nodes {
            let clamped = node.position.clamped();
            if clamped != node.position {
                tracing::warn!("Node '{}' had a negative position, clamped to 0", node.id);
                node.position = clamped;
            }
        }

        if self.processes.is_empty() {
            let mut seen = HashSet::new();
            self.processes = self
                .nodes
                .iter()
                .filter(|n| seen.insert(n.process.as_str()))
                .map(|n| n.process.clone())
                .collect();
        }
    }

    /// Check id uniqueness; report dangling dependencies
    ///
    /// A dependency on an id outside the node set is not an error, the edge
    /// is simply never drawn.
    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !ids.insert(&node.id) {
                return Err(MonitorError::DuplicateNodeId(node.id.to_string()));
            }
        }

        for node in &self.nodes {
            for dep in &node.dependencies {
                if !ids.contains(dep) {
                    tracing::warn!("Node '{}' depends on unknown node '{}'", node.id, dep);
                }
            }
        }

        Ok(())
    }

    /// The reference flow map shipped with the application
    #[rustfmt::skip]
    pub fn builtin() -> Self {
        use FlowTag::*;
        use NodeCategory::*;
        use NodeStatus::*;
        use PipelineLevel::*;

        let nodes = vec![
            // RaaS: one ingestion fanning out to two transformations
            node("raas", "RaaS", Lambda, "RaaS", Success, ("06:00", "06:05"), (80.0, 150.0), &[], Ingestion, Yellow),
            node("ancillaries-atlas", "Ancillaries Atlas", Glue, "RaaS", Success, ("06:06", "06:15"), (480.0, 80.0), &["raas"], Transformation, Yellow),
            node("basefare-atlas", "BaseFare Atlas", Glue, "RaaS", Running, ("06:06", "06:15"), (480.0, 220.0), &["raas"], Transformation, Yellow),
            node("total-revenue-atlas", "Total Revenue Atlas", Emr, "RaaS", Pending, ("06:16", "06:25"), (920.0, 80.0), &["ancillaries-atlas"], Business, Yellow),
            node("total-sales-atlas", "Total Sales Atlas", Emr, "RaaS", Pending, ("06:16", "06:25"), (920.0, 220.0), &["basefare-atlas"], Business, Yellow),
            // MasterDB: two chained transformation columns
            node("masterdb", "MasterDB", Storage, "MasterDB", Success, ("06:00", "06:05"), (80.0, 500.0), &[], Ingestion, Orange),
            node("ancillaries-legado", "Ancillaries Legado", Glue, "MasterDB", Success, ("06:06", "06:15"), (380.0, 430.0), &["masterdb"], Transformation, Orange),
            node("basefare-legado", "BaseFare Legado", Glue, "MasterDB", Success, ("06:06", "06:15"), (380.0, 570.0), &["masterdb"], Transformation, Orange),
            node("golden-record", "Golden Record", Emr, "MasterDB", Running, ("06:16", "06:25"), (630.0, 430.0), &["ancillaries-legado"], Transformation, Orange),
            node("yayas-navifare", "YaYas (Navifare)", Lambda, "MasterDB", Success, ("06:16", "06:25"), (630.0, 570.0), &["basefare-legado"], Transformation, Orange),
            node("total-sales-legado", "Total Sales Legado", Emr, "MasterDB", Pending, ("06:26", "06:35"), (920.0, 430.0), &["golden-record"], Business, Orange),
            node("total-revenue-legado", "Total Revenue Legado", Emr, "MasterDB", Pending, ("06:26", "06:35"), (920.0, 570.0), &["yayas-navifare"], Business, Orange),
            // STFP
            node("stfp", "STFP", Lambda, "STFP", Success, ("06:00", "06:05"), (80.0, 780.0), &[], Ingestion, Blue),
            node("generic-report", "Generic Report", Glue, "STFP", Success, ("06:06", "06:15"), (480.0, 710.0), &["stfp"], Transformation, Blue),
            node("finance-atlas", "Finance Atlas", Emr, "STFP", Running, ("06:06", "06:15"), (480.0, 850.0), &["stfp"], Transformation, Blue),
            // Finance
            node("ingesta-finance", "Ingesta Finance", Lambda, "Finance", Success, ("06:00", "06:05"), (80.0, 990.0), &[], Ingestion, Purple),
            node("finance-pl-legado", "Finance P&L (legado)", Emr, "Finance", Failed, ("06:06", "06:15"), (480.0, 990.0), &["ingesta-finance"], Transformation, Purple),
            // YaYas
            node("yayas-main", "YaYas", Lambda, "YaYas", Success, ("06:00", "06:05"), (80.0, 1130.0), &[], Ingestion, Green),
            node("yayas-juniper", "YaYas (Juniper)", Glue, "YaYas", Success, ("06:06", "06:15"), (480.0, 1130.0), &["yayas-main"], Transformation, Green),
            // Smile
            node("smile", "Smile", Lambda, "Smile", Success, ("06:00", "06:05"), (80.0, 1270.0), &[], Ingestion, Pink),
            node("nps-fase-ii", "NPS Fase II", Emr, "Smile", Running, ("06:06", "06:15"), (480.0, 1270.0), &["smile"], Transformation, Pink),
            // NPS: ingestion only
            node("nps-fase-i", "NPS Fase I", Glue, "NPS", Success, ("06:00", "06:05"), (80.0, 1410.0), &[], Ingestion, Yellow),
            // Standalone systems: ingestion only
            node("storkjet", "Storkjet", Storage, "Standalone", Success, ("06:00", "06:05"), (80.0, 1550.0), &[], Ingestion, Black),
            node("teallium", "Teallium", Lambda, "Standalone", Success, ("06:00", "06:05"), (80.0, 1690.0), &[], Ingestion, Black),
            node("kambr", "Kambr", Functions, "Standalone", Running, ("06:00", "06:05"), (80.0, 1830.0), &[], Ingestion, Black),
            node("zendesk", "Zendesk", Lambda, "Standalone", Success, ("06:00", "06:05"), (80.0, 1970.0), &[], Ingestion, Black),
            node("helix", "Helix", Emr, "Standalone", Pending, ("06:00", "06:05"), (80.0, 2110.0), &[], Ingestion, Black),
            node("amplitude", "Amplitude", Storage, "Standalone", Success, ("06:00", "06:05"), (80.0, 2250.0), &[], Ingestion, Black),
        ];

        let processes = ["RaaS", "MasterDB", "STFP", "Finance", "YaYas", "Smile", "NPS", "Standalone"]
            .iter()
            .map(|p| p.to_string())
            .collect();

        Self { processes, nodes }
    }
}

const FIXTURE_DATE: &str = "2025-01-05";

#[allow(clippy::too_many_arguments)]
fn node(
    id: &str,
    name: &str,
    category: NodeCategory,
    process: &str,
    status: NodeStatus,
    (start, end): (&str, &str),
    (x, y): (f32, f32),
    dependencies: &[&str],
    level: PipelineLevel,
    flow: FlowTag,
) -> Node {
    Node {
        id: NodeId::new(id),
        name: name.to_string(),
        category,
        process: process.to_string(),
        status,
        start_time: Some(format!("{FIXTURE_DATE} {start}")),
        end_time: Some(format!("{FIXTURE_DATE} {end}")),
        position: WorldPos::new(x, y),
        dependencies: dependencies.iter().map(|d| NodeId::new(*d)).collect(),
        level,
        flow,
        error_detail: None,
    }
}
