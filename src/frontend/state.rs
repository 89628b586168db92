//! Shared state types for the frontend
//!
//! Panels receive borrowed views of the app state and return `AppAction`s
//! instead of mutating it directly. `MonitorApp::handle_action` is the only
//! place those actions are applied.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::graph::ProcessFilter;
use crate::types::{NodeId, PipelineLevel};

/// Actions that any panel can emit
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    // Filtering
    /// Start a transition to a new process filter
    SetFilter(ProcessFilter),
    /// Return to the unfiltered view
    ClearFilter,

    // Canvas
    /// Restore the configured zoom and pan
    ResetView,

    // Details
    /// Open the detail dialog for one node
    OpenNodeDetails(NodeId),

    // Side panel
    /// Collapse or expand the control panel
    ToggleSidebar,
    /// Expand or collapse one level in the hierarchy
    ToggleLevel(PipelineLevel),

    // Data source
    /// Replace the node set with a JSON fixture
    LoadFixture(PathBuf),
    /// Replace the node set with the built-in flow map
    LoadBuiltin,
}

/// Side panel state
#[derive(Debug, Clone, Default)]
pub struct SidebarState {
    pub collapsed: bool,
    /// Levels whose node lists are shown; all start folded
    pub expanded: HashSet<PipelineLevel>,
}

impl SidebarState {
    pub fn new(collapsed: bool) -> Self {
        Self {
            collapsed,
            expanded: HashSet::new(),
        }
    }

    pub fn toggle_level(&mut self, level: PipelineLevel) {
        if !self.expanded.remove(&level) {
            self.expanded.insert(level);
        }
    }

    pub fn is_expanded(&self, level: PipelineLevel) -> bool {
        self.expanded.contains(&level)
    }
}
