//! Frontend module for egui UI
//!
//! This module provides the main UI components using eframe/egui.
//!
//! # Architecture
//!
//! A fixed layout of panels around one canvas:
//! - Header (top): status counts, process filter, fixture and view controls
//! - Control panel (left, collapsible): process hierarchy by level
//! - Status bar (bottom): data source, zoom, last error
//! - Canvas (center): the DAG itself
//!
//! Panels return [`AppAction`]s which [`MonitorApp::handle_action`] applies.
//!
//! # Main Types
//!
//! - [`MonitorApp`] - Main application state implementing [`eframe::App`]

pub mod canvas_pane;
pub mod dialogs;
pub mod header;
pub mod sidebar;
pub mod state;
pub mod status_bar;
pub mod widgets;

pub use state::{AppAction, SidebarState};
pub use widgets::*;

use std::path::PathBuf;
use std::time::Duration;

use canvas_pane::{render_canvas, CanvasContext};
use dialogs::{show_dialog, NodeDetailsAction, NodeDetailsDialog, NodeDetailsState};
use header::{render_header, HeaderContext};
use sidebar::{render_collapsed_sidebar, render_sidebar, SidebarContext, SIDEBAR_WIDTH};
use status_bar::{render_status_bar, StatusBarContext};

use crate::canvas::CanvasInteraction;
use crate::config::MonitorConfig;
use crate::error::Result;
use crate::fixture::Fixture;
use crate::graph::{FilterTransitions, NodeStore, ProcessFilter};

/// Repaint interval while a filter transition is pending
const TRANSITION_REPAINT: Duration = Duration::from_millis(16);

/// Main application state for the ETL monitor
pub struct MonitorApp {
    config: MonitorConfig,

    // === Data ===
    store: NodeStore,
    /// Fixture the store was loaded from; `None` for the built-in map
    source: Option<PathBuf>,

    // === Canvas ===
    interaction: CanvasInteraction,
    transitions: FilterTransitions,
    /// Last filter chosen by the user, applied once its transition fires
    requested_filter: ProcessFilter,

    // === Chrome ===
    sidebar: SidebarState,
    last_error: Option<String>,

    // === Dialogs ===
    node_details_open: bool,
    node_details_state: NodeDetailsState,
}

impl MonitorApp {
    /// Create a new application instance
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: MonitorConfig,
        store: NodeStore,
        source: Option<PathBuf>,
    ) -> Self {
        if config.ui.dark_mode {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
        } else {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
        }

        Self::with_store(config, store, source)
    }

    /// Build the app state without a window; used by `new` and tests
    pub fn with_store(config: MonitorConfig, store: NodeStore, source: Option<PathBuf>) -> Self {
        let interaction = CanvasInteraction::new(config.canvas.initial_viewport());
        let transitions = FilterTransitions::new(config.canvas.transition_delay());
        let sidebar = SidebarState::new(config.ui.sidebar_collapsed);
        let requested_filter = store.filter().clone();

        Self {
            config,
            store,
            source,
            interaction,
            transitions,
            requested_filter,
            sidebar,
            last_error: None,
            node_details_open: false,
            node_details_state: NodeDetailsState::default(),
        }
    }

    pub fn store(&self) -> &NodeStore {
        &self.store
    }

    pub fn interaction(&self) -> &CanvasInteraction {
        &self.interaction
    }

    pub fn requested_filter(&self) -> &ProcessFilter {
        &self.requested_filter
    }

    pub fn sidebar(&self) -> &SidebarState {
        &self.sidebar
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Node shown in the detail dialog, if open
    pub fn details_node(&self) -> Option<&crate::types::NodeId> {
        if self.node_details_open {
            self.node_details_state.node.as_ref()
        } else {
            None
        }
    }

    /// Whether a filter change is still waiting to be applied
    pub fn is_layouting(&self) -> bool {
        self.transitions.is_active()
    }

    /// Apply every filter transition whose delay has elapsed
    ///
    /// Returns `true` if the visible set changed.
    pub fn apply_due_transitions(&mut self) -> bool {
        let due = self.transitions.poll();
        let changed = !due.is_empty();
        for filter in due {
            self.store.set_filter(filter);
        }
        changed
    }

    pub fn handle_action(&mut self, action: AppAction) {
        match action {
            AppAction::SetFilter(filter) => {
                self.requested_filter = filter.clone();
                self.transitions.request(filter);
            }
            AppAction::ClearFilter => {
                self.handle_action(AppAction::SetFilter(ProcessFilter::All));
            }
            AppAction::ResetView => {
                let canvas = &self.config.canvas;
                self.interaction
                    .reset_viewport(canvas.initial_zoom, canvas.initial_pan());
            }
            AppAction::OpenNodeDetails(id) => {
                if self.store.get(&id).is_some() {
                    self.node_details_state = NodeDetailsState::for_node(id);
                    self.node_details_open = true;
                } else {
                    tracing::warn!("No node '{}' to show", id);
                }
            }
            AppAction::ToggleSidebar => {
                self.sidebar.collapsed = !self.sidebar.collapsed;
            }
            AppAction::ToggleLevel(level) => {
                self.sidebar.toggle_level(level);
            }
            AppAction::LoadFixture(path) => {
                let result = Fixture::load(&path).and_then(NodeStore::from_fixture);
                self.replace_store(result, Some(path));
            }
            AppAction::LoadBuiltin => {
                let result = NodeStore::from_fixture(Fixture::builtin());
                self.replace_store(result, None);
            }
        }
    }

    /// Swap in a new node set, or keep the current one and report the error
    fn replace_store(&mut self, result: Result<NodeStore>, source: Option<PathBuf>) {
        match result {
            Ok(store) => {
                tracing::info!(
                    "Loaded {} nodes from {}",
                    store.total_len(),
                    source
                        .as_deref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "built-in flow map".to_string())
                );
                self.interaction.pointer_up();
                self.transitions = FilterTransitions::new(self.config.canvas.transition_delay());
                self.requested_filter = store.filter().clone();
                self.store = store;
                self.source = source;
                self.node_details_open = false;
                self.node_details_state = NodeDetailsState::default();
                self.last_error = None;
            }
            Err(e) => {
                tracing::error!("Failed to load fixture: {}", e);
                self.last_error = Some(e.to_string());
            }
        }
    }

    fn render_node_details(&mut self, ctx: &egui::Context) {
        if let Some(action) = show_dialog::<NodeDetailsDialog>(
            ctx,
            &mut self.node_details_open,
            &mut self.node_details_state,
            &self.store,
        ) {
            match action {
                NodeDetailsAction::ShowDependency(id) => {
                    self.handle_action(AppAction::OpenNodeDetails(id));
                }
            }
        }
    }
}

impl eframe::App for MonitorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_due_transitions();
        if self.transitions.is_active() {
            ctx.request_repaint_after(TRANSITION_REPAINT);
        }

        let mut actions = Vec::new();

        // Header
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            let header_ctx = HeaderContext {
                stats: self.store.stats(),
                applied: self.store.filter(),
                requested: &self.requested_filter,
                processes: self.store.processes(),
                visible: self.store.visible_len(),
                total: self.store.total_len(),
                layouting: self.transitions.is_active(),
            };
            actions.extend(render_header(ui, &header_ctx));
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            let viewport = self.interaction.viewport();
            let status_ctx = StatusBarContext {
                source: self.source.as_deref(),
                zoom: viewport.zoom(),
                pan: viewport.pan(),
                mode: self.interaction.mode(),
                visible: self.store.visible_len(),
                total: self.store.total_len(),
                last_error: self.last_error.as_deref(),
            };
            render_status_bar(ui, &status_ctx);
        });

        // Control panel
        if self.sidebar.collapsed {
            egui::SidePanel::left("control_panel_collapsed")
                .resizable(false)
                .exact_width(28.0)
                .show(ctx, |ui| {
                    actions.extend(render_collapsed_sidebar(ui));
                });
        } else {
            egui::SidePanel::left("control_panel")
                .default_width(SIDEBAR_WIDTH)
                .show(ctx, |ui| {
                    let sidebar_ctx = SidebarContext {
                        store: &self.store,
                        state: &self.sidebar,
                    };
                    actions.extend(render_sidebar(ui, &sidebar_ctx));
                });
        }

        // Canvas
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let mut canvas_ctx = CanvasContext {
                    store: &mut self.store,
                    interaction: &mut self.interaction,
                    layouting: self.transitions.is_active(),
                    last_error: &mut self.last_error,
                };
                actions.extend(render_canvas(ui, &mut canvas_ctx));
            });

        for action in actions {
            self.handle_action(action);
        }

        self.render_node_details(ctx);
    }
}
