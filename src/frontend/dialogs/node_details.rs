//! Node detail dialog
//!
//! Read-only view of one node: run times, elapsed duration, failure
//! detail and the prerequisites it waits on.

use super::{Dialog, DialogAction, DialogState, DialogWindowConfig};
use crate::frontend::widgets::{flow_color, ProcessTag, StatusIndicator};
use crate::graph::NodeStore;
use crate::types::{NodeId, NodeStatus, NOT_AVAILABLE};
use egui::{Color32, RichText, Ui};

/// Fallback shown for a failed node without an error message
pub const MISSING_ERROR_DETAIL: &str = "No error detail was recorded for this run.";

/// State for the node detail dialog
#[derive(Debug, Default)]
pub struct NodeDetailsState {
    /// The node being viewed
    pub node: Option<NodeId>,
}

impl DialogState for NodeDetailsState {}

impl NodeDetailsState {
    pub fn for_node(id: NodeId) -> Self {
        Self { node: Some(id) }
    }
}

/// Action from the node detail dialog
#[derive(Debug, Clone, PartialEq)]
pub enum NodeDetailsAction {
    /// Switch the dialog to a prerequisite
    ShowDependency(NodeId),
}

/// The node detail dialog
pub struct NodeDetailsDialog;

impl Dialog for NodeDetailsDialog {
    type State = NodeDetailsState;
    type Action = NodeDetailsAction;
    type Context<'a> = &'a NodeStore;

    fn title(state: &Self::State, store: &Self::Context<'_>) -> String {
        state
            .node
            .as_ref()
            .and_then(|id| store.get(id))
            .map(|n| n.name.clone())
            .unwrap_or_else(|| "Node Details".to_string())
    }

    fn window_config() -> DialogWindowConfig {
        DialogWindowConfig::centered_modal(420.0)
    }

    fn render(
        state: &mut Self::State,
        store: Self::Context<'_>,
        ui: &mut Ui,
    ) -> DialogAction<Self::Action> {
        let Some(node) = state.node.as_ref().and_then(|id| store.get(id)) else {
            return DialogAction::Close;
        };

        ui.horizontal(|ui| {
            ui.colored_label(flow_color(node.flow), "■");
            ui.label(format!(
                "{} • {} {}",
                node.process,
                node.category.glyph(),
                node.category.display_name()
            ));
        });

        ui.add_space(4.0);

        egui::Grid::new("node_details_grid")
            .num_columns(2)
            .spacing([10.0, 8.0])
            .show(ui, |ui| {
                ui.label("Status:");
                ui.add(StatusIndicator::for_status(node.status));
                ui.end_row();

                ui.label("Level:");
                ui.label(node.level.display_name());
                ui.end_row();

                ui.label("Start:");
                ui.label(
                    RichText::new(node.start_time.as_deref().unwrap_or(NOT_AVAILABLE)).monospace(),
                );
                ui.end_row();

                ui.label("End:");
                ui.label(
                    RichText::new(node.end_time.as_deref().unwrap_or(NOT_AVAILABLE)).monospace(),
                );
                ui.end_row();

                ui.label("Elapsed:");
                ui.label(RichText::new(node.elapsed_display()).monospace());
                ui.end_row();
            });

        if node.status == NodeStatus::Failed {
            ui.separator();
            ui.label(RichText::new("Error").strong().color(Color32::LIGHT_RED));
            let detail = node
                .error_detail
                .as_deref()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or(MISSING_ERROR_DETAIL);
            egui::Frame::new()
                .fill(Color32::from_rgb(239, 68, 68).gamma_multiply(0.15))
                .corner_radius(4.0)
                .inner_margin(egui::Margin::same(6))
                .show(ui, |ui| {
                    ui.label(RichText::new(detail).monospace().small());
                });
        }

        ui.separator();

        let mut action = DialogAction::None;

        ui.label(RichText::new(format!("Dependencies ({})", node.dependencies.len())).strong());
        if node.dependencies.is_empty() {
            ui.label(RichText::new("None").small().color(Color32::GRAY));
        }
        ui.horizontal_wrapped(|ui| {
            for dep in &node.dependencies {
                match store.get(dep) {
                    Some(target) => {
                        let tag = ui
                            .add(ProcessTag::new(dep.as_str()).color(flow_color(target.flow)))
                            .interact(egui::Sense::click())
                            .on_hover_text(&target.name);
                        if tag.clicked() {
                            action = DialogAction::Action(NodeDetailsAction::ShowDependency(
                                dep.clone(),
                            ));
                        }
                    }
                    None => {
                        ui.add(ProcessTag::new(dep.as_str()))
                            .on_hover_text("Not in the loaded node set");
                    }
                }
            }
        });

        ui.separator();

        ui.horizontal(|ui| {
            if ui.button("Close").clicked() {
                action = DialogAction::Close;
            }
        });

        action
    }
}
