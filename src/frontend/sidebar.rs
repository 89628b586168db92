//! Control panel: the process hierarchy grouped by pipeline level.
//!
//! Lists the visible nodes under their level, followed by the failed ones.
//! Clicking a node opens its detail dialog; clicking a level header folds
//! its list.

use egui::{Color32, RichText, Ui};

use crate::frontend::state::{AppAction, SidebarState};
use crate::frontend::widgets::{status_color, StatusIndicator};
use crate::graph::NodeStore;
use crate::types::{NodeStatus, PipelineLevel};

/// Width of the expanded control panel
pub const SIDEBAR_WIDTH: f32 = 260.0;

/// Context needed to render the control panel.
pub struct SidebarContext<'a> {
    pub store: &'a NodeStore,
    pub state: &'a SidebarState,
}

/// Render the expanded control panel.
pub fn render_sidebar(ui: &mut Ui, ctx: &SidebarContext<'_>) -> Vec<AppAction> {
    let mut actions = Vec::new();

    ui.horizontal(|ui| {
        ui.heading("Control Panel");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.small_button("◀").on_hover_text("Collapse").clicked() {
                actions.push(AppAction::ToggleSidebar);
            }
        });
    });

    ui.separator();

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for &level in PipelineLevel::all() {
                render_level(ui, ctx, level, &mut actions);
            }

            ui.add_space(8.0);
            ui.separator();
            render_issues(ui, ctx, &mut actions);

            ui.add_space(8.0);
            ui.separator();
            render_legend(ui);
        });

    actions
}

/// Render the collapsed strip with a single expand button.
pub fn render_collapsed_sidebar(ui: &mut Ui) -> Vec<AppAction> {
    let mut actions = Vec::new();
    ui.vertical_centered(|ui| {
        if ui.small_button("▶").on_hover_text("Control Panel").clicked() {
            actions.push(AppAction::ToggleSidebar);
        }
    });
    actions
}

fn render_level(
    ui: &mut Ui,
    ctx: &SidebarContext<'_>,
    level: PipelineLevel,
    actions: &mut Vec<AppAction>,
) {
    let nodes = ctx.store.by_level(level);
    let expanded = ctx.state.is_expanded(level);
    let arrow = if expanded { "▼" } else { "▶" };

    let header = ui.selectable_label(
        false,
        RichText::new(format!("{} {} ({})", arrow, level.display_name(), nodes.len())).strong(),
    );
    if header.clicked() {
        actions.push(AppAction::ToggleLevel(level));
    }

    if !expanded {
        return;
    }

    ui.indent(("level", level.display_name()), |ui| {
        if nodes.is_empty() {
            ui.label(RichText::new("No nodes").small().color(Color32::GRAY));
        }
        for node in nodes {
            ui.horizontal(|ui| {
                ui.colored_label(status_color(node.status), "●");
                let row = ui
                    .selectable_label(false, &node.name)
                    .on_hover_text(format!("{} • {}", node.process, node.category.display_name()));
                if row.clicked() {
                    actions.push(AppAction::OpenNodeDetails(node.id.clone()));
                }
            });
        }
    });
}

fn render_issues(ui: &mut Ui, ctx: &SidebarContext<'_>, actions: &mut Vec<AppAction>) {
    let failed = ctx.store.failed();
    ui.label(RichText::new(format!("Critical Issues ({})", failed.len())).strong());

    if failed.is_empty() {
        ui.label(RichText::new("No issues detected").small().color(Color32::GRAY));
        return;
    }

    let color = status_color(NodeStatus::Failed);
    for node in failed {
        egui::Frame::new()
            .fill(color.gamma_multiply(0.12))
            .stroke(egui::Stroke::new(1.0, color))
            .corner_radius(4.0)
            .inner_margin(egui::Margin::symmetric(6, 4))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                let name = ui.selectable_label(false, RichText::new(&node.name).color(color));
                ui.label(
                    RichText::new(format!(
                        "{} • {}",
                        node.process,
                        node.category.display_name()
                    ))
                    .small(),
                );
                if name.clicked() {
                    actions.push(AppAction::OpenNodeDetails(node.id.clone()));
                }
            });
        ui.add_space(2.0);
    }
}

fn render_legend(ui: &mut Ui) {
    ui.label(RichText::new("Status").small().strong());
    for &status in NodeStatus::all() {
        ui.add(StatusIndicator::for_status(status));
    }
}
