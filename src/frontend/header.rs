//! Header panel: title, status counts, the process filter and view controls.

use egui::{Color32, RichText, Ui};

use crate::frontend::state::AppAction;
use crate::frontend::widgets::{status_color, StatChip};
use crate::graph::{NodeStats, ProcessFilter};
use crate::types::NodeStatus;

/// Context needed to render the header.
pub struct HeaderContext<'a> {
    pub stats: NodeStats,
    /// Filter currently applied to the canvas
    pub applied: &'a ProcessFilter,
    /// Filter last chosen by the user; differs from `applied` mid-transition
    pub requested: &'a ProcessFilter,
    pub processes: &'a [String],
    pub visible: usize,
    pub total: usize,
    pub layouting: bool,
}

/// Render the header bar.
pub fn render_header(ui: &mut Ui, ctx: &HeaderContext<'_>) -> Vec<AppAction> {
    let mut actions = Vec::new();

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 6.0;

        ui.heading("ETL Flow Monitor");

        ui.separator();

        render_stats_group(ui, ctx.stats);

        ui.separator();

        render_filter_group(ui, ctx, &mut actions);

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .button("⟲ Reset view")
                .on_hover_text("Restore the initial zoom and pan")
                .clicked()
            {
                actions.push(AppAction::ResetView);
            }

            ui.menu_button("📂 Fixture", |ui| {
                if ui.button("Load fixture…").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Flow fixture", &["json"])
                        .pick_file()
                    {
                        actions.push(AppAction::LoadFixture(path));
                    }
                    ui.close();
                }
                if ui.button("Built-in flow map").clicked() {
                    actions.push(AppAction::LoadBuiltin);
                    ui.close();
                }
            });
        });
    });

    actions
}

fn render_stats_group(ui: &mut Ui, stats: NodeStats) {
    ui.add(StatChip::new(stats.total, "nodes", Color32::GRAY));
    for &status in NodeStatus::all() {
        let caption = match status {
            NodeStatus::Success => "ok",
            NodeStatus::Running => "running",
            NodeStatus::Failed => "failed",
            _ => "pending",
        };
        ui.add(StatChip::new(stats.count(status), caption, status_color(status)));
    }
}

fn render_filter_group(ui: &mut Ui, ctx: &HeaderContext<'_>, actions: &mut Vec<AppAction>) {
    ui.label("Process:");

    let mut selected = ctx.requested.clone();
    egui::ComboBox::from_id_salt("process_filter")
        .selected_text(filter_label(&selected))
        .width(160.0)
        .show_ui(ui, |ui| {
            ui.selectable_value(&mut selected, ProcessFilter::All, filter_label(&ProcessFilter::All));
            for process in ctx.processes {
                let option = ProcessFilter::Process(process.clone());
                ui.selectable_value(&mut selected, option, process);
            }
        });
    if &selected != ctx.requested {
        actions.push(AppAction::SetFilter(selected));
    }

    if !ctx.applied.is_all() {
        ui.label(
            RichText::new(format!("{} ({}/{})", ctx.applied, ctx.visible, ctx.total)).small(),
        );
        if ui.small_button("✖").on_hover_text("Clear filter").clicked() {
            actions.push(AppAction::ClearFilter);
        }
    }

    if ctx.layouting {
        ui.spinner();
    }
}

fn filter_label(filter: &ProcessFilter) -> String {
    match filter {
        ProcessFilter::All => "All processes".to_string(),
        ProcessFilter::Process(name) => name.clone(),
    }
}
