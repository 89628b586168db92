//! Status bar panel: bottom bar showing the data source, zoom and error info.

use egui::{Color32, RichText, Ui};

use crate::canvas::GestureMode;

/// Context needed to render the status bar.
pub struct StatusBarContext<'a> {
    /// Fixture path, or `None` for the built-in flow map
    pub source: Option<&'a std::path::Path>,
    pub zoom: f32,
    pub pan: egui::Vec2,
    pub mode: &'a GestureMode,
    pub visible: usize,
    pub total: usize,
    pub last_error: Option<&'a str>,
}

/// Render the status bar.
pub fn render_status_bar(ui: &mut Ui, ctx: &StatusBarContext<'_>) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        // === Data source ===
        let source = match ctx.source {
            Some(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            None => "Built-in flow map".to_string(),
        };
        ui.label(RichText::new(source).small());

        ui.separator();

        ui.label(RichText::new(format!("Nodes: {}/{}", ctx.visible, ctx.total)).small());

        ui.separator();

        ui.label(RichText::new(format!("Zoom: {:.0}%", ctx.zoom * 100.0)).small());
        ui.label(
            RichText::new(format!("Pan: ({:.0}, {:.0})", ctx.pan.x, ctx.pan.y))
                .small()
                .color(Color32::GRAY),
        );

        // === Active gesture ===
        match ctx.mode {
            GestureMode::Idle => {}
            GestureMode::Dragging { node, .. } => {
                ui.separator();
                ui.label(RichText::new(format!("Moving {}", node)).small());
            }
            GestureMode::Panning { .. } => {
                ui.separator();
                ui.label(RichText::new("Panning").small());
            }
        }

        // === Error message (right-aligned) ===
        if let Some(error) = ctx.last_error {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.colored_label(Color32::RED, RichText::new(error).small());
            });
        }
    });
}
