//! Custom widgets for the ETL monitor UI
//!
//! # Widgets
//!
//! - [`StatusIndicator`] - Colored status dot with label
//! - [`StatChip`] - Count with a colored caption, used in the header
//! - [`ProcessTag`] - Rounded tag with a process or dependency name

use egui::{Color32, Response, RichText, Ui, Widget};

use crate::types::{FlowTag, NodeStatus};

/// Fill color for a status
pub fn status_color(status: NodeStatus) -> Color32 {
    match status {
        NodeStatus::Success => Color32::from_rgb(34, 197, 94),
        NodeStatus::Running => Color32::from_rgb(59, 130, 246),
        NodeStatus::Failed => Color32::from_rgb(239, 68, 68),
        NodeStatus::Pending | NodeStatus::Unknown => Color32::from_rgb(156, 163, 175),
    }
}

/// Accent color for a flow tag
pub fn flow_color(flow: FlowTag) -> Color32 {
    match flow {
        FlowTag::Yellow => Color32::from_rgb(234, 179, 8),
        FlowTag::Orange => Color32::from_rgb(249, 115, 22),
        FlowTag::Blue => Color32::from_rgb(59, 130, 246),
        FlowTag::Purple => Color32::from_rgb(168, 85, 247),
        FlowTag::Green => Color32::from_rgb(34, 197, 94),
        FlowTag::Pink => Color32::from_rgb(236, 72, 153),
        FlowTag::Black => Color32::from_rgb(31, 41, 55),
        FlowTag::Unknown => Color32::GRAY,
    }
}

/// A widget that displays a colored status indicator
pub struct StatusIndicator {
    color: Color32,
    label: String,
}

impl StatusIndicator {
    /// Create a new status indicator with the given color and label
    pub fn new(color: Color32, label: impl Into<String>) -> Self {
        Self {
            color,
            label: label.into(),
        }
    }

    /// Indicator for a node status
    pub fn for_status(status: NodeStatus) -> Self {
        Self::new(status_color(status), status.display_name())
    }
}

impl Widget for StatusIndicator {
    fn ui(self, ui: &mut Ui) -> Response {
        let response = ui.horizontal(|ui| {
            ui.colored_label(self.color, "●");
            ui.label(&self.label);
        });

        response.response
    }
}

/// Count with a caption, e.g. "17 OK"
pub struct StatChip {
    count: usize,
    caption: &'static str,
    color: Color32,
}

impl StatChip {
    pub fn new(count: usize, caption: &'static str, color: Color32) -> Self {
        Self {
            count,
            caption,
            color,
        }
    }
}

impl Widget for StatChip {
    fn ui(self, ui: &mut Ui) -> Response {
        egui::Frame::new()
            .stroke(egui::Stroke::new(1.0, self.color))
            .corner_radius(4.0)
            .inner_margin(egui::Margin::symmetric(6, 2))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing.x = 4.0;
                    ui.label(RichText::new(self.count.to_string()).strong());
                    ui.label(RichText::new(self.caption).small().color(self.color));
                });
            })
            .response
    }
}

/// Rounded tag showing a name
pub struct ProcessTag<'a> {
    text: &'a str,
    color: Color32,
}

impl<'a> ProcessTag<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            color: Color32::from_gray(120),
        }
    }

    pub fn color(mut self, color: Color32) -> Self {
        self.color = color;
        self
    }
}

impl Widget for ProcessTag<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        egui::Frame::new()
            .fill(self.color.gamma_multiply(0.2))
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(6, 1))
            .show(ui, |ui| {
                ui.label(RichText::new(self.text).small().monospace());
            })
            .response
    }
}
