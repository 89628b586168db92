//! Canvas pane for the flow DAG
//!
//! Paints lanes, the grid, dependency edges and node cards through the
//! viewport transform, and routes pointer input into [`CanvasInteraction`]:
//! - Wheel zooms around the pointer
//! - Press on a card drags it; press on empty canvas pans
//! - Double-click on a card opens its details
//!
//! While a gesture is active the pointer is tracked globally, so a drag keeps
//! following the pointer after it leaves the pane and ends on release anywhere.

use egui::{pos2, vec2, Align2, Color32, CursorIcon, FontId, Pos2, Rect, Sense, Shape, Stroke, Ui};

use crate::canvas::scene::{grid_lines, hit_test, node_rect, EdgeSegment, Lane, GRID_SPACING};
use crate::canvas::{CanvasInteraction, PointerTarget, Scene, Viewport, ZoomDirection, NODE_SIZE};
use crate::frontend::state::AppAction;
use crate::frontend::widgets::{flow_color, status_color};
use crate::graph::NodeStore;
use crate::types::{Node, NodeId, NodeStatus, PipelineLevel};

/// Overlay text while a filter transition is pending
pub const LAYOUTING_MESSAGE: &str = "Reorganizing Layout...";

/// Grid is hidden once its lines would be closer than this on screen
const MIN_GRID_SCREEN_SPACING: f32 = 8.0;

/// Card text is skipped below this zoom
const MIN_TEXT_ZOOM: f32 = 0.25;

/// Context needed to render the canvas.
pub struct CanvasContext<'a> {
    pub store: &'a mut NodeStore,
    pub interaction: &'a mut CanvasInteraction,
    /// A filter transition is pending
    pub layouting: bool,
    pub last_error: &'a mut Option<String>,
}

/// Render the canvas into all remaining space.
pub fn render_canvas(ui: &mut Ui, ctx: &mut CanvasContext<'_>) -> Vec<AppAction> {
    let mut actions = Vec::new();

    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
    let rect = response.rect;

    handle_input(ui, &response, ctx, &mut actions);

    let viewport = *ctx.interaction.viewport();
    let view = CanvasView { rect, viewport };
    let dark = ui.visuals().dark_mode;

    painter.rect_filled(rect, 0.0, ui.visuals().extreme_bg_color);
    paint_grid(&painter, &view, ui.visuals().faint_bg_color);

    let scene = Scene::build(ctx.store.visible());
    for lane in &scene.lanes {
        paint_lane(&painter, &view, lane, dark);
    }
    for segment in &scene.edges {
        paint_edge(&painter, &view, segment);
    }
    let dragged = ctx.interaction.dragged_node();
    for node in &scene.cards {
        paint_card(ui, &painter, &view, node, dragged == Some(&node.id));
    }

    if ctx.layouting {
        painter.rect_filled(rect, 0.0, Color32::from_black_alpha(110));
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            LAYOUTING_MESSAGE,
            FontId::proportional(20.0),
            Color32::WHITE,
        );
    }

    actions
}

/// Pane rect plus the viewport, for mapping world points onto the window
#[derive(Clone, Copy)]
struct CanvasView {
    rect: Rect,
    viewport: Viewport,
}

impl CanvasView {
    fn to_screen(&self, world: Pos2) -> Pos2 {
        self.rect.min + self.viewport.to_screen(world).to_vec2()
    }

    fn to_screen_rect(&self, world: Rect) -> Rect {
        Rect::from_min_max(self.to_screen(world.min), self.to_screen(world.max))
    }

    fn zoom(&self) -> f32 {
        self.viewport.zoom()
    }
}

// ==================== Input ====================

fn handle_input(
    ui: &Ui,
    response: &egui::Response,
    ctx: &mut CanvasContext<'_>,
    actions: &mut Vec<AppAction>,
) {
    let origin = response.rect.min;
    let to_local = |p: Pos2| (p - origin).to_pos2();

    let (scroll, pressed, down, latest) = ui.input(|i| {
        (
            i.raw_scroll_delta.y,
            i.pointer.primary_pressed(),
            i.pointer.primary_down(),
            i.pointer.latest_pos(),
        )
    });
    let hover = response.hover_pos().map(to_local);

    if let (Some(anchor), Some(direction)) = (hover, ZoomDirection::from_scroll(scroll)) {
        ctx.interaction.wheel(anchor, direction);
    }

    if response.double_clicked() {
        if let Some(id) = response
            .interact_pointer_pos()
            .and_then(|p| pick(ctx.store, ctx.interaction.viewport(), to_local(p)))
        {
            actions.push(AppAction::OpenNodeDetails(id));
        }
    }

    if pressed && !ctx.interaction.captures_pointer() {
        if let Some(local) = hover {
            let target = pick(ctx.store, ctx.interaction.viewport(), local)
                .map(PointerTarget::Node)
                .unwrap_or(PointerTarget::Canvas);
            ctx.interaction.pointer_down(target, local, ctx.store);
        }
    }

    if ctx.interaction.captures_pointer() {
        if let Some(pos) = latest {
            if let Err(e) = ctx.interaction.pointer_moved(to_local(pos), ctx.store) {
                tracing::warn!("Canvas gesture aborted: {}", e);
                *ctx.last_error = Some(e.to_string());
            }
        }
        if !down {
            ctx.interaction.pointer_up();
        }
    }

    let icon = if ctx.interaction.captures_pointer() {
        Some(CursorIcon::Grabbing)
    } else if hover
        .and_then(|p| pick(ctx.store, ctx.interaction.viewport(), p))
        .is_some()
    {
        Some(CursorIcon::Grab)
    } else {
        None
    };
    if let Some(icon) = icon {
        ui.ctx().set_cursor_icon(icon);
    }
}

/// Topmost visible node under a canvas-relative point
fn pick(store: &NodeStore, viewport: &Viewport, local: Pos2) -> Option<NodeId> {
    hit_test(&store.visible(), viewport.to_world(local)).map(|n| n.id.clone())
}

// ==================== Painting ====================

fn paint_grid(painter: &egui::Painter, view: &CanvasView, color: Color32) {
    if GRID_SPACING * view.zoom() < MIN_GRID_SCREEN_SPACING {
        return;
    }
    let rect = view.rect;
    let world = Rect::from_min_max(
        view.viewport.to_world(Pos2::ZERO),
        view.viewport.to_world(rect.size().to_pos2()),
    );
    let stroke = Stroke::new(1.0, color);
    let (xs, ys) = grid_lines(world);
    for x in xs {
        let sx = view.to_screen(pos2(x, 0.0)).x;
        painter.line_segment([pos2(sx, rect.top()), pos2(sx, rect.bottom())], stroke);
    }
    for y in ys {
        let sy = view.to_screen(pos2(0.0, y)).y;
        painter.line_segment([pos2(rect.left(), sy), pos2(rect.right(), sy)], stroke);
    }
}

fn lane_color(level: PipelineLevel, dark: bool) -> Color32 {
    let base = match level {
        PipelineLevel::Ingestion => Color32::from_rgb(59, 130, 246),
        PipelineLevel::Transformation => Color32::from_rgb(168, 85, 247),
        PipelineLevel::Business => Color32::from_rgb(34, 197, 94),
    };
    base.gamma_multiply(if dark { 0.12 } else { 0.08 })
}

fn paint_lane(painter: &egui::Painter, view: &CanvasView, lane: &Lane, dark: bool) {
    let zoom = view.zoom();
    let color = lane_color(lane.level, dark);
    painter.rect_filled(view.to_screen_rect(lane.rect), 0.0, color);
    painter.text(
        view.to_screen(lane.label_pos),
        Align2::CENTER_CENTER,
        lane.level.display_name().to_uppercase(),
        FontId::proportional((18.0 * zoom).max(1.0)),
        color.to_opaque().gamma_multiply(0.8),
    );
}

fn paint_edge(painter: &egui::Painter, view: &CanvasView, segment: &EdgeSegment<'_>) {
    let zoom = view.zoom();
    let start = view.to_screen(segment.start);
    let end = view.to_screen(segment.end);
    let color = match segment.edge.from.status {
        NodeStatus::Success => Color32::from_gray(140),
        other => status_color(other),
    };
    let stroke = Stroke::new((2.0 * zoom).max(1.0), color);
    painter.line_segment([start, end], stroke);

    let delta = end - start;
    if delta.length() <= f32::EPSILON {
        return;
    }
    let dir = delta.normalized();
    let size = (10.0 * zoom).max(3.0);
    let back = end - dir * size;
    let side = dir.rot90() * size * 0.5;
    painter.add(Shape::convex_polygon(
        vec![end, back + side, back - side],
        color,
        Stroke::NONE,
    ));
}

fn paint_card(ui: &Ui, painter: &egui::Painter, view: &CanvasView, node: &Node, dragged: bool) {
    let zoom = view.zoom();
    let rect = view.to_screen_rect(node_rect(node));
    if !rect.intersects(view.rect) {
        return;
    }

    let visuals = ui.visuals();
    let accent = status_color(node.status);
    let radius = 8.0 * zoom;
    let border = zoom * if dragged { 3.0 } else { 1.5 };

    painter.rect_filled(rect, radius, visuals.window_fill);
    let flow_bar = Rect::from_min_size(rect.min, vec2(6.0 * zoom, rect.height()));
    painter.rect_filled(flow_bar, radius, flow_color(node.flow));
    painter.rect_stroke(
        rect,
        radius,
        Stroke::new(border.max(1.0), accent),
        egui::StrokeKind::Inside,
    );

    if zoom < MIN_TEXT_ZOOM {
        return;
    }

    let text_color = visuals.strong_text_color();
    let weak_color = visuals.weak_text_color();
    let inset = |x: f32, y: f32| rect.min + vec2(x, y) * zoom;

    let name = painter.layout(
        node.name.clone(),
        FontId::proportional(15.0 * zoom),
        text_color,
        (NODE_SIZE.x - 28.0) * zoom,
    );
    painter.galley(inset(16.0, 10.0), name, text_color);

    painter.text(
        inset(16.0, 52.0),
        Align2::LEFT_TOP,
        format!("{} {} • {}", node.category.glyph(), node.category.display_name(), node.process),
        FontId::proportional(11.0 * zoom),
        weak_color,
    );

    // Status chip
    let chip = Rect::from_min_size(inset(16.0, 84.0), vec2(80.0, 22.0) * zoom);
    painter.rect_filled(chip, 11.0 * zoom, accent.gamma_multiply(0.25));
    painter.text(
        chip.center(),
        Align2::CENTER_CENTER,
        node.status.display_name(),
        FontId::monospace(10.0 * zoom),
        accent,
    );

    painter.text(
        inset(NODE_SIZE.x - 14.0, 95.0),
        Align2::RIGHT_CENTER,
        format!("⏱ {}", node.elapsed_display()),
        FontId::monospace(10.0 * zoom),
        weak_color,
    );
}
