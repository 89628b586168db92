//! Scene geometry in world space.
//!
//! Lanes, node cards, edge anchors and the background grid are all laid
//! out in world coordinates; the canvas pane maps them through the
//! viewport when painting. Node positions are trusted as given; nothing
//! here checks that a node sits inside its level's lane.

use egui::{pos2, vec2, Pos2, Rect, Vec2};

use crate::graph::{resolve_edges, Edge};
use crate::types::{Node, PipelineLevel};

/// Size of a node card
pub const NODE_SIZE: Vec2 = Vec2::new(240.0, 120.0);

/// Spacing of the background grid
pub const GRID_SPACING: f32 = 20.0;

/// Height of the lane backgrounds
pub const LANE_HEIGHT: f32 = 3000.0;

/// Vertical position of the lane captions
const LANE_LABEL_Y: f32 = 30.0;

/// Background band for one pipeline level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lane {
    pub level: PipelineLevel,
    pub rect: Rect,
    pub label_pos: Pos2,
}

impl Lane {
    fn new(level: PipelineLevel, x: f32, width: f32) -> Self {
        Self {
            level,
            rect: Rect::from_min_size(pos2(x, 0.0), vec2(width, LANE_HEIGHT)),
            label_pos: pos2(x + width * 0.5, LANE_LABEL_Y),
        }
    }
}

/// The three lanes, left to right
pub fn lanes() -> [Lane; 3] {
    [
        Lane::new(PipelineLevel::Ingestion, 30.0, 320.0),
        Lane::new(PipelineLevel::Transformation, 350.0, 530.0),
        Lane::new(PipelineLevel::Business, 880.0, 400.0),
    ]
}

/// World-space rectangle of a node card
pub fn node_rect(node: &Node) -> Rect {
    Rect::from_min_size(node.position.into(), NODE_SIZE)
}

/// A connector between two cards, in world space
#[derive(Debug, Clone, Copy)]
pub struct EdgeSegment<'a> {
    pub edge: Edge<'a>,
    /// Exit point on the prerequisite card
    pub start: Pos2,
    /// Entry point on the dependent card; carries the arrowhead
    pub end: Pos2,
}

impl<'a> EdgeSegment<'a> {
    pub fn new(edge: Edge<'a>) -> Self {
        let from: Pos2 = edge.from.position.into();
        let to: Pos2 = edge.to.position.into();
        Self {
            edge,
            start: from + vec2(NODE_SIZE.x * 0.5, NODE_SIZE.y * 0.5),
            end: to + vec2(0.0, NODE_SIZE.y * 0.5),
        }
    }
}

/// Everything the canvas draws, back to front
#[derive(Debug, Clone)]
pub struct Scene<'a> {
    pub lanes: [Lane; 3],
    pub edges: Vec<EdgeSegment<'a>>,
    /// Cards in draw order; later cards are on top
    pub cards: Vec<&'a Node>,
}

impl<'a> Scene<'a> {
    pub fn build(visible: Vec<&'a Node>) -> Self {
        let edges = resolve_edges(&visible)
            .into_iter()
            .map(EdgeSegment::new)
            .collect();
        Self {
            lanes: lanes(),
            edges,
            cards: visible,
        }
    }

    /// Topmost card containing the world point
    pub fn hit_test(&self, world: Pos2) -> Option<&'a Node> {
        hit_test(&self.cards, world)
    }
}

/// Topmost (last drawn) node whose card contains `world`
pub fn hit_test<'a>(cards: &[&'a Node], world: Pos2) -> Option<&'a Node> {
    cards
        .iter()
        .rev()
        .find(|n| node_rect(n).contains(world))
        .copied()
}

/// Grid line coordinates covering a world-space rectangle
///
/// Returns the x positions of vertical lines and the y positions of
/// horizontal lines, aligned to multiples of [`GRID_SPACING`].
pub fn grid_lines(world_view: Rect) -> (Vec<f32>, Vec<f32>) {
    fn steps(min: f32, max: f32) -> Vec<f32> {
        if !(min.is_finite() && max.is_finite()) || max < min {
            return Vec::new();
        }
        let first = (min / GRID_SPACING).floor() as i64;
        let last = (max / GRID_SPACING).ceil() as i64;
        (first..=last).map(|i| i as f32 * GRID_SPACING).collect()
    }
    (
        steps(world_view.min.x, world_view.max.x),
        steps(world_view.min.y, world_view.max.y),
    )
}
