//! Pointer gesture state machine for the canvas.
//!
//! One gesture is active at a time:
//!
//! ```text
//! Idle --pointer down on node-----> Dragging { node, grab_offset } --pointer up--> Idle
//! Idle --pointer down on canvas---> Panning { origin }             --pointer up--> Idle
//! ```
//!
//! A pointer-down while a gesture is active is ignored; the first gesture
//! wins until released. While a gesture is active the canvas captures the
//! pointer, so movement and release are observed even outside the canvas.

use egui::{Pos2, Vec2};

use crate::error::Result;
use crate::graph::NodeStore;
use crate::types::{Node, NodeId, WorldPos};

use super::viewport::{Viewport, ZoomDirection};

/// Current pointer gesture
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GestureMode {
    #[default]
    Idle,
    /// A node follows the pointer
    Dragging {
        node: NodeId,
        /// World-space offset from the node origin to the grab point
        grab_offset: Vec2,
    },
    /// The whole canvas follows the pointer
    Panning {
        /// `screen - pan` at the moment the pan began
        origin: Vec2,
    },
}

/// What a pointer-down landed on
#[derive(Debug, Clone, PartialEq)]
pub enum PointerTarget {
    Node(NodeId),
    Canvas,
}

/// Viewport plus gesture state; the single owner of canvas interaction
#[derive(Debug, Clone, Default)]
pub struct CanvasInteraction {
    viewport: Viewport,
    mode: GestureMode,
}

impl CanvasInteraction {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            mode: GestureMode::Idle,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn mode(&self) -> &GestureMode {
        &self.mode
    }

    /// Whether pointer movement and release must be observed globally
    pub fn captures_pointer(&self) -> bool {
        !matches!(self.mode, GestureMode::Idle)
    }

    /// The node being dragged, if any
    pub fn dragged_node(&self) -> Option<&NodeId> {
        match &self.mode {
            GestureMode::Dragging { node, .. } => Some(node),
            _ => None,
        }
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.mode, GestureMode::Panning { .. })
    }

    /// Route a pointer-down to the matching gesture
    ///
    /// Returns `true` if a gesture started.
    pub fn pointer_down(&mut self, target: PointerTarget, screen: Pos2, store: &NodeStore) -> bool {
        match target {
            PointerTarget::Node(id) => match store.get(&id) {
                Some(node) => self.begin_node_drag(node, screen),
                None => {
                    tracing::warn!("Pointer down on unknown node '{}'", id);
                    false
                }
            },
            PointerTarget::Canvas => self.begin_canvas_pan(screen),
        }
    }

    /// Continue whichever gesture is active
    ///
    /// A drag whose node no longer exists (e.g. after a fixture reload) is
    /// ended and the error returned.
    pub fn pointer_moved(&mut self, screen: Pos2, store: &mut NodeStore) -> Result<()> {
        match self.mode {
            GestureMode::Idle => Ok(()),
            GestureMode::Dragging { .. } => {
                let res = self.continue_node_drag(screen, store).map(|_| ());
                if res.is_err() {
                    self.end_node_drag();
                }
                res
            }
            GestureMode::Panning { .. } => {
                self.continue_canvas_pan(screen);
                Ok(())
            }
        }
    }

    /// Release ends any gesture
    pub fn pointer_up(&mut self) {
        match self.mode {
            GestureMode::Idle => {}
            GestureMode::Dragging { .. } => self.end_node_drag(),
            GestureMode::Panning { .. } => self.end_canvas_pan(),
        }
    }

    /// Zoom one wheel step around the pointer
    pub fn wheel(&mut self, screen: Pos2, direction: ZoomDirection) {
        self.viewport.apply_wheel(screen, direction);
    }

    /// Restore a viewport; leaves any active gesture running
    pub fn reset_viewport(&mut self, zoom: f32, pan: Vec2) {
        self.viewport.reset(zoom, pan);
    }

    // ==================== Node drag ====================

    /// Grab `node` at `screen`; ignored unless idle
    pub fn begin_node_drag(&mut self, node: &Node, screen: Pos2) -> bool {
        if self.captures_pointer() {
            return false;
        }
        let grab = self.viewport.to_world(screen);
        let origin: Pos2 = node.position.into();
        let grab_offset = grab - origin;
        tracing::debug!("Drag start on '{}' with offset {:?}", node.id, grab_offset);
        self.mode = GestureMode::Dragging {
            node: node.id.clone(),
            grab_offset,
        };
        true
    }

    /// Move the dragged node under the pointer
    ///
    /// Returns the stored (clamped) position, or `None` when no drag is active.
    pub fn continue_node_drag(
        &mut self,
        screen: Pos2,
        store: &mut NodeStore,
    ) -> Result<Option<WorldPos>> {
        let GestureMode::Dragging { node, grab_offset } = &self.mode else {
            return Ok(None);
        };
        let target = WorldPos::from(self.viewport.to_world(screen) - *grab_offset).clamped();
        store.set_position(node, target)?;
        Ok(Some(target))
    }

    pub fn end_node_drag(&mut self) {
        if let GestureMode::Dragging { node, .. } = &self.mode {
            tracing::debug!("Drag end on '{}'", node);
            self.mode = GestureMode::Idle;
        }
    }

    // ==================== Canvas pan ====================

    /// Start panning from `screen`; ignored unless idle
    pub fn begin_canvas_pan(&mut self, screen: Pos2) -> bool {
        if self.captures_pointer() {
            return false;
        }
        let origin = screen.to_vec2() - self.viewport.pan();
        tracing::debug!("Pan start at {:?}", screen);
        self.mode = GestureMode::Panning { origin };
        true
    }

    pub fn continue_canvas_pan(&mut self, screen: Pos2) {
        if let GestureMode::Panning { origin } = self.mode {
            self.viewport.set_pan(screen.to_vec2() - origin);
        }
    }

    pub fn end_canvas_pan(&mut self) {
        if self.is_panning() {
            tracing::debug!("Pan end at {:?}", self.viewport.pan());
            self.mode = GestureMode::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::viewport::ZoomLimits;
    use crate::fixture::Fixture;
    use egui::{pos2, vec2};
    use proptest::prelude::*;

    fn store() -> NodeStore {
        NodeStore::from_fixture(Fixture::builtin()).unwrap()
    }

    fn identity() -> CanvasInteraction {
        CanvasInteraction::new(Viewport::new(1.0, Vec2::ZERO, ZoomLimits::default()))
    }

    #[test]
    fn test_drag_example() {
        let mut store = store();
        let mut canvas = identity();
        let id = NodeId::from("ancillaries-atlas");

        assert!(canvas.pointer_down(PointerTarget::Node(id.clone()), pos2(480.0, 80.0), &store));
        canvas.pointer_moved(pos2(500.0, 80.0), &mut store).unwrap();

        assert_eq!(store.get(&id).unwrap().position, WorldPos::new(500.0, 80.0));
        canvas.pointer_up();
        assert_eq!(canvas.mode(), &GestureMode::Idle);
    }

    #[test]
    fn test_grab_offset_uses_viewport_at_grab_time() {
        let mut store = store();
        let mut canvas =
            CanvasInteraction::new(Viewport::new(0.5, vec2(100.0, 50.0), ZoomLimits::default()));
        let id = NodeId::from("raas");
        // raas is at (80, 150) -> screen (140, 125)
        canvas.pointer_down(PointerTarget::Node(id.clone()), pos2(150.0, 135.0), &store);

        match canvas.mode() {
            GestureMode::Dragging { grab_offset, .. } => {
                assert!((grab_offset.x - 20.0).abs() < 1e-3);
                assert!((grab_offset.y - 20.0).abs() < 1e-3);
            }
            other => panic!("unexpected mode {other:?}"),
        }

        canvas.pointer_moved(pos2(160.0, 135.0), &mut store).unwrap();
        assert_eq!(store.get(&id).unwrap().position, WorldPos::new(100.0, 150.0));
    }

    #[test]
    fn test_drag_clamps_to_zero() {
        let mut store = store();
        let mut canvas = identity();
        let id = NodeId::from("raas");
        canvas.pointer_down(PointerTarget::Node(id.clone()), pos2(90.0, 160.0), &store);
        canvas.pointer_moved(pos2(-300.0, -10.0), &mut store).unwrap();
        assert_eq!(store.get(&id).unwrap().position, WorldPos::new(0.0, 0.0));
    }

    #[test]
    fn test_pan_follows_pointer() {
        let mut store = store();
        let mut canvas =
            CanvasInteraction::new(Viewport::new(0.8, vec2(100.0, 50.0), ZoomLimits::default()));
        assert!(canvas.pointer_down(PointerTarget::Canvas, pos2(400.0, 300.0), &store));
        canvas.pointer_moved(pos2(430.0, 260.0), &mut store).unwrap();

        assert_eq!(canvas.viewport().pan(), vec2(130.0, 10.0));
        assert_eq!(canvas.viewport().zoom(), 0.8);
        canvas.pointer_up();
        assert!(!canvas.captures_pointer());
    }

    #[test]
    fn test_first_gesture_wins() {
        let mut store = store();
        let mut canvas = identity();
        assert!(canvas.pointer_down(PointerTarget::Canvas, pos2(10.0, 10.0), &store));
        assert!(!canvas.pointer_down(
            PointerTarget::Node(NodeId::from("raas")),
            pos2(90.0, 160.0),
            &store
        ));
        assert!(canvas.is_panning());

        canvas.pointer_moved(pos2(20.0, 10.0), &mut store).unwrap();
        assert_eq!(
            store.get(&NodeId::from("raas")).unwrap().position,
            WorldPos::new(80.0, 150.0)
        );
    }

    #[test]
    fn test_pointer_down_on_unknown_node_is_ignored() {
        let store = store();
        let mut canvas = identity();
        assert!(!canvas.pointer_down(PointerTarget::Node(NodeId::from("ghost")), Pos2::ZERO, &store));
        assert_eq!(canvas.mode(), &GestureMode::Idle);
    }

    #[test]
    fn test_drag_of_vanished_node_ends_gesture() {
        let store = store();
        let mut canvas = identity();
        canvas.pointer_down(PointerTarget::Node(NodeId::from("raas")), pos2(90.0, 160.0), &store);

        let mut replaced = NodeStore::default();
        assert!(canvas.pointer_moved(pos2(100.0, 160.0), &mut replaced).is_err());
        assert_eq!(canvas.mode(), &GestureMode::Idle);
        // Original store untouched
        assert_eq!(
            store.get(&NodeId::from("raas")).unwrap().position,
            WorldPos::new(80.0, 150.0)
        );
    }

    #[test]
    fn test_pointer_up_when_idle_is_noop() {
        let mut canvas = identity();
        canvas.pointer_up();
        assert_eq!(canvas.mode(), &GestureMode::Idle);
    }

    proptest! {
        #[test]
        fn test_drag_reproduces_pointer(
            zoom in 0.1f32..3.0,
            px in -300.0f32..300.0,
            py in -300.0f32..300.0,
            samples in prop::collection::vec((0.0f32..1600.0, 0.0f32..1000.0), 1..20),
        ) {
            let mut store = store();
            let mut canvas = CanvasInteraction::new(
                Viewport::new(zoom, vec2(px, py), ZoomLimits::default()),
            );
            let id = NodeId::from("golden-record");
            let node_screen = canvas.viewport().to_screen(pos2(630.0, 430.0));
            let grab = node_screen + vec2(12.0, 8.0);
            canvas.pointer_down(PointerTarget::Node(id.clone()), grab, &store);

            let GestureMode::Dragging { grab_offset, .. } = canvas.mode().clone() else {
                return Err(TestCaseError::fail("drag did not start"));
            };

            for (sx, sy) in samples {
                canvas.pointer_moved(pos2(sx, sy), &mut store).unwrap();
                let expected = canvas.viewport().to_world(pos2(sx, sy)) - grab_offset;
                let shown = store.get(&id).unwrap().position;
                prop_assert!((shown.x - expected.x.max(0.0)).abs() < 1e-2);
                prop_assert!((shown.y - expected.y.max(0.0)).abs() < 1e-2);
            }
        }

        #[test]
        fn test_positions_never_negative(
            moves in prop::collection::vec((-2000.0f32..2000.0, -2000.0f32..2000.0), 1..30),
        ) {
            let mut store = store();
            let mut canvas = identity();
            for (i, (x, y)) in moves.into_iter().enumerate() {
                let id = store.all()[i % store.total_len()].id.clone();
                let at: Pos2 = store.get(&id).unwrap().position.into();
                canvas.pointer_down(PointerTarget::Node(id), at + vec2(5.0, 5.0), &store);
                canvas.pointer_moved(pos2(x, y), &mut store).unwrap();
                canvas.pointer_up();
            }
            for node in store.all() {
                prop_assert!(node.position.x >= 0.0 && node.position.y >= 0.0);
            }
        }
    }
}
