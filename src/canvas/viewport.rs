//! Viewport transform between screen and world coordinates.
//!
//! Screen coordinates are pointer positions relative to the canvas origin
//! (top-left of the canvas rect). World coordinates are the untransformed
//! space node positions live in:
//!
//! ```text
//! world  = (screen - pan) / zoom
//! screen = world * zoom + pan
//! ```
//!
//! Every zoom change goes through [`Viewport::zoom_at`], which clamps first
//! and then recomputes the pan so the world point under the anchor stays put.

use egui::{Pos2, Vec2};

/// Lowest allowed zoom factor
pub const MIN_ZOOM: f32 = 0.1;
/// Highest allowed zoom factor
pub const MAX_ZOOM: f32 = 3.0;
/// Multiplicative step for one wheel notch towards the user
pub const ZOOM_IN_FACTOR: f32 = 1.1;
/// Multiplicative step for one wheel notch away from the user
pub const ZOOM_OUT_FACTOR: f32 = 0.9;

/// Zoom the canvas opens with
pub const DEFAULT_ZOOM: f32 = 0.8;
/// Pan the canvas opens with
pub const DEFAULT_PAN: Vec2 = Vec2::new(100.0, 50.0);

/// Direction of one wheel step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Direction for a vertical scroll delta (egui: positive = scroll up)
    pub fn from_scroll(delta_y: f32) -> Option<Self> {
        if delta_y > 0.0 {
            Some(ZoomDirection::In)
        } else if delta_y < 0.0 {
            Some(ZoomDirection::Out)
        } else {
            None
        }
    }
}

/// Bounds and step sizes for zooming
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLimits {
    min: f32,
    max: f32,
    in_factor: f32,
    out_factor: f32,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min: MIN_ZOOM,
            max: MAX_ZOOM,
            in_factor: ZOOM_IN_FACTOR,
            out_factor: ZOOM_OUT_FACTOR,
        }
    }
}

impl ZoomLimits {
    /// Build limits, repairing invalid values
    ///
    /// Configured bounds may only narrow the range; they are clamped into
    /// `[MIN_ZOOM, MAX_ZOOM]`.
    pub fn new(min: f32, max: f32, in_factor: f32, out_factor: f32) -> Self {
        let min = if min.is_finite() { min.clamp(MIN_ZOOM, MAX_ZOOM) } else { MIN_ZOOM };
        let max = if max.is_finite() { max.clamp(min, MAX_ZOOM) } else { MAX_ZOOM };
        let in_factor = if in_factor.is_finite() && in_factor > 1.0 {
            in_factor
        } else {
            ZOOM_IN_FACTOR
        };
        let out_factor = if out_factor.is_finite() && out_factor > 0.0 && out_factor < 1.0 {
            out_factor
        } else {
            ZOOM_OUT_FACTOR
        };
        Self {
            min,
            max,
            in_factor,
            out_factor,
        }
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn clamp(&self, zoom: f32) -> f32 {
        zoom.clamp(self.min, self.max)
    }

    pub fn factor(&self, direction: ZoomDirection) -> f32 {
        match direction {
            ZoomDirection::In => self.in_factor,
            ZoomDirection::Out => self.out_factor,
        }
    }
}

/// Zoom factor and pan offset of the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    zoom: f32,
    pan: Vec2,
    limits: ZoomLimits,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_ZOOM, DEFAULT_PAN, ZoomLimits::default())
    }
}

impl Viewport {
    pub fn new(zoom: f32, pan: Vec2, limits: ZoomLimits) -> Self {
        let zoom = if zoom.is_finite() { limits.clamp(zoom) } else { limits.clamp(DEFAULT_ZOOM) };
        Self { zoom, pan, limits }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    /// Map a canvas-relative screen point into world space
    pub fn to_world(&self, screen: Pos2) -> Pos2 {
        ((screen.to_vec2() - self.pan) / self.zoom).to_pos2()
    }

    /// Map a world point onto the canvas
    pub fn to_screen(&self, world: Pos2) -> Pos2 {
        (world.to_vec2() * self.zoom + self.pan).to_pos2()
    }

    /// Apply one wheel step anchored at `anchor`
    pub fn apply_wheel(&mut self, anchor: Pos2, direction: ZoomDirection) {
        let factor = self.limits.factor(direction);
        self.zoom_at(anchor, self.zoom * factor);
    }

    /// Set the zoom, keeping the world point under `anchor` stationary
    ///
    /// Zoom and pan are replaced together; the clamp is applied before the
    /// pan compensation uses the new zoom.
    pub fn zoom_at(&mut self, anchor: Pos2, target_zoom: f32) {
        if !target_zoom.is_finite() {
            return;
        }
        let new_zoom = self.limits.clamp(target_zoom);
        let ratio = new_zoom / self.zoom;
        let anchor = anchor.to_vec2();
        let new_pan = anchor - (anchor - self.pan) * ratio;

        tracing::trace!(
            "Zoom {:.3} -> {:.3}, pan {:?} -> {:?}",
            self.zoom,
            new_zoom,
            self.pan,
            new_pan
        );
        *self = Self {
            zoom: new_zoom,
            pan: new_pan,
            limits: self.limits,
        };
    }

    pub(crate) fn set_pan(&mut self, pan: Vec2) {
        self.pan = pan;
    }

    /// Return to the given zoom and pan
    pub fn reset(&mut self, zoom: f32, pan: Vec2) {
        *self = Self::new(zoom, pan, self.limits);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};
    use proptest::prelude::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() <= 1e-3 * (1.0 + a.abs().max(b.abs()))
    }

    #[test]
    fn test_wheel_in_example() {
        let mut vp = Viewport::new(0.5, vec2(100.0, 50.0), ZoomLimits::default());
        vp.apply_wheel(pos2(300.0, 200.0), ZoomDirection::In);

        assert!(approx(vp.zoom(), 0.55));
        assert!(approx(vp.pan().x, 80.0), "pan.x = {}", vp.pan().x);
        assert!(approx(vp.pan().y, 35.0), "pan.y = {}", vp.pan().y);
    }

    #[test]
    fn test_wheel_out_uses_smaller_factor() {
        let mut vp = Viewport::new(1.0, Vec2::ZERO, ZoomLimits::default());
        vp.apply_wheel(Pos2::ZERO, ZoomDirection::Out);
        assert!(approx(vp.zoom(), 0.9));
    }

    #[test]
    fn test_zoom_clamps_at_bounds() {
        let mut vp = Viewport::new(2.9, Vec2::ZERO, ZoomLimits::default());
        vp.apply_wheel(pos2(10.0, 10.0), ZoomDirection::In);
        assert_eq!(vp.zoom(), MAX_ZOOM);

        let mut vp = Viewport::new(0.105, Vec2::ZERO, ZoomLimits::default());
        vp.apply_wheel(pos2(10.0, 10.0), ZoomDirection::Out);
        assert_eq!(vp.zoom(), MIN_ZOOM);
    }

    #[test]
    fn test_clamped_zoom_keeps_anchor() {
        // Hitting the ceiling must not make the anchor drift
        let mut vp = Viewport::new(2.95, vec2(40.0, -20.0), ZoomLimits::default());
        let anchor = pos2(250.0, 130.0);
        let before = vp.to_world(anchor);
        vp.apply_wheel(anchor, ZoomDirection::In);
        let after = vp.to_world(anchor);
        assert!(approx(before.x, after.x) && approx(before.y, after.y));
    }

    #[test]
    fn test_round_trip_mapping() {
        let vp = Viewport::new(1.7, vec2(-30.0, 12.5), ZoomLimits::default());
        let world = pos2(480.0, 80.0);
        let back = vp.to_world(vp.to_screen(world));
        assert!(approx(back.x, world.x) && approx(back.y, world.y));
    }

    #[test]
    fn test_limits_repair_invalid_values() {
        let limits = ZoomLimits::new(0.0, -1.0, 0.5, 2.0);
        assert_eq!(limits.min(), MIN_ZOOM);
        assert_eq!(limits.max(), MIN_ZOOM);
        assert_eq!(limits.factor(ZoomDirection::In), ZOOM_IN_FACTOR);
        assert_eq!(limits.factor(ZoomDirection::Out), ZOOM_OUT_FACTOR);
    }

    #[test]
    fn test_limits_cannot_widen_range() {
        let limits = ZoomLimits::new(0.01, 10.0, ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR);
        assert_eq!(limits.min(), MIN_ZOOM);
        assert_eq!(limits.max(), MAX_ZOOM);

        let narrowed = ZoomLimits::new(0.5, 2.0, ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR);
        assert_eq!((narrowed.min(), narrowed.max()), (0.5, 2.0));

        let limits = ZoomLimits::new(f32::NAN, f32::INFINITY, ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR);
        assert_eq!((limits.min(), limits.max()), (MIN_ZOOM, MAX_ZOOM));
    }

    #[test]
    fn test_non_finite_zoom_is_ignored() {
        let mut vp = Viewport::default();
        vp.zoom_at(Pos2::ZERO, f32::NAN);
        assert_eq!(vp, Viewport::default());
    }

    fn direction() -> impl Strategy<Value = ZoomDirection> {
        prop_oneof![Just(ZoomDirection::In), Just(ZoomDirection::Out)]
    }

    proptest! {
        #[test]
        fn test_zoom_stays_in_range(
            start in 0.1f32..3.0,
            steps in prop::collection::vec(direction(), 1..60),
            ax in -2000.0f32..2000.0,
            ay in -2000.0f32..2000.0,
        ) {
            let mut vp = Viewport::new(start, Vec2::ZERO, ZoomLimits::default());
            for dir in steps {
                vp.apply_wheel(pos2(ax, ay), dir);
                prop_assert!(vp.zoom() >= MIN_ZOOM && vp.zoom() <= MAX_ZOOM);
            }
        }

        #[test]
        fn test_anchor_is_stationary(
            start in 0.1f32..3.0,
            px in -500.0f32..500.0,
            py in -500.0f32..500.0,
            ax in 0.0f32..1600.0,
            ay in 0.0f32..1000.0,
            dir in direction(),
        ) {
            let mut vp = Viewport::new(start, vec2(px, py), ZoomLimits::default());
            let anchor = pos2(ax, ay);
            let before = vp.to_world(anchor);
            vp.apply_wheel(anchor, dir);
            let after = vp.to_world(anchor);

            let tol = 1e-2 * (1.0 + before.x.abs().max(before.y.abs()));
            prop_assert!((before.x - after.x).abs() <= tol, "{:?} vs {:?}", before, after);
            prop_assert!((before.y - after.y).abs() <= tol, "{:?} vs {:?}", before, after);
        }
    }
}
