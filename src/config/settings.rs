//! Canvas and UI settings
//!
//! These are the tunable parts of the `[canvas]` and `[ui]` sections of
//! `config.toml`. All fields have defaults, so a partial file is valid.
//!
//! # Example
//!
//! ```toml
//! [canvas]
//! initial_zoom = 0.5
//! initial_pan = [100.0, 50.0]
//! min_zoom = 0.1
//! max_zoom = 3.0
//! filter_transition_ms = 200
//!
//! [ui]
//! dark_mode = false
//! sidebar_collapsed = true
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::canvas::viewport::{
    Viewport, ZoomLimits, DEFAULT_PAN, DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM, ZOOM_IN_FACTOR,
    ZOOM_OUT_FACTOR,
};
use crate::graph::filter::DEFAULT_TRANSITION;

/// Viewport defaults and zoom behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    /// Zoom on startup and after "Reset view"
    pub initial_zoom: f32,
    /// Pan on startup and after "Reset view"
    pub initial_pan: [f32; 2],
    /// Narrows the zoom floor; values below 0.1 are raised to it
    pub min_zoom: f32,
    /// Narrows the zoom ceiling; values above 3.0 are lowered to it
    pub max_zoom: f32,
    /// Wheel step towards the user (> 1)
    pub zoom_in_factor: f32,
    /// Wheel step away from the user (< 1)
    pub zoom_out_factor: f32,
    /// Delay before a filter change is applied
    pub filter_transition_ms: u64,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            initial_zoom: DEFAULT_ZOOM,
            initial_pan: [DEFAULT_PAN.x, DEFAULT_PAN.y],
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_in_factor: ZOOM_IN_FACTOR,
            zoom_out_factor: ZOOM_OUT_FACTOR,
            filter_transition_ms: DEFAULT_TRANSITION.as_millis() as u64,
        }
    }
}

impl CanvasSettings {
    pub fn zoom_limits(&self) -> ZoomLimits {
        ZoomLimits::new(
            self.min_zoom,
            self.max_zoom,
            self.zoom_in_factor,
            self.zoom_out_factor,
        )
    }

    pub fn initial_pan(&self) -> egui::Vec2 {
        egui::vec2(self.initial_pan[0], self.initial_pan[1])
    }

    /// Viewport the canvas opens with
    pub fn initial_viewport(&self) -> Viewport {
        Viewport::new(self.initial_zoom, self.initial_pan(), self.zoom_limits())
    }

    pub fn transition_delay(&self) -> Duration {
        Duration::from_millis(self.filter_transition_ms)
    }
}

/// UI chrome preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiPreferences {
    /// Enable dark mode
    pub dark_mode: bool,
    /// Start with the side panel collapsed
    pub sidebar_collapsed: bool,
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            dark_mode: false,
            sidebar_collapsed: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_viewport() {
        let vp = CanvasSettings::default().initial_viewport();
        assert_eq!(vp.zoom(), 0.8);
        assert_eq!(vp.pan(), egui::vec2(100.0, 50.0));
    }

    #[test]
    fn test_initial_zoom_is_clamped() {
        let settings = CanvasSettings {
            initial_zoom: 10.0,
            ..Default::default()
        };
        assert_eq!(settings.initial_viewport().zoom(), MAX_ZOOM);
    }

    #[test]
    fn test_configured_limits_stay_in_fixed_range() {
        let settings: CanvasSettings =
            toml::from_str("min_zoom = 0.01\nmax_zoom = 10.0\ninitial_zoom = 0.2\n").unwrap();
        let mut vp = settings.initial_viewport();
        let anchor = egui::pos2(320.0, 240.0);

        let mut lowest = vp.zoom();
        for _ in 0..50 {
            vp.apply_wheel(anchor, crate::canvas::ZoomDirection::Out);
            lowest = lowest.min(vp.zoom());
        }
        let mut highest = vp.zoom();
        for _ in 0..100 {
            vp.apply_wheel(anchor, crate::canvas::ZoomDirection::In);
            highest = highest.max(vp.zoom());
        }

        assert_eq!(lowest, MIN_ZOOM);
        assert_eq!(highest, MAX_ZOOM);
    }

    #[test]
    fn test_transition_delay() {
        assert_eq!(
            CanvasSettings::default().transition_delay(),
            Duration::from_millis(200)
        );
    }
}
