//! Canvas interaction model
//!
//! Everything the canvas needs that does not touch egui's painter:
//!
//! - [`viewport`] - Zoom/pan transform between screen and world space
//! - [`gesture`] - Node drag and canvas pan state machine
//! - [`scene`] - Lane, card and edge geometry, hit testing

pub mod gesture;
pub mod scene;
pub mod viewport;

pub use gesture::{CanvasInteraction, GestureMode, PointerTarget};
pub use scene::{Scene, NODE_SIZE};
pub use viewport::{Viewport, ZoomDirection, ZoomLimits};
