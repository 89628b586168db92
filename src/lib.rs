//! # ETL Monitor: interactive DAG view of ETL process flows
//!
//! Shows ETL process steps as cards on a zoomable, pannable canvas, grouped
//! into Ingestion, Transformation and Business lanes, with arrows from each
//! step to the steps that depend on it.
//!
//! ## Architecture
//!
//! - **Types**: node records, status and category enums, elapsed-time formatting
//! - **Fixture**: the built-in flow map and JSON fixture loading
//! - **Graph**: node store, process filter projection, dependency edges
//! - **Canvas**: viewport transform, gesture state machine, scene geometry
//! - **Frontend**: eframe/egui panels around the canvas
//!
//! Everything outside `frontend` is headless and unit-tested without a window.
//!
//! ## Configuration
//!
//! `config.toml` is read from the platform data directory under
//! `dev.etl-monitor`, or from `$ETL_MONITOR_CONFIG`:
//!
//! - **Linux**: `~/.local/share/dev.etl-monitor/`
//! - **macOS**: `~/Library/Application Support/dev.etl-monitor/`
//! - **Windows**: `%APPDATA%\dev.etl-monitor\`
//!
//! ## Example
//!
//! ```no_run
//! use etl_monitor::{CanvasInteraction, Fixture, NodeStore, ProcessFilter, ZoomDirection};
//!
//! let mut store = NodeStore::from_fixture(Fixture::builtin())?;
//! store.set_filter(ProcessFilter::Process("RaaS".into()));
//!
//! let mut canvas = CanvasInteraction::default();
//! canvas.wheel(egui::pos2(300.0, 200.0), ZoomDirection::In);
//! # Ok::<(), etl_monitor::MonitorError>(())
//! ```

pub mod canvas;
pub mod config;
pub mod error;
pub mod fixture;
pub mod frontend;
pub mod graph;
pub mod types;

// Re-export commonly used types
pub use canvas::{CanvasInteraction, GestureMode, PointerTarget, Viewport, ZoomDirection};
pub use config::MonitorConfig;
pub use error::{MonitorError, Result};
pub use fixture::Fixture;
pub use frontend::MonitorApp;
pub use graph::{resolve_edges, Edge, NodeStore, ProcessFilter};
pub use types::{Node, NodeCategory, NodeId, NodeStatus, PipelineLevel};
