//! Core data types for the ETL monitor
//!
//! This module contains the fundamental data structures used throughout
//! the application for representing process nodes and their metadata.
//!
//! # Main Types
//!
//! - [`Node`] - One ETL process step (status, category, position, dependencies)
//! - [`NodeId`] - Unique string identifier of a node
//! - [`NodeCategory`] - Execution engine kind (Glue, EMR, Lambda, ...)
//! - [`NodeStatus`] - Lifecycle status of the last run
//! - [`PipelineLevel`] - One of the three ordered pipeline stages
//! - [`WorldPos`] - Untransformed canvas coordinates of a node
//!
//! # Unknown values
//!
//! Category, status and flow tags deserialize unrecognized strings into an
//! `Unknown` variant instead of failing, so a fixture produced by a newer
//! scheduler still loads and renders with the default treatment.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier of a node within the full node set
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Execution engine that runs a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum NodeCategory {
    Glue,
    #[serde(rename = "EMR")]
    Emr,
    Lambda,
    Storage,
    Functions,
    /// Any category this build does not know about
    #[default]
    #[serde(other)]
    Unknown,
}

impl NodeCategory {
    /// Label shown on node cards
    pub fn display_name(&self) -> &'static str {
        match self {
            NodeCategory::Glue => "Glue",
            NodeCategory::Emr => "EMR",
            NodeCategory::Lambda => "Lambda",
            NodeCategory::Storage => "Storage",
            NodeCategory::Functions => "Functions",
            NodeCategory::Unknown => "Unknown",
        }
    }

    /// Short glyph drawn next to the category label
    pub fn glyph(&self) -> &'static str {
        match self {
            NodeCategory::Glue | NodeCategory::Storage => "🗄",
            NodeCategory::Lambda | NodeCategory::Functions => "λ",
            NodeCategory::Emr | NodeCategory::Unknown => "⚙",
        }
    }
}

/// Lifecycle status of a node's most recent run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum NodeStatus {
    Success,
    Running,
    Failed,
    #[default]
    Pending,
    /// Any status this build does not know about
    #[serde(other)]
    Unknown,
}

impl NodeStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            NodeStatus::Success => "SUCCESS",
            NodeStatus::Running => "RUNNING",
            NodeStatus::Failed => "FAILED",
            NodeStatus::Pending => "PENDING",
            NodeStatus::Unknown => "UNKNOWN",
        }
    }

    pub fn all() -> &'static [NodeStatus] {
        &[
            NodeStatus::Success,
            NodeStatus::Running,
            NodeStatus::Failed,
            NodeStatus::Pending,
        ]
    }
}

/// Ordered pipeline stage; determines the lane a node is drawn in
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum PipelineLevel {
    #[default]
    #[serde(rename = "Ingesta", alias = "Ingestion")]
    Ingestion,
    #[serde(rename = "Transformación", alias = "Transformation")]
    Transformation,
    #[serde(rename = "Business")]
    Business,
}

impl PipelineLevel {
    pub fn display_name(&self) -> &'static str {
        match self {
            PipelineLevel::Ingestion => "Ingestion",
            PipelineLevel::Transformation => "Transformation",
            PipelineLevel::Business => "Business",
        }
    }

    /// All levels in pipeline order
    pub fn all() -> &'static [PipelineLevel] {
        &[
            PipelineLevel::Ingestion,
            PipelineLevel::Transformation,
            PipelineLevel::Business,
        ]
    }
}

/// Colour family of the flow a node belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FlowTag {
    Yellow,
    Orange,
    Blue,
    Purple,
    Green,
    Pink,
    Black,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Position in world (untransformed canvas) coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
}

impl WorldPos {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Clamp both axes to a minimum of zero
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.max(0.0),
            y: self.y.max(0.0),
        }
    }
}

impl From<WorldPos> for egui::Pos2 {
    fn from(p: WorldPos) -> Self {
        egui::pos2(p.x, p.y)
    }
}

impl From<egui::Pos2> for WorldPos {
    fn from(p: egui::Pos2) -> Self {
        Self { x: p.x, y: p.y }
    }
}

/// One ETL process step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    #[serde(rename = "type", default)]
    pub category: NodeCategory,
    pub process: String,
    #[serde(default)]
    pub status: NodeStatus,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    pub position: WorldPos,
    /// Prerequisite node ids, in declaration order
    #[serde(default)]
    pub dependencies: Vec<NodeId>,
    #[serde(default)]
    pub level: PipelineLevel,
    #[serde(default)]
    pub flow: FlowTag,
    #[serde(default)]
    pub error_detail: Option<String>,
}

impl Node {
    /// Elapsed run time between start and end, if both parse
    pub fn elapsed(&self) -> Option<chrono::Duration> {
        elapsed(self.start_time.as_deref(), self.end_time.as_deref())
    }

    /// Elapsed run time formatted as `"{m}m {s}s"`, or `"N/A"`
    pub fn elapsed_display(&self) -> String {
        format_elapsed(self.elapsed())
    }
}

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

/// Placeholder for a missing time or duration
pub const NOT_AVAILABLE: &str = "N/A";

/// Parse a fixture timestamp.
///
/// Accepts `YYYY-MM-DD HH:MM[:SS]`, the same with a `T` separator, and
/// RFC 3339. Timestamps without an offset are treated as naive local time.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

/// Absolute difference between two timestamps; `None` if either is missing or malformed
pub fn elapsed(start: Option<&str>, end: Option<&str>) -> Option<chrono::Duration> {
    let start = parse_timestamp(start?)?;
    let end = parse_timestamp(end?)?;
    Some((end - start).abs())
}

/// Format an elapsed duration as `"{minutes}m {seconds}s"`
pub fn format_elapsed(elapsed: Option<chrono::Duration>) -> String {
    match elapsed {
        Some(d) => {
            let secs = d.num_seconds();
            format!("{}m {}s", secs / 60, secs % 60)
        }
        None => NOT_AVAILABLE.to_string(),
    }
}
