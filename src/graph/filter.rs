//! Process filter and filter transitions.
//!
//! Changing the filter does not take effect immediately: each request starts
//! a timer and is applied when the timer fires, giving the canvas a short
//! "reorganizing" phase. Timers are never cancelled. Two requests in flight
//! both fire in request order, so the last request is what stays displayed.

use std::fmt;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;

use crate::types::Node;

/// Selector value meaning "no filter"
pub const ALL_PROCESSES: &str = "all";

/// Default delay before a requested filter is applied
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(200);

/// Which nodes are displayed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProcessFilter {
    #[default]
    All,
    /// Only nodes whose `process` equals the name
    Process(String),
}

impl ProcessFilter {
    /// Build from a selector value; `"all"` means no filter
    pub fn from_selector(value: &str) -> Self {
        if value == ALL_PROCESSES {
            ProcessFilter::All
        } else {
            ProcessFilter::Process(value.to_string())
        }
    }

    pub fn matches(&self, node: &Node) -> bool {
        match self {
            ProcessFilter::All => true,
            ProcessFilter::Process(name) => node.process == *name,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, ProcessFilter::All)
    }
}

impl fmt::Display for ProcessFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessFilter::All => f.write_str(ALL_PROCESSES),
            ProcessFilter::Process(name) => f.write_str(name),
        }
    }
}

struct PendingTransition {
    filter: ProcessFilter,
    timer: Receiver<Instant>,
}

/// In-flight filter changes waiting for their timers
pub struct FilterTransitions {
    delay: Duration,
    pending: Vec<PendingTransition>,
}

impl Default for FilterTransitions {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSITION)
    }
}

impl FilterTransitions {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Vec::new(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Start a transition to `filter`
    pub fn request(&mut self, filter: ProcessFilter) {
        tracing::debug!("Filter transition to '{}' requested", filter);
        let timer = crossbeam_channel::after(self.delay);
        self.pending.push(PendingTransition { filter, timer });
    }

    /// Whether any transition is still waiting
    pub fn is_active(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Take every transition whose timer has fired, in request order
    ///
    /// Stops at the first transition still waiting so a later request can
    /// never be applied before an earlier one.
    pub fn poll(&mut self) -> Vec<ProcessFilter> {
        let ready = self
            .pending
            .iter()
            .take_while(|t| t.timer.try_recv().is_ok())
            .count();
        self.pending.drain(..ready).map(|t| t.filter).collect()
    }
}
