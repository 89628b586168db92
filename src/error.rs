//! Error handling for the ETL monitor
//!
//! This module defines custom error types and a Result alias for use
//! throughout the application.

use thiserror::Error;

/// Main error type for ETL monitor operations
#[derive(Error, Debug)]
pub enum MonitorError {
    /// Errors related to configuration loading
    #[error("Configuration error: {0}")]
    Config(String),

    /// Errors related to fixture parsing
    #[error("Fixture error: {0}")]
    Fixture(String),

    /// Two nodes in one fixture share an identifier
    #[error("Duplicate node id '{0}'")]
    DuplicateNodeId(String),

    /// Operation referenced a node that is not in the node set
    #[error("Unknown node '{0}'")]
    UnknownNode(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<MonitorError>,
    },
}

impl MonitorError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        MonitorError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<toml::de::Error> for MonitorError {
    fn from(err: toml::de::Error) -> Self {
        MonitorError::Config(err.to_string())
    }
}

/// Result type alias for ETL monitor operations
pub type Result<T> = std::result::Result<T, MonitorError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<MonitorError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.into().with_context(f()))
    }
}
