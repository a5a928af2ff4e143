//! Error types shared across the crate

use std::path::PathBuf;

use thiserror::Error;

/// Rejected timer configuration changes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    /// The interval can only change while the timer is idle
    #[error("interval cannot change while the timer is active")]
    Active,
    #[error("interval must be between 1 second and 24 hours")]
    InvalidInterval,
}

/// Failures while loading, saving or validating preferences
#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("invalid interval {0:?}: expected a positive number of seconds")]
    InvalidInterval(String),
    #[error("failed to access preferences at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode preferences: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Failures while delivering a reminder
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("failed to execute {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{command} failed: {stderr}")]
    Failed { command: String, stderr: String },
}
