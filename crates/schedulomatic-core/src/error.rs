//! Error types for the Schedulomatic suite.

use thiserror::Error;

/// Class directory (search backend) errors - surfaced to the user as toasts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    /// The directory rejected the search. `message` carries the structured
    /// error body when the backend provides one.
    #[error("Directory error: {detail}")]
    Backend {
        message: Option<String>,
        detail: String,
    },

    /// The directory did not answer in time.
    #[error("Directory timeout")]
    Timeout,

    /// Channel communication error.
    #[error("Channel error: {0}")]
    Channel(String),
}

impl DirectoryError {
    /// Message to show the user: the structured body when present, otherwise
    /// the raw error text.
    pub fn user_message(&self) -> String {
        match self {
            DirectoryError::Backend {
                message: Some(message),
                ..
            } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Scheduling backend errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// The user lacks the required permission set.
    #[error("Missing permissions")]
    NoPermission,

    /// The flow list could not be retrieved.
    #[error("Flow retrieval failed")]
    FlowRetrieval,

    /// The configured start time is already in the past.
    #[error("Start time has already passed")]
    StartTimePassed,

    /// Any other backend rejection, with an optional structured body.
    #[error("Scheduler error: {detail}")]
    Backend {
        message: Option<String>,
        detail: String,
    },
}

impl ScheduleError {
    /// Message to show the user: the structured body when present, otherwise
    /// the raw error text.
    pub fn user_message(&self) -> String {
        match self {
            ScheduleError::Backend {
                message: Some(message),
                ..
            } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No config directory found.
    #[error("Config directory not found")]
    NoConfigDir,

    /// IO error.
    #[error("IO error: {0}")]
    Io(String),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),
}
