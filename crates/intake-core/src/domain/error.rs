//! Submission errors

use thiserror::Error;

/// Why a submission attempt failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// No webhook endpoint configured
    #[error("Webhook URL not configured. Set INTAKE_WEBHOOK_URL or webhook_url in intake.json.")]
    Configuration,

    /// Endpoint answered outside the success range
    #[error("Webhook returned {status}: {reason}")]
    Status { status: u16, reason: String },

    /// Request never completed
    #[error("Network error: {0}")]
    Network(String),
}

/// Coarse classification used for notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Transport,
}

impl SubmitError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SubmitError::Configuration => ErrorKind::Configuration,
            SubmitError::Status { .. } | SubmitError::Network(_) => ErrorKind::Transport,
        }
    }
}
