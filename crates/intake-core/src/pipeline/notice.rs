//! User-facing notifications produced by the pipeline

use serde::{Deserialize, Serialize};

use crate::domain::{SubmitError, WebhookPayload};

use super::ReplayReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    Success,
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeAction {
    /// Re-send the payload that just failed
    Retry,
}

impl NoticeAction {
    pub fn label(&self) -> &'static str {
        match self {
            NoticeAction::Retry => "Retry",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
    pub action: Option<NoticeAction>,
}

impl Notice {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            description: description.into(),
            action: None,
        }
    }

    pub fn delivered(payload: &WebhookPayload) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: format!("{} added successfully", payload.intake.name),
            description: format!("Welcome email sent to {}", payload.intake.email),
            action: None,
        }
    }

    pub fn failed(error: &SubmitError) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: "Failed to save client".to_string(),
            description: error.to_string(),
            action: Some(NoticeAction::Retry),
        }
    }

    pub fn replayed(report: &ReplayReport) -> Self {
        let level = if report.remaining == 0 {
            NoticeLevel::Success
        } else {
            NoticeLevel::Warning
        };
        let description = match &report.last_error {
            Some(err) => format!("{} still pending: {}", report.remaining, err),
            None => format!("{} still pending", report.remaining),
        };
        Self {
            level,
            title: format!("Re-sent {} queued client(s)", report.delivered),
            description,
            action: None,
        }
    }
}
