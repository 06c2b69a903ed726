//! Records derived from a submission

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::intake::ClientIntake;

/// JSON body POSTed to the webhook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookPayload {
    #[serde(flatten)]
    pub intake: ClientIntake,
    pub timestamp: DateTime<Utc>,
    pub submitted_by: String,
    pub form_version: String,
}

impl WebhookPayload {
    /// Normalizes the intake and stamps submission metadata
    pub fn build(
        intake: &ClientIntake,
        submitted_by: &str,
        form_version: &str,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            intake: intake.normalized(),
            timestamp: at,
            submitted_by: submitted_by.to_string(),
            form_version: form_version.to_string(),
        }
    }
}

/// Entry in the rolling "recently added" list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentClient {
    pub name: String,
    pub email: String,
    pub service_type: String,
    pub timestamp: DateTime<Utc>,
}

impl From<&WebhookPayload> for RecentClient {
    fn from(payload: &WebhookPayload) -> Self {
        Self {
            name: payload.intake.name.clone(),
            email: payload.intake.email.clone(),
            service_type: payload.intake.service_type.clone(),
            timestamp: payload.timestamp,
        }
    }
}

/// Failed submission kept for manual recovery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingSubmission {
    #[serde(flatten)]
    pub intake: ClientIntake,
    /// When the attempt failed
    pub timestamp: DateTime<Utc>,
}
