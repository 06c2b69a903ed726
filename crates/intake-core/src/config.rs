//! Intake configuration shared between the desktop host and the frontend.

use serde::{Deserialize, Serialize};

pub const DEFAULT_SUBMITTED_BY: &str = "staff_user";
pub const DEFAULT_FORM_VERSION: &str = "staff_v1";

/// Resolved intake settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    /// Outbound webhook receiving new-client payloads
    pub webhook_url: Option<String>,
    /// Optional duplicate-lookup backend
    pub duplicate_lookup_url: Option<String>,
    /// Where "View Existing Client" and the dashboard button point
    pub dashboard_url: Option<String>,
    pub submitted_by: String,
    pub form_version: String,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            duplicate_lookup_url: None,
            dashboard_url: None,
            submitted_by: DEFAULT_SUBMITTED_BY.to_string(),
            form_version: DEFAULT_FORM_VERSION.to_string(),
        }
    }
}

impl IntakeConfig {
    /// Webhook endpoint, ignoring blank values
    pub fn webhook_endpoint(&self) -> Option<&str> {
        non_blank(self.webhook_url.as_deref())
    }

    pub fn duplicate_lookup_endpoint(&self) -> Option<&str> {
        non_blank(self.duplicate_lookup_url.as_deref())
    }

    pub fn dashboard_link(&self) -> Option<&str> {
        non_blank(self.dashboard_url.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
