//! Outbound webhook seam

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::WebhookPayload;

/// Status line of a webhook response; the body is not interpreted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookResponse {
    pub status: u16,
    #[serde(default)]
    pub reason: String,
}

impl WebhookResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues a single JSON POST. `Err` means the request never completed.
#[async_trait(?Send)]
pub trait WebhookTransport {
    async fn post_json(
        &self,
        endpoint: &str,
        payload: &WebhookPayload,
    ) -> Result<WebhookResponse, String>;
}
