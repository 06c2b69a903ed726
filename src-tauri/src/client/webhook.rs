//! Webhook delivery

use intake_core::{WebhookPayload, WebhookResponse};

/// POSTs intake payloads as JSON
#[derive(Clone)]
pub struct WebhookClient {
    http: reqwest::Client,
}

impl WebhookClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Single POST, no retry. `Err` only when no response arrived.
    pub async fn post(
        &self,
        endpoint: &str,
        payload: &WebhookPayload,
    ) -> Result<WebhookResponse, String> {
        log::info!("POST {} for {}", endpoint, payload.intake.email);
        let response = self
            .http
            .post(endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                log::error!("Webhook request failed: {}", e);
                e.to_string()
            })?;

        let status = response.status();
        log::info!("Webhook answered {}", status);
        Ok(WebhookResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
        })
    }
}
