//! Webhook Command Wrappers

use async_trait::async_trait;
use intake_core::{WebhookPayload, WebhookResponse, WebhookTransport};
use serde::Serialize;

use super::{call, to_args};

#[derive(Serialize)]
struct PostWebhookArgs<'a> {
    endpoint: &'a str,
    payload: &'a WebhookPayload,
}

/// POST through the host; `Err` means no response was received
pub async fn post_webhook(
    endpoint: &str,
    payload: &WebhookPayload,
) -> Result<WebhookResponse, String> {
    let args = to_args(&PostWebhookArgs { endpoint, payload })?;
    call("post_webhook", args).await
}

/// Pipeline transport backed by the `post_webhook` command
pub struct TauriWebhookTransport;

#[async_trait(?Send)]
impl WebhookTransport for TauriWebhookTransport {
    async fn post_json(
        &self,
        endpoint: &str,
        payload: &WebhookPayload,
    ) -> Result<WebhookResponse, String> {
        post_webhook(endpoint, payload).await
    }
}
