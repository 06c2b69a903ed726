//! Webhook Commands

use intake_core::{WebhookPayload, WebhookResponse};
use tauri::State;

use crate::AppState;

/// POST one payload to `endpoint` and report the status line
#[tauri::command]
pub async fn post_webhook(
    state: State<'_, AppState>,
    endpoint: String,
    payload: WebhookPayload,
) -> Result<WebhookResponse, String> {
    state.webhook.post(&endpoint, &payload).await
}
