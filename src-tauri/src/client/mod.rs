//! Client Layer
//!
//! Outbound HTTP to the webhook receiver and the duplicate-lookup service.

mod duplicate;
mod webhook;

pub use duplicate::DuplicateClient;
pub use webhook::WebhookClient;

use std::time::Duration;

/// Shared reqwest client; the only timeout is the transport's connect limit
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .build()
        .unwrap_or_else(|e| {
            log::warn!("Falling back to default HTTP client: {}", e);
            reqwest::Client::new()
        })
}
