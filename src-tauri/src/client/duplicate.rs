//! Duplicate-lookup service

use intake_core::{ClientSummary, DuplicateCheckResponse};

/// `GET <url>?email=..&phone=..` against an optional lookup backend
#[derive(Clone)]
pub struct DuplicateClient {
    http: reqwest::Client,
    url: Option<String>,
}

impl DuplicateClient {
    pub fn new(http: reqwest::Client, url: Option<String>) -> Self {
        Self { http, url }
    }

    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }

    /// `Ok(None)` when no backend is configured
    pub async fn lookup(&self, email: &str, phone: &str) -> Result<Option<ClientSummary>, String> {
        let Some(url) = &self.url else {
            return Ok(None);
        };
        let response = self
            .http
            .get(url)
            .query(&[("email", email), ("phone", phone)])
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            return Err(format!("lookup returned {}", response.status()));
        }
        let body: DuplicateCheckResponse = response.json().await.map_err(|e| e.to_string())?;
        Ok(body.into_match())
    }
}
