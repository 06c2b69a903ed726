//! Duplicate Lookup Command Wrappers

use async_trait::async_trait;
use intake_core::{ClientSummary, DuplicateLookup, LookupError};
use serde::Serialize;

use super::{call, to_args};

#[derive(Serialize)]
struct ProbeArgs<'a> {
    email: &'a str,
    phone: &'a str,
}

pub async fn probe_duplicate(email: &str, phone: &str) -> Result<Option<ClientSummary>, String> {
    let args = to_args(&ProbeArgs { email, phone })?;
    call("probe_duplicate", args).await
}

/// Prober backend backed by the `probe_duplicate` command
pub struct TauriDuplicateLookup;

#[async_trait(?Send)]
impl DuplicateLookup for TauriDuplicateLookup {
    async fn probe(&self, email: &str, phone: &str) -> Result<Option<ClientSummary>, LookupError> {
        probe_duplicate(email, phone).await.map_err(LookupError)
    }
}
