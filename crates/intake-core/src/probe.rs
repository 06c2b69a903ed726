//! Duplicate Prober
//!
//! Debounced lookup of an existing client by email or phone. The timer
//! itself belongs to the UI; this module decides which probe is still
//! current and how a lookup result maps to a warning.

use std::cell::Cell;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::normalize::normalize_phone;

/// Quiescence window restarted by every keystroke in email or phone
pub const DUPLICATE_PROBE_DELAY: Duration = Duration::from_millis(1000);

/// Existing client as reported by the lookup service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSummary {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub last_contact: String,
    #[serde(default)]
    pub service_type: String,
}

/// Wire shape of a lookup response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateCheckResponse {
    pub exists: bool,
    #[serde(default)]
    pub client: Option<ClientSummary>,
}

impl DuplicateCheckResponse {
    pub fn into_match(self) -> Option<ClientSummary> {
        if self.exists {
            self.client
        } else {
            None
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Duplicate lookup failed: {0}")]
pub struct LookupError(pub String);

/// Pluggable lookup backend
#[async_trait(?Send)]
pub trait DuplicateLookup {
    async fn probe(&self, email: &str, phone: &str) -> Result<Option<ClientSummary>, LookupError>;
}

/// Identifies one scheduled probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeTicket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// A newer keystroke replaced this probe
    Superseded,
    NoMatch,
    Match(ClientSummary),
}

impl ProbeOutcome {
    /// Banner text, if any
    pub fn warning(&self) -> Option<String> {
        match self {
            ProbeOutcome::Match(client) => Some(format!("Client found: {}", client.name)),
            _ => None,
        }
    }
}

/// Last-scheduled-wins gate around an optional lookup backend
pub struct DuplicateProber<L> {
    lookup: Option<L>,
    generation: Cell<u64>,
}

impl<L: DuplicateLookup> DuplicateProber<L> {
    pub fn new(lookup: Option<L>) -> Self {
        Self {
            lookup,
            generation: Cell::new(0),
        }
    }

    pub fn has_backend(&self) -> bool {
        self.lookup.is_some()
    }

    /// Records a keystroke; only the returned ticket may fire afterwards
    pub fn arm(&self) -> ProbeTicket {
        let next = self.generation.get().wrapping_add(1);
        self.generation.set(next);
        ProbeTicket(next)
    }

    pub fn is_current(&self, ticket: ProbeTicket) -> bool {
        self.generation.get() == ticket.0
    }

    /// Runs the probe for `ticket` once its quiet period has elapsed.
    ///
    /// Lookup failures and a missing backend both read as no match.
    pub async fn fire(&self, ticket: ProbeTicket, email: &str, phone: &str) -> ProbeOutcome {
        if !self.is_current(ticket) {
            return ProbeOutcome::Superseded;
        }
        let email = email.trim();
        let phone = normalize_phone(phone);
        if email.is_empty() && phone.is_empty() {
            return ProbeOutcome::NoMatch;
        }
        let Some(lookup) = &self.lookup else {
            return ProbeOutcome::NoMatch;
        };

        let found = match lookup.probe(email, &phone).await {
            Ok(found) => found,
            Err(e) => {
                log::warn!("{}", e);
                None
            }
        };

        // A keystroke during the lookup makes this answer stale
        if !self.is_current(ticket) {
            return ProbeOutcome::Superseded;
        }
        match found {
            Some(client) => ProbeOutcome::Match(client),
            None => ProbeOutcome::NoMatch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct ScriptedLookup {
        answer: Result<Option<ClientSummary>, LookupError>,
        calls: RefCell<Vec<(String, String)>>,
    }

    impl ScriptedLookup {
        fn new(answer: Result<Option<ClientSummary>, LookupError>) -> Self {
            Self {
                answer,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl<'a> DuplicateLookup for &'a ScriptedLookup {
        async fn probe(&self, email: &str, phone: &str) -> Result<Option<ClientSummary>, LookupError> {
            self.calls.borrow_mut().push((email.to_string(), phone.to_string()));
            self.answer.clone()
        }
    }

    fn existing() -> ClientSummary {
        ClientSummary {
            name: "Jane Roe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "5559876543".to_string(),
            last_contact: "2025-12-01".to_string(),
            service_type: "Rental Property".to_string(),
        }
    }

    #[tokio::test]
    async fn test_only_last_ticket_fires() {
        let lookup = ScriptedLookup::new(Ok(Some(existing())));
        let prober = DuplicateProber::new(Some(&lookup));

        let first = prober.arm();
        let second = prober.arm();

        assert_eq!(prober.fire(first, "jane@example.com", "").await, ProbeOutcome::Superseded);
        let outcome = prober.fire(second, "jane@example.com", "(555) 987-6543").await;
        assert_eq!(outcome, ProbeOutcome::Match(existing()));
        assert_eq!(outcome.warning().as_deref(), Some("Client found: Jane Roe"));
        assert_eq!(
            lookup.calls.borrow().as_slice(),
            [("jane@example.com".to_string(), "5559876543".to_string())]
        );
    }

    #[tokio::test]
    async fn test_no_backend_degrades_silently() {
        let prober: DuplicateProber<&ScriptedLookup> = DuplicateProber::new(None);
        let ticket = prober.arm();
        assert!(!prober.has_backend());
        assert_eq!(prober.fire(ticket, "a@b.co", "").await, ProbeOutcome::NoMatch);
    }

    #[tokio::test]
    async fn test_lookup_error_reads_as_no_match() {
        let lookup = ScriptedLookup::new(Err(LookupError("503".to_string())));
        let prober = DuplicateProber::new(Some(&lookup));
        let ticket = prober.arm();
        let outcome = prober.fire(ticket, "a@b.co", "").await;
        assert_eq!(outcome, ProbeOutcome::NoMatch);
        assert_eq!(outcome.warning(), None);
    }

    #[tokio::test]
    async fn test_empty_fields_skip_lookup() {
        let lookup = ScriptedLookup::new(Ok(Some(existing())));
        let prober = DuplicateProber::new(Some(&lookup));
        let ticket = prober.arm();
        assert_eq!(prober.fire(ticket, "  ", "() -").await, ProbeOutcome::NoMatch);
        assert!(lookup.calls.borrow().is_empty());
    }

    #[test]
    fn test_response_without_client_is_no_match() {
        let resp: DuplicateCheckResponse = serde_json::from_str(r#"{"exists":false}"#).unwrap();
        assert_eq!(resp.into_match(), None);
    }
}
