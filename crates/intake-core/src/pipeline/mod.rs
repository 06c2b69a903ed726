//! Submission Pipeline
//!
//! `Idle -> Submitting -> {Succeeded, Failed} -> Idle`. One submission may be
//! in flight at a time; the guard is released once side effects are done.

mod notice;
mod transport;

#[cfg(test)]
mod tests;

use std::cell::{Cell, RefCell};

use chrono::{DateTime, Utc};

use crate::config::IntakeConfig;
use crate::domain::{ClientIntake, PendingSubmission, RecentClient, SubmitError, WebhookPayload};
use crate::store::{KeyValueStore, PendingQueue, RecentClients};
use crate::validation::{validate, FieldErrors};

pub use notice::{Notice, NoticeAction, NoticeLevel};
pub use transport::{WebhookResponse, WebhookTransport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Result of one user-initiated submission
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent
    Rejected(FieldErrors),
    /// Another submission is in flight; nothing was sent
    Busy,
    Delivered {
        payload: WebhookPayload,
        recent: Vec<RecentClient>,
        notice: Notice,
    },
    Failed {
        /// Exact payload to hand back to [`SubmissionPipeline::retry`]
        payload: WebhookPayload,
        error: SubmitError,
        notice: Notice,
        /// Pending queue length after queuing, `None` if queuing failed
        queued: Option<usize>,
    },
}

impl SubmitOutcome {
    pub fn notice(&self) -> Option<&Notice> {
        match self {
            SubmitOutcome::Delivered { notice, .. } | SubmitOutcome::Failed { notice, .. } => {
                Some(notice)
            }
            _ => None,
        }
    }
}

/// Summary of a pending-queue replay
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayReport {
    pub delivered: usize,
    pub remaining: usize,
    pub last_error: Option<String>,
}

/// Releases the in-flight slot on every exit path
struct InFlight<'a>(&'a Cell<SubmissionState>);

impl<'a> InFlight<'a> {
    fn begin(state: &'a Cell<SubmissionState>) -> Option<Self> {
        if state.get() == SubmissionState::Submitting {
            return None;
        }
        state.set(SubmissionState::Submitting);
        Some(Self(state))
    }

    fn finish(&self, terminal: SubmissionState) {
        log::debug!("Submission state: Submitting -> {:?}", terminal);
        self.0.set(terminal);
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.set(SubmissionState::Idle);
    }
}

/// Validates, stamps and POSTs intakes; keeps the local fallback store current
pub struct SubmissionPipeline<S, T> {
    store: S,
    transport: T,
    config: RefCell<IntakeConfig>,
    state: Cell<SubmissionState>,
    recent: RefCell<RecentClients>,
}

impl<S: KeyValueStore, T: WebhookTransport> SubmissionPipeline<S, T> {
    /// Loads the recent-clients list from `store` once
    pub fn new(store: S, transport: T, config: IntakeConfig) -> Self {
        let recent = RecentClients::load(&store);
        Self {
            store,
            transport,
            config: RefCell::new(config),
            state: Cell::new(SubmissionState::Idle),
            recent: RefCell::new(recent),
        }
    }

    pub fn configure(&self, config: IntakeConfig) {
        *self.config.borrow_mut() = config;
    }

    pub fn config(&self) -> IntakeConfig {
        self.config.borrow().clone()
    }

    pub fn state(&self) -> SubmissionState {
        self.state.get()
    }

    pub fn is_submitting(&self) -> bool {
        self.state.get() == SubmissionState::Submitting
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn recent_clients(&self) -> Vec<RecentClient> {
        self.recent.borrow().to_vec()
    }

    pub fn pending(&self) -> Vec<PendingSubmission> {
        PendingQueue::load(&self.store).unwrap_or_else(|e| {
            log::warn!("Cannot read pending submissions: {}", e);
            Vec::new()
        })
    }

    pub fn pending_len(&self) -> usize {
        PendingQueue::len(&self.store)
    }

    pub async fn submit(&self, intake: &ClientIntake) -> SubmitOutcome {
        self.submit_at(intake, Utc::now()).await
    }

    /// Same as [`submit`](Self::submit) with an explicit submission instant
    pub async fn submit_at(&self, intake: &ClientIntake, at: DateTime<Utc>) -> SubmitOutcome {
        let errors = validate(intake);
        if !errors.is_empty() {
            log::debug!("Submission blocked by {} invalid field(s)", errors.len());
            return SubmitOutcome::Rejected(errors);
        }
        let payload = self.stamp(intake, at);
        self.deliver(payload).await
    }

    /// Re-sends a payload from a failed outcome unchanged.
    ///
    /// Once delivered, the queue entries its earlier failures left behind are dropped.
    pub async fn retry(&self, payload: WebhookPayload) -> SubmitOutcome {
        log::info!("Retrying submission for {}", payload.intake.email);
        let outcome = self.deliver(payload).await;
        if let SubmitOutcome::Delivered { payload, .. } = &outcome {
            self.settle_pending(payload);
        }
        outcome
    }

    /// Re-sends every queued submission with a fresh timestamp.
    ///
    /// Delivered entries leave the queue; `None` if a submission is in flight.
    pub async fn replay_pending(&self) -> Option<ReplayReport> {
        let Some(flight) = InFlight::begin(&self.state) else {
            return None;
        };
        let queued = match PendingQueue::load(&self.store) {
            Ok(queued) => queued,
            Err(e) => {
                log::error!("Cannot replay pending submissions: {}", e);
                return Some(ReplayReport {
                    last_error: Some(e.to_string()),
                    ..Default::default()
                });
            }
        };

        let mut report = ReplayReport::default();
        let mut remaining = Vec::new();
        let mut entries = queued.into_iter();
        for entry in entries.by_ref() {
            let payload = self.stamp(&entry.intake, Utc::now());
            match self.send(&payload).await {
                Ok(()) => {
                    self.record_success(&payload);
                    report.delivered += 1;
                }
                Err(SubmitError::Configuration) => {
                    report.last_error = Some(SubmitError::Configuration.to_string());
                    remaining.push(entry);
                    break;
                }
                Err(e) => {
                    report.last_error = Some(e.to_string());
                    remaining.push(entry);
                }
            }
        }
        remaining.extend(entries);
        report.remaining = remaining.len();

        if let Err(e) = PendingQueue::replace(&self.store, &remaining) {
            log::error!("Cannot rewrite pending submissions: {}", e);
        }
        flight.finish(if report.remaining == 0 {
            SubmissionState::Succeeded
        } else {
            SubmissionState::Failed
        });
        log::info!(
            "Replayed pending submissions: {} delivered, {} remaining",
            report.delivered,
            report.remaining
        );
        Some(report)
    }

    /// Drops every queued submission
    pub fn clear_pending(&self) -> Result<(), crate::store::StoreError> {
        PendingQueue::clear(&self.store)
    }

    fn stamp(&self, intake: &ClientIntake, at: DateTime<Utc>) -> WebhookPayload {
        let config = self.config.borrow();
        WebhookPayload::build(intake, &config.submitted_by, &config.form_version, at)
    }

    async fn deliver(&self, payload: WebhookPayload) -> SubmitOutcome {
        let Some(flight) = InFlight::begin(&self.state) else {
            log::warn!("Submission ignored: another submission is in flight");
            return SubmitOutcome::Busy;
        };

        match self.send(&payload).await {
            Ok(()) => {
                flight.finish(SubmissionState::Succeeded);
                let recent = self.record_success(&payload);
                SubmitOutcome::Delivered {
                    notice: Notice::delivered(&payload),
                    payload,
                    recent,
                }
            }
            Err(error) => {
                flight.finish(SubmissionState::Failed);
                log::error!("Submission error: {}", error);
                let queued = self.record_failure(&payload);
                SubmitOutcome::Failed {
                    notice: Notice::failed(&error),
                    payload,
                    error,
                    queued,
                }
            }
        }
    }

    async fn send(&self, payload: &WebhookPayload) -> Result<(), SubmitError> {
        let endpoint = self.config.borrow().webhook_endpoint().map(str::to_string);
        let Some(endpoint) = endpoint else {
            return Err(SubmitError::Configuration);
        };

        log::info!("Submitting to webhook: {}", endpoint);
        let response = self
            .transport
            .post_json(&endpoint, payload)
            .await
            .map_err(SubmitError::Network)?;

        if response.is_success() {
            Ok(())
        } else {
            Err(SubmitError::Status {
                status: response.status,
                reason: response.reason,
            })
        }
    }

    fn record_success(&self, payload: &WebhookPayload) -> Vec<RecentClient> {
        let mut recent = self.recent.borrow_mut();
        recent.push_front(RecentClient::from(payload));
        if let Err(e) = recent.save(&self.store) {
            log::warn!("Cannot persist recent clients: {}", e);
        }
        recent.to_vec()
    }

    /// Failures of `payload` were queued no earlier than its own timestamp
    fn settle_pending(&self, payload: &WebhookPayload) {
        let settled = PendingQueue::remove_where(&self.store, |entry| {
            entry.intake == payload.intake && entry.timestamp >= payload.timestamp
        });
        match settled {
            Ok(0) => {}
            Ok(n) => log::info!("Dropped {} queued attempt(s) for {}", n, payload.intake.email),
            Err(e) => log::warn!("Cannot settle pending submissions: {}", e),
        }
    }

    fn record_failure(&self, payload: &WebhookPayload) -> Option<usize> {
        let entry = PendingSubmission {
            intake: payload.intake.clone(),
            timestamp: Utc::now(),
        };
        match PendingQueue::append(&self.store, entry) {
            Ok(len) => Some(len),
            Err(e) => {
                log::error!("Cannot queue failed submission: {}", e);
                None
            }
        }
    }
}
