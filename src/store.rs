//! Global Intake State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use intake_core::{IntakeConfig, Notice, RecentClient, WebhookPayload};
use leptos::prelude::*;
use reactive_stores::Store;

/// A visible notification; `retry` carries the payload its Retry action re-sends
#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub notice: Notice,
    pub retry: Option<WebhookPayload>,
}

/// Global intake state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct IntakeState {
    /// Newest first, at most five
    pub recent_clients: Vec<RecentClient>,
    /// Length of the local pending-submissions queue
    pub pending_count: usize,
    pub toasts: Vec<Toast>,
    pub next_toast_id: u32,
    pub config: IntakeConfig,
    /// Mirrors the pipeline's in-flight flag
    pub submitting: bool,
}

/// Type alias for the store
pub type IntakeStore = Store<IntakeState>;

// ========================
// Store Helper Functions
// ========================

pub fn store_set_recent(store: &IntakeStore, recent: Vec<RecentClient>) {
    store.recent_clients().set(recent);
}

pub fn store_recent(store: &IntakeStore) -> Vec<RecentClient> {
    store.recent_clients().get()
}

pub fn store_set_pending_count(store: &IntakeStore, count: usize) {
    store.pending_count().set(count);
}

pub fn store_pending_count(store: &IntakeStore) -> usize {
    store.pending_count().get()
}

pub fn store_set_config(store: &IntakeStore, config: IntakeConfig) {
    store.config().set(config);
}

/// Dashboard base URL, if one is configured
pub fn store_dashboard_link(store: &IntakeStore) -> Option<String> {
    store.config().with(|config| config.dashboard_link().map(str::to_string))
}

pub fn store_set_submitting(store: &IntakeStore, submitting: bool) {
    store.submitting().set(submitting);
}

pub fn store_submitting(store: &IntakeStore) -> bool {
    store.submitting().get()
}

/// Push a toast and return its id
pub fn store_push_toast(store: &IntakeStore, notice: Notice, retry: Option<WebhookPayload>) -> u32 {
    let id = store.next_toast_id().get_untracked();
    store.next_toast_id().set(id.wrapping_add(1));
    store.toasts().write().push(Toast { id, notice, retry });
    id
}

/// Remove a toast by id
pub fn store_dismiss_toast(store: &IntakeStore, id: u32) {
    store.toasts().write().retain(|toast| toast.id != id);
}

pub fn store_toasts(store: &IntakeStore) -> Vec<Toast> {
    store.toasts().get()
}
