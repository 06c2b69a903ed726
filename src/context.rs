//! Application Context
//!
//! Shared pipeline and prober handles provided via Leptos Context API.

use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use intake_core::{
    ClientIntake, DuplicateProber, IntakeConfig, Notice, NoticeLevel, SubmissionPipeline,
    SubmitOutcome, WebhookPayload,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::browser_store::BrowserStorage;
use crate::commands::{self, TauriDuplicateLookup, TauriWebhookTransport};
use crate::store::*;

pub type Pipeline = SubmissionPipeline<BrowserStorage, TauriWebhookTransport>;
pub type Prober = DuplicateProber<TauriDuplicateLookup>;

const TOAST_DISMISS_MS: u32 = 4_000;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct IntakeContext {
    pipeline: StoredValue<Rc<Pipeline>, LocalStorage>,
    prober: StoredValue<Rc<Prober>, LocalStorage>,
    pub store: IntakeStore,
}

impl IntakeContext {
    /// Opens local storage and seeds the store from it
    pub fn new(store: IntakeStore) -> Self {
        let pipeline = Pipeline::new(
            BrowserStorage::open(),
            TauriWebhookTransport,
            IntakeConfig::default(),
        );
        store_set_recent(&store, pipeline.recent_clients());
        store_set_pending_count(&store, pipeline.pending_len());

        Self {
            pipeline: StoredValue::new_local(Rc::new(pipeline)),
            prober: StoredValue::new_local(Rc::new(Prober::new(None))),
            store,
        }
    }

    pub fn pipeline(&self) -> Rc<Pipeline> {
        self.pipeline.get_value()
    }

    pub fn prober(&self) -> Rc<Prober> {
        self.prober.get_value()
    }

    /// Installs the host's resolved configuration
    pub fn apply_config(&self, config: IntakeConfig) {
        let lookup = config
            .duplicate_lookup_endpoint()
            .map(|_| TauriDuplicateLookup);
        if lookup.is_none() {
            log::info!("Duplicate lookup not configured; probes are disabled");
        }
        self.prober.set_value(Rc::new(Prober::new(lookup)));
        self.pipeline().configure(config.clone());
        store_set_config(&self.store, config);
    }

    /// Shows a toast; toasts without a retry payload dismiss themselves
    pub fn notify(&self, notice: Notice, retry: Option<WebhookPayload>) {
        let sticky = retry.is_some();
        let id = store_push_toast(&self.store, notice, retry);
        if !sticky {
            let store = self.store;
            spawn_local(async move {
                TimeoutFuture::new(TOAST_DISMISS_MS).await;
                store_dismiss_toast(&store, id);
            });
        }
    }

    pub fn dismiss(&self, id: u32) {
        store_dismiss_toast(&self.store, id);
    }

    /// Runs one submission; the caller handles field errors and form reset
    pub async fn submit(&self, intake: ClientIntake) -> SubmitOutcome {
        let pipeline = self.pipeline();
        store_set_submitting(&self.store, true);
        let outcome = pipeline.submit(&intake).await;
        self.report(&outcome);
        outcome
    }

    /// Re-sends the payload attached to toast `id`.
    ///
    /// The toast stays up if another submission holds the pipeline.
    pub fn retry(&self, id: u32, payload: WebhookPayload) {
        let ctx = *self;
        spawn_local(async move {
            let pipeline = ctx.pipeline();
            store_set_submitting(&ctx.store, true);
            let outcome = pipeline.retry(payload).await;
            if retry_settled(&outcome) {
                ctx.dismiss(id);
            } else {
                ctx.notify(busy_notice(), None);
            }
            ctx.report(&outcome);
        });
    }

    pub fn replay_pending(&self) {
        let ctx = *self;
        spawn_local(async move {
            let pipeline = ctx.pipeline();
            store_set_submitting(&ctx.store, true);
            match pipeline.replay_pending().await {
                Some(report) => {
                    store_set_recent(&ctx.store, pipeline.recent_clients());
                    ctx.notify(Notice::replayed(&report), None);
                }
                None => ctx.notify(busy_notice(), None),
            }
            ctx.sync_from_pipeline();
        });
    }

    pub fn clear_pending(&self) {
        match self.pipeline().clear_pending() {
            Ok(()) => {
                log::info!("Pending submissions cleared");
                self.notify(Notice::info("Pending submissions cleared", ""), None);
            }
            Err(e) => {
                log::error!("Cannot clear pending submissions: {}", e);
                self.notify(
                    Notice {
                        level: NoticeLevel::Error,
                        title: "Could not clear pending submissions".to_string(),
                        description: e.to_string(),
                        action: None,
                    },
                    None,
                );
            }
        }
        self.sync_from_pipeline();
    }

    /// Opens `url` in the system browser
    pub fn open_link(&self, url: String) {
        spawn_local(async move {
            if let Err(e) = commands::open_external(&url).await {
                log::warn!("Cannot open {}: {}", url, e);
            }
        });
    }

    fn sync_from_pipeline(&self) {
        let pipeline = self.pipeline();
        store_set_submitting(&self.store, pipeline.is_submitting());
        store_set_pending_count(&self.store, pipeline.pending_len());
    }

    fn report(&self, outcome: &SubmitOutcome) {
        match outcome {
            SubmitOutcome::Delivered { recent, notice, .. } => {
                store_set_recent(&self.store, recent.clone());
                self.notify(notice.clone(), None);
            }
            SubmitOutcome::Failed {
                payload, notice, ..
            } => {
                self.notify(notice.clone(), Some(payload.clone()));
            }
            SubmitOutcome::Rejected(_) | SubmitOutcome::Busy => {}
        }
        self.sync_from_pipeline();
    }
}

/// Whether a retry toast has done its job; a Busy retry never reached the pipeline
fn retry_settled(outcome: &SubmitOutcome) -> bool {
    !matches!(outcome, SubmitOutcome::Busy)
}

fn busy_notice() -> Notice {
    Notice::info("Submission in progress", "Try again once it finishes")
}

/// Get the intake context
pub fn use_intake() -> IntakeContext {
    expect_context::<IntakeContext>()
}
