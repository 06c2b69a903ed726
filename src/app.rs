//! Client Intake Frontend App
//!
//! Single-page layout: header, intake form, pending queue, recent clients.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::commands;
use crate::components::{IntakeForm, PendingPanel, RecentClients, TitleBar, ToastStack};
use crate::context::IntakeContext;
use crate::store::{IntakeState, IntakeStore};

#[component]
pub fn App() -> impl IntoView {
    let store: IntakeStore = Store::new(IntakeState::default());
    let ctx = IntakeContext::new(store);
    provide_context(ctx);

    // Load the host configuration once on mount
    Effect::new(move |_| {
        spawn_local(async move {
            match commands::get_intake_config().await {
                Ok(config) => {
                    log::info!(
                        "Intake config loaded (webhook configured: {})",
                        config.webhook_endpoint().is_some()
                    );
                    ctx.apply_config(config);
                }
                Err(e) => log::warn!("Using default intake config: {}", e),
            }
        });
    });

    view! {
        <div class="app-layout">
            <ToastStack />
            <TitleBar />
            <main class="main-content">
                <div class="tip">
                    "Fill in the client's details. Submitting sends the record to the office system and a welcome email."
                </div>
                <div class="card">
                    <IntakeForm />
                </div>
                <PendingPanel />
                <RecentClients />
            </main>
        </div>
    }
}
