//! Duplicate Banner Component
//!
//! Non-blocking warning shown when the lookup service knows the client.

use intake_core::Notice;
use leptos::prelude::*;

use crate::context::use_intake;
use crate::store::store_dashboard_link;

#[component]
pub fn DuplicateBanner(warning: ReadSignal<Option<String>>) -> impl IntoView {
    let ctx = use_intake();

    let view_existing = move |_| match store_dashboard_link(&ctx.store) {
        Some(url) => ctx.open_link(url),
        None => ctx.notify(
            Notice::info("Dashboard not configured", "Set INTAKE_DASHBOARD_URL to link existing clients"),
            None,
        ),
    };

    move || {
        warning.get().map(|text| {
            view! {
                <div class="duplicate-banner" role="status">
                    <span class="duplicate-icon">"⚠"</span>
                    <span class="duplicate-text">{text}</span>
                    <button type="button" class="link-btn" on:click=view_existing>
                        "View Existing Client"
                    </button>
                </div>
            }
        })
    }
}
