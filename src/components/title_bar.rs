//! Title Bar Component
//!
//! Page header with the dashboard shortcut.

use intake_core::Notice;
use leptos::prelude::*;

use crate::context::use_intake;
use crate::store::store_dashboard_link;

#[component]
pub fn TitleBar() -> impl IntoView {
    let ctx = use_intake();

    let open_dashboard = move |_| match store_dashboard_link(&ctx.store) {
        Some(url) => ctx.open_link(url),
        None => ctx.notify(
            Notice::info("Dashboard not configured", "Set INTAKE_DASHBOARD_URL or dashboard_url in intake.json"),
            None,
        ),
    };

    view! {
        <header class="title-bar">
            <div class="title-group">
                <img src="public/icon.png" class="title-icon" alt="" />
                <div>
                    <h1 class="title">"New Client Intake"</h1>
                    <p class="subtitle">"Add a client and send their welcome email"</p>
                </div>
            </div>
            <button type="button" class="header-btn" on:click=open_dashboard>
                "Dashboard"
            </button>
        </header>
    }
}
