//! Recent Clients Component
//!
//! The five most recently added clients, newest first.

use chrono::Local;
use intake_core::RecentClient;
use leptos::prelude::*;

use crate::context::use_intake;
use crate::store::store_recent;

fn added_at(client: &RecentClient) -> String {
    client
        .timestamp
        .with_timezone(&Local)
        .format("%b %-d, %-I:%M %p")
        .to_string()
}

#[component]
pub fn RecentClients() -> impl IntoView {
    let ctx = use_intake();
    let recent = move || store_recent(&ctx.store);

    view! {
        <section class="recent-clients">
            <h2>"Recently Added"</h2>
            <Show
                when=move || !recent().is_empty()
                fallback=|| view! { <p class="empty-hint">"No clients added yet"</p> }
            >
                <ul class="recent-list">
                    {move || recent().into_iter().map(|client| {
                        let when = added_at(&client);
                        view! {
                            <li class="recent-item">
                                <div class="recent-main">
                                    <span class="recent-name">{client.name}</span>
                                    <span class="recent-email">{client.email}</span>
                                </div>
                                <div class="recent-meta">
                                    <span class="recent-service">{client.service_type}</span>
                                    <span class="recent-time">{when}</span>
                                </div>
                            </li>
                        }
                    }).collect_view()}
                </ul>
            </Show>
        </section>
    }
}
