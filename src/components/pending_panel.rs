//! Pending Submissions Panel
//!
//! Submissions that failed to reach the webhook, kept locally for re-sending.

use leptos::prelude::*;

use super::confirm_button::ConfirmButton;
use crate::context::use_intake;
use crate::store::{store_pending_count, store_submitting};

#[component]
pub fn PendingPanel() -> impl IntoView {
    let ctx = use_intake();
    let count = move || store_pending_count(&ctx.store);

    view! {
        <Show when=move || { count() > 0 }>
            <div class="pending-panel">
                <span class="pending-text">
                    {move || match count() {
                        1 => "1 submission saved locally".to_string(),
                        n => format!("{} submissions saved locally", n),
                    }}
                </span>
                <button
                    type="button"
                    class="pending-btn"
                    disabled=move || store_submitting(&ctx.store)
                    on:click=move |_| ctx.replay_pending()
                >
                    "Re-send"
                </button>
                <ConfirmButton
                    button_class="pending-btn danger"
                    label="Clear"
                    prompt="Discard?"
                    on_confirm=move |_| ctx.clear_pending()
                />
            </div>
        </Show>
    }
}
