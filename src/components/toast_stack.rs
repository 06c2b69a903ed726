//! Toast Stack Component
//!
//! Success / error / info notifications, newest at the bottom.

use intake_core::NoticeLevel;
use leptos::prelude::*;

use crate::context::use_intake;
use crate::store::{store_submitting, store_toasts, Toast};

fn level_class(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Success => "toast success",
        NoticeLevel::Error => "toast error",
        NoticeLevel::Warning => "toast warning",
        NoticeLevel::Info => "toast info",
    }
}

#[component]
pub fn ToastStack() -> impl IntoView {
    let ctx = use_intake();

    view! {
        <div class="toast-stack" aria-live="polite">
            <For
                each=move || store_toasts(&ctx.store)
                key=|toast| toast.id
                children=move |toast: Toast| view! { <ToastCard toast=toast /> }
            />
        </div>
    }
}

#[component]
fn ToastCard(toast: Toast) -> impl IntoView {
    let ctx = use_intake();
    let id = toast.id;
    let description = toast.notice.description.clone();

    // Only notices that carry an action get a button, and only with a payload to re-send
    let action = toast.notice.action.zip(toast.retry).map(|(action, payload)| {
        let payload = StoredValue::new(payload);
        view! {
            <button
                class="toast-action"
                disabled=move || store_submitting(&ctx.store)
                on:click=move |_| ctx.retry(id, payload.get_value())
            >
                {action.label()}
            </button>
        }
    });

    view! {
        <div class=level_class(toast.notice.level)>
            <div class="toast-body">
                <p class="toast-title">{toast.notice.title}</p>
                {(!description.is_empty()).then(|| view! { <p class="toast-description">{description}</p> })}
            </div>
            {action}
            <button class="toast-close" title="Dismiss" on:click=move |_| ctx.dismiss(id)>
                "✕"
            </button>
        </div>
    }
}
