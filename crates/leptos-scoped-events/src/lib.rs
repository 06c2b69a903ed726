//! Leptos Scoped Events
//!
//! Window-level listeners and timers tied to the reactive owner that
//! creates them. Everything registered here is released in `on_cleanup`.

use std::time::Duration;

use leptos::ev;
use leptos::prelude::*;

/// Whether a keydown is the submit shortcut (Cmd/Ctrl + Enter)
pub fn is_submit_shortcut(ctrl: bool, meta: bool, key: &str) -> bool {
    (ctrl || meta) && key == "Enter"
}

/// Calls `on_submit` for Cmd/Ctrl + Enter anywhere in the window
pub fn use_submit_shortcut<F>(on_submit: F)
where
    F: Fn() + 'static,
{
    let handle = window_event_listener(ev::keydown, move |ev: web_sys::KeyboardEvent| {
        if is_submit_shortcut(ev.ctrl_key(), ev.meta_key(), &ev.key()) {
            ev.prevent_default();
            on_submit();
        }
    });
    on_cleanup(move || handle.remove());
}

/// Tracks whether the element matching `selector` has scrolled above the viewport
pub fn use_scrolled_past(selector: &'static str) -> ReadSignal<bool> {
    let (scrolled_past, set_scrolled_past) = signal(false);

    let handle = window_event_listener(ev::scroll, move |_| {
        let Some(doc) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Ok(Some(el)) = doc.query_selector(selector) {
            let past = el.get_bounding_client_rect().bottom() < 0.0;
            if past != scrolled_past.get_untracked() {
                set_scrolled_past.set(past);
            }
        }
    });
    on_cleanup(move || handle.remove());

    scrolled_past
}

/// Trailing-edge debouncer: each `schedule` cancels the pending call
#[derive(Clone, Copy)]
pub struct Debouncer {
    delay: Duration,
    pending: StoredValue<Option<TimeoutHandle>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        let pending = StoredValue::new(None::<TimeoutHandle>);
        on_cleanup(move || {
            if let Some(handle) = pending.try_update_value(Option::take).flatten() {
                handle.clear();
            }
        });
        Self { delay, pending }
    }

    /// Restarts the quiet period; `f` runs only if nothing is scheduled after it
    pub fn schedule<F>(&self, f: F)
    where
        F: FnOnce() + 'static,
    {
        self.cancel();
        let pending = self.pending;
        match set_timeout_with_handle(
            move || {
                let _ = pending.try_set_value(None);
                f();
            },
            self.delay,
        ) {
            Ok(handle) => self.pending.set_value(Some(handle)),
            Err(e) => leptos::logging::warn!("debounce timer not scheduled: {:?}", e),
        }
    }

    pub fn cancel(&self) {
        if let Some(handle) = self.pending.try_update_value(Option::take).flatten() {
            handle.clear();
        }
    }
}
