//! Intake Form Component
//!
//! The new-client form: inline normalization, field validation, duplicate
//! probing, keyboard shortcut and a floating submit button.

use std::time::Duration;

use intake_core::{
    Field, ProbeOutcome, SubmitOutcome, DUPLICATE_PROBE_DELAY, NOTES_MAX_CHARS, SERVICE_TYPES,
    SOURCE_OPTIONS, STAFF_MEMBERS,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_scoped_events::{use_scrolled_past, use_submit_shortcut, Debouncer};
use wasm_bindgen::JsCast;

use super::duplicate_banner::DuplicateBanner;
use super::field_inputs::{SelectInput, TextInput};
use super::form_state::FormState;
use crate::context::use_intake;
use crate::store::store_submitting;

const SUBMIT_BUTTON_SELECTOR: &str = "[data-submit-button]";
const REFOCUS_DELAY: Duration = Duration::from_millis(100);

fn focus_field(field: Field) {
    let el = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(field.id()))
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok());
    if let Some(el) = el {
        let _ = el.focus();
    }
}

#[component]
pub fn IntakeForm() -> impl IntoView {
    let ctx = use_intake();
    let form = FormState::new();
    let submitting = move || store_submitting(&ctx.store);

    let submit = move || {
        if ctx.pipeline().is_submitting() {
            return;
        }
        let intake = form.snapshot();
        spawn_local(async move {
            match ctx.submit(intake).await {
                SubmitOutcome::Rejected(errors) => {
                    if let Some(field) = errors.first() {
                        focus_field(field);
                    }
                    form.reject(errors);
                }
                SubmitOutcome::Delivered { .. } => {
                    form.reset();
                    set_timeout(move || focus_field(Field::Name), REFOCUS_DELAY);
                }
                SubmitOutcome::Failed { .. } | SubmitOutcome::Busy => {}
            }
        });
    };

    use_submit_shortcut(submit);
    let floating = use_scrolled_past(SUBMIT_BUTTON_SELECTOR);

    // Duplicate probe, restarted by every edit to email or phone
    let (duplicate_warning, set_duplicate_warning) = signal(None::<String>);
    let debouncer = Debouncer::new(DUPLICATE_PROBE_DELAY);
    let watched = Memo::new(move |_| (form.value(Field::Email), form.value(Field::Phone)));
    Effect::new(move |_| {
        let (email, phone) = watched.get();
        let prober = ctx.prober();
        let ticket = prober.arm();
        debouncer.schedule(move || {
            spawn_local(async move {
                let outcome = prober.fire(ticket, &email, &phone).await;
                if outcome != ProbeOutcome::Superseded {
                    set_duplicate_warning.set(outcome.warning());
                }
            });
        });
    });

    let destination = move || {
        let email = form.value(Field::Email);
        if email.is_empty() {
            "client".to_string()
        } else {
            email
        }
    };

    view! {
        <form
            class="intake-form"
            novalidate=true
            on:submit=move |ev: web_sys::SubmitEvent| {
                ev.prevent_default();
                submit();
            }
        >
            <DuplicateBanner warning=duplicate_warning />

            <div class="form-grid">
                <TextInput form=form field=Field::Name label="Full Name" placeholder="John Smith" required=true />
                <TextInput form=form field=Field::Email label="Email" input_type="email" placeholder="john@example.com" required=true />
                <TextInput form=form field=Field::Phone label="Phone" input_type="tel" placeholder="(555) 123-4567" required=true />
                <SelectInput
                    form=form
                    field=Field::ServiceType
                    label="Service Type"
                    options=SERVICE_TYPES
                    placeholder="Select a service"
                    required=true
                />
                <SelectInput
                    form=form
                    field=Field::Source
                    label="How did they hear about us?"
                    options=SOURCE_OPTIONS
                    placeholder="Select a source"
                    required=true
                />
                <Show when=move || form.referred_by_enabled()>
                    <TextInput form=form field=Field::ReferredBy label="Referred By" placeholder="Who referred them?" />
                </Show>
                <SelectInput form=form field=Field::AssignedTo label="Assign To" options=STAFF_MEMBERS />
            </div>

            <div class="field">
                <label for=Field::Notes.id()>"Notes"</label>
                <textarea
                    id=Field::Notes.id()
                    class="field-input notes"
                    rows="3"
                    maxlength=NOTES_MAX_CHARS.to_string()
                    placeholder="Anything the preparer should know"
                    prop:value=move || form.value(Field::Notes)
                    on:input=move |ev| form.edit(Field::Notes, &event_target_value(&ev))
                ></textarea>
                <p class="notes-counter">
                    {move || format!("{}/{} characters", form.notes_len(), NOTES_MAX_CHARS)}
                </p>
            </div>

            <button
                type="submit"
                class="submit-btn"
                data-submit-button=""
                disabled=submitting
            >
                {move || if submitting() { "Adding Client..." } else { "Add Client" }}
            </button>
            <Show when=move || !submitting()>
                <p class="submit-hint">
                    "This will send an email to: " {destination}
                    <span class="shortcut-hint">" (Ctrl/Cmd + Enter)"</span>
                </p>
            </Show>

            <Show when=move || floating.get()>
                <button
                    type="button"
                    class="submit-btn floating"
                    disabled=submitting
                    on:click=move |_| submit()
                >
                    {move || if submitting() { "Adding..." } else { "Add Client" }}
                </button>
            </Show>
        </form>
    }
}
