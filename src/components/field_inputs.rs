//! Field Input Components
//!
//! Labelled inputs bound to a [`FormState`] field, with inline error text.

use intake_core::Field;
use leptos::prelude::*;

use super::form_state::FormState;

fn field_class(form: FormState, field: Field) -> &'static str {
    if form.error(field).is_some() {
        "field-input invalid"
    } else {
        "field-input"
    }
}

#[component]
fn FieldError(form: FormState, field: Field) -> impl IntoView {
    move || form.error(field).map(|msg| view! { <p class="field-error">{msg}</p> })
}

/// Single-line text input
#[component]
pub fn TextInput(
    form: FormState,
    field: Field,
    label: &'static str,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(optional)] placeholder: &'static str,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    view! {
        <div class="field">
            <label for=field.id()>
                {label}
                {required.then_some(view! { <span class="required">" *"</span> })}
            </label>
            <input
                id=field.id()
                type=input_type
                class=move || field_class(form, field)
                placeholder=placeholder
                prop:value=move || form.value(field)
                on:input=move |ev| form.edit(field, &event_target_value(&ev))
                on:blur=move |_| form.blur(field)
            />
            <FieldError form=form field=field />
        </div>
    }
}

/// Select over a fixed option set; `placeholder` adds an empty first choice
#[component]
pub fn SelectInput(
    form: FormState,
    field: Field,
    label: &'static str,
    options: &'static [&'static str],
    #[prop(optional)] placeholder: Option<&'static str>,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    view! {
        <div class="field">
            <label for=field.id()>
                {label}
                {required.then_some(view! { <span class="required">" *"</span> })}
            </label>
            <select
                id=field.id()
                class=move || field_class(form, field)
                on:change=move |ev| {
                    form.edit(field, &event_target_value(&ev));
                    form.blur(field);
                }
            >
                {placeholder.map(|text| view! {
                    <option value="" prop:selected=move || form.value(field).is_empty()>{text}</option>
                })}
                {options.iter().map(|opt| {
                    let opt = *opt;
                    view! {
                        <option value=opt prop:selected=move || form.value(field) == opt>{opt}</option>
                    }
                }).collect_view()}
            </select>
            <FieldError form=form field=field />
        </div>
    }
}
