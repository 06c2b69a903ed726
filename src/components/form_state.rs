//! Form State
//!
//! Reactive wrapper around the working intake record and its field errors.

use intake_core::{validate_field, ClientIntake, Field, FieldErrors};
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct FormState {
    intake: RwSignal<ClientIntake>,
    errors: RwSignal<FieldErrors>,
    /// Set by the first rejected submit; afterwards every edit re-validates
    live: RwSignal<bool>,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            intake: RwSignal::new(ClientIntake::new()),
            errors: RwSignal::new(FieldErrors::default()),
            live: RwSignal::new(false),
        }
    }

    /// Applies a keystroke through the field's normalizer
    pub fn edit(&self, field: Field, raw: &str) {
        self.intake.update(|intake| intake.set(field, raw));
        if self.live.get_untracked() || self.errors.with_untracked(|e| e.get(field).is_some()) {
            self.revalidate(field);
        }
    }

    pub fn blur(&self, field: Field) {
        self.revalidate(field);
    }

    fn revalidate(&self, field: Field) {
        let issue = self.intake.with_untracked(|intake| validate_field(intake, field));
        self.errors.update(|errors| errors.set(field, issue));
    }

    pub fn value(&self, field: Field) -> String {
        self.intake.with(|intake| intake.value(field).to_string())
    }

    pub fn error(&self, field: Field) -> Option<&'static str> {
        self.errors.with(|errors| errors.message(field))
    }

    pub fn referred_by_enabled(&self) -> bool {
        self.intake.with(ClientIntake::referred_by_enabled)
    }

    pub fn notes_len(&self) -> usize {
        self.intake.with(ClientIntake::notes_len)
    }

    pub fn snapshot(&self) -> ClientIntake {
        self.intake.get_untracked()
    }

    /// Shows submit-time errors and switches to live re-validation
    pub fn reject(&self, errors: FieldErrors) {
        self.errors.set(errors);
        self.live.set(true);
    }

    /// Clears the form after a delivered submission
    pub fn reset(&self) {
        self.intake.update(ClientIntake::reset);
        self.errors.set(FieldErrors::default());
        self.live.set(false);
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}
