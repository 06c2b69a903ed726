//! Submit-time validation rules
//!
//! Every rule is field-scoped: a failing field never blocks editing others.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::{ClientIntake, Field, NOTES_MAX_CHARS, SERVICE_TYPES, SOURCE_OPTIONS};
use crate::normalize::normalize_phone;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("email pattern compiles")
});

const MIN_PHONE_DIGITS: usize = 10;

/// What is wrong with a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldIssue {
    Required,
    InvalidFormat,
    TooShort,
    TooLong,
}

impl FieldIssue {
    /// Inline message shown under the field
    pub fn message(&self, field: Field) -> &'static str {
        match (field, self) {
            (Field::Name, _) => "Name is required",
            (Field::Email, FieldIssue::InvalidFormat) => "Invalid email address",
            (Field::Email, _) => "Email is required",
            (Field::Phone, FieldIssue::TooShort) => "Phone must be 10 digits",
            (Field::Phone, _) => "Phone is required",
            (Field::ServiceType, _) => "Service type is required",
            (Field::Source, _) => "Source is required",
            (Field::Notes, _) => "Notes must be 500 characters or fewer",
            (Field::ReferredBy | Field::AssignedTo, _) => "Invalid value",
        }
    }
}

/// Field-keyed validation failures
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, FieldIssue>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<FieldIssue> {
        self.0.get(&field).copied()
    }

    pub fn message(&self, field: Field) -> Option<&'static str> {
        self.get(field).map(|issue| issue.message(field))
    }

    /// Replace the entry for one field (None clears it)
    pub fn set(&mut self, field: Field, issue: Option<FieldIssue>) {
        match issue {
            Some(issue) => {
                self.0.insert(field, issue);
            }
            None => {
                self.0.remove(&field);
            }
        }
    }

    /// First failing field in display order
    pub fn first(&self) -> Option<Field> {
        self.0.keys().next().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldIssue)> + '_ {
        self.0.iter().map(|(f, i)| (*f, *i))
    }
}

/// Checks a single field, as on blur
pub fn validate_field(intake: &ClientIntake, field: Field) -> Option<FieldIssue> {
    match field {
        Field::Name => intake.name.trim().is_empty().then_some(FieldIssue::Required),
        Field::Email => {
            let email = intake.email.trim();
            if email.is_empty() {
                Some(FieldIssue::Required)
            } else if !EMAIL_RE.is_match(email) {
                Some(FieldIssue::InvalidFormat)
            } else {
                None
            }
        }
        Field::Phone => {
            let digits = normalize_phone(&intake.phone);
            if intake.phone.trim().is_empty() {
                Some(FieldIssue::Required)
            } else if digits.len() < MIN_PHONE_DIGITS {
                Some(FieldIssue::TooShort)
            } else {
                None
            }
        }
        Field::ServiceType => one_of(&intake.service_type, SERVICE_TYPES),
        Field::Source => one_of(&intake.source, SOURCE_OPTIONS),
        Field::Notes => (intake.notes_len() > NOTES_MAX_CHARS).then_some(FieldIssue::TooLong),
        Field::ReferredBy | Field::AssignedTo => None,
    }
}

fn one_of(value: &str, allowed: &[&str]) -> Option<FieldIssue> {
    (!allowed.contains(&value.trim())).then_some(FieldIssue::Required)
}

/// Runs every rule; an empty result means the intake may be submitted
pub fn validate(intake: &ClientIntake) -> FieldErrors {
    let mut errors = FieldErrors::default();
    for field in Field::VALIDATED {
        errors.set(field, validate_field(intake, field));
    }
    errors
}
