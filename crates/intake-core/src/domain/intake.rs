//! Client intake record

use serde::{Deserialize, Serialize};

use crate::normalize::{capitalize_words, format_phone, normalize_email, normalize_phone};

pub const SERVICE_TYPES: &[&str] = &[
    "Personal Tax Return",
    "Business Tax Return",
    "Personal + Business",
    "Self-Employed / 1099",
    "Rental Property",
    "Investment Income",
    "Estate/Trust",
    "Amended Return",
];

pub const SOURCE_OPTIONS: &[&str] = &[
    "Phone Call",
    "Walk-In",
    "Referral (Client)",
    "Referral (Partner)",
    "Google Search",
    "Social Media",
    "Other",
];

pub const STAFF_MEMBERS: &[&str] = &["Unassigned", "Sarah Johnson", "Mike Chen", "Alex Rodriguez"];

pub const DEFAULT_ASSIGNEE: &str = "Unassigned";

/// Any source containing this marker is a referral channel
pub const REFERRAL_MARKER: &str = "Referral";

pub const NOTES_MAX_CHARS: usize = 500;

/// Whether a source value denotes a referral channel
pub fn is_referral(source: &str) -> bool {
    source.contains(REFERRAL_MARKER)
}

/// Form fields, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Email,
    Phone,
    ServiceType,
    Source,
    ReferredBy,
    Notes,
    AssignedTo,
}

impl Field {
    /// Fields checked by submit-time validation
    pub const VALIDATED: [Field; 6] = [
        Field::Name,
        Field::Email,
        Field::Phone,
        Field::ServiceType,
        Field::Source,
        Field::Notes,
    ];

    /// DOM id / payload key
    pub fn id(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::ServiceType => "service_type",
            Field::Source => "source",
            Field::ReferredBy => "referred_by",
            Field::Notes => "notes",
            Field::AssignedTo => "assigned_to",
        }
    }
}

/// The form's working record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientIntake {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service_type: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referred_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
}

impl Default for ClientIntake {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            service_type: String::new(),
            source: String::new(),
            referred_by: None,
            notes: None,
            assigned_to: Some(DEFAULT_ASSIGNEE.to_string()),
        }
    }
}

impl ClientIntake {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capitalizes word by word as typed
    pub fn set_name(&mut self, raw: &str) {
        self.name = capitalize_words(raw);
    }

    pub fn set_email(&mut self, raw: &str) {
        self.email = normalize_email(raw);
    }

    /// Re-formats to the display pattern as typed
    pub fn set_phone(&mut self, raw: &str) {
        self.phone = format_phone(raw);
    }

    pub fn set_service_type(&mut self, raw: &str) {
        self.service_type = raw.to_string();
    }

    /// Leaving a referral channel clears any referred-by value.
    pub fn set_source(&mut self, raw: &str) {
        self.source = raw.to_string();
        if !self.referred_by_enabled() {
            self.referred_by = None;
        }
    }

    /// Ignored unless the source is a referral channel
    pub fn set_referred_by(&mut self, raw: &str) {
        if self.referred_by_enabled() {
            self.referred_by = Some(raw.to_string()).filter(|v| !v.is_empty());
        }
    }

    /// Truncates at the notes cap
    pub fn set_notes(&mut self, raw: &str) {
        let notes: String = raw.chars().take(NOTES_MAX_CHARS).collect();
        self.notes = Some(notes).filter(|v| !v.is_empty());
    }

    pub fn set_assigned_to(&mut self, raw: &str) {
        self.assigned_to = Some(raw.to_string()).filter(|v| !v.is_empty());
    }

    /// Applies a raw edit to `field` through its normalizer
    pub fn set(&mut self, field: Field, raw: &str) {
        match field {
            Field::Name => self.set_name(raw),
            Field::Email => self.set_email(raw),
            Field::Phone => self.set_phone(raw),
            Field::ServiceType => self.set_service_type(raw),
            Field::Source => self.set_source(raw),
            Field::ReferredBy => self.set_referred_by(raw),
            Field::Notes => self.set_notes(raw),
            Field::AssignedTo => self.set_assigned_to(raw),
        }
    }

    /// Current display value of `field`
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::ServiceType => &self.service_type,
            Field::Source => &self.source,
            Field::ReferredBy => self.referred_by.as_deref().unwrap_or_default(),
            Field::Notes => self.notes.as_deref().unwrap_or_default(),
            Field::AssignedTo => self.assigned_to.as_deref().unwrap_or(DEFAULT_ASSIGNEE),
        }
    }

    pub fn referred_by_enabled(&self) -> bool {
        is_referral(&self.source)
    }

    pub fn notes_len(&self) -> usize {
        self.notes.as_deref().map_or(0, |n| n.chars().count())
    }

    /// Back to defaults, keeping the default assignee
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Digits-only phone
    pub fn phone_digits(&self) -> String {
        normalize_phone(&self.phone)
    }

    /// Copy ready for transmission: every normalizer applied, phone collapsed to digits,
    /// referred-by dropped outside referral channels.
    pub fn normalized(&self) -> Self {
        let mut out = Self {
            name: capitalize_words(self.name.trim()),
            email: normalize_email(&self.email),
            phone: normalize_phone(&self.phone),
            service_type: self.service_type.trim().to_string(),
            source: self.source.trim().to_string(),
            referred_by: self.referred_by.clone(),
            notes: self.notes.clone(),
            assigned_to: self.assigned_to.clone(),
        };
        if !out.referred_by_enabled() {
            out.referred_by = None;
        }
        out
    }
}
