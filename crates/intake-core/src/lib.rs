//! Intake Core
//!
//! Layered architecture:
//! - domain: intake record, payloads and error types
//! - normalize / validation: field formatting and submit-time rules
//! - store: local fallback store over an injected key-value capability
//! - probe: debounced duplicate lookup contract
//! - pipeline: webhook submission state machine

pub mod config;
pub mod domain;
pub mod normalize;
pub mod pipeline;
pub mod probe;
pub mod store;
pub mod validation;

pub use config::IntakeConfig;
pub use domain::{
    is_referral, ClientIntake, ErrorKind, Field, PendingSubmission, RecentClient, SubmitError,
    WebhookPayload, DEFAULT_ASSIGNEE, NOTES_MAX_CHARS, REFERRAL_MARKER, SERVICE_TYPES,
    SOURCE_OPTIONS, STAFF_MEMBERS,
};
pub use normalize::{capitalize_words, format_phone, normalize_email, normalize_phone};
pub use pipeline::{
    Notice, NoticeAction, NoticeLevel, ReplayReport, SubmissionPipeline, SubmissionState,
    SubmitOutcome, WebhookResponse, WebhookTransport,
};
pub use probe::{
    ClientSummary, DuplicateCheckResponse, DuplicateLookup, DuplicateProber, LookupError,
    ProbeOutcome, ProbeTicket, DUPLICATE_PROBE_DELAY,
};
pub use store::{
    KeyValueStore, MemoryStore, PendingQueue, RecentClients, StoreError, PENDING_SUBMISSIONS_KEY,
    RECENT_CLIENTS_CAPACITY, RECENT_CLIENTS_KEY,
};
pub use validation::{validate, validate_field, FieldErrors, FieldIssue};
