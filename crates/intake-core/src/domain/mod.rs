//! Domain Layer
//!
//! The intake record as staff edit it, and the records derived from it.

mod error;
mod intake;
mod payload;

pub use error::{ErrorKind, SubmitError};
pub use intake::{
    is_referral, ClientIntake, Field, DEFAULT_ASSIGNEE, NOTES_MAX_CHARS, REFERRAL_MARKER,
    SERVICE_TYPES, SOURCE_OPTIONS, STAFF_MEMBERS,
};
pub use payload::{PendingSubmission, RecentClient, WebhookPayload};
