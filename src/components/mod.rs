//! UI Components
//!
//! Leptos components for the intake page.

mod confirm_button;
mod duplicate_banner;
mod field_inputs;
mod form_state;
mod intake_form;
mod pending_panel;
mod recent_clients;
mod title_bar;
mod toast_stack;

pub use intake_form::IntakeForm;
pub use pending_panel::PendingPanel;
pub use recent_clients::RecentClients;
pub use title_bar::TitleBar;
pub use toast_stack::ToastStack;
