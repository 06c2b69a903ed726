//! Commands Layer
//!
//! Tauri command handlers that bridge frontend to backend services.

mod config_cmd;
mod duplicate_cmd;
mod link_cmd;
mod webhook_cmd;

pub use config_cmd::*;
pub use duplicate_cmd::*;
pub use link_cmd::*;
pub use webhook_cmd::*;
