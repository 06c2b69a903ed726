//! External Link Command Wrappers

use serde::Serialize;

use super::{call, to_args};

#[derive(Serialize)]
struct UrlArgs<'a> {
    url: &'a str,
}

/// Opens a dashboard / record link in the system browser
pub async fn open_external(url: &str) -> Result<(), String> {
    let args = to_args(&UrlArgs { url })?;
    call("open_external", args).await
}
