//! Tauri Command Wrappers
//!
//! Frontend bindings to backend commands, organized by domain.

mod config;
mod duplicate;
mod link;
mod webhook;

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "core"], catch)]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

// Re-export all public items
pub use config::*;
pub use duplicate::*;
pub use link::*;
pub use webhook::*;

/// Serializes command args as plain JS objects (flattened structs included)
fn to_args<T: Serialize>(args: &T) -> Result<JsValue, String> {
    args.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| format!("Serialization error: {}", e))
}

/// Invokes `cmd`; a rejected promise (command `Err`, or no Tauri host) becomes `Err`
async fn call<T: DeserializeOwned>(cmd: &str, args: JsValue) -> Result<T, String> {
    let result = invoke(cmd, args).await.map_err(|e| {
        e.as_string().unwrap_or_else(|| format!("{} failed: {:?}", cmd, e))
    })?;
    serde_wasm_bindgen::from_value(result).map_err(|e| format!("Response error: {}", e))
}
