//! Configuration Command Wrappers

use intake_core::IntakeConfig;
use wasm_bindgen::JsValue;

use super::call;

/// Resolved webhook / lookup settings from the host
pub async fn get_intake_config() -> Result<IntakeConfig, String> {
    call("get_intake_config", JsValue::NULL).await
}
