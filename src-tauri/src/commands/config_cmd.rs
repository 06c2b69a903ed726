//! Configuration Commands

use intake_core::IntakeConfig;
use tauri::State;

use crate::AppState;

/// Resolved intake configuration
#[tauri::command]
pub async fn get_intake_config(state: State<'_, AppState>) -> Result<IntakeConfig, String> {
    Ok(state.config.clone())
}
