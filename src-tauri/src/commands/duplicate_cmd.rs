//! Duplicate Lookup Commands

use intake_core::ClientSummary;
use tauri::State;

use crate::AppState;

#[tauri::command]
pub async fn probe_duplicate(
    state: State<'_, AppState>,
    email: String,
    phone: String,
) -> Result<Option<ClientSummary>, String> {
    state.duplicates.lookup(&email, &phone).await
}
