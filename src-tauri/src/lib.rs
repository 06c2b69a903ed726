//! Client Intake Backend
//!
//! Layered architecture:
//! - config: webhook and lookup settings
//! - client: outbound HTTP (webhook, duplicate lookup)
//! - commands: Tauri command handlers

use tauri::Manager;

mod client;
mod commands;
mod config;

use client::{DuplicateClient, WebhookClient};
use intake_core::IntakeConfig;

/// Application state shared across commands
pub struct AppState {
    pub config: IntakeConfig,
    pub webhook: WebhookClient,
    pub duplicates: DuplicateClient,
}

impl AppState {
    pub fn new(config: IntakeConfig) -> Self {
        let http = client::http_client();
        let duplicates = DuplicateClient::new(
            http.clone(),
            config.duplicate_lookup_endpoint().map(str::to_string),
        );
        Self {
            webhook: WebhookClient::new(http),
            duplicates,
            config,
        }
    }
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .setup(|app| {
            // Single instance check - must be first!
            #[cfg(desktop)]
            app.handle().plugin(tauri_plugin_single_instance::init(|_app, _args, _cwd| {
                // Focus the existing window when a new instance tries to start
                if let Some(window) = _app.get_webview_window("main") {
                    let _ = window.set_focus();
                }
            }))?;

            let app_handle = app.handle().clone();

            // Initialize logging
            let log_dir = app_handle.path().app_log_dir()?;
            if let Err(e) = rolling_logger::init_logger(log_dir, "ClientIntake") {
                eprintln!("[{}] Logger unavailable: {}", chrono::Local::now().format("%H:%M:%S%.3f"), e);
            }

            let config_dir = app_handle.path().app_config_dir()?;
            let config = config::load_config(&config_dir);
            match config.webhook_endpoint() {
                Some(url) => log::info!("Webhook endpoint: {}", url),
                None => rolling_logger::warn(
                    "No webhook endpoint configured; submissions will be queued locally",
                ),
            }
            if config.duplicate_lookup_endpoint().is_none() {
                log::info!("Duplicate lookup disabled");
            }

            app.manage(AppState::new(config));
            rolling_logger::info("App setup complete");
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::get_intake_config,
            commands::post_webhook,
            commands::probe_duplicate,
            commands::open_external,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
