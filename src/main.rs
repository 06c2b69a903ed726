//! Client Intake Frontend Entry Point

mod app;
mod browser_store;
mod commands;
mod components;
mod console_log;
mod context;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    console_log::init(log::LevelFilter::Info);
    mount_to_body(App);
}
