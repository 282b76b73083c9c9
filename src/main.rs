//! Lapa Frontend Entry Point

mod app;
mod components;
mod config;
mod context;
mod format;
mod forms;
mod gateway;
mod list_sync;
mod modal;
mod models;
mod panel;
mod rating;
mod schedule;
mod store;
mod toast;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::load();
    if console_log::init_with_level(config.log_level()).is_err() {
        web_sys::console::warn_1(&"[APP] logger already initialised".into());
    }
    log::info!("[APP] starting with {} panels", config.panels.len());

    mount_to_body(move || view! { <App config=config /> });
}
