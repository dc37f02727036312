#![allow(warnings)]
//! Wishadv Frontend Entry Point

mod models;
mod media;
mod storage;
mod basket;
mod itinerary;
mod route;
mod config;
mod commands;
mod persistence;
mod context;
mod store;
mod components;
mod app;
mod tests;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::from_document();
    if let Err(e) = rolling_logger::RollingLogger::init(config.log_level, config.log_capacity) {
        web_sys::console::warn_1(&format!("[APP] Logger already set: {}", e).into());
    }

    mount_to_body(move || view! { <App config=config.clone() /> });
}
