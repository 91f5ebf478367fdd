#![allow(dead_code)]
//! Todo List Frontend Entry Point

mod action;
mod app;
mod browser;
mod config;
mod context;
mod env;
mod models;
mod subscriptions;
mod update;
mod view;

use app::App;
use config::Config;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let config = browser::read_config();
    let level = config.as_ref().map_or(Some(log::Level::Info), Config::level);
    if let Some(level) = level {
        if let Err(err) = console_log::init_with_level(level) {
            web_sys::console::warn_1(&format!("logger already set: {}", err).into());
        }
    }
    let config = config.unwrap_or_else(|err| {
        log::warn!("using default config: {}", err);
        Config::default()
    });

    log::info!("starting todo app");
    mount_to_body(move || view! { <App config=config /> });
}
