pub mod app;
pub mod config;
pub mod domain;
pub mod layout;
pub mod shared;

use wasm_bindgen::prelude::wasm_bindgen;

#[wasm_bindgen(start)]
pub fn start() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(config::config().log_level);
    console_error_panic_hook::set_once();

    log::info!("API base: {}", config::config().api_base_url);
    leptos::mount::mount_to_body(app::App);
}
