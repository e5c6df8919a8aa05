//! DocBook browser client.
//!
//! SYSTEM CONTEXT
//! ==============
//! A Leptos app for booking doctor appointments against an external REST
//! backend. Built with `hydrate` for the browser bundle and `ssr` for the
//! Axum host that renders the first paint.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
