//! # client
//!
//! Leptos + WASM front end for the LearnMart course marketplace.
//!
//! This crate contains pages, components, the session store, network types,
//! and the REST helpers that talk to the course API. The `ssr` feature is
//! consumed by the host binary to render the shell; the `hydrate` feature
//! builds the browser bundle.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: installs console logging and hydrates the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
