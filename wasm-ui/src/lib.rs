//! Web UI for the movie review API
//!
//! A Yew single-page application that discovers every URL it needs from
//! the API root document and follows the links the server returns.

mod account;
mod app;
mod components;
mod http;
mod movies;
mod router;

use wasm_bindgen::prelude::*;

/// Entry point for the WASM application.
#[wasm_bindgen(start)]
pub fn run_app() {
    // Initialize panic hook for better error messages
    console_error_panic_hook::set_once();

    // Mount the Yew app
    yew::Renderer::<app::App>::new().render();
}
