//! Web UI for dynaform-rs
//!
//! A Yew-based web interface for the schema-driven dynamic form:
//! pick a form type, fill in the generated fields, and manage the
//! submitted entries.

mod app;
mod components;

use wasm_bindgen::prelude::*;

/// Entry point for the WASM application.
#[wasm_bindgen(start)]
pub fn run_app() {
    // Initialize panic hook for better error messages
    console_error_panic_hook::set_once();

    // Mount the Yew app
    yew::Renderer::<app::App>::new().render();
}
