pub mod app;
pub mod auth;
pub mod components;
#[cfg(feature = "ssr")]
pub mod config;
#[cfg(feature = "ssr")]
pub mod error;
#[cfg(feature = "ssr")]
pub mod handlers;
pub mod ids;
#[cfg(feature = "ssr")]
pub mod middleware;
pub mod models;
pub mod pages;
pub mod server_fn;
#[cfg(feature = "ssr")]
pub mod services;
pub mod state;
#[cfg(feature = "ssr")]
pub mod supabase;
pub mod utils;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
