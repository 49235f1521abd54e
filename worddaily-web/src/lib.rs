#![forbid(unsafe_code)]
//! Browser host for the Word Daily streak engine.
//!
//! Provides the `localStorage` store and browser clock the engine needs, plus
//! the `wasm-bindgen` exports the UI calls.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod api;
pub mod bindings;
pub mod dom;
pub mod storage;

pub use api::{ApiError, StreakApi};
pub use storage::{BrowserClock, BrowserStore, BrowserStoreError, date_from_js_parts};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    log::debug!("worddaily-web loaded");
}
