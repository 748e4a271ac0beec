//! Browser bindings for the Credible dashboard effects.
//!
//! Every handler here reads the DOM, asks `credible-fx` what should change,
//! and applies the answer. Behaviors whose elements are missing are skipped.
#![forbid(unsafe_code)]

pub mod anchors;
pub mod apply;
pub mod bridge;
pub mod counter;
pub mod decor;
pub mod dom;
pub mod page;
pub mod storage;
pub mod theme;
pub mod viewport;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub use storage::{WebStorageError, WebStore};

/// Module entry point: logging, configuration, then wiring at DOM ready.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let config = page::load_config();
    let level = config
        .log_filter()
        .ok()
        .and_then(|filter| filter.to_level())
        .unwrap_or(log::Level::Info);
    if let Err(err) = console_log::init_with_level(level) {
        dom::console_error(&format!("logger already set: {err}"));
    }
    page::install(config);
    when_ready(init);
}

/// Attach every behavior to the current document.
pub fn init() {
    let Some(doc) = dom::document() else {
        dom::console_error("no document; effects disabled");
        return;
    };
    theme::attach(&doc);
    theme::highlight_nav(&doc);
    anchors::attach(&doc);
    viewport::attach(&doc);
    decor::attach(&doc);
    bridge::install();
    log::info!("dashboard initialized");
}

/// Run `f` once the document has been parsed.
pub fn when_ready(f: fn()) {
    let Some(doc) = dom::document() else {
        return;
    };
    if doc.ready_state() == "loading" {
        let mut pending = Some(f);
        dom::listen(&doc, "DOMContentLoaded", move |_event| {
            if let Some(f) = pending.take() {
                f();
            }
        });
    } else {
        f();
    }
}
