//! Read-only state hook for automated browser checks.
use js_sys::{Function, Object, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::dom;
use crate::page;

const BRIDGE_KEY: &str = "__credibleFx";

/// Whether the page was opened with `test=1` in its query string.
#[must_use]
pub fn enabled() -> bool {
    dom::window()
        .and_then(|win| win.location().search().ok())
        .is_some_and(|search| query_enables(&search))
}

fn query_enables(search: &str) -> bool {
    search
        .trim_start_matches('?')
        .split('&')
        .any(|pair| pair == "test=1")
}

/// Install `window.__credibleFx.state()` when test mode is on.
pub fn install() {
    if !enabled() {
        return;
    }
    let Some(win) = dom::window() else {
        return;
    };
    let bridge = Object::new();
    let state = Closure::wrap(Box::new(|| {
        serde_wasm_bindgen::to_value(&page::snapshot()).unwrap_or_else(|err| {
            log::warn!("snapshot not serializable: {err}");
            JsValue::NULL
        })
    }) as Box<dyn Fn() -> JsValue>);
    let state_fn: &Function = state.as_ref().unchecked_ref();
    if let Err(err) = Reflect::set(&bridge, &JsValue::from_str("state"), state_fn)
        .and_then(|_| Reflect::set(&win, &JsValue::from_str(BRIDGE_KEY), &bridge))
    {
        log::warn!("test bridge not installed: {}", dom::js_error_message(&err));
        return;
    }
    state.forget();
    log::info!("test bridge installed at window.{BRIDGE_KEY}");
}
