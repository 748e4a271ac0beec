//! Ambient decoration: hero bar pulses, marker hover, inspiration parallax.
use std::cell::Cell;
use std::rc::Rc;

use credible_fx::selectors::{HERO_BAR, PARALLAX_SECTION, TIMELINE_MARKER};
use credible_fx::{Hover, hover, parallax, pulse};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement};

use crate::apply::{Scope, apply};
use crate::dom;
use crate::page::{config, with_page};

pub fn attach(doc: &Document) {
    start_pulses(doc);
    attach_hover(doc);
    attach_parallax();
}

/// Start one repeating pulse per hero bar, staggered by index.
///
/// An interval clears itself on the first tick after its bar is removed.
pub fn start_pulses(doc: &Document) {
    let Some(win) = dom::window() else {
        return;
    };
    let cfg = config().pulse;
    for (idx, bar) in dom::select_all(doc, HERO_BAR).into_iter().enumerate() {
        let every = i32::try_from(pulse::interval_ms(idx, &cfg)).unwrap_or(i32::MAX);
        let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let own_handle = Rc::clone(&handle);
        let tick = Closure::wrap(Box::new(move || {
            if !bar.is_connected() {
                stop_pulse(&own_handle);
                return;
            }
            let effects = with_page(|page| pulse::tick_effects(&page.config.pulse));
            apply(&Scope::subject(bar.clone()), &effects);
        }) as Box<dyn FnMut()>);

        match win.set_interval_with_callback_and_timeout_and_arguments_0(
            tick.as_ref().unchecked_ref(),
            every,
        ) {
            Ok(id) => {
                handle.set(Some(id));
                with_page(|page| page.pulses_active += 1);
                tick.forget();
            }
            Err(err) => log::warn!("pulse {idx} not scheduled: {}", dom::js_error_message(&err)),
        }
    }
}

fn stop_pulse(handle: &Cell<Option<i32>>) {
    let Some(id) = handle.take() else {
        return;
    };
    if let Some(win) = dom::window() {
        win.clear_interval_with_handle(id);
    }
    with_page(|page| page.pulses_active = page.pulses_active.saturating_sub(1));
    log::debug!("pulse {id} cleared, bar detached");
}

fn attach_hover(doc: &Document) {
    for marker in dom::select_all(doc, TIMELINE_MARKER) {
        for (event, kind) in [("mouseenter", Hover::Enter), ("mouseleave", Hover::Leave)] {
            let subject = marker.clone();
            dom::listen(&marker, event, move |_event| on_hover(&subject, kind));
        }
    }
}

/// Apply the hover transform for `kind` to a marker.
pub fn on_hover(marker: &HtmlElement, kind: Hover) {
    let effects = with_page(|page| hover::hover_effects(kind, &page.config.hover));
    apply(&Scope::subject(marker.clone()), &effects);
}

fn attach_parallax() {
    let Some(win) = dom::window() else {
        return;
    };
    dom::listen(&win, "scroll", move |_event| on_scroll());
}

/// Reposition the parallax section for the current scroll offset.
pub fn on_scroll() {
    let Some(win) = dom::window() else {
        return;
    };
    let scroll_y = win.scroll_y().unwrap_or_default();
    let section = win
        .document()
        .and_then(|doc| doc.query_selector(PARALLAX_SECTION).ok().flatten())
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());
    let effects = with_page(|page| parallax::on_scroll(scroll_y, section.is_some(), &page.config.parallax));
    if let Some(section) = section {
        apply(&Scope::subject(section), &effects);
    }
}
