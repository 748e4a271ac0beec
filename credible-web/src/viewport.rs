//! Intersection-gated entrances and counters for stat cards.
use credible_fx::entrance::{self, WatchId};
use credible_fx::selectors::{STAT_CARD, STAT_VALUE, TIMELINE_ITEM};
use credible_fx::CounterAnimation;
use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

use crate::apply::{Scope, apply};
use crate::counter;
use crate::dom;
use crate::page::{config, with_page};

/// Wire every viewport-driven effect on the page.
pub fn attach(doc: &Document) {
    let cards = dom::select_all(doc, STAT_CARD);
    if !cards.is_empty() {
        attach_entrances(&cards);
        attach_counters(&cards);
    }
    stagger_timeline(doc);
}

fn attach_entrances(cards: &[HtmlElement]) {
    let cfg = config().entrance;
    let ids: Vec<WatchId> = with_page(|page| cards.iter().map(|_| page.entrances.register()).collect());
    let observed = observe(cards, cfg.threshold, &cfg.root_margin, move |idx, hit, el, observer| {
        let Some(id) = ids.get(idx).copied() else {
            return;
        };
        let effects = with_page(|page| {
            entrance::on_intersection(&mut page.entrances, id, hit, &page.config.entrance)
        });
        if !effects.is_empty() {
            apply(&Scope::observed(el.clone(), observer.clone()), &effects);
        }
    });
    if observed {
        log::debug!("entrance watch on {} card(s)", cards.len());
    }
}

fn attach_counters(cards: &[HtmlElement]) {
    let cfg = config().counter;
    let ids: Vec<WatchId> = with_page(|page| cards.iter().map(|_| page.counters.register()).collect());
    observe(cards, cfg.threshold, "0px", move |idx, hit, el, observer| {
        let Some(id) = ids.get(idx).copied() else {
            return;
        };
        if !with_page(|page| page.counters.trigger(id, hit)) {
            return;
        }
        observer.unobserve(el);
        with_page(|page| page.counters.settle(id));
        let Some(value) = dom::select_in(el, STAT_VALUE) else {
            log::debug!("stat card without {STAT_VALUE}");
            return;
        };
        let text = value.text_content().unwrap_or_default();
        let anim = with_page(|page| CounterAnimation::from_text(&text, &page.config.counter));
        counter::run(value, anim);
    });
}

/// Cascade the timeline items in at page-ready.
fn stagger_timeline(doc: &Document) {
    let cfg = config().stagger;
    let items = dom::select_all(doc, TIMELINE_ITEM);
    log::debug!("staggering {} timeline item(s)", items.len());
    for (idx, item) in items.into_iter().enumerate() {
        apply(&Scope::subject(item), &entrance::stagger_effects(idx, &cfg));
    }
}

/// Observe `elements` and call `on_entry(index, is_intersecting, element,
/// observer)` for each notification. Returns whether observation started.
fn observe<F>(elements: &[HtmlElement], threshold: f64, root_margin: &str, mut on_entry: F) -> bool
where
    F: FnMut(usize, bool, &HtmlElement, &IntersectionObserver) + 'static,
{
    let watched: Vec<HtmlElement> = elements.to_vec();
    let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            let target: Element = entry.target();
            if let Some(idx) = watched
                .iter()
                .position(|el| AsRef::<Element>::as_ref(el) == &target)
            {
                on_entry(idx, entry.is_intersecting(), &watched[idx], &observer);
            }
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(threshold));
    init.set_root_margin(root_margin);
    let observer =
        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(observer) => observer,
            Err(err) => {
                log::warn!("IntersectionObserver unavailable: {}", dom::js_error_message(&err));
                return false;
            }
        };
    callback.forget();
    for el in elements {
        observer.observe(el);
    }
    true
}
