//! Smooth scrolling for in-page anchors.
use credible_fx::on_anchor_click;
use credible_fx::selectors::IN_PAGE_ANCHOR;
use web_sys::Document;

use crate::apply::{Scope, apply};
use crate::dom;

pub fn attach(doc: &Document) {
    let anchors = dom::select_all(doc, IN_PAGE_ANCHOR);
    log::debug!("smooth scroll on {} anchor(s)", anchors.len());
    for anchor in anchors {
        let link = anchor.clone();
        dom::listen(&anchor, "click", move |event| {
            let href = link.get_attribute("href").unwrap_or_default();
            let action = on_anchor_click(&href);
            if action.prevent_default {
                event.prevent_default();
            }
            if let Some(effect) = action.scroll_effect() {
                apply(&Scope::none(), &[effect]);
            }
        });
    }
}
