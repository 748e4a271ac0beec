//! Theme toggle and active navigation highlighting.
use credible_fx::selectors::{NAV_LINK, THEME_TOGGLE_ID};
use credible_fx::{THEME_ATTRIBUTE, ThemeState, nav};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use crate::apply::{Scope, apply};
use crate::dom;
use crate::page::with_page;
use crate::storage::WebStore;

/// Apply the persisted theme and wire the toggle control.
pub fn attach(doc: &Document) {
    let state = ThemeState::load(&WebStore);
    with_page(|page| page.theme = state);
    apply(&Scope::none(), &state.on_ready());
    log::debug!("theme {} applied", state.applied());

    let Some(toggle) = doc
        .get_element_by_id(THEME_TOGGLE_ID)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        log::debug!("no #{THEME_TOGGLE_ID} on page");
        return;
    };
    let subject = toggle.clone();
    dom::listen(&toggle, "click", move |_event| toggle_theme(&subject));
}

/// Flip the theme as if the toggle control had been clicked.
pub fn toggle_theme(toggle: &HtmlElement) {
    let root_attr = dom::document()
        .and_then(|doc| doc.document_element())
        .and_then(|root| root.get_attribute(THEME_ATTRIBUTE));
    let effects = with_page(|page| {
        let (next, effects) = page.theme.on_toggle(root_attr.as_deref(), &page.config.theme);
        page.theme = next;
        log::info!("theme switched to {}", next.applied());
        effects
    });
    apply(&Scope::subject(toggle.clone()), &effects);
}

/// Color the navigation link that points at the current page.
pub fn highlight_nav(doc: &Document) {
    let path = dom::window()
        .and_then(|win| win.location().pathname().ok())
        .unwrap_or_default();
    let color = with_page(|page| page.config.theme.active_link_color.clone());
    let mut active = 0;
    for link in dom::select_all(doc, NAV_LINK) {
        let effects = nav::link_effects(link.get_attribute("href").as_deref(), &path, &color);
        if !effects.is_empty() {
            active += 1;
            apply(&Scope::subject(link), &effects);
        }
    }
    log::debug!("{active} nav link(s) active for {path}");
}
