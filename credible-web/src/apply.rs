//! Interpreter that plays core effect lists against the live document.
use credible_fx::{Effect, KeyValueStore, Target};
use wasm_bindgen::JsCast;
use web_sys::{
    Element, HtmlElement, IntersectionObserver, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition,
};

use crate::dom;
use crate::storage::WebStore;

/// Where the effects of one handler invocation land.
#[derive(Clone, Default)]
pub struct Scope {
    /// Element the handler ran for.
    pub subject: Option<HtmlElement>,
    /// Observer to detach the subject from on [`Effect::Unobserve`].
    pub observer: Option<IntersectionObserver>,
}

impl Scope {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            subject: None,
            observer: None,
        }
    }

    #[must_use]
    pub fn subject(el: HtmlElement) -> Self {
        Self {
            subject: Some(el),
            observer: None,
        }
    }

    #[must_use]
    pub fn observed(el: HtmlElement, observer: IntersectionObserver) -> Self {
        Self {
            subject: Some(el),
            observer: Some(observer),
        }
    }
}

/// Apply effects in order. Delayed effects run on a timer and keep the
/// subject but not the observer.
pub fn apply(scope: &Scope, effects: &[Effect]) {
    for effect in effects {
        apply_one(scope, effect);
    }
}

fn apply_one(scope: &Scope, effect: &Effect) {
    match effect {
        Effect::SetAttribute {
            target,
            name,
            value,
        } => {
            if let Some(el) = resolve(scope, target)
                && let Err(err) = el.set_attribute(name, value)
            {
                log::warn!("set {name} failed: {}", dom::js_error_message(&err));
            }
        }
        Effect::SetStyle {
            target,
            property,
            value,
        } => {
            if let Some(el) = resolve(scope, target).and_then(|el| el.dyn_into::<HtmlElement>().ok())
                && let Err(err) = el.style().set_property(property, value)
            {
                log::warn!("style {property} failed: {}", dom::js_error_message(&err));
            }
        }
        Effect::SetText { target, text } => {
            if let Some(el) = resolve(scope, target) {
                el.set_text_content(Some(text));
            }
        }
        Effect::Persist { key, value } => {
            if let Err(err) = WebStore.set(key, value) {
                log::warn!("could not persist {key}: {err}");
            }
        }
        Effect::ScrollIntoView { target } => {
            if let Some(el) = resolve(scope, target) {
                let opts = ScrollIntoViewOptions::new();
                opts.set_behavior(ScrollBehavior::Smooth);
                opts.set_block(ScrollLogicalPosition::Start);
                el.scroll_into_view_with_scroll_into_view_options(&opts);
            }
        }
        Effect::Unobserve => {
            if let (Some(observer), Some(el)) = (&scope.observer, &scope.subject) {
                observer.unobserve(el);
            }
        }
        Effect::After { delay_ms, effects } => {
            let delayed = Scope {
                subject: scope.subject.clone(),
                observer: None,
            };
            let effects = effects.clone();
            let delay = i32::try_from(*delay_ms).unwrap_or(i32::MAX);
            wasm_bindgen_futures::spawn_local(async move {
                match dom::sleep_ms(delay).await {
                    Ok(()) => apply(&delayed, &effects),
                    Err(err) => log::warn!("timer failed: {}", dom::js_error_message(&err)),
                }
            });
        }
    }
}

fn resolve(scope: &Scope, target: &Target) -> Option<Element> {
    match target {
        Target::Root => dom::document().and_then(|doc| doc.document_element()),
        Target::Subject => scope.subject.clone().map(Element::from),
        Target::Selector(selector) => dom::document()
            .and_then(|doc| doc.query_selector(selector).ok())
            .flatten(),
    }
}
