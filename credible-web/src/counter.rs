//! `requestAnimationFrame` loop driving a stat counter.
use std::cell::RefCell;
use std::rc::Rc;

use credible_fx::CounterAnimation;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::apply::{Scope, apply};
use crate::dom;
use crate::page::with_page;

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Count `el` up per `anim`, one text update per frame.
///
/// The loop ends when the animation completes or `el` leaves the document.
pub fn run(el: HtmlElement, mut anim: CounterAnimation) {
    with_page(|page| page.counters_running += 1);
    let slot: FrameSlot = Rc::new(RefCell::new(None));
    let handle = Rc::clone(&slot);
    let scope = Scope::subject(el.clone());
    *slot.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
        if !el.is_connected() {
            log::debug!("counter element detached, stopping");
            finish(&handle, false);
            return;
        }
        let frame = anim.step(timestamp);
        apply(&scope, &[frame.text_effect()]);
        if frame.done {
            finish(&handle, true);
        } else if !request_frame(&handle) {
            finish(&handle, false);
        }
    }) as Box<dyn FnMut(f64)>));

    if !request_frame(&slot) {
        finish(&slot, false);
    }
}

fn request_frame(slot: &FrameSlot) -> bool {
    let Some(win) = dom::window() else {
        return false;
    };
    let borrowed = slot.borrow();
    let Some(callback) = borrowed.as_ref() else {
        return false;
    };
    match win.request_animation_frame(callback.as_ref().unchecked_ref()) {
        Ok(_) => true,
        Err(err) => {
            log::warn!("requestAnimationFrame failed: {}", dom::js_error_message(&err));
            false
        }
    }
}

fn finish(slot: &FrameSlot, completed: bool) {
    with_page(|page| {
        page.counters_running = page.counters_running.saturating_sub(1);
        if completed {
            page.counters_finished += 1;
        }
    });
    // Drop our handle so the closure is released once it returns.
    let _ = slot.borrow_mut().take();
}
