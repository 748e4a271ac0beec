//! Headless page model that plays effect lists against named elements.
//!
//! Delayed effects are queued on a virtual clock and run by
//! [`SimPage::advance`], in due order and then insertion order, which is how
//! the browser orders timers with distinct or equal deadlines.
use std::collections::BTreeMap;

use crate::effect::{Effect, Target};
use crate::{KeyValueStore, MemoryStore};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimElement {
    pub styles: BTreeMap<&'static str, String>,
    pub text: String,
    pub observed: bool,
}

#[derive(Debug, Clone)]
struct Timer {
    due_ms: u64,
    seq: u64,
    subject: Option<String>,
    effects: Vec<Effect>,
}

#[derive(Debug, Clone, Default)]
pub struct SimPage {
    now_ms: u64,
    seq: u64,
    root: BTreeMap<&'static str, String>,
    elements: BTreeMap<String, SimElement>,
    timers: Vec<Timer>,
    scrolled_to: Vec<String>,
    store: MemoryStore,
}

impl SimPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Page whose durable store survives from an earlier visit.
    #[must_use]
    pub fn with_store(store: MemoryStore) -> Self {
        Self {
            store,
            ..Self::default()
        }
    }

    /// Add an element and mark it as observed.
    pub fn insert(&mut self, name: &str) -> &mut SimElement {
        self.elements
            .entry(name.to_string())
            .or_insert_with(|| SimElement {
                observed: true,
                ..SimElement::default()
            })
    }

    #[must_use]
    pub const fn store(&self) -> &MemoryStore {
        &self.store
    }

    #[must_use]
    pub const fn now_ms(&self) -> u64 {
        self.now_ms
    }

    #[must_use]
    pub fn root_attribute(&self, name: &str) -> Option<&str> {
        self.root.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn element(&self, name: &str) -> Option<&SimElement> {
        self.elements.get(name)
    }

    #[must_use]
    pub fn style(&self, name: &str, property: &str) -> Option<&str> {
        self.elements
            .get(name)
            .and_then(|el| el.styles.get(property))
            .map(String::as_str)
    }

    #[must_use]
    pub fn scrolled_to(&self) -> &[String] {
        &self.scrolled_to
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Apply effects produced for `subject`.
    pub fn apply(&mut self, subject: Option<&str>, effects: &[Effect]) {
        for effect in effects {
            self.apply_one(subject, effect);
        }
    }

    /// Move the virtual clock forward, firing due timers.
    pub fn advance(&mut self, ms: u64) {
        let until = self.now_ms.saturating_add(ms);
        loop {
            let next = self
                .timers
                .iter()
                .enumerate()
                .filter(|(_, t)| t.due_ms <= until)
                .min_by_key(|(_, t)| (t.due_ms, t.seq))
                .map(|(idx, _)| idx);
            let Some(idx) = next else {
                break;
            };
            let timer = self.timers.remove(idx);
            self.now_ms = timer.due_ms;
            self.apply(timer.subject.as_deref(), &timer.effects);
        }
        self.now_ms = until;
    }

    fn apply_one(&mut self, subject: Option<&str>, effect: &Effect) {
        match effect {
            Effect::SetAttribute {
                target: Target::Root,
                name,
                value,
            } => {
                self.root.insert(*name, value.clone());
            }
            Effect::SetAttribute { .. } => {}
            Effect::SetStyle {
                target,
                property,
                value,
            } => {
                if let Some(el) = self.resolve(subject, target) {
                    if value.is_empty() {
                        el.styles.remove(property);
                    } else {
                        el.styles.insert(*property, value.clone());
                    }
                }
            }
            Effect::SetText { target, text } => {
                if let Some(el) = self.resolve(subject, target) {
                    el.text.clone_from(text);
                }
            }
            Effect::Persist { key, value } => {
                let Ok(()) = self.store.set(key, value);
            }
            Effect::ScrollIntoView { target } => {
                if let Target::Selector(selector) = target
                    && self.elements.contains_key(selector)
                {
                    self.scrolled_to.push(selector.clone());
                }
            }
            Effect::Unobserve => {
                if let Some(el) = subject.and_then(|name| self.elements.get_mut(name)) {
                    el.observed = false;
                }
            }
            Effect::After { delay_ms, effects } => {
                self.seq += 1;
                self.timers.push(Timer {
                    due_ms: self.now_ms.saturating_add(u64::from(*delay_ms)),
                    seq: self.seq,
                    subject: subject.map(str::to_string),
                    effects: effects.clone(),
                });
            }
        }
    }

    fn resolve(&mut self, subject: Option<&str>, target: &Target) -> Option<&mut SimElement> {
        match target {
            Target::Root => None,
            Target::Subject => subject.and_then(|name| self.elements.get_mut(name)),
            Target::Selector(selector) => self.elements.get_mut(selector),
        }
    }
}
