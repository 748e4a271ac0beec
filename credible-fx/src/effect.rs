//! Declarative side effects produced by the presentation handlers.
//!
//! Handlers never touch a document directly. They describe the mutations a
//! host should perform, which keeps every transition testable without a
//! browser.
use serde::Serialize;
use smallvec::SmallVec;

/// CSS property names the handlers write.
pub mod prop {
    pub const OPACITY: &str = "opacity";
    pub const TRANSFORM: &str = "transform";
    pub const TRANSITION: &str = "transition";
    pub const COLOR: &str = "color";
}

/// Effect list returned by a single handler invocation.
pub type Effects = SmallVec<[Effect; 4]>;

/// Element an effect applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// The document root (`<html>`).
    Root,
    /// The element whose event produced the effect.
    Subject,
    /// First element matching a CSS selector.
    Selector(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    SetAttribute {
        target: Target,
        name: &'static str,
        value: String,
    },
    /// Set an inline style property. An empty value clears it.
    SetStyle {
        target: Target,
        property: &'static str,
        value: String,
    },
    SetText {
        target: Target,
        text: String,
    },
    /// Write a key/value pair to the durable store.
    Persist { key: &'static str, value: String },
    /// Smooth-scroll the target into view, top edge aligned.
    ScrollIntoView { target: Target },
    /// Stop watching the subject for intersection changes.
    Unobserve,
    /// Run nested effects after a delay.
    After { delay_ms: u32, effects: Vec<Effect> },
}

impl Effect {
    #[must_use]
    pub fn style(target: Target, property: &'static str, value: impl Into<String>) -> Self {
        Self::SetStyle {
            target,
            property,
            value: value.into(),
        }
    }

    /// Style the subject element.
    #[must_use]
    pub fn subject_style(property: &'static str, value: impl Into<String>) -> Self {
        Self::style(Target::Subject, property, value)
    }

    #[must_use]
    pub fn after(delay_ms: u32, effects: impl IntoIterator<Item = Effect>) -> Self {
        Self::After {
            delay_ms,
            effects: effects.into_iter().collect(),
        }
    }

}

/// Final inline value of `property` on `target` once every effect, including
/// delayed ones, has run in order.
#[must_use]
pub fn settled_style<'a>(effects: &'a [Effect], target: &Target, property: &str) -> Option<&'a str> {
    let mut last = None;
    for effect in effects {
        match effect {
            Effect::SetStyle {
                target: t,
                property: p,
                value,
            } if t == target && *p == property => last = Some(value.as_str()),
            Effect::After { effects, .. } => {
                if let Some(value) = settled_style(effects, target, property) {
                    last = Some(value);
                }
            }
            _ => {}
        }
    }
    last
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settled_style_follows_delayed_writes() {
        let effects = vec![
            Effect::subject_style(prop::OPACITY, "0"),
            Effect::after(100, [Effect::subject_style(prop::OPACITY, "1")]),
        ];
        assert_eq!(
            settled_style(&effects, &Target::Subject, prop::OPACITY),
            Some("1")
        );
        assert_eq!(settled_style(&effects, &Target::Root, prop::OPACITY), None);
    }

    #[test]
    fn effects_serialize_with_snake_case_tags() {
        let json = serde_json::to_string(&Effect::ScrollIntoView {
            target: Target::Selector("#about".into()),
        })
        .unwrap();
        assert_eq!(json, r##"{"scroll_into_view":{"target":{"selector":"#about"}}}"##);
    }
}
