//! In-page anchor handling for smooth scrolling.
use serde::Serialize;

use crate::effect::{Effect, Target};

/// What to do with a click on an anchor link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnchorAction {
    /// Cancel the browser's own navigation.
    pub prevent_default: bool,
    /// Selector of the element to bring into view, if any.
    pub scroll_to: Option<String>,
}

impl AnchorAction {
    /// Effect for the host to run once it has confirmed the target exists.
    #[must_use]
    pub fn scroll_effect(&self) -> Option<Effect> {
        self.scroll_to.as_ref().map(|selector| Effect::ScrollIntoView {
            target: Target::Selector(selector.clone()),
        })
    }
}

/// Whether an href points inside the current page.
#[must_use]
pub fn is_in_page_anchor(href: &str) -> bool {
    href.starts_with('#')
}

/// Resolve a click on an anchor.
///
/// In-page links always suppress navigation. A bare `#` has no scroll
/// target; any other fragment is handed on as a selector, and a selector the
/// document cannot resolve scrolls nowhere.
#[must_use]
pub fn on_anchor_click(href: &str) -> AnchorAction {
    if !is_in_page_anchor(href) {
        return AnchorAction {
            prevent_default: false,
            scroll_to: None,
        };
    }
    AnchorAction {
        prevent_default: true,
        scroll_to: (href.len() > 1).then(|| href.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_link_scrolls_to_selector() {
        let action = on_anchor_click("#timeline");
        assert!(action.prevent_default);
        assert_eq!(action.scroll_to.as_deref(), Some("#timeline"));
        assert_eq!(
            action.scroll_effect(),
            Some(Effect::ScrollIntoView {
                target: Target::Selector("#timeline".into())
            })
        );
    }

    #[test]
    fn bare_hash_prevents_navigation_without_target() {
        let action = on_anchor_click("#");
        assert!(action.prevent_default);
        assert!(action.scroll_to.is_none());
        assert!(action.scroll_effect().is_none());
    }

    #[test]
    fn compound_fragment_is_passed_through_as_selector() {
        assert_eq!(on_anchor_click("#top.x").scroll_to.as_deref(), Some("#top.x"));
        assert_eq!(on_anchor_click("#1st").scroll_to.as_deref(), Some("#1st"));
    }

    #[test]
    fn external_links_are_left_alone() {
        let action = on_anchor_click("/notes/");
        assert!(!action.prevent_default);
        assert!(!is_in_page_anchor("https://example.com/#x"));
    }
}
