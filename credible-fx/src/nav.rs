//! Active navigation link highlighting.
use smallvec::smallvec;

use crate::effect::{Effect, Effects, Target, prop};

/// A link is active only when its `href` is exactly the current path.
#[must_use]
pub fn is_active_link(href: Option<&str>, current_path: &str) -> bool {
    href == Some(current_path)
}

/// Effects that mark one link as active, or nothing when it is not.
#[must_use]
pub fn link_effects(href: Option<&str>, current_path: &str, color: &str) -> Effects {
    if is_active_link(href, current_path) {
        smallvec![Effect::style(Target::Subject, prop::COLOR, color)]
    } else {
        Effects::new()
    }
}

/// Indices of the active links among `hrefs`.
pub fn active_indices<'a, I>(hrefs: I, current_path: &str) -> Vec<usize>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    hrefs
        .into_iter()
        .enumerate()
        .filter_map(|(idx, href)| is_active_link(href, current_path).then_some(idx))
        .collect()
}
