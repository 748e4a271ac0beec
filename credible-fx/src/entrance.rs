//! One-shot entrance transitions for elements entering the viewport.
//!
//! Every watched element owns an [`EntrancePhase`]. Only the first
//! intersecting notification moves it forward; later notifications, duplicate
//! or not, produce nothing. The host may still unobserve the element, but
//! at-most-once playback does not depend on it.
use serde::Serialize;
use smallvec::smallvec;

use crate::config::{EntranceCfg, StaggerCfg};
use crate::effect::{Effect, Effects, prop};

/// Lifecycle of an entrance-watched element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntrancePhase {
    #[default]
    Unobserved,
    Observed,
    Animating,
    Animated,
}

/// Handle of an element inside a [`WatchSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct WatchId(usize);

/// Per-element entrance state for one observer.
#[derive(Debug, Clone, Default)]
pub struct WatchSet {
    phases: Vec<EntrancePhase>,
}

impl WatchSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start watching a new element.
    pub fn register(&mut self) -> WatchId {
        let id = WatchId(self.phases.len());
        self.phases.push(EntrancePhase::Observed);
        id
    }

    #[must_use]
    pub fn phase(&self, id: WatchId) -> EntrancePhase {
        self.phases.get(id.0).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Elements still waiting for their first intersection.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.phases
            .iter()
            .filter(|phase| **phase == EntrancePhase::Observed)
            .count()
    }

    /// Advance `id` on an intersection notification.
    ///
    /// Returns `true` exactly once per element: on the first notification
    /// that reports it as intersecting. The element is left in
    /// [`EntrancePhase::Animating`] until [`WatchSet::settle`].
    pub fn trigger(&mut self, id: WatchId, is_intersecting: bool) -> bool {
        let Some(phase) = self.phases.get_mut(id.0) else {
            return false;
        };
        if !is_intersecting || *phase != EntrancePhase::Observed {
            return false;
        }
        *phase = EntrancePhase::Animating;
        true
    }

    /// Mark a triggered element as done. Scheduling cannot be rolled back,
    /// so this is unconditional for animating elements.
    pub fn settle(&mut self, id: WatchId) {
        if let Some(phase) = self.phases.get_mut(id.0)
            && *phase == EntrancePhase::Animating
        {
            *phase = EntrancePhase::Animated;
        }
    }
}

/// Effects for a stat card crossing its entrance threshold.
///
/// The card snaps to its offset start, then eases into place after a short
/// delay, and is dropped from the observer.
#[must_use]
pub fn rise_effects(cfg: &EntranceCfg) -> Effects {
    smallvec![
        Effect::subject_style(prop::OPACITY, "0"),
        Effect::subject_style(prop::TRANSFORM, format!("translateY({}px)", cfg.offset_px)),
        Effect::after(
            cfg.delay_ms,
            [
                Effect::subject_style(prop::TRANSITION, cfg.transition.clone()),
                Effect::subject_style(prop::OPACITY, "1"),
                Effect::subject_style(prop::TRANSFORM, "translateY(0)"),
            ],
        ),
        Effect::Unobserve,
    ]
}

/// Handle an intersection notification for an entrance-watched element.
pub fn on_intersection(
    watch: &mut WatchSet,
    id: WatchId,
    is_intersecting: bool,
    cfg: &EntranceCfg,
) -> Effects {
    if !watch.trigger(id, is_intersecting) {
        return Effects::new();
    }
    let effects = rise_effects(cfg);
    watch.settle(id);
    effects
}

/// Effects for the `index`-th element of a cascading reveal.
///
/// Played at page-ready regardless of visibility.
#[must_use]
pub fn stagger_effects(index: usize, cfg: &StaggerCfg) -> Effects {
    let delay = u32::try_from(index)
        .unwrap_or(u32::MAX)
        .saturating_mul(cfg.step_ms);
    smallvec![
        Effect::subject_style(prop::OPACITY, "0"),
        Effect::subject_style(prop::TRANSFORM, format!("translateX({}px)", cfg.offset_px)),
        Effect::after(
            delay,
            [
                Effect::subject_style(prop::TRANSITION, cfg.transition.clone()),
                Effect::subject_style(prop::OPACITY, "1"),
                Effect::subject_style(prop::TRANSFORM, "translateX(0)"),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{Target, settled_style};

    #[test]
    fn registered_elements_start_observed() {
        let mut watch = WatchSet::new();
        let id = watch.register();
        assert_eq!(watch.phase(id), EntrancePhase::Observed);
        assert_eq!(watch.pending(), 1);
    }

    #[test]
    fn non_intersecting_notification_keeps_waiting() {
        let mut watch = WatchSet::new();
        let id = watch.register();
        let cfg = EntranceCfg::default();
        assert!(on_intersection(&mut watch, id, false, &cfg).is_empty());
        assert_eq!(watch.phase(id), EntrancePhase::Observed);
    }

    #[test]
    fn entrance_fires_once_under_repeated_notifications() {
        let mut watch = WatchSet::new();
        let id = watch.register();
        let cfg = EntranceCfg::default();
        let fired: usize = (0..5)
            .map(|_| usize::from(!on_intersection(&mut watch, id, true, &cfg).is_empty()))
            .sum();
        assert_eq!(fired, 1);
        assert_eq!(watch.phase(id), EntrancePhase::Animated);
        assert_eq!(watch.pending(), 0);
    }

    #[test]
    fn siblings_fire_independently() {
        let mut watch = WatchSet::new();
        let first = watch.register();
        let second = watch.register();
        assert!(watch.trigger(second, true));
        assert_eq!(watch.phase(second), EntrancePhase::Animating);
        watch.settle(second);
        assert_eq!(watch.phase(second), EntrancePhase::Animated);
        assert_eq!(watch.phase(first), EntrancePhase::Observed);
        assert!(watch.trigger(first, true));
    }

    #[test]
    fn unknown_handle_is_ignored() {
        let mut other = WatchSet::new();
        let foreign = other.register();
        let mut watch = WatchSet::new();
        assert!(!watch.trigger(foreign, true));
        assert_eq!(watch.phase(foreign), EntrancePhase::Unobserved);
    }

    #[test]
    fn rise_settles_visible_and_unobserves() {
        let effects = rise_effects(&EntranceCfg::default());
        assert_eq!(
            effects[1],
            Effect::subject_style(prop::TRANSFORM, "translateY(20px)")
        );
        assert_eq!(
            settled_style(&effects, &Target::Subject, prop::OPACITY),
            Some("1")
        );
        assert_eq!(
            settled_style(&effects, &Target::Subject, prop::TRANSITION),
            Some("all 0.6s ease")
        );
        assert!(matches!(effects[2], Effect::After { delay_ms: 100, .. }));
        assert_eq!(effects.last(), Some(&Effect::Unobserve));
    }

    #[test]
    fn stagger_delay_grows_with_index() {
        let cfg = StaggerCfg::default();
        let delays: Vec<u32> = (0..4)
            .filter_map(|idx| match &stagger_effects(idx, &cfg)[2] {
                Effect::After { delay_ms, .. } => Some(*delay_ms),
                _ => None,
            })
            .collect();
        assert_eq!(delays, vec![0, 200, 400, 600]);
        let effects = stagger_effects(1, &cfg);
        assert_eq!(
            effects[1],
            Effect::subject_style(prop::TRANSFORM, "translateX(-20px)")
        );
        assert_eq!(
            settled_style(&effects, &Target::Subject, prop::TRANSFORM),
            Some("translateX(0)")
        );
    }
}
