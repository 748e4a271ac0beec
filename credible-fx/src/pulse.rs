//! Repeating opacity pulse on the hero bars.
use smallvec::smallvec;

use crate::config::PulseCfg;
use crate::effect::{Effect, Effects, prop};

/// Repeat interval of the `index`-th bar.
#[must_use]
pub fn interval_ms(index: usize, cfg: &PulseCfg) -> u32 {
    let step = u32::try_from(index)
        .unwrap_or(u32::MAX)
        .saturating_mul(cfg.step_ms);
    cfg.base_interval_ms.saturating_add(step)
}

/// Effects of one pulse tick: dim, then ease back to full opacity.
#[must_use]
pub fn tick_effects(cfg: &PulseCfg) -> Effects {
    smallvec![
        Effect::subject_style(prop::OPACITY, cfg.dim_opacity.to_string()),
        Effect::after(
            cfg.restore_delay_ms,
            [
                Effect::subject_style(prop::TRANSITION, cfg.transition.clone()),
                Effect::subject_style(prop::OPACITY, "1"),
            ],
        ),
    ]
}

/// Times (ms after attach) at which the `index`-th bar pulses, up to `horizon_ms`.
pub fn tick_times(index: usize, horizon_ms: u64, cfg: &PulseCfg) -> impl Iterator<Item = u64> {
    let every = u64::from(interval_ms(index, cfg).max(1));
    (1..)
        .map(move |n| n * every)
        .take_while(move |at| *at <= horizon_ms)
}
