//! Pointer hover scaling for timeline markers.
use serde::Serialize;
use smallvec::smallvec;

use crate::config::HoverCfg;
use crate::effect::{Effect, Effects, prop};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Hover {
    Enter,
    Leave,
}

#[must_use]
pub fn hover_effects(event: Hover, cfg: &HoverCfg) -> Effects {
    match event {
        Hover::Enter => smallvec![
            Effect::subject_style(prop::TRANSFORM, format!("scale({})", cfg.scale)),
            Effect::subject_style(prop::TRANSITION, cfg.transition.clone()),
        ],
        Hover::Leave => smallvec![Effect::subject_style(prop::TRANSFORM, "scale(1)")],
    }
}
