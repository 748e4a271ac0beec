//! Scroll-linked parallax for the inspiration section.
use smallvec::smallvec;

use crate::config::ParallaxCfg;
use crate::effect::{Effect, Effects, prop};

#[must_use]
pub fn offset(scroll_y: f64, cfg: &ParallaxCfg) -> f64 {
    scroll_y * cfg.rate
}

#[must_use]
pub fn transform(scroll_y: f64, cfg: &ParallaxCfg) -> String {
    format!("translateY({}px)", offset(scroll_y, cfg))
}

/// Effects for a scroll event. Nothing when the section is missing.
#[must_use]
pub fn on_scroll(scroll_y: f64, section_present: bool, cfg: &ParallaxCfg) -> Effects {
    if section_present {
        smallvec![Effect::subject_style(prop::TRANSFORM, transform(scroll_y, cfg))]
    } else {
        Effects::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_thirty_percent_of_scroll() {
        let cfg = ParallaxCfg::default();
        for scroll in [0.0, 1.0, 250.0, 1234.5] {
            assert!((offset(scroll, &cfg) - scroll * 0.3).abs() < f64::EPSILON * 1e4);
        }
        assert!(offset(0.0, &cfg).abs() < f64::EPSILON);
    }

    #[test]
    fn transform_formats_pixels() {
        let cfg = ParallaxCfg::default();
        assert_eq!(transform(0.0, &cfg), "translateY(0px)");
        assert_eq!(transform(100.0, &cfg), "translateY(30px)");
    }

    #[test]
    fn missing_section_is_a_no_op() {
        assert!(on_scroll(500.0, false, &ParallaxCfg::default()).is_empty());
        assert_eq!(on_scroll(10.0, true, &ParallaxCfg::default()).len(), 1);
    }
}
