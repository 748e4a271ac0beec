//! Frame-driven numeric counters for stat values.
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::config::CounterCfg;
use crate::effect::{Effect, Target};

static LEADING_INT: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[\s\u{feff}]*([+-]?\d+)").ok());

/// Target value read from a stat's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CounterEnd {
    Number(i64),
    /// The text did not start with an integer; displayed as `NaN`.
    NotANumber,
}

impl CounterEnd {
    /// Read the integer prefix of `text`: leading whitespace, an optional
    /// sign, then digits. Trailing content such as `%` or `+` is ignored.
    /// Prefixes beyond the `i64` range saturate.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let Some(digits) = LEADING_INT
            .as_ref()
            .and_then(|re| re.captures(text))
            .and_then(|caps| caps.get(1))
        else {
            return Self::NotANumber;
        };
        let digits = digits.as_str();
        let saturated = if digits.starts_with('-') {
            i64::MIN
        } else {
            i64::MAX
        };
        Self::Number(digits.parse().unwrap_or(saturated))
    }
}

/// One frame of a counter run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CounterFrame {
    pub text: String,
    /// No further frames are needed.
    pub done: bool,
}

impl CounterFrame {
    /// Effect writing this frame's value into the counter element.
    #[must_use]
    pub fn text_effect(&self) -> Effect {
        Effect::SetText {
            target: Target::Subject,
            text: self.text.clone(),
        }
    }
}

/// Transient state of a single counter run.
///
/// The first frame timestamp becomes the start of the run, so progress is
/// measured in the host's frame clock.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterAnimation {
    start: i64,
    end: CounterEnd,
    duration_ms: f64,
    started_at: Option<f64>,
}

impl CounterAnimation {
    #[must_use]
    pub fn new(start: i64, end: CounterEnd, duration_ms: u32) -> Self {
        Self {
            start,
            end,
            duration_ms: f64::from(duration_ms.max(1)),
            started_at: None,
        }
    }

    /// Counter from zero towards the number found in `text`.
    #[must_use]
    pub fn from_text(text: &str, cfg: &CounterCfg) -> Self {
        Self::new(0, CounterEnd::parse(text), cfg.duration_ms)
    }

    /// Progress fraction in `[0, 1]` at `timestamp`.
    #[must_use]
    pub fn progress(&self, timestamp: f64) -> f64 {
        let Some(started) = self.started_at else {
            return 0.0;
        };
        ((timestamp - started) / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Advance to the frame at `timestamp` (milliseconds, host clock).
    pub fn step(&mut self, timestamp: f64) -> CounterFrame {
        if self.started_at.is_none() {
            self.started_at = Some(timestamp);
        }
        let progress = self.progress(timestamp);
        CounterFrame {
            text: self.display_at(progress).to_string(),
            done: progress >= 1.0,
        }
    }

    /// Displayed value at a given progress fraction.
    #[must_use]
    pub fn display_at(&self, progress: f64) -> CounterValue {
        match self.end {
            CounterEnd::Number(end) => {
                CounterValue::Number(interpolate(self.start, end, progress.clamp(0.0, 1.0)))
            }
            CounterEnd::NotANumber => CounterValue::NotANumber,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CounterValue {
    Number(i64),
    NotANumber,
}

impl fmt::Display for CounterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::NotANumber => f.write_str("NaN"),
        }
    }
}

/// `floor(start + progress * (end - start))`, exact at both ends.
///
/// The span is taken in `f64`, so extreme endpoints cannot overflow; the
/// result saturates to the `i64` range.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn interpolate(start: i64, end: i64, progress: f64) -> i64 {
    if progress <= 0.0 {
        return start;
    }
    if progress >= 1.0 {
        return end;
    }
    let (start_f, end_f) = (start as f64, end as f64);
    (start_f + progress * (end_f - start_f)).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reads_integer_prefix() {
        assert_eq!(CounterEnd::parse("42"), CounterEnd::Number(42));
        assert_eq!(CounterEnd::parse("  87%"), CounterEnd::Number(87));
        assert_eq!(CounterEnd::parse("-3 claims"), CounterEnd::Number(-3));
        assert_eq!(CounterEnd::parse("+12"), CounterEnd::Number(12));
        assert_eq!(CounterEnd::parse("1,200"), CounterEnd::Number(1));
    }

    #[test]
    fn parse_without_digits_is_not_a_number() {
        assert_eq!(CounterEnd::parse(""), CounterEnd::NotANumber);
        assert_eq!(CounterEnd::parse("n/a"), CounterEnd::NotANumber);
        assert_eq!(CounterEnd::parse("$5"), CounterEnd::NotANumber);
    }

    #[test]
    fn counter_to_42_is_monotonic_and_exact() {
        let mut anim = CounterAnimation::new(0, CounterEnd::Number(42), 2000);
        let first = anim.step(1_000.0);
        assert_eq!(first.text, "0");
        assert!(!first.done);

        let mut last = 0;
        let mut t = 1_000.0;
        loop {
            t += 16.7;
            let frame = anim.step(t);
            let value: i64 = frame.text.parse().unwrap();
            assert!(value >= last, "counter went backwards at {t}");
            last = value;
            if frame.done {
                break;
            }
        }
        assert_eq!(last, 42);
        assert_eq!(anim.step(t + 500.0).text, "42");
    }

    #[test]
    fn midpoint_floors() {
        let anim = CounterAnimation::new(0, CounterEnd::Number(7), 2000);
        assert_eq!(anim.display_at(0.5), CounterValue::Number(3));
        assert_eq!(anim.display_at(0.0), CounterValue::Number(0));
        assert_eq!(anim.display_at(1.0), CounterValue::Number(7));
    }

    #[test]
    fn not_a_number_displays_nan_and_finishes() {
        let mut anim = CounterAnimation::from_text("TBD", &CounterCfg::default());
        assert_eq!(anim.step(0.0).text, "NaN");
        let frame = anim.step(2_000.0);
        assert_eq!(frame.text, "NaN");
        assert!(frame.done);
    }

    #[test]
    fn progress_is_zero_before_first_frame() {
        let anim = CounterAnimation::new(0, CounterEnd::Number(10), 2000);
        assert!(anim.progress(5_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn oversized_prefix_saturates_instead_of_nan() {
        assert_eq!(
            CounterEnd::parse("12345678901234567890"),
            CounterEnd::Number(i64::MAX)
        );
        assert_eq!(
            CounterEnd::parse("-99999999999999999999 units"),
            CounterEnd::Number(i64::MIN)
        );
        let mut anim = CounterAnimation::from_text("12345678901234567890", &CounterCfg::default());
        anim.step(0.0);
        let last = anim.step(2_000.0);
        assert_eq!(last.text, i64::MAX.to_string());
        assert!(last.done);
    }

    #[test]
    fn extreme_endpoints_do_not_overflow() {
        assert_eq!(interpolate(i64::MIN, i64::MAX, 0.0), i64::MIN);
        assert_eq!(interpolate(i64::MIN, i64::MAX, 1.0), i64::MAX);
        let mid = interpolate(i64::MIN, i64::MAX, 0.5);
        assert!(mid.abs() < 1_000_000, "midpoint {mid}");
        let mut anim = CounterAnimation::new(i64::MIN, CounterEnd::Number(i64::MAX), 2000);
        anim.step(0.0);
        assert!(!anim.step(1_000.0).done);
    }

    #[test]
    fn frame_text_becomes_a_subject_text_effect() {
        let mut anim = CounterAnimation::new(0, CounterEnd::Number(10), 100);
        anim.step(0.0);
        let frame = anim.step(100.0);
        assert_eq!(
            frame.text_effect(),
            Effect::SetText {
                target: Target::Subject,
                text: "10".into(),
            }
        );
    }

    #[test]
    fn interpolate_handles_negative_targets() {
        assert_eq!(interpolate(0, -10, 0.25), -3);
        assert_eq!(interpolate(0, -10, 1.0), -10);
    }
}
